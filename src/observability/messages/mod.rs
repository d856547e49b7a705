// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Typed log messages emitted through `tracing` with structured fields.
pub trait StructuredLog {
    fn log(&self);
}

pub mod wiring;
