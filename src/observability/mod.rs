// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for load-time diagnostics.
//!
//! Every drop/skip decision the engine makes while building and wiring a
//! graph is reported through a typed message rather than an inline format
//! string. Each message implements `Display` for human-readable output and
//! [`messages::StructuredLog`] to attach structured fields when logged
//! through `tracing`.

pub mod messages;
