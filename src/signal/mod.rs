// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod callback;
mod signature;
mod value;

pub use callback::{BoundCallback, EmitterBank, EventCallback};
pub use signature::Signature;
pub use value::{ScalarKind, ScalarValue};
