// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod discovery;
mod wiring;

pub use discovery::DiscoveryError;
pub use wiring::{CoerceError, EndpointParseError};
