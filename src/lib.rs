// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // configuration documents + endpoint notation
pub mod engine;        // discovery, graph build, wiring, serialization
pub mod errors;        // error handling
pub mod observability; // structured load-time diagnostics
pub mod runtime;       // periodic worker scheduling
pub mod signal;        // scalar values, signatures, callbacks
pub mod traits;        // worker capability contract
pub mod workers;       // built-in worker implementations
