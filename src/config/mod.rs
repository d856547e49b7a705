// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod endpoint;
mod loader;

pub use endpoint::Endpoint;
pub use loader::{load_config, save_config, ConnectionConfig, ProjectConfig, ServiceConfig};
