// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while discovering worker types.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort worker type discovery.
///
/// Discovery is all-or-nothing: an ambiguous or broken plugin inventory
/// cannot be resolved later during wiring, so these are fatal rather than
/// skip-and-continue conditions.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Two worker types were registered under the same name.
    DuplicateWorkerType { name: String },

    /// The plugin directory could not be scanned.
    PluginDirUnreadable { path: PathBuf, source: io::Error },

    /// A plugin binary was found but could not be loaded.
    PluginLoadFailed { path: PathBuf, reason: String },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::DuplicateWorkerType { name } => {
                write!(
                    f,
                    "Worker type '{}' is registered more than once; plugin identity must be unambiguous",
                    name
                )
            }
            DiscoveryError::PluginDirUnreadable { path, source } => {
                write!(f, "Cannot scan plugin directory '{}': {}", path.display(), source)
            }
            DiscoveryError::PluginLoadFailed { path, reason } => {
                write!(f, "Failed to load plugin binary '{}': {}", path.display(), reason)
            }
        }
    }
}

impl Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiscoveryError::PluginDirUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}
