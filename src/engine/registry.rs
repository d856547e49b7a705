// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Worker type discovery and name resolution.
//!
//! Discovery runs once at startup: the worker types compiled into the
//! binary are registered first, then the directory holding the running
//! executable is scanned for additional plugin binaries. Each binary is
//! loaded at most once and asked for its exported worker types.
//!
//! A plugin crate participates by exporting one symbol:
//!
//! ```ignore
//! #[no_mangle]
//! pub fn switchboard_worker_types() -> Vec<WorkerType> {
//!     vec![MyWorker::worker_type()]
//! }
//! ```
//!
//! Plugins must be built with the same toolchain and crate version as the
//! host; the export is a plain Rust ABI symbol, not a stable C interface.

use crate::errors::DiscoveryError;
use crate::traits::{PropertySpec, Worker};
use libloading::{Library, Symbol};
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Symbol scanned for in every candidate plugin binary.
pub const PLUGIN_EXPORT_SYMBOL: &[u8] = b"switchboard_worker_types";

/// A discovered worker type: name, factory, and declared property schema.
///
/// Immutable after discovery. The factory builds an unconfigured instance;
/// the builder is responsible for invoking `load_defaults` and applying
/// configuration overrides.
pub struct WorkerType {
    pub name: &'static str,
    pub factory: fn() -> Box<dyn Worker>,
    pub schema: &'static [PropertySpec],
}

impl fmt::Debug for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerType")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Name-to-type resolution for everything the process can instantiate.
pub struct WorkerRegistry {
    types: HashMap<String, WorkerType>,
    // Plugin binaries stay loaded for the life of the registry; their
    // factories point into plugin code.
    libraries: Vec<Library>,
    scanned: HashSet<PathBuf>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            libraries: Vec::new(),
            scanned: HashSet::new(),
        }
    }

    /// Register the built-in worker types, then scan the directory beside
    /// the current executable for plugin binaries.
    pub fn discover() -> Result<Self, DiscoveryError> {
        let mut registry = Self::new();
        for worker_type in crate::workers::built_in_types() {
            registry.register(worker_type)?;
        }
        if let Some(dir) = exe_dir() {
            let loaded = registry.load_plugins(&dir)?;
            if loaded > 0 {
                tracing::info!(plugin_types = loaded, dir = %dir.display(), "plugin scan complete");
            }
        }
        Ok(registry)
    }

    /// Register one worker type.
    ///
    /// A second registration under an already-used name aborts discovery:
    /// ambiguous plugin identity cannot be resolved later during wiring.
    pub fn register(&mut self, worker_type: WorkerType) -> Result<(), DiscoveryError> {
        if self.types.contains_key(worker_type.name) {
            return Err(DiscoveryError::DuplicateWorkerType {
                name: worker_type.name.to_string(),
            });
        }
        self.types.insert(worker_type.name.to_string(), worker_type);
        Ok(())
    }

    /// Scan a directory for loadable plugin binaries, matched by the
    /// platform dynamic-library extension, and register their exports.
    ///
    /// Binaries already scanned are skipped; binaries without the export
    /// symbol are not worker plugins and are ignored. Returns the number of
    /// worker types registered from the scan.
    pub fn load_plugins(&mut self, dir: &Path) -> Result<usize, DiscoveryError> {
        let unreadable = |source| DiscoveryError::PluginDirUnreadable {
            path: dir.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(dir).map_err(unreadable)?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry.map_err(unreadable)?.path();
            if path.extension().and_then(OsStr::to_str) != Some(std::env::consts::DLL_EXTENSION) {
                continue;
            }
            if !self.scanned.insert(path.clone()) {
                continue;
            }
            loaded += self.load_plugin(&path)?;
        }
        Ok(loaded)
    }

    fn load_plugin(&mut self, path: &Path) -> Result<usize, DiscoveryError> {
        // SAFETY: loading runs arbitrary initializer code from the binary.
        // Plugins are trusted, same-toolchain artifacts deployed next to the
        // executable.
        let library = unsafe { Library::new(path) }.map_err(|error| {
            DiscoveryError::PluginLoadFailed {
                path: path.to_path_buf(),
                reason: error.to_string(),
            }
        })?;

        let exported = {
            let exports: Symbol<fn() -> Vec<WorkerType>> =
                match unsafe { library.get(PLUGIN_EXPORT_SYMBOL) } {
                    Ok(symbol) => symbol,
                    Err(_) => {
                        tracing::debug!(path = %path.display(), "no worker export; skipping binary");
                        return Ok(0);
                    }
                };
            exports()
        };

        let count = exported.len();
        for worker_type in exported {
            tracing::info!(name = worker_type.name, path = %path.display(), "registered plugin worker type");
            self.register(worker_type)?;
        }
        self.libraries.push(library);
        Ok(count)
    }

    /// Pure read used by the graph builder.
    pub fn lookup(&self, name: &str) -> Option<&WorkerType> {
        self.types.get(name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for WorkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WorkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerRegistry")
            .field("type_count", &self.types.len())
            .field("type_names", &self.type_names())
            .field("loaded_plugins", &self.scanned.len())
            .finish()
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()?
        .parent()
        .map(Path::to_path_buf)
}
