// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration document for a service graph.
///
/// The document has two sections: a list of service entries to instantiate
/// and a list of connections to wire between them. Both are optional; an
/// empty document is a valid (empty) graph. It is typically loaded from a
/// YAML file.
///
/// # Fields
/// * `services` - Worker instances to build, in document order
/// * `connections` - Emitter-to-port wirings, applied after every service
///   entry has been built
///
/// # Example
/// ```yaml
/// services:
///   - class: FeedObserver
///     settings:
///       alias: Frontpage
///       url: "https://example.org/feed.json"
///       interval_secs: 1800
///   - class: RecordStore
///     settings:
///       alias: Archive
/// connections:
///   - from: Frontpage.updated
///     to: Archive.record
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// Configuration for a single worker instance.
///
/// `class` names a registered worker type; `settings` holds literal scalar
/// overrides applied after the type's own defaults. Settings keep document
/// order (a `serde_yaml::Mapping`), and keys that match no declared property
/// are ignored so documents stay forward compatible.
///
/// # Fields
/// * `class` - Registered worker type name
/// * `settings` - Ordered name/literal overrides, including `alias`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub class: String,
    #[serde(default)]
    pub settings: serde_yaml::Mapping,
}

/// One emitter-to-port wiring, both ends in `Alias.Member` notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub from: String,
    pub to: String,
}

/// Load a configuration document from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: ProjectConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Write a configuration document to a YAML file.
///
/// The structural inverse of [`load_config`]; used together with the graph
/// serializer to snapshot a live graph back to disk.
pub fn save_config<P: AsRef<Path>>(
    path: P,
    cfg: &ProjectConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_yaml::to_string(cfg)?;
    fs::write(path, content)?;
    Ok(())
}
