// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns a live graph back into a configuration document.
//!
//! This is the structural inverse of building and wiring. Service entries
//! reflect every readable scalar property's *current* value, not only the
//! fields the original document overrode, so a save/load round trip
//! reproduces behaviorally equivalent instances rather than byte-identical
//! documents. Connection entries are recovered from the source identity
//! recorded on each bound callback, in binding order.

use crate::config::{ConnectionConfig, ProjectConfig, ServiceConfig};
use crate::engine::ServiceGraph;

pub fn serialize_graph(graph: &ServiceGraph) -> ProjectConfig {
    let mut services = Vec::new();
    let mut connections = Vec::new();

    for instance in graph.iter() {
        let mut settings = serde_yaml::Mapping::new();
        {
            let worker = instance.worker.lock().expect("worker mutex poisoned");
            for spec in worker.properties() {
                if let Some(value) = worker.get_property(spec.name) {
                    settings.insert(
                        serde_yaml::Value::String(spec.name.to_string()),
                        value.to_yaml(),
                    );
                }
            }
        }
        services.push(ServiceConfig { class: instance.class_name.clone(), settings });

        for port in &instance.ports {
            for binding in &port.bindings {
                connections.push(ConnectionConfig {
                    from: format!("{}.{}", binding.source_alias, binding.source_emitter),
                    to: format!("{}.{}", instance.alias, port.name),
                });
            }
        }
    }

    ProjectConfig { services, connections }
}
