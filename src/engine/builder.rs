// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns the `services` section of a configuration document into a
//! populated, alias-indexed graph.
//!
//! No wiring happens here; connections are resolved strictly afterwards so
//! that every alias a connection references can already exist.

use crate::config::ServiceConfig;
use crate::engine::registry::WorkerRegistry;
use crate::engine::{PortState, ServiceGraph, ServiceInstance};
use crate::observability::messages::wiring::{
    DuplicateServiceAlias, SettingRejected, UnknownServiceClass,
};
use crate::observability::messages::StructuredLog;
use crate::signal::ScalarValue;
use std::sync::{Arc, Mutex};

/// Build worker instances from service entries, in document order.
///
/// Per entry: resolve the class against the registry, construct through the
/// type's factory, load the worker's own defaults, then apply configuration
/// overrides on top. A single bad entry never aborts the load; it is
/// dropped with a diagnostic and the rest of the document proceeds.
///
/// Setting keys that match no declared property are ignored, which keeps
/// older engines compatible with newer documents. A value that cannot be
/// coerced to the property's declared kind is skipped field-by-field and
/// the default stands. An instance whose final alias is already taken is
/// dropped whole.
pub fn build_graph(registry: &WorkerRegistry, services: &[ServiceConfig]) -> ServiceGraph {
    let mut graph = ServiceGraph::new();

    for service in services {
        let Some(worker_type) = registry.lookup(&service.class) else {
            UnknownServiceClass { class: &service.class }.log();
            continue;
        };

        let mut worker = (worker_type.factory)();
        worker.load_defaults();

        for (key, value) in &service.settings {
            let Some(name) = key.as_str() else {
                tracing::debug!(class = worker_type.name, "ignoring non-text setting key");
                continue;
            };
            let Some(spec) = worker_type.schema.iter().find(|property| property.name == name)
            else {
                tracing::debug!(class = worker_type.name, setting = name, "ignoring unknown setting");
                continue;
            };
            match ScalarValue::coerce(spec.kind, value) {
                Ok(coerced) => worker.set_property(name, coerced),
                Err(detail) => SettingRejected {
                    class: worker_type.name,
                    setting: name,
                    detail: &detail,
                }
                .log(),
            }
        }

        let alias = worker.alias();
        if graph.find(&alias).is_some() {
            DuplicateServiceAlias { alias: &alias, class: worker_type.name }.log();
            continue;
        }

        let ports = worker.ports().iter().map(PortState::new).collect();
        tracing::debug!(class = worker_type.name, alias = %alias, "service instance built");
        graph.insert(ServiceInstance {
            class_name: worker_type.name.to_string(),
            alias,
            worker: Arc::new(Mutex::new(worker)),
            ports,
        });
    }

    graph
}
