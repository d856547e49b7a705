// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod graph;
mod registry;
mod resolver;
mod serializer;

#[cfg(test)]
mod integration_tests;

pub use builder::build_graph;
pub use graph::{PortState, ServiceGraph, ServiceInstance};
pub use registry::{WorkerRegistry, WorkerType, PLUGIN_EXPORT_SYMBOL};
pub use resolver::apply_connections;
pub use serializer::serialize_graph;
