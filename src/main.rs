// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process;

use the_switchboard::config::{load_config, save_config};
use the_switchboard::engine::{apply_connections, build_graph, serialize_graph, WorkerRegistry};
use the_switchboard::runtime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <config.yaml> [--snapshot <out.yaml>]", args[0]);
        eprintln!("Example: {} configs/feed-archive.yaml", args[0]);
        eprintln!("         {} configs/feed-archive.yaml --snapshot snapshot.yaml", args[0]);
        process::exit(1);
    }
    let config_path = &args[1];
    let snapshot_path = args
        .iter()
        .position(|arg| arg == "--snapshot")
        .and_then(|index| args.get(index + 1));

    let registry = WorkerRegistry::discover()?;
    tracing::info!(worker_types = registry.len(), "discovery complete");

    let config = load_config(config_path)
        .map_err(|error| anyhow::anyhow!("failed to load {}: {}", config_path, error))?;

    let mut graph = build_graph(&registry, &config.services);
    apply_connections(&mut graph, &config.connections);
    tracing::info!(
        services = graph.len(),
        connections = config.connections.len(),
        "service graph wired"
    );

    if let Some(path) = snapshot_path {
        let snapshot = serialize_graph(&graph);
        save_config(path, &snapshot)
            .map_err(|error| anyhow::anyhow!("failed to write snapshot {}: {}", path, error))?;
        tracing::info!(path = %path, "graph snapshot written");
    }

    runtime::run(&graph).await
}
