// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Drives a wired graph: one periodic trigger per worker.
//!
//! The engine itself stops at wiring time; this is the collaborator that
//! keeps workers ticking afterwards. Tick bodies are synchronous (they may
//! block on network or disk, and emission runs subscribers inline), so they
//! execute on the blocking pool rather than async worker threads. Workers
//! without a tick interval are purely reactive and only run when an event
//! reaches one of their ports.

use crate::engine::ServiceGraph;
use anyhow::Context;
use tokio::task;
use tokio::time::{self, MissedTickBehavior};

/// Prepare every worker, schedule periodic ticks, and run until ctrl-c.
pub async fn run(graph: &ServiceGraph) -> anyhow::Result<()> {
    for instance in graph.iter() {
        let handle = instance.worker.clone();
        task::spawn_blocking(move || handle.lock().expect("worker mutex poisoned").prepare())
            .await
            .with_context(|| "worker prepare panicked")?;
    }

    let mut triggers = Vec::new();
    for instance in graph.iter() {
        let interval = instance
            .worker
            .lock()
            .expect("worker mutex poisoned")
            .tick_interval();
        let Some(period) = interval else {
            tracing::debug!(worker = %instance.alias, "reactive worker; no periodic trigger");
            continue;
        };

        let handle = instance.worker.clone();
        let alias = instance.alias.clone();
        tracing::info!(worker = %alias, period_secs = period.as_secs(), "scheduling periodic trigger");
        triggers.push(tokio::spawn(async move {
            let mut timer = time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                let worker = handle.clone();
                let result =
                    task::spawn_blocking(move || worker.lock().expect("worker mutex poisoned").tick())
                        .await;
                if let Err(error) = result {
                    tracing::error!(worker = %alias, error = %error, "tick panicked");
                }
            }
        }));
    }

    tracing::info!(workers = graph.len(), triggers = triggers.len(), "switchboard running; ctrl-c to stop");
    tokio::signal::ctrl_c().await.context("failed waiting for shutdown signal")?;
    tracing::info!("shutting down");

    for trigger in &triggers {
        trigger.abort();
    }
    Ok(())
}
