// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wires emitters to ports across a built graph.
//!
//! Resolution is name-based and load-time only. Each successful connection
//! does two things: it appends a [`BoundCallback`] to the destination
//! port's binding list (the durable record the serializer reads back), and
//! it registers a live callback with the source worker's emitter so that
//! firing the emitter delivers to the destination synchronously, on the
//! emitting worker's own thread, in binding order.
//!
//! A misconfigured connection never blocks the rest of the graph from
//! loading; it is dropped with one diagnostic. Cycles are not validated and
//! a cycle that re-enters the emitting worker will deadlock at emission
//! time.

use crate::config::{ConnectionConfig, Endpoint};
use crate::engine::ServiceGraph;
use crate::observability::messages::wiring::{
    MalformedEndpoint, SignatureMismatch, UnknownConnectionAlias, UnknownMember,
};
use crate::observability::messages::StructuredLog;
use crate::signal::{BoundCallback, EventCallback, ScalarValue, Signature};
use std::sync::Arc;

/// Apply the `connections` section of a document to a built graph.
pub fn apply_connections(graph: &mut ServiceGraph, connections: &[ConnectionConfig]) {
    for connection in connections {
        let from = match Endpoint::parse(&connection.from) {
            Ok(endpoint) => endpoint,
            Err(_) => {
                MalformedEndpoint { raw: &connection.from }.log();
                continue;
            }
        };
        let to = match Endpoint::parse(&connection.to) {
            Ok(endpoint) => endpoint,
            Err(_) => {
                MalformedEndpoint { raw: &connection.to }.log();
                continue;
            }
        };

        let (source_handle, emitter_signature) = match graph.find(&from.alias) {
            Some(source) => {
                let signature = emitter_signature(source.worker.clone(), &from.member);
                (source.worker.clone(), signature)
            }
            None => {
                UnknownConnectionAlias { alias: &from.alias }.log();
                continue;
            }
        };
        let Some(emitter_signature) = emitter_signature else {
            UnknownMember { alias: &from.alias, member: &from.member, role: "emitter" }.log();
            continue;
        };

        let Some(destination) = graph.find_mut(&to.alias) else {
            UnknownConnectionAlias { alias: &to.alias }.log();
            continue;
        };
        let destination_handle = destination.worker.clone();
        let Some(port) = destination.port_mut(&to.member) else {
            UnknownMember { alias: &to.alias, member: &to.member, role: "port" }.log();
            continue;
        };

        if port.expected != emitter_signature {
            SignatureMismatch {
                from: &from,
                to: &to,
                emitter_signature: &emitter_signature,
                port_signature: &port.expected,
            }
            .log();
            continue;
        }

        let port_name = to.member.clone();
        let callable: EventCallback = Arc::new(move |args: &[ScalarValue]| {
            destination_handle
                .lock()
                .expect("worker mutex poisoned")
                .deliver(&port_name, args);
        });

        source_handle
            .lock()
            .expect("worker mutex poisoned")
            .subscribe(&from.member, callable.clone());

        tracing::debug!(from = %from, to = %to, "connection bound");
        port.bindings.push(BoundCallback {
            source_alias: from.alias,
            source_emitter: from.member,
            callable,
        });
    }
}

fn emitter_signature(
    handle: crate::traits::WorkerHandle,
    emitter: &str,
) -> Option<Signature> {
    let worker = handle.lock().expect("worker mutex poisoned");
    worker
        .emitters()
        .into_iter()
        .find(|spec| spec.name == emitter)
        .map(|spec| spec.signature)
}
