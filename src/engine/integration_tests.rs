// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end scenarios: document in, built and wired graph out, document
//! back again.

use crate::config::{ConnectionConfig, ProjectConfig};
use crate::engine::{
    apply_connections, build_graph, serialize_graph, ServiceGraph, WorkerRegistry, WorkerType,
};
use crate::errors::DiscoveryError;
use crate::signal::{EmitterBank, EventCallback, ScalarKind, ScalarValue, Signature};
use crate::traits::{EmitterSpec, PortSpec, PropertySpec, Worker};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Deliveries observed by every `Probe` instance, keyed by alias. Factories
/// are plain function pointers, so test probes report through process-wide
/// state; aliases are unique per test to keep scenarios apart.
static DELIVERIES: OnceLock<Mutex<HashMap<String, Vec<Vec<ScalarValue>>>>> = OnceLock::new();

fn deliveries() -> &'static Mutex<HashMap<String, Vec<Vec<ScalarValue>>>> {
    DELIVERIES.get_or_init(Default::default)
}

fn recorded(alias: &str) -> Vec<Vec<ScalarValue>> {
    deliveries().lock().unwrap().get(alias).cloned().unwrap_or_default()
}

const ALIAS_ONLY: &[PropertySpec] = &[PropertySpec { name: "alias", kind: ScalarKind::Text }];

/// Records everything delivered on its `input` port.
struct Probe {
    alias: String,
}

impl Worker for Probe {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("Probe{}", suffix);
    }

    fn properties(&self) -> &'static [PropertySpec] {
        ALIAS_ONLY
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        (name == "alias").then(|| ScalarValue::Text(self.alias.clone()))
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        if let ("alias", ScalarValue::Text(alias)) = (name, value) {
            self.alias = alias;
        }
    }

    fn ports(&self) -> Vec<PortSpec> {
        vec![PortSpec { name: "input", signature: Signature::of(&[ScalarKind::Text]) }]
    }

    fn deliver(&mut self, port: &str, args: &[ScalarValue]) {
        if port == "input" {
            deliveries()
                .lock()
                .unwrap()
                .entry(self.alias.clone())
                .or_default()
                .push(args.to_vec());
        }
    }
}

fn probe_type() -> WorkerType {
    WorkerType {
        name: "Probe",
        factory: || Box::new(Probe { alias: String::new() }),
        schema: ALIAS_ONLY,
    }
}

const PINGER_PROPERTIES: &[PropertySpec] = &[
    PropertySpec { name: "alias", kind: ScalarKind::Text },
    PropertySpec { name: "message", kind: ScalarKind::Text },
];

/// Emits its configured message on `emit` whenever ticked.
struct Pinger {
    alias: String,
    message: String,
    outputs: EmitterBank,
}

impl Worker for Pinger {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("Pinger{}", suffix);
        self.message = "hello".to_string();
    }

    fn tick(&mut self) {
        self.outputs.emit("emit", &[ScalarValue::Text(self.message.clone())]);
    }

    fn properties(&self) -> &'static [PropertySpec] {
        PINGER_PROPERTIES
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        match name {
            "alias" => Some(ScalarValue::Text(self.alias.clone())),
            "message" => Some(ScalarValue::Text(self.message.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        match (name, value) {
            ("alias", ScalarValue::Text(alias)) => self.alias = alias,
            ("message", ScalarValue::Text(message)) => self.message = message,
            _ => {}
        }
    }

    fn emitters(&self) -> Vec<EmitterSpec> {
        vec![EmitterSpec { name: "emit", signature: Signature::of(&[ScalarKind::Text]) }]
    }

    fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.outputs.subscribe(emitter, callback);
    }
}

fn pinger_type() -> WorkerType {
    WorkerType {
        name: "Pinger",
        factory: || {
            Box::new(Pinger {
                alias: String::new(),
                message: String::new(),
                outputs: EmitterBank::new(),
            })
        },
        schema: PINGER_PROPERTIES,
    }
}

/// Emitter whose signature matches no port in these scenarios.
struct Klaxon {
    alias: String,
    outputs: EmitterBank,
}

impl Worker for Klaxon {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        self.alias = "Klaxon".to_string();
    }

    fn tick(&mut self) {
        self.outputs.emit("blare", &[ScalarValue::Int(115)]);
    }

    fn properties(&self) -> &'static [PropertySpec] {
        ALIAS_ONLY
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        (name == "alias").then(|| ScalarValue::Text(self.alias.clone()))
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        if let ("alias", ScalarValue::Text(alias)) = (name, value) {
            self.alias = alias;
        }
    }

    fn emitters(&self) -> Vec<EmitterSpec> {
        vec![EmitterSpec { name: "blare", signature: Signature::of(&[ScalarKind::Int]) }]
    }

    fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.outputs.subscribe(emitter, callback);
    }
}

fn klaxon_type() -> WorkerType {
    WorkerType {
        name: "Klaxon",
        factory: || Box::new(Klaxon { alias: String::new(), outputs: EmitterBank::new() }),
        schema: ALIAS_ONLY,
    }
}

fn registry() -> WorkerRegistry {
    let mut registry = WorkerRegistry::new();
    for worker_type in crate::workers::built_in_types() {
        registry.register(worker_type).unwrap();
    }
    registry.register(probe_type()).unwrap();
    registry.register(pinger_type()).unwrap();
    registry.register(klaxon_type()).unwrap();
    registry
}

fn load(yaml: &str) -> (ServiceGraph, ProjectConfig) {
    let cfg: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
    let mut graph = build_graph(&registry(), &cfg.services);
    apply_connections(&mut graph, &cfg.connections);
    (graph, cfg)
}

fn tick(graph: &ServiceGraph, alias: &str) {
    graph.find(alias).unwrap().worker.lock().unwrap().tick();
}

#[test]
fn test_emission_reaches_wired_port_exactly_once() {
    let (graph, _) = load(
        r#"
services:
  - class: Pinger
    settings:
      alias: it1_X
  - class: Probe
    settings:
      alias: it1_Y
connections:
  - from: it1_X.emit
    to: it1_Y.input
"#,
    );

    tick(&graph, "it1_X");

    let events = recorded("it1_Y");
    assert_eq!(events.len(), 1, "one tick must deliver exactly once");
    assert_eq!(events[0], vec![ScalarValue::Text("hello".to_string())]);
}

#[test]
fn test_unknown_alias_connection_dropped_graph_intact() {
    let (graph, _) = load(
        r#"
services:
  - class: Pinger
    settings:
      alias: it2_A
  - class: Probe
    settings:
      alias: it2_B
connections:
  - from: it2_Z.emit
    to: it2_B.input
"#,
    );

    assert_eq!(graph.len(), 2, "graph must still contain both services");
    assert!(graph.find("it2_A").is_some());
    assert!(graph.find("it2_B").is_some());

    let snapshot = serialize_graph(&graph);
    assert!(
        snapshot.connections.is_empty(),
        "the dropped connection must not reappear in the snapshot"
    );
}

#[test]
fn test_signature_mismatch_skipped_without_disturbing_others() {
    let (graph, _) = load(
        r#"
services:
  - class: Pinger
    settings:
      alias: it3_X
  - class: Klaxon
    settings:
      alias: it3_K
  - class: Probe
    settings:
      alias: it3_Y
connections:
  - from: it3_X.emit
    to: it3_Y.input
  - from: it3_K.blare
    to: it3_Y.input
"#,
    );

    let port = &graph.find("it3_Y").unwrap().ports[0];
    assert_eq!(port.bindings.len(), 1, "only the matching connection binds");
    assert_eq!(port.bindings[0].source_alias, "it3_X");

    tick(&graph, "it3_K");
    assert!(recorded("it3_Y").is_empty(), "mismatched emitter must not deliver");

    tick(&graph, "it3_X");
    assert_eq!(recorded("it3_Y").len(), 1);
}

#[test]
fn test_multicast_port_accumulates_bindings() {
    let (graph, _) = load(
        r#"
services:
  - class: Pinger
    settings:
      alias: it4_X
      message: first
  - class: Pinger
    settings:
      alias: it4_W
      message: second
  - class: Probe
    settings:
      alias: it4_Y
connections:
  - from: it4_X.emit
    to: it4_Y.input
  - from: it4_W.emit
    to: it4_Y.input
"#,
    );

    let port = &graph.find("it4_Y").unwrap().ports[0];
    assert_eq!(port.bindings.len(), 2);

    tick(&graph, "it4_X");
    tick(&graph, "it4_W");

    let events = recorded("it4_Y");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], vec![ScalarValue::Text("first".to_string())]);
    assert_eq!(events[1], vec![ScalarValue::Text("second".to_string())]);
}

#[test]
fn test_round_trip_preserves_applied_connections_and_state() {
    let (graph, cfg) = load(
        r#"
services:
  - class: Pinger
    settings:
      alias: it5_X
      message: round-trip
  - class: Probe
    settings:
      alias: it5_Y
connections:
  - from: it5_X.emit
    to: it5_Y.input
  - from: it5_Ghost.emit
    to: it5_Y.input
"#,
    );

    let snapshot = serialize_graph(&graph);

    // Connections: exactly the successfully applied subset of the input
    let applied: Vec<ConnectionConfig> = cfg
        .connections
        .iter()
        .filter(|connection| !connection.from.starts_with("it5_Ghost"))
        .cloned()
        .collect();
    assert_eq!(snapshot.connections, applied);

    // Services: current state, including values that came from overrides
    let pinger = snapshot
        .services
        .iter()
        .find(|service| service.class == "Pinger")
        .unwrap();
    assert_eq!(
        pinger.settings.get("message"),
        Some(&serde_yaml::Value::String("round-trip".to_string()))
    );

    // A snapshot is itself a loadable document producing the same wiring
    let mut rebuilt = build_graph(&registry(), &snapshot.services);
    apply_connections(&mut rebuilt, &snapshot.connections);
    assert_eq!(rebuilt.len(), graph.len());
    assert_eq!(rebuilt.find("it5_Y").unwrap().ports[0].bindings.len(), 1);
}

#[test]
fn test_duplicate_type_name_fails_before_any_graph_is_built() {
    let mut registry = WorkerRegistry::new();
    registry.register(probe_type()).unwrap();

    let second = WorkerType {
        name: "Probe",
        factory: || Box::new(Klaxon { alias: String::new(), outputs: EmitterBank::new() }),
        schema: ALIAS_ONLY,
    };
    let error = registry.register(second).expect_err("duplicate name must abort discovery");
    assert!(matches!(error, DiscoveryError::DuplicateWorkerType { ref name } if name == "Probe"));
}

#[test]
fn test_feed_pipeline_delivers_through_normalizer_to_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.jsonl");

    let yaml = format!(
        r#"
services:
  - class: DateNormalizer
    settings:
      alias: it6_Dates
  - class: RecordStore
    settings:
      alias: it6_Archive
      path: {}
connections:
  - from: it6_Dates.normalized
    to: it6_Archive.record
"#,
        path.display()
    );
    let (graph, _) = load(&yaml);

    // Push one event into the normalizer's port; it must flow through to
    // the store synchronously.
    graph.find("it6_Dates").unwrap().worker.lock().unwrap().deliver(
        "ingest",
        &[
            ScalarValue::Text("guid-1".to_string()),
            ScalarValue::Text("title".to_string()),
            ScalarValue::Text("summary".to_string()),
            ScalarValue::Text("2009-10-07T08:00:07Z".to_string()),
        ],
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["guid"], "guid-1");
    let published = record["published"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc2822(published).is_ok(),
        "published date must arrive normalized, got '{}'",
        published
    );
}
