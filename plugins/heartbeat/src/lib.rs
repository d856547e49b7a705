// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Minimal out-of-tree worker plugin.
//!
//! Exists mostly to exercise the host's plugin scan: drop the built library
//! next to the executable and `Heartbeat` becomes a configurable class like
//! any built-in. Emits `pulse(alias, beat_number)` on every tick.

use rand::Rng;
use std::time::Duration;
use the_switchboard::engine::WorkerType;
use the_switchboard::signal::{EmitterBank, EventCallback, ScalarKind, ScalarValue, Signature};
use the_switchboard::traits::{EmitterSpec, PropertySpec, Worker};

const PROPERTIES: &[PropertySpec] = &[
    PropertySpec { name: "alias", kind: ScalarKind::Text },
    PropertySpec { name: "interval_secs", kind: ScalarKind::Int },
];

#[derive(Default)]
pub struct Heartbeat {
    alias: String,
    interval_secs: i64,
    beats: i64,
    outputs: EmitterBank,
}

impl Heartbeat {
    pub fn worker_type() -> WorkerType {
        WorkerType {
            name: "Heartbeat",
            factory: || Box::new(Heartbeat::default()),
            schema: PROPERTIES,
        }
    }
}

impl Worker for Heartbeat {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("Heartbeat{}", suffix);
        self.interval_secs = 60;
    }

    fn tick(&mut self) {
        self.beats += 1;
        tracing::debug!(worker = %self.alias, beat = self.beats, "pulse");
        self.outputs.emit(
            "pulse",
            &[ScalarValue::Text(self.alias.clone()), ScalarValue::Int(self.beats)],
        );
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.interval_secs.max(1) as u64))
    }

    fn properties(&self) -> &'static [PropertySpec] {
        PROPERTIES
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        match name {
            "alias" => Some(ScalarValue::Text(self.alias.clone())),
            "interval_secs" => Some(ScalarValue::Int(self.interval_secs)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        match (name, value) {
            ("alias", ScalarValue::Text(alias)) => self.alias = alias,
            ("interval_secs", ScalarValue::Int(secs)) => self.interval_secs = secs,
            _ => {}
        }
    }

    fn emitters(&self) -> Vec<EmitterSpec> {
        vec![EmitterSpec {
            name: "pulse",
            signature: Signature::of(&[ScalarKind::Text, ScalarKind::Int]),
        }]
    }

    fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.outputs.subscribe(emitter, callback);
    }
}

/// Discovery entry point scanned for by the host's plugin loader.
#[no_mangle]
pub fn switchboard_worker_types() -> Vec<WorkerType> {
    vec![Heartbeat::worker_type()]
}
