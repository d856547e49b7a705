// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rewrites the published-date element of feed events into RFC 2822 UTC.
//!
//! Feeds in the wild carry dates in whatever shape their generator felt
//! like: RFC 2822, RFC 3339, or a site-specific format. This worker sits
//! between an observer and a sink and makes the `published` element uniform
//! before it is stored. Values it cannot parse pass through unchanged.

use crate::engine::WorkerType;
use crate::signal::{EmitterBank, EventCallback, ScalarKind, ScalarValue, Signature};
use crate::traits::{EmitterSpec, PortSpec, PropertySpec, Worker};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rand::Rng;

const PROPERTIES: &[PropertySpec] = &[
    PropertySpec { name: "alias", kind: ScalarKind::Text },
    PropertySpec { name: "custom_format", kind: ScalarKind::Text },
];

/// Pass-through stage normalizing the fourth (published) event element.
#[derive(Default)]
pub struct DateNormalizer {
    alias: String,
    custom_format: String,
    outputs: EmitterBank,
}

fn event_signature() -> Signature {
    Signature::of(&[
        ScalarKind::Text,
        ScalarKind::Text,
        ScalarKind::Text,
        ScalarKind::Text,
    ])
}

impl DateNormalizer {
    pub fn worker_type() -> WorkerType {
        WorkerType {
            name: "DateNormalizer",
            factory: || Box::new(DateNormalizer::default()),
            schema: PROPERTIES,
        }
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let utc: DateTime<Utc> = DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, &self.custom_format)
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })?;
        Some(utc.to_rfc2822())
    }
}

impl Worker for DateNormalizer {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("DateNormalizer{}", suffix);
        self.custom_format = "%a, %d %b %Y %H:%M:%S GMT".to_string();
    }

    fn properties(&self) -> &'static [PropertySpec] {
        PROPERTIES
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        match name {
            "alias" => Some(ScalarValue::Text(self.alias.clone())),
            "custom_format" => Some(ScalarValue::Text(self.custom_format.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        match (name, value) {
            ("alias", ScalarValue::Text(alias)) => self.alias = alias,
            ("custom_format", ScalarValue::Text(format)) => self.custom_format = format,
            _ => {}
        }
    }

    fn ports(&self) -> Vec<PortSpec> {
        vec![PortSpec { name: "ingest", signature: event_signature() }]
    }

    fn emitters(&self) -> Vec<EmitterSpec> {
        vec![EmitterSpec { name: "normalized", signature: event_signature() }]
    }

    fn deliver(&mut self, port: &str, args: &[ScalarValue]) {
        if port != "ingest" {
            return;
        }
        let [_, _, _, published] = args else {
            tracing::debug!(worker = %self.alias, arity = args.len(), "unexpected event arity");
            return;
        };

        let raw = published.as_text().unwrap_or_default();
        let mut forwarded = args.to_vec();
        match self.normalize(raw) {
            Some(normalized) => forwarded[3] = ScalarValue::Text(normalized),
            None => {
                tracing::debug!(worker = %self.alias, value = raw, "published date left unchanged");
            }
        }
        self.outputs.emit("normalized", &forwarded);
    }

    fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.outputs.subscribe(emitter, callback);
    }
}
