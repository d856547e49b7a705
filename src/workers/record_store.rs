// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Appends received feed events to a JSON-lines file.

use crate::engine::WorkerType;
use crate::signal::{ScalarKind, ScalarValue, Signature};
use crate::traits::{PortSpec, PropertySpec, Worker};
use chrono::Utc;
use rand::Rng;
use std::fs::OpenOptions;
use std::io::Write;

const PROPERTIES: &[PropertySpec] = &[
    PropertySpec { name: "alias", kind: ScalarKind::Text },
    PropertySpec { name: "path", kind: ScalarKind::Text },
];

/// Terminal sink: one JSON line per event delivered on `record`.
///
/// The path defaults to `<alias>.jsonl`, resolved at prepare time so an
/// alias override from configuration is reflected in the file name.
#[derive(Default)]
pub struct RecordStore {
    alias: String,
    path: String,
}

impl RecordStore {
    pub fn worker_type() -> WorkerType {
        WorkerType {
            name: "RecordStore",
            factory: || Box::new(RecordStore::default()),
            schema: PROPERTIES,
        }
    }

    fn append(&self, record: &serde_json::Value) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", record)
    }
}

impl Worker for RecordStore {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("RecordStore{}", suffix);
    }

    fn prepare(&mut self) {
        if self.path.is_empty() {
            self.path = format!("{}.jsonl", self.alias);
        }
    }

    fn properties(&self) -> &'static [PropertySpec] {
        PROPERTIES
    }

    fn get_property(&self, name: &str) -> Option<ScalarValue> {
        match name {
            "alias" => Some(ScalarValue::Text(self.alias.clone())),
            "path" => Some(ScalarValue::Text(self.path.clone())),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        match (name, value) {
            ("alias", ScalarValue::Text(alias)) => self.alias = alias,
            ("path", ScalarValue::Text(path)) => self.path = path,
            _ => {}
        }
    }

    fn ports(&self) -> Vec<PortSpec> {
        vec![PortSpec {
            name: "record",
            signature: Signature::of(&[
                ScalarKind::Text,
                ScalarKind::Text,
                ScalarKind::Text,
                ScalarKind::Text,
            ]),
        }]
    }

    fn deliver(&mut self, port: &str, args: &[ScalarValue]) {
        if port != "record" {
            return;
        }
        let [guid, title, summary, published] = args else {
            tracing::debug!(worker = %self.alias, arity = args.len(), "unexpected event arity");
            return;
        };
        if self.path.is_empty() {
            self.prepare();
        }

        let record = serde_json::json!({
            "guid": guid.as_text().unwrap_or_default(),
            "title": title.as_text().unwrap_or_default(),
            "summary": summary.as_text().unwrap_or_default(),
            "published": published.as_text().unwrap_or_default(),
            "received_at": Utc::now().to_rfc3339(),
        });

        if let Err(error) = self.append(&record) {
            tracing::warn!(worker = %self.alias, path = %self.path, error = %error, "failed to append record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(guid: &str) -> Vec<ScalarValue> {
        vec![
            ScalarValue::Text(guid.to_string()),
            ScalarValue::Text("a title".to_string()),
            ScalarValue::Text("a summary".to_string()),
            ScalarValue::Text("Wed, 7 Oct 2009 08:00:07 +0000".to_string()),
        ]
    }

    #[test]
    fn test_records_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut store = RecordStore::default();
        store.load_defaults();
        store.set_property("path", ScalarValue::Text(path.to_string_lossy().into_owned()));

        store.deliver("record", &event("guid-1"));
        store.deliver("record", &event("guid-2"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["guid"], "guid-1");
        assert_eq!(first["title"], "a title");
        assert!(first["received_at"].is_string());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["guid"], "guid-2");
    }

    #[test]
    fn test_default_path_derives_from_alias() {
        let mut store = RecordStore::default();
        store.load_defaults();
        store.set_property("alias", ScalarValue::Text("Archive".to_string()));
        store.prepare();

        assert_eq!(
            store.get_property("path"),
            Some(ScalarValue::Text("Archive.jsonl".to_string()))
        );
    }

    #[test]
    fn test_configured_path_is_kept_at_prepare() {
        let mut store = RecordStore::default();
        store.load_defaults();
        store.set_property("path", ScalarValue::Text("custom.jsonl".to_string()));
        store.prepare();

        assert_eq!(
            store.get_property("path"),
            Some(ScalarValue::Text("custom.jsonl".to_string()))
        );
    }

    #[test]
    fn test_other_ports_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut store = RecordStore::default();
        store.load_defaults();
        store.set_property("path", ScalarValue::Text(path.to_string_lossy().into_owned()));
        store.deliver("other", &event("guid-1"));

        assert!(!path.exists());
    }
}
