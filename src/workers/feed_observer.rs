// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Polls a JSON Feed and emits every item not seen before.

use crate::engine::WorkerType;
use crate::signal::{EmitterBank, EventCallback, ScalarKind, ScalarValue, Signature};
use crate::traits::{EmitterSpec, PropertySpec, Worker};
use rand::Rng;
use serde::Deserialize;
use std::collections::VecDeque;
use std::time::Duration;

const PROPERTIES: &[PropertySpec] = &[
    PropertySpec { name: "alias", kind: ScalarKind::Text },
    PropertySpec { name: "url", kind: ScalarKind::Text },
    PropertySpec { name: "interval_secs", kind: ScalarKind::Int },
    PropertySpec { name: "history_limit", kind: ScalarKind::Int },
];

/// Feed poller with bounded deduplication.
///
/// Each poll fetches the configured JSON Feed, walks its items oldest first,
/// and emits `updated(guid, title, summary, published)` for every item whose
/// id is not in the recent-history window. The window is bounded by
/// `history_limit`, so items older than the window can be re-announced if a
/// feed resurfaces them.
#[derive(Default)]
pub struct FeedObserver {
    alias: String,
    url: String,
    interval_secs: i64,
    history_limit: i64,
    seen: VecDeque<String>,
    client: Option<reqwest::blocking::Client>,
    outputs: EmitterBank,
}

#[derive(Debug, Deserialize)]
struct JsonFeed {
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    content_text: Option<String>,
    #[serde(default)]
    date_published: Option<String>,
}

impl FeedObserver {
    pub fn worker_type() -> WorkerType {
        WorkerType {
            name: "FeedObserver",
            factory: || Box::new(FeedObserver::default()),
            schema: PROPERTIES,
        }
    }

    fn build_client(&mut self) {
        match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
        {
            Ok(client) => self.client = Some(client),
            Err(error) => {
                tracing::warn!(worker = %self.alias, error = %error, "could not build http client");
            }
        }
    }

    fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<String, reqwest::Error> {
        client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
    }

    /// Emit every item of `feed` that is not in the history window, oldest
    /// first, and remember it.
    fn ingest(&mut self, feed: JsonFeed) {
        let window = self.history_limit.max(1) as usize;
        for item in feed.items.into_iter().rev() {
            if self.seen.contains(&item.id) {
                continue;
            }
            self.seen.push_back(item.id.clone());
            while self.seen.len() > window {
                self.seen.pop_front();
            }

            let summary = item.summary.or(item.content_text).unwrap_or_default();
            self.outputs.emit(
                "updated",
                &[
                    ScalarValue::Text(item.id),
                    ScalarValue::Text(item.title),
                    ScalarValue::Text(summary),
                    ScalarValue::Text(item.date_published.unwrap_or_default()),
                ],
            );
        }
    }
}

impl Worker for FeedObserver {
    fn alias(&self) -> String {
        self.alias.clone()
    }

    fn load_defaults(&mut self) {
        let suffix: u32 = rand::thread_rng().gen_range(1..100_000);
        self.alias = format!("FeedObserver{}", suffix);
        self.interval_secs = 3600;
        self.history_limit = 30;
    }

    fn prepare(&mut self) {
        self.build_client();
    }

    fn tick(&mut self) {
        if self.url.is_empty() {
            tracing::debug!(worker = %self.alias, "no url configured; skipping poll");
            return;
        }
        if self.client.is_none() {
            self.build_client();
        }
        let Some(client) = self.client.as_ref() else {
            return;
        };

        let body = match Self::fetch(client, &self.url) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(worker = %self.alias, url = %self.url, error = %error, "unable to fetch feed");
                return;
            }
        };

        match serde_json::from_str::<JsonFeed>(&body) {
            Ok(feed) => self.ingest(feed),
            Err(error) => {
                tracing::warn!(worker = %self.alias, url = %self.url, error = %error, "feed body is not a JSON Feed");
            }
        }
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
            "url" => Some(ScalarValue::Text(self.url.clone())),
            "interval_secs" => Some(ScalarValue::Int(self.interval_secs)),
            "history_limit" => Some(ScalarValue::Int(self.history_limit)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: ScalarValue) {
        match (name, value) {
            ("alias", ScalarValue::Text(alias)) => self.alias = alias,
            ("url", ScalarValue::Text(url)) => self.url = url,
            ("interval_secs", ScalarValue::Int(secs)) => self.interval_secs = secs,
            ("history_limit", ScalarValue::Int(limit)) => self.history_limit = limit,
            _ => {}
        }
    }

    fn emitters(&self) -> Vec<EmitterSpec> {
        vec![EmitterSpec {
            name: "updated",
            signature: Signature::of(&[
                ScalarKind::Text,
                ScalarKind::Text,
                ScalarKind::Text,
                ScalarKind::Text,
            ]),
        }]
    }

    fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.outputs.subscribe(emitter, callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn observer() -> FeedObserver {
        let mut observer = FeedObserver::default();
        observer.load_defaults();
        observer
    }

    fn probe(observer: &mut FeedObserver) -> Arc<Mutex<Vec<Vec<ScalarValue>>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        observer.subscribe(
            "updated",
            Arc::new(move |args: &[ScalarValue]| {
                sink.lock().unwrap().push(args.to_vec());
            }),
        );
        received
    }

    fn feed(ids: &[&str]) -> JsonFeed {
        JsonFeed {
            items: ids
                .iter()
                .map(|id| FeedItem {
                    id: id.to_string(),
                    title: format!("title {}", id),
                    summary: Some(format!("summary {}", id)),
                    content_text: None,
                    date_published: Some("2026-08-01T12:00:00Z".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_defaults() {
        let observer = observer();
        assert!(observer.alias().starts_with("FeedObserver"));
        assert_eq!(observer.interval_secs, 3600);
        assert_eq!(observer.history_limit, 30);
        assert_eq!(observer.tick_interval(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_ingest_emits_new_items_oldest_first() {
        let mut observer = observer();
        let received = probe(&mut observer);

        // Feeds list newest first; emission order is reversed
        observer.ingest(feed(&["c", "b", "a"]));

        let events = received.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0][0], ScalarValue::Text("a".to_string()));
        assert_eq!(events[2][0], ScalarValue::Text("c".to_string()));
        assert_eq!(events[0].len(), 4);
    }

    #[test]
    fn test_ingest_deduplicates_across_polls() {
        let mut observer = observer();
        let received = probe(&mut observer);

        observer.ingest(feed(&["b", "a"]));
        observer.ingest(feed(&["c", "b", "a"]));

        let events = received.lock().unwrap();
        assert_eq!(events.len(), 3, "only the unseen item is emitted on the second poll");
        assert_eq!(events[2][0], ScalarValue::Text("c".to_string()));
    }

    #[test]
    fn test_history_window_is_bounded() {
        let mut observer = observer();
        observer.set_property("history_limit", ScalarValue::Int(2));
        let received = probe(&mut observer);

        observer.ingest(feed(&["c", "b", "a"]));
        assert_eq!(observer.seen.len(), 2, "window keeps only the most recent ids");

        // "a" fell out of the window and is announced again
        observer.ingest(feed(&["a"]));
        assert_eq!(received.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_summary_falls_back_to_content_text() {
        let mut observer = observer();
        let received = probe(&mut observer);

        observer.ingest(JsonFeed {
            items: vec![FeedItem {
                id: "x".to_string(),
                title: String::new(),
                summary: None,
                content_text: Some("body text".to_string()),
                date_published: None,
            }],
        });

        let events = received.lock().unwrap();
        assert_eq!(events[0][2], ScalarValue::Text("body text".to_string()));
        assert_eq!(events[0][3], ScalarValue::Text(String::new()));
    }

    #[test]
    fn test_property_round_trip() {
        let mut observer = observer();
        observer.set_property("alias", ScalarValue::Text("Frontpage".to_string()));
        observer.set_property("url", ScalarValue::Text("https://example.org/f.json".to_string()));

        assert_eq!(observer.alias(), "Frontpage");
        assert_eq!(
            observer.get_property("url"),
            Some(ScalarValue::Text("https://example.org/f.json".to_string()))
        );
        assert_eq!(observer.get_property("missing"), None);
    }

    #[test]
    fn test_feed_parsing() {
        let body = r#"{
            "version": "https://jsonfeed.org/version/1.1",
            "title": "Example",
            "items": [
                {"id": "1", "title": "First", "content_text": "hello"},
                {"id": "2", "title": "Second", "summary": "world", "date_published": "2026-08-01T00:00:00Z"}
            ]
        }"#;

        let feed: JsonFeed = serde_json::from_str(body).unwrap();
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[1].summary.as_deref(), Some("world"));
    }
}
