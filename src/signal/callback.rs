// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Callback handles and the per-worker multicast fan-out store.

use crate::signal::ScalarValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An invocable handle created by the connection resolver.
///
/// Invocation is synchronous on the caller's thread. A slow callback blocks
/// the emitting worker; that tradeoff is part of the wiring contract and is
/// not worked around here.
pub type EventCallback = Arc<dyn Fn(&[ScalarValue]) + Send + Sync>;

/// One wiring edge as recorded on the destination port.
///
/// The source identity is kept alongside the callable so a live graph can be
/// turned back into configuration without interrogating the callable itself.
#[derive(Clone)]
pub struct BoundCallback {
    pub source_alias: String,
    pub source_emitter: String,
    pub callable: EventCallback,
}

impl fmt::Debug for BoundCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCallback")
            .field("source_alias", &self.source_alias)
            .field("source_emitter", &self.source_emitter)
            .finish()
    }
}

/// Multicast subscriber lists for a worker's emitters.
///
/// Workers embed one of these and fire their emitters through it. Appending
/// never replaces existing subscribers, and [`emit`](EmitterBank::emit)
/// invokes them in subscription order.
#[derive(Default)]
pub struct EmitterBank {
    slots: HashMap<String, Vec<EventCallback>>,
}

impl EmitterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber to the named emitter's invocation list.
    pub fn subscribe(&mut self, emitter: &str, callback: EventCallback) {
        self.slots.entry(emitter.to_string()).or_default().push(callback);
    }

    /// Invoke every subscriber of the named emitter, in subscription order.
    ///
    /// An emitter nobody is wired to is a no-op.
    pub fn emit(&self, emitter: &str, args: &[ScalarValue]) {
        if let Some(subscribers) = self.slots.get(emitter) {
            for callback in subscribers {
                callback(args);
            }
        }
    }

    pub fn subscriber_count(&self, emitter: &str) -> usize {
        self.slots.get(emitter).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EmitterBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .slots
            .iter()
            .map(|(name, subscribers)| (name.as_str(), subscribers.len()))
            .collect();
        f.debug_struct("EmitterBank").field("subscribers", &counts).finish()
    }
}
