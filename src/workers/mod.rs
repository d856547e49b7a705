// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod date_normalizer;
pub mod feed_observer;
pub mod record_store;

pub use date_normalizer::DateNormalizer;
pub use feed_observer::FeedObserver;
pub use record_store::RecordStore;

use crate::engine::WorkerType;

/// Worker types compiled into this binary, registered ahead of any plugin
/// scan.
pub fn built_in_types() -> Vec<WorkerType> {
    vec![
        FeedObserver::worker_type(),
        DateNormalizer::worker_type(),
        RecordStore::worker_type(),
    ]
}
