// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Value-level errors surfaced while applying configuration.
//!
//! These never abort a load on their own; the builder and resolver decide
//! per condition whether to drop the offending entry and continue.

use crate::signal::ScalarKind;
use thiserror::Error;

/// A configuration literal could not be read as a property's declared kind.
#[derive(Debug, Error)]
#[error("cannot read `{literal}` as {kind}")]
pub struct CoerceError {
    pub kind: ScalarKind,
    pub literal: String,
}

/// A connection endpoint was not written as `Alias.Member`.
#[derive(Debug, Error)]
#[error("endpoint `{raw}` is not in `Alias.Member` form")]
pub struct EndpointParseError {
    pub raw: String,
}
