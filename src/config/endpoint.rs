// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EndpointParseError;
use std::fmt;

/// One half of a connection entry, parsed from `Alias.Member` notation.
///
/// The member names an emitter on the `from` side and a port on the `to`
/// side; the endpoint itself does not know which role it plays. The alias
/// ends at the first dot, so member names may themselves contain dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub alias: String,
    pub member: String,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointParseError> {
        match raw.split_once('.') {
            Some((alias, member)) if !alias.is_empty() && !member.is_empty() => Ok(Self {
                alias: alias.to_string(),
                member: member.to_string(),
            }),
            _ => Err(EndpointParseError { raw: raw.to_string() }),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.member)
    }
}
