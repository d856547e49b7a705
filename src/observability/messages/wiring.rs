// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph build and connection resolution diagnostics.
//!
//! One message type per drop/skip condition:
//! * Unregistered service class
//! * Duplicate instance alias
//! * Rejected setting value
//! * Malformed connection endpoint
//! * Unknown connection alias
//! * Unknown port or emitter member
//! * Signature mismatch

use crate::config::Endpoint;
use crate::errors::CoerceError;
use crate::observability::messages::StructuredLog;
use crate::signal::Signature;
use std::fmt::{Display, Formatter};

/// A service entry named a class no registered worker type provides.
///
/// # Log Level
/// `warn!` - the entry is dropped, the rest of the load continues
pub struct UnknownServiceClass<'a> {
    pub class: &'a str,
}

impl Display for UnknownServiceClass<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Service class '{}' is not registered; dropping entry", self.class)
    }
}

impl StructuredLog for UnknownServiceClass<'_> {
    fn log(&self) {
        tracing::warn!(class = self.class, "{}", self);
    }
}

/// A built instance landed on an alias that is already taken.
///
/// # Log Level
/// `warn!` - the later instance is dropped
pub struct DuplicateServiceAlias<'a> {
    pub alias: &'a str,
    pub class: &'a str,
}

impl Display for DuplicateServiceAlias<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Alias '{}' is already taken; dropping the later '{}' instance",
            self.alias, self.class
        )
    }
}

impl StructuredLog for DuplicateServiceAlias<'_> {
    fn log(&self) {
        tracing::warn!(alias = self.alias, class = self.class, "{}", self);
    }
}

/// A setting value could not be read as the property's declared kind.
///
/// # Log Level
/// `warn!` - the field is skipped, the instance keeps its default
pub struct SettingRejected<'a> {
    pub class: &'a str,
    pub setting: &'a str,
    pub detail: &'a CoerceError,
}

impl Display for SettingRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Setting '{}' on '{}' skipped: {}",
            self.setting, self.class, self.detail
        )
    }
}

impl StructuredLog for SettingRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            class = self.class,
            setting = self.setting,
            detail = %self.detail,
            "{}", self
        );
    }
}

/// A connection endpoint was not written as `Alias.Member`.
///
/// # Log Level
/// `warn!` - the connection is dropped
pub struct MalformedEndpoint<'a> {
    pub raw: &'a str,
}

impl Display for MalformedEndpoint<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connection endpoint '{}' is malformed; dropping connection", self.raw)
    }
}

impl StructuredLog for MalformedEndpoint<'_> {
    fn log(&self) {
        tracing::warn!(endpoint = self.raw, "{}", self);
    }
}

/// A connection referenced an alias not present in the graph.
///
/// # Log Level
/// `warn!` - the connection is dropped
pub struct UnknownConnectionAlias<'a> {
    pub alias: &'a str,
}

impl Display for UnknownConnectionAlias<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connection references unknown alias '{}'; dropping connection",
            self.alias
        )
    }
}

impl StructuredLog for UnknownConnectionAlias<'_> {
    fn log(&self) {
        tracing::warn!(alias = self.alias, "{}", self);
    }
}

/// A connection named a port or emitter the instance does not declare.
///
/// # Log Level
/// `warn!` - the connection is dropped
pub struct UnknownMember<'a> {
    pub alias: &'a str,
    pub member: &'a str,
    pub role: &'static str,
}

impl Display for UnknownMember<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No {} named '{}' on '{}'; dropping connection",
            self.role, self.member, self.alias
        )
    }
}

impl StructuredLog for UnknownMember<'_> {
    fn log(&self) {
        tracing::warn!(alias = self.alias, member = self.member, role = self.role, "{}", self);
    }
}

/// An emitter and a port disagreed on their callback shape.
///
/// # Log Level
/// `warn!` - the connection is dropped, previously bound callbacks stand
pub struct SignatureMismatch<'a> {
    pub from: &'a Endpoint,
    pub to: &'a Endpoint,
    pub emitter_signature: &'a Signature,
    pub port_signature: &'a Signature,
}

impl Display for SignatureMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Signatures differ for {} -> {}: emitter {} vs port {}; dropping connection",
            self.from, self.to, self.emitter_signature, self.port_signature
        )
    }
}

impl StructuredLog for SignatureMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            from = %self.from,
            to = %self.to,
            emitter_signature = %self.emitter_signature,
            port_signature = %self.port_signature,
            "{}", self
        );
    }
}
