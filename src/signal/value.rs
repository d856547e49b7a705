// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scalar values carried by events and exposed as worker properties.
//!
//! Everything that crosses a wiring boundary is scalar: configuration
//! settings, serialized property state, and the arguments of an event. The
//! four kinds here are the complete vocabulary; ports and emitters describe
//! their shapes as ordered lists of [`ScalarKind`] (see
//! [`Signature`](crate::signal::Signature)).

use crate::errors::CoerceError;
use std::fmt;

/// Type tag for a single scalar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Text,
    Flag,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Text => "text",
            ScalarKind::Flag => "flag",
        };
        write!(f, "{}", label)
    }
}

/// A single tagged scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl ScalarValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Text(_) => ScalarKind::Text,
            ScalarValue::Flag(_) => ScalarKind::Flag,
        }
    }

    /// Read a configuration literal as a value of the declared kind.
    ///
    /// Settings arrive as whatever YAML node the document author wrote, so a
    /// numeric property may be given as `3600` or `"3600"` and both must
    /// land as the same `Int`. Anything that cannot be read as the declared
    /// kind is a [`CoerceError`]; the caller decides what that means for the
    /// surrounding load.
    pub fn coerce(kind: ScalarKind, value: &serde_yaml::Value) -> Result<Self, CoerceError> {
        use serde_yaml::Value;

        let coerced = match kind {
            ScalarKind::Text => match value {
                Value::String(text) => Some(ScalarValue::Text(text.clone())),
                Value::Number(number) => Some(ScalarValue::Text(number.to_string())),
                Value::Bool(flag) => Some(ScalarValue::Text(flag.to_string())),
                _ => None,
            },
            ScalarKind::Int => match value {
                Value::Number(number) => number.as_i64().map(ScalarValue::Int),
                Value::String(text) => text.trim().parse::<i64>().ok().map(ScalarValue::Int),
                _ => None,
            },
            ScalarKind::Float => match value {
                Value::Number(number) => number.as_f64().map(ScalarValue::Float),
                Value::String(text) => text.trim().parse::<f64>().ok().map(ScalarValue::Float),
                _ => None,
            },
            ScalarKind::Flag => match value {
                Value::Bool(flag) => Some(ScalarValue::Flag(*flag)),
                Value::String(text) => match text.trim() {
                    "true" | "yes" | "on" | "1" => Some(ScalarValue::Flag(true)),
                    "false" | "no" | "off" | "0" => Some(ScalarValue::Flag(false)),
                    _ => None,
                },
                _ => None,
            },
        };

        coerced.ok_or_else(|| CoerceError {
            kind,
            literal: render_literal(value),
        })
    }

    /// Render this value back into a YAML node for serialization.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        use serde_yaml::Value;

        match self {
            ScalarValue::Int(number) => Value::Number((*number).into()),
            ScalarValue::Float(number) => Value::Number(serde_yaml::Number::from(*number)),
            ScalarValue::Text(text) => Value::String(text.clone()),
            ScalarValue::Flag(flag) => Value::Bool(*flag),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(number) => Some(*number),
            _ => None,
        }
    }
}

fn render_literal(value: &serde_yaml::Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}
