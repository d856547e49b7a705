// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::signal::ScalarKind;
use std::fmt;

/// Ordered scalar type tags describing an emitter's parameter list or the
/// callback shape a port accepts.
///
/// Signatures are computed once, when a worker declares its ports and
/// emitters, and compared by value when a connection is resolved. Two
/// signatures are compatible exactly when they are equal; there is no
/// widening or reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<ScalarKind>);

impl Signature {
    pub fn new(kinds: Vec<ScalarKind>) -> Self {
        Self(kinds)
    }

    /// Convenience for static declarations.
    pub fn of(kinds: &[ScalarKind]) -> Self {
        Self(kinds.to_vec())
    }

    pub fn kinds(&self) -> &[ScalarKind] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<ScalarKind>> for Signature {
    fn from(kinds: Vec<ScalarKind>) -> Self {
        Self(kinds)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }
        write!(f, ")")
    }
}
