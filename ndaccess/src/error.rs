/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Errors and the tagged "nothing to do" result.

use crate::slice::Range;

/// Errors produced while deriving or traversing access patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimMismatch { expected: usize, got: usize },

    #[error("index {index} out of range {total}")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("iterator exhausted")]
    IteratorExhausted,

    #[error("invalid permutation {axes:?}")]
    InvalidPermutation { axes: Vec<usize> },

    #[error("range {range} out of bounds for axis of size {size}")]
    InvalidRange { range: Range, size: usize },

    #[error("slice step must be nonzero")]
    ZeroStep,

    #[error("element count mismatch: expected {expected}, got {got}")]
    ElementCountMismatch { expected: usize, got: usize },

    #[error("access pattern is not contiguous")]
    NonContiguous,
}

/// The result of an operation that may legitimately have nothing to
/// do.
///
/// Transposing with the identity permutation, or transposing a
/// scalar, does not produce a new access pattern. Rather than
/// signalling this through an error value that callers must inspect,
/// such operations return `Ok(Outcome::NoOp)`, leaving `Err` for
/// genuine failures.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation produced a value.
    Applied(T),
    /// The operation was a logical identity.
    NoOp,
}

impl<T> Outcome<T> {
    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::NoOp)
    }

    /// Returns the produced value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::NoOp => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::NoOp => Outcome::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AccessError::DimMismatch {
                expected: 2,
                got: 3
            }
            .to_string(),
            "dimension mismatch: expected 2, got 3"
        );
        assert_eq!(
            AccessError::IndexOutOfRange {
                index: 12,
                total: 6
            }
            .to_string(),
            "index 12 out of range 6"
        );
        assert_eq!(
            AccessError::InvalidRange {
                range: Range(5, Some(7), 1),
                size: 4
            }
            .to_string(),
            "range 5:7 out of bounds for axis of size 4"
        );
    }

    #[test]
    fn test_outcome() {
        let applied: Outcome<usize> = Outcome::Applied(3);
        assert!(!applied.is_noop());
        assert_eq!(applied.clone().map(|x| x * 2), Outcome::Applied(6));
        assert_eq!(applied.applied(), Some(3));

        let noop: Outcome<usize> = Outcome::NoOp;
        assert!(noop.is_noop());
        assert_eq!(noop.clone().map(|x| x * 2), Outcome::NoOp);
        assert_eq!(noop.applied(), None);
    }
}
