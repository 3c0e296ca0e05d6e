/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Stride-aware flat iteration.
//!
//! A [`FlatIterator`] walks every coordinate of an access pattern in
//! row-major order (last axis fastest) and yields the flat offset of
//! each one. The offsets follow the pattern's strides, so iterating a
//! transposed or stepped view visits the backing buffer in the view's
//! logical order.
//!
//! ```
//! use ndaccess::AccessPattern;
//! use ndaccess::FlatIterator;
//! use ndaccess::shape;
//!
//! let ap = AccessPattern::row_major(shape![2, 3]);
//! let transposed = ap.transpose(&[]).unwrap().applied().unwrap();
//! let offsets: Vec<usize> = FlatIterator::new(&transposed.ap).collect();
//! assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
//! ```

use crate::access::AccessPattern;
use crate::config::SliceOpts;
use crate::error::AccessError;
use crate::index;
use crate::slice::Range;

/// Iteration state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterState {
    /// There are coordinates left to visit.
    Active,
    /// Every coordinate has been visited.
    Done,
}

/// A cursor over the flat offsets of an [`AccessPattern`].
///
/// The iterator borrows its pattern for its whole lifetime and never
/// modifies it. It is also a std [`Iterator`] that ends where
/// [`FlatIterator::next_offset`] would fail.
#[derive(Clone, Debug)]
pub struct FlatIterator<'a> {
    ap: &'a AccessPattern,
    strides: Vec<usize>,
    track: Vec<usize>,
    state: IterState,
}

impl<'a> FlatIterator<'a> {
    pub fn new(ap: &'a AccessPattern) -> Self {
        Self {
            ap,
            strides: ap.axis_strides(),
            track: vec![0; ap.rank()],
            state: Self::initial_state(ap),
        }
    }

    // A pattern with a zero-length axis has no coordinates at all.
    fn initial_state(ap: &AccessPattern) -> IterState {
        if ap.shape().sizes().contains(&0) {
            IterState::Done
        } else {
            IterState::Active
        }
    }

    /// The pattern being iterated.
    pub fn ap(&self) -> &'a AccessPattern {
        self.ap
    }

    pub fn state(&self) -> IterState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == IterState::Done
    }

    /// The flat offset of the current coordinate, advancing the
    /// cursor past it.
    ///
    /// Fails with [`AccessError::IteratorExhausted`] once every
    /// coordinate has been visited.
    pub fn next_offset(&mut self) -> Result<usize, AccessError> {
        if self.is_done() {
            return Err(AccessError::IteratorExhausted);
        }

        let offset = index::coordinate_to_flat(self.ap.shape().sizes(), &self.strides, &self.track)?;

        if self.ap.is_scalar() {
            self.state = IterState::Done;
            return Ok(offset);
        }

        // Row-major odometer: bump the fastest axis that has room,
        // zeroing the faster ones; overflowing the slowest axis ends
        // the iteration with the track back at all zeros.
        let sizes = self.ap.shape().sizes();
        let mut advanced = false;
        for d in (0..self.track.len()).rev() {
            if self.track[d] + 1 < sizes[d] {
                self.track[d] += 1;
                advanced = true;
                break;
            }
            self.track[d] = 0;
        }
        if !advanced {
            tracing::trace!("flat iteration over {} exhausted", self.ap);
            self.state = IterState::Done;
        }

        Ok(offset)
    }

    /// The coordinate whose offset the next call to
    /// [`FlatIterator::next_offset`] will return.
    ///
    /// The cursor advances *after* an offset is produced, so
    /// immediately after `next_offset` returns the offset for
    /// coordinate `c`, `coord()` already reports the coordinate after
    /// `c`. Once the iterator is done, `coord()` is all zeros.
    pub fn coord(&self) -> &[usize] {
        &self.track
    }

    /// Rewind to the first coordinate. The pattern is not touched.
    pub fn reset(&mut self) {
        self.track.iter_mut().for_each(|c| *c = 0);
        self.state = Self::initial_state(self.ap);
    }

    /// Drain the remaining offsets, optionally selecting a subset of
    /// them with `range`.
    ///
    /// The range applies to the drained list, not to the pattern's
    /// axes. A negative step reverses the list before stepping by the
    /// step's magnitude; an end past the list is clamped.
    pub fn slice(&mut self, range: Option<Range>) -> Result<Vec<usize>, AccessError> {
        let mut offsets = Vec::new();
        loop {
            match self.next_offset() {
                Ok(offset) => offsets.push(offset),
                Err(AccessError::IteratorExhausted) => break,
                Err(err) => return Err(err),
            }
        }

        let Some(range) = range else {
            return Ok(offsets);
        };

        let (start, end, step) = range.resolve(offsets.len(), &SliceOpts::lenient())?;
        if range.start() < -(offsets.len() as isize) || range.start() > offsets.len() as isize {
            return Err(AccessError::InvalidRange {
                range,
                size: offsets.len(),
            });
        }

        if step < 0 {
            offsets.reverse();
        }
        Ok(offsets
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .step_by(step.unsigned_abs())
            .copied()
            .collect())
    }
}

impl Iterator for FlatIterator<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.next_offset() {
            Ok(offset) => Some(offset),
            Err(AccessError::IteratorExhausted) => None,
            Err(err) => {
                tracing::error!("flat iteration over {} failed: {}", self.ap, err);
                self.state = IterState::Done;
                None
            }
        }
    }
}
