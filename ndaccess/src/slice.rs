/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Slicing access patterns.
//!
//! [`AccessPattern::slice`] derives a view from a pattern and one
//! [`Range`] per leading axis. Axes without a range keep their full
//! extent. Besides the new pattern, slicing reports the half-open
//! range of backing-buffer offsets `[start, end)` that the view
//! covers; the owner of the buffer reslices it with that range, and
//! the new pattern's offsets are relative to `start`.
//!
//! Per axis `i` with resolved bounds `start..end` and `step`:
//!
//! ```text
//! nd_start += start × strideᵢ
//! nd_end   -= (sizeᵢ − end) × strideᵢ
//! step > 0:  sizeᵢ' = ⌈(end − start) / step⌉,  strideᵢ' = strideᵢ × step
//! step < 0:  sizeᵢ' = end − start,            strideᵢ' = strideᵢ
//! ```
//!
//! A negative step does not produce a negative stride; reversal is
//! left to the caller, which iterates the view backwards (see
//! [`FlatIterator::slice`](crate::FlatIterator::slice)).
//!
//! An axis with `start == end` becomes a zero-length axis, and the
//! resulting view has no elements.
//!
//! If the view covers exactly one element it collapses to a frozen
//! scalar. Otherwise unit axes are dropped (keeping at least one
//! axis), and a resulting column vector `(n, 1)` keeps only its single
//! physical stride.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::access::AccessPattern;
use crate::config;
use crate::config::SliceOpts;
use crate::error::AccessError;
use crate::shape::Shape;

/// A per-axis slice specification: start, optional end, and step.
///
/// Negative bounds count from the end of the axis; an omitted end
/// means the end of the axis. The step may be negative but not zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range(pub isize, pub Option<isize>, pub isize);

impl Range {
    pub fn new(start: isize, end: Option<isize>, step: isize) -> Self {
        Self(start, end, step)
    }

    /// The full extent of an axis.
    pub fn all() -> Self {
        Self(0, None, 1)
    }

    pub fn start(&self) -> isize {
        self.0
    }

    pub fn end(&self) -> Option<isize> {
        self.1
    }

    pub fn step(&self) -> isize {
        self.2
    }

    /// Resolve this range against an axis of `size` elements,
    /// returning ascending `(start, end, step)` with
    /// `0 <= start <= end <= size`.
    pub fn resolve(&self, size: usize, opts: &SliceOpts) -> Result<(usize, usize, isize), AccessError> {
        let Range(start, end, step) = *self;
        if step == 0 {
            return Err(AccessError::ZeroStep);
        }

        let n = size as isize;
        let normalize = |bound: isize| if bound < 0 { bound + n } else { bound };
        let start = normalize(start);
        let end = end.map_or(n, normalize);

        let (start, end) = if opts.strict_bounds {
            if start < 0 || start > n || end > n || end < start {
                return Err(AccessError::InvalidRange { range: *self, size });
            }
            (start, end)
        } else {
            let start = start.clamp(0, n);
            (start, end.clamp(start, n))
        };
        Ok((start as usize, end as usize, step))
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1, self.2) {
            (start, Some(end), 1) => write!(f, "{}:{}", start, end),
            (start, Some(end), step) => write!(f, "{}:{}:{}", start, end, step),
            (start, None, step) => write!(f, "{}::{}", start, step),
        }
    }
}

impl From<std::ops::Range<isize>> for Range {
    fn from(r: std::ops::Range<isize>) -> Self {
        Self(r.start, Some(r.end), 1)
    }
}

impl From<std::ops::RangeFrom<isize>> for Range {
    fn from(r: std::ops::RangeFrom<isize>) -> Self {
        Self(r.start, None, 1)
    }
}

impl From<std::ops::RangeTo<isize>> for Range {
    fn from(r: std::ops::RangeTo<isize>) -> Self {
        Self(0, Some(r.end), 1)
    }
}

impl From<std::ops::RangeFull> for Range {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::all()
    }
}

/// A single index, selecting one element of the axis.
impl From<isize> for Range {
    fn from(index: isize) -> Self {
        let end = if index == -1 { None } else { Some(index + 1) };
        Self(index, end, 1)
    }
}

/// A view derived by [`AccessPattern::slice`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sliced {
    /// The view's access pattern, relative to `start`.
    pub ap: AccessPattern,
    /// First backing offset covered by the view.
    pub start: usize,
    /// One past the last backing offset covered by the view.
    pub end: usize,
}

impl Sliced {
    /// The backing offsets covered by the view.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl AccessPattern {
    /// Slice this pattern using the global [`SliceOpts`].
    ///
    /// `size` bounds the backing offsets of the current view (usually
    /// the length of its buffer).
    pub fn slice(&self, size: usize, ranges: &[Range]) -> Result<Sliced, AccessError> {
        self.slice_with(size, ranges, &config::global::get())
    }

    /// Slice this pattern using explicit options.
    pub fn slice_with(
        &self,
        size: usize,
        ranges: &[Range],
        opts: &SliceOpts,
    ) -> Result<Sliced, AccessError> {
        let rank = self.rank();
        if ranges.len() > rank {
            return Err(AccessError::DimMismatch {
                expected: rank,
                got: ranges.len(),
            });
        }

        let strides = self.axis_strides();
        let mut nd_start = 0;
        let mut nd_end = size;
        let mut new_sizes = Vec::with_capacity(rank);
        let mut new_strides = Vec::with_capacity(rank);

        for (i, (&axis_size, &stride)) in self.shape().sizes().iter().zip(&strides).enumerate() {
            let range = ranges.get(i).copied().unwrap_or_default();
            let (start, end, step) = range.resolve(axis_size, opts)?;

            nd_start += start * stride;
            nd_end = nd_end.saturating_sub((axis_size - end) * stride);

            if step > 0 {
                let step = step as usize;
                new_sizes.push((end - start).div_ceil(step));
                new_strides.push(stride * step);
            } else {
                new_sizes.push(end - start);
                new_strides.push(stride);
            }
        }
        // Empty views can otherwise end before they start.
        let nd_end = nd_end.max(nd_start);

        if nd_end - nd_start == 1 {
            tracing::debug!(
                "slice of {} covers one element at {}, collapsing to scalar",
                self,
                nd_start
            );
            let mut ap = AccessPattern::scalar();
            ap.lock();
            return Ok(Sliced {
                ap,
                start: nd_start,
                end: nd_end,
            });
        }

        // Drop unit axes among the reported ones, keeping at least
        // one. Vectors report a single axis, so their trailing unit
        // axis survives.
        let mut scan = self.dims();
        let mut d = 0;
        while d < scan.min(new_sizes.len()) && new_sizes.len() > 1 {
            if new_sizes[d] == 1 {
                new_sizes.remove(d);
                new_strides.remove(d);
                scan -= 1;
            } else {
                d += 1;
            }
        }

        let shape = Shape::new(new_sizes);
        if shape.is_col_vec() {
            new_strides.truncate(1);
        }

        let ap = AccessPattern::new(shape, new_strides);
        tracing::trace!("sliced {} into {} over {}..{}", self, ap, nd_start, nd_end);
        Ok(Sliced {
            ap,
            start: nd_start,
            end: nd_end,
        })
    }
}
