/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Data-free transposition.
//!
//! Transposing permutes the shape and strides of a pattern together;
//! the backing buffer is never touched. Callers that need the data
//! physically rearranged use the returned permutation with
//! [`transpose_index`](crate::index::transpose_index).

use crate::access::AccessPattern;
use crate::error::AccessError;
use crate::error::Outcome;
use crate::index;

/// The result of a transposition that did something.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transposed {
    /// The transposed (frozen) view.
    pub ap: AccessPattern,
    /// The permutation that was applied: axis `i` of the view is axis
    /// `axes[i]` of the source.
    pub axes: Vec<usize>,
}

impl AccessPattern {
    /// Transpose this pattern by the permutation `axes`, or reverse
    /// all axes if `axes` is empty.
    ///
    /// Returns `Ok(Outcome::NoOp)` when there is nothing to do: for
    /// scalars, for 1-D vectors, and for the identity permutation.
    /// Row and column vectors swap their two sizes and keep their
    /// single physical stride.
    ///
    /// `axes` may name either the reported dimensions or every stored
    /// axis; any other length is a [`AccessError::DimMismatch`].
    pub fn transpose(&self, axes: &[usize]) -> Result<Outcome<Transposed>, AccessError> {
        let rank = self.rank();
        if !axes.is_empty() && axes.len() != self.dims() && axes.len() != rank {
            return Err(AccessError::DimMismatch {
                expected: self.dims(),
                got: axes.len(),
            });
        }

        if self.is_scalar() {
            tracing::trace!("transpose of scalar {} is a no-op", self);
            return Ok(Outcome::NoOp);
        }

        let axes: Vec<usize> = match axes {
            [] => (0..rank).rev().collect(),
            // A row or column vector reports one axis: `[0]` keeps it
            // in place and `[1]` swaps the two stored axes.
            [0] if rank == 2 => vec![0, 1],
            [1] if rank == 2 => vec![1, 0],
            _ => axes.to_vec(),
        };
        index::check_permutation(&axes)?;

        if axes.iter().enumerate().all(|(i, &axis)| i == axis) {
            tracing::trace!("identity transpose {:?} of {} is a no-op", axes, self);
            return Ok(Outcome::NoOp);
        }

        let sizes = self.shape().sizes();
        let ap = if self.is_vector() {
            // Only (n, 1) and (1, n) get here: a 1-D vector's only
            // permutation is the identity. The stride that matters is
            // the one on the long axis.
            let long = if sizes[0] > 1 { 0 } else { 1 };
            let stride = self.axis_strides()[long];
            AccessPattern::new(vec![sizes[1], sizes[0]], vec![stride])
        } else {
            let strides = self.axis_strides();
            AccessPattern::new(
                axes.iter().map(|&axis| sizes[axis]).collect::<Vec<_>>(),
                axes.iter().map(|&axis| strides[axis]).collect(),
            )
        };

        Ok(Outcome::Applied(Transposed { ap, axes }))
    }
}
