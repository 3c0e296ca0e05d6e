/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::access::AccessPattern;
use crate::error::AccessError;
use crate::index;

mod sealed {
    // Private trait — only types in this crate can implement it
    pub trait Sealed {}
}

/// A trait for affine maps from integer coordinates to linear memory
/// offsets.
///
/// This abstraction captures strided layouts: `f(x) = dot(strides,
/// x)`. Offsets are relative to the start of the view's backing
/// range.
pub trait AffineMap: sealed::Sealed {
    /// The number of stored axes in the domain of the map.
    fn rank(&self) -> usize;

    /// The shape of the domain (number of elements per axis).
    fn sizes(&self) -> &[usize];

    /// Maps a multidimensional coordinate to a linear memory offset.
    fn offset_of(&self, coord: &[usize]) -> Result<usize, AccessError>;
}

/// A trait for affine maps that support inverse lookup from linear
/// offsets back to multidimensional coordinates.
///
/// This captures the inverse of [`AffineMap::offset_of`].
pub trait AffineMapInverse: sealed::Sealed {
    /// Computes the multidimensional coordinate for a given linear
    /// offset, or returns `None` if no in-bounds coordinate maps to
    /// it.
    fn coord_of(&self, offset: usize) -> Option<Vec<usize>>;
}

impl sealed::Sealed for AccessPattern {}

impl AffineMap for AccessPattern {
    fn rank(&self) -> usize {
        self.shape().rank()
    }

    fn sizes(&self) -> &[usize] {
        self.shape().sizes()
    }

    fn offset_of(&self, coord: &[usize]) -> Result<usize, AccessError> {
        index::coordinate_to_flat(self.shape().sizes(), self.strides(), coord)
    }
}

impl AffineMapInverse for AccessPattern {
    fn coord_of(&self, offset: usize) -> Option<Vec<usize>> {
        index::flat_to_coordinate(offset, self.shape().sizes(), self.strides()).ok()
    }
}
