/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Access patterns.
//!
//! An [`AccessPattern`] tells an n-dimensional array how to find its
//! elements in a flat backing buffer: a [`Shape`], one stride per
//! axis, the dimensionality reported to callers, and whether the
//! pattern may still be edited in place.
//!
//! Patterns derived from other patterns (slices, transpositions) are
//! created [`Mutability::Frozen`] so that in-place edits cannot
//! corrupt a view that other code is reading. To change a frozen
//! pattern, derive a fresh owned one with
//! [`AccessPattern::with_shape`] or [`AccessPattern::reshape`].

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::AccessError;
use crate::index;
use crate::shape::Shape;

/// Whether an access pattern accepts in-place shape edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutability {
    #[default]
    Mutable,
    Frozen,
}

/// A shape, its strides and its reported dimensionality.
///
/// `strides` has one entry per axis, except for the vector forms
/// `(n, 1)` and `(1, n)` whose default strides are truncated to the
/// single physical stride.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessPattern {
    shape: Shape,
    strides: Vec<usize>,
    dims: usize,
    mutability: Mutability,
}

impl AccessPattern {
    /// A frozen pattern over the given shape and strides. This is how
    /// derived views are built.
    ///
    /// `strides` has one entry per axis, a single entry for a vector,
    /// or none for a scalar.
    pub fn new(shape: impl Into<Shape>, strides: Vec<usize>) -> Self {
        let shape = shape.into();
        debug_assert!(
            strides.len() == shape.rank()
                || (strides.len() == 1 && shape.is_vector())
                || (strides.is_empty() && shape.is_scalar()),
            "strides {:?} do not fit shape {}",
            strides,
            shape
        );
        let dims = shape.dims();
        Self {
            shape,
            strides,
            dims,
            mutability: Mutability::Frozen,
        }
    }

    /// A mutable pattern over `shape` with default strides.
    pub fn row_major(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        Self {
            strides: shape.calc_strides(),
            dims: shape.dims(),
            shape,
            mutability: Mutability::Mutable,
        }
    }

    /// A mutable, row-major pattern for a backing buffer of `len`
    /// elements.
    ///
    /// # Panics
    ///
    /// If `shape` does not describe exactly `len` elements. A
    /// mismatch here is a programming error, not bad input.
    pub fn for_backing(shape: impl Into<Shape>, len: usize) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.size(),
            len,
            "shape {} does not match backing of {} elements",
            shape,
            len
        );
        Self::row_major(shape)
    }

    /// The mutable 0-dimensional pattern.
    pub fn scalar() -> Self {
        Self::row_major(Shape::scalar())
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The reported dimensionality.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of axes actually stored in the shape.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// One stride per axis, expanding the truncated vector form.
    pub fn axis_strides(&self) -> Vec<usize> {
        index::expand_strides(self.shape.sizes(), &self.strides)
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    pub fn is_locked(&self) -> bool {
        self.mutability == Mutability::Frozen
    }

    pub fn lock(&mut self) {
        self.mutability = Mutability::Frozen;
    }

    pub fn unlock(&mut self) {
        self.mutability = Mutability::Mutable;
    }

    /// Replace the shape in place, recomputing strides from scratch.
    /// An empty `sizes` collapses the pattern to a scalar.
    ///
    /// Does nothing if the pattern is frozen.
    pub fn set_shape(&mut self, sizes: &[usize]) {
        if self.is_locked() {
            tracing::trace!("ignoring set_shape({:?}) on frozen {}", sizes, self);
            return;
        }
        self.shape = Shape::from(sizes);
        self.strides = self.shape.calc_strides();
        self.dims = self.shape.dims();
    }

    /// A fresh mutable pattern with `sizes` and default strides. The
    /// receiver is left untouched whether or not it is frozen.
    pub fn with_shape(&self, sizes: &[usize]) -> Self {
        Self::row_major(Shape::from(sizes))
    }

    /// Reinterpret this pattern under a new shape with the same number
    /// of elements.
    ///
    /// Only patterns laid out with their default strides can be
    /// reinterpreted without copying; anything else fails with
    /// [`AccessError::NonContiguous`]. The result keeps the receiver's
    /// mutability.
    pub fn reshape(&self, sizes: &[usize]) -> Result<Self, AccessError> {
        let shape = Shape::from(sizes);
        if shape.size() != self.size() {
            return Err(AccessError::ElementCountMismatch {
                expected: self.size(),
                got: shape.size(),
            });
        }
        if self.strides != self.shape.calc_strides() {
            return Err(AccessError::NonContiguous);
        }
        let mut reshaped = Self::row_major(shape);
        reshaped.mutability = self.mutability;
        Ok(reshaped)
    }

    /// C-contiguous: the last stride is 1. Scalars are trivially
    /// contiguous.
    pub fn is_c_contiguous(&self) -> bool {
        self.strides.last().is_none_or(|&s| s == 1)
    }

    /// Fortran-contiguous: the first stride is 1.
    pub fn is_f_contiguous(&self) -> bool {
        self.strides.first().is_none_or(|&s| s == 1)
    }

    pub fn is_scalar(&self) -> bool {
        self.dims == 0 || self.shape.sizes() == [1]
    }

    pub fn is_vector(&self) -> bool {
        self.shape.is_vector()
    }

    pub fn is_col_vec(&self) -> bool {
        self.shape.is_col_vec()
    }

    pub fn is_row_vec(&self) -> bool {
        self.shape.is_row_vec()
    }

    pub fn is_matrix(&self) -> bool {
        self.dims == 2
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape: {}, Stride: {:?}, Dims: {}, Lock: {}",
            self.shape,
            self.strides,
            self.dims,
            self.is_locked()
        )
    }
}
