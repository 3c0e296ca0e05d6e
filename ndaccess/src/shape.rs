/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Dimension sizes and the strides they imply.
//!
//! A [`Shape`] distinguishes between its *rank* (the number of sizes
//! it stores) and its *dims* (the dimensionality it reports). The two
//! differ for the special cases every caller has to agree on:
//!
//! ```text
//! shape      rank  dims  kind
//! ()         0     0     scalar
//! (1)        1     0     scalar
//! (n)        1     1     vector
//! (n, 1)     2     1     column vector
//! (1, n)     2     1     row vector
//! (m, n)     2     2     matrix
//! ```
//!
//! where `n > 1`.

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

/// Construct a [`Shape`] from a list of sizes.
///
/// ```
/// use ndaccess::shape;
///
/// let s = shape![2, 3, 4];
/// assert_eq!(s.sizes(), &[2, 3, 4]);
/// assert!(shape![].is_scalar());
/// ```
#[macro_export]
macro_rules! shape {
    ($($size:expr),* $(,)?) => {
        $crate::Shape::new(vec![$($size),*])
    };
}

/// An ordered sequence of dimension sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self(sizes)
    }

    /// The 0-dimensional shape.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    pub fn sizes(&self) -> &[usize] {
        &self.0
    }

    /// The number of stored sizes (the operational dimensionality).
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// The reported dimensionality: 0 for scalars, 1 for any of the
    /// three vector forms, and the rank otherwise.
    pub fn dims(&self) -> usize {
        if self.is_scalar() {
            0
        } else if self.is_vector() {
            1
        } else {
            self.rank()
        }
    }

    /// Total number of elements. The empty shape describes exactly one
    /// element.
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    pub fn is_scalar(&self) -> bool {
        self.0.is_empty() || self.0 == [1]
    }

    /// True for `(n)`, `(n, 1)` and `(1, n)` with `n > 1`.
    pub fn is_vector(&self) -> bool {
        (self.rank() == 1 && self.0[0] > 1) || self.is_col_vec() || self.is_row_vec()
    }

    pub fn is_col_vec(&self) -> bool {
        matches!(self.0[..], [n, 1] if n > 1)
    }

    pub fn is_row_vec(&self) -> bool {
        matches!(self.0[..], [1, n] if n > 1)
    }

    /// Default strides for this shape.
    ///
    /// Scalars have no strides and every vector form has the single
    /// stride `[1]`. Everything else gets row-major strides: the
    /// cumulative product of the sizes to the right of each axis.
    pub fn calc_strides(&self) -> Vec<usize> {
        if self.is_scalar() {
            return Vec::new();
        }
        if self.is_vector() {
            return vec![1];
        }

        let mut strides = vec![0; self.rank()];
        let mut acc = 1;
        for (stride, &size) in strides.iter_mut().zip(&self.0).rev() {
            *stride = acc;
            acc *= size;
        }
        strides
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(sizes: Vec<usize>) -> Self {
        Self(sizes)
    }
}

impl From<&[usize]> for Shape {
    fn from(sizes: &[usize]) -> Self {
        Self(sizes.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(sizes: [usize; N]) -> Self {
        Self(sizes.to_vec())
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}
