/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Strided access patterns for n-dimensional arrays.
//!
//! This crate does the index bookkeeping that every dense-array
//! operation relies on, without ever touching element storage:
//!
//! - [`Shape`] and [`AccessPattern`] describe how a flat buffer is
//!   viewed as an n-dimensional array, including the scalar and
//!   vector special cases.
//! - [`index`] translates between coordinates and flat offsets.
//! - [`AccessPattern::slice`] derives views together with the range of
//!   the backing buffer they cover.
//! - [`AccessPattern::transpose`] permutes axes without copying.
//! - [`FlatIterator`] walks the offsets of any view in row-major
//!   order.
//!
//! ```
//! use ndaccess::AccessPattern;
//! use ndaccess::FlatIterator;
//! use ndaccess::Range;
//! use ndaccess::shape;
//!
//! let data: Vec<u32> = (0..12).collect();
//! let ap = AccessPattern::for_backing(shape![3, 4], data.len());
//!
//! // Rows 1 and 2, every other column.
//! let view = ap.slice(data.len(), &[Range::from(1..3), Range(0, None, 2)]).unwrap();
//! let backing = &data[view.range()];
//! let picked: Vec<u32> = FlatIterator::new(&view.ap).map(|o| backing[o]).collect();
//! assert_eq!(picked, vec![4, 6, 8, 10]);
//! ```
//!
//! Access patterns provide no internal synchronization. A frozen
//! pattern may be read from many threads; to mutate independently,
//! give each thread its own clone.

mod access;
pub mod affine;
pub mod config;
pub mod diag;
mod error;
pub mod index;
mod iter;
mod shape;
mod slice;
#[cfg(test)]
mod strategy;
mod transpose;

pub use access::AccessPattern;
pub use access::Mutability;
pub use error::AccessError;
pub use error::Outcome;
pub use iter::FlatIterator;
pub use iter::IterState;
pub use shape::Shape;
pub use slice::Range;
pub use slice::Sliced;
pub use transpose::Transposed;
