/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for shapes, coordinates and
//! permutations.
//!
//! These strategies are used in `proptest`-based tests of the index
//! translation and transposition logic.
//!
//! Example usage:
//!
//! ```ignore
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_shape_and_coord;
//!
//! proptest! {
//!     #[test]
//!     fn test_round_trip((shape, coord) in gen_shape_and_coord(4, 6)) {
//!         // `coord` is in bounds for `shape`
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use proptest::prelude::*;

use crate::shape::Shape;

/// Generates a shape of rank `0..=max_rank` whose sizes are in
/// `1..=max_size`.
pub fn gen_shape(max_rank: usize, max_size: usize) -> impl Strategy<Value = Shape> {
    prop::collection::vec(1..=max_size, 0..=max_rank).prop_map(Shape::new)
}

/// Generates a shape together with a coordinate that is in bounds
/// for it.
pub fn gen_shape_and_coord(
    max_rank: usize,
    max_size: usize,
) -> impl Strategy<Value = (Shape, Vec<usize>)> {
    gen_shape(max_rank, max_size).prop_flat_map(|shape| {
        let coord = shape
            .sizes()
            .iter()
            .map(|&size| 0..size)
            .collect::<Vec<_>>();
        (Just(shape), coord)
    })
}

/// Generates a shape together with a permutation of its axes.
pub fn gen_shape_and_permutation(
    max_rank: usize,
    max_size: usize,
) -> impl Strategy<Value = (Shape, Vec<usize>)> {
    gen_shape(max_rank, max_size).prop_flat_map(|shape| {
        let axes = (0..shape.rank()).collect::<Vec<_>>();
        (Just(shape), Just(axes).prop_shuffle())
    })
}

mod tests {
    use proptest::strategy::ValueTree;
    use proptest::test_runner::Config;
    use proptest::test_runner::TestRunner;

    use super::*;
    use crate::index::check_permutation;

    #[test]
    fn sample_many() {
        let mut runner = TestRunner::new(Config::default());

        for _ in 0..256 {
            let (shape, coord) = gen_shape_and_coord(4, 6)
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert_eq!(shape.rank(), coord.len());
            assert!(coord.iter().zip(shape.sizes()).all(|(&c, &s)| c < s));
        }
    }

    proptest! {
        #[test]
        fn permutations_are_valid((shape, axes) in gen_shape_and_permutation(5, 3)) {
            prop_assert_eq!(axes.len(), shape.rank());
            prop_assert!(check_permutation(&axes).is_ok());
        }
    }
}
