/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! End-to-end behavior of access patterns as a tensor layer would
//! drive them: build a pattern for a buffer, derive views, and read
//! elements through flat iteration.

use ndaccess::AccessError;
use ndaccess::AccessPattern;
use ndaccess::FlatIterator;
use ndaccess::Outcome;
use ndaccess::Range;
use ndaccess::Shape;
use ndaccess::config::SliceOpts;
use ndaccess::diag;
use ndaccess::index;
use ndaccess::shape;
use proptest::prelude::*;

fn read(data: &[i64], ap: &AccessPattern, start: usize) -> Vec<i64> {
    FlatIterator::new(ap).map(|o| data[start + o]).collect()
}

#[test]
fn round_trip_every_coordinate() {
    for shape in [shape![2, 3, 4], shape![5], shape![1, 7], shape![3, 1], shape![1]] {
        let ap = AccessPattern::row_major(shape);
        let mut it = FlatIterator::new(&ap);
        while !it.is_done() {
            let coord = it.coord().to_vec();
            let offset = it.next_offset().unwrap();
            assert_eq!(
                index::coordinate_to_flat(ap.shape().sizes(), ap.strides(), &coord),
                Ok(offset)
            );
            assert_eq!(
                index::flat_to_coordinate(offset, ap.shape().sizes(), ap.strides()),
                Ok(coord)
            );
        }
    }
}

#[test]
fn iterate_two_by_three() {
    let ap = AccessPattern::new(shape![2, 3], vec![3, 1]);
    let mut it = FlatIterator::new(&ap);
    let offsets: Vec<usize> = (0..6).map(|_| it.next_offset().unwrap()).collect();
    assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(it.next_offset(), Err(AccessError::IteratorExhausted));
}

#[test]
fn single_cell_slice_is_locked_scalar() {
    let ap = AccessPattern::row_major(shape![4, 4]);
    let sliced = ap
        .slice_with(16, &[Range(2, Some(3), 1), Range(2, Some(3), 1)], &SliceOpts::strict())
        .unwrap();
    assert!(sliced.ap.is_locked());
    assert!(sliced.ap.is_scalar());
    assert_eq!(sliced.ap.dims(), 0);
    assert_eq!(sliced.range(), 10..11);
}

#[test]
fn locked_set_shape_is_ignored() {
    let mut ap = AccessPattern::row_major(shape![2, 3]);
    ap.lock();
    let before = ap.clone();
    ap.set_shape(&[6]);
    ap.set_shape(&[]);
    assert_eq!(ap.shape(), before.shape());
    assert_eq!(ap.strides(), before.strides());
    assert_eq!(ap.dims(), before.dims());
}

#[test]
fn clone_is_independent() {
    let source = AccessPattern::row_major(shape![4, 2]);
    let mut copy = source.clone();
    copy.set_shape(&[8]);
    assert_eq!(source.shape(), &shape![4, 2]);
    assert_eq!(copy.shape(), &shape![8]);
}

#[test]
fn identity_diagonals() {
    assert_eq!(
        diag::eye(4, 4, 0).unwrap(),
        vec![1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1.]
    );
    assert_eq!(diag::eye(4, 4, 4).unwrap(), vec![0.; 16]);
    assert_eq!(diag::eye(4, 4, -4).unwrap(), vec![0.; 16]);
    assert_eq!(
        diag::eye(4, 4, 1).unwrap(),
        vec![0., 1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1., 0., 0., 0., 0.]
    );
    assert_eq!(
        diag::eye(4, 5, 0).unwrap(),
        vec![1., 0., 0., 0., 0., 0., 1., 0., 0., 0., 0., 0., 1., 0., 0., 0., 0., 0., 1., 0.]
    );
}

#[test]
fn transpose_then_slice_reads_columns() {
    let data: Vec<i64> = (0..12).collect();
    let ap = AccessPattern::for_backing(shape![3, 4], data.len());

    let Outcome::Applied(t) = ap.transpose(&[]).unwrap() else {
        panic!("transpose of a matrix must not be a no-op");
    };
    assert_eq!(read(&data, &t.ap, 0), vec![0, 4, 8, 1, 5, 9, 2, 6, 10, 3, 7, 11]);

    // Row 2 of the transpose is column 2 of the source.
    let col = t
        .ap
        .slice_with(data.len(), &[Range::from(2)], &SliceOpts::strict())
        .unwrap();
    assert_eq!(read(&data, &col.ap, col.start), vec![2, 6, 10]);
}

#[test]
fn materialize_transpose_with_index_remapping() {
    let data: Vec<i64> = (0..24).collect();
    let ap = AccessPattern::for_backing(shape![2, 3, 4], data.len());
    let t = ap.transpose(&[2, 0, 1]).unwrap().applied().unwrap();

    // Physically copy, then check the copy reads like the lazy view.
    let dense = AccessPattern::row_major(t.ap.shape().clone());
    let mut copy = vec![0; data.len()];
    for (i, &v) in data.iter().enumerate() {
        let j = index::transpose_index(i, ap.shape().sizes(), &t.axes, ap.strides(), dense.strides())
            .unwrap();
        copy[j] = v;
    }
    assert_eq!(read(&copy, &dense, 0), read(&data, &t.ap, 0));

    for j in 0..copy.len() {
        let i = index::untranspose_index(
            j,
            dense.shape().sizes(),
            &t.axes,
            dense.strides(),
            ap.strides(),
        )
        .unwrap();
        assert_eq!(copy[j], data[i]);
    }
}

#[test]
fn reversed_iteration_via_slice() {
    let data: Vec<i64> = (0..5).collect();
    let ap = AccessPattern::for_backing(shape![5], data.len());
    let view = ap
        .slice_with(data.len(), &[Range(1, Some(4), -1)], &SliceOpts::strict())
        .unwrap();
    let offsets = FlatIterator::new(&view.ap)
        .slice(Some(Range(0, None, -1)))
        .unwrap();
    let values: Vec<i64> = offsets.iter().map(|&o| data[view.start + o]).collect();
    assert_eq!(values, vec![3, 2, 1]);
}

proptest! {
    #[test]
    fn flat_iteration_visits_each_offset_once(sizes in prop::collection::vec(1usize..5, 0..4)) {
        let ap = AccessPattern::row_major(Shape::from(sizes));
        let offsets: Vec<usize> = FlatIterator::new(&ap).collect();
        let expected: Vec<usize> = (0..ap.size()).collect();
        prop_assert_eq!(offsets, expected);
    }
}
