/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Coordinate ↔ flat-offset translation.
//!
//! These functions are stateless: every input is passed explicitly.
//! They accept strides in either the per-axis form or the truncated
//! single-stride form used by vectors; see [`expand_strides`].

use crate::error::AccessError;

/// Expand `strides` to one entry per axis of `shape`.
///
/// Strides already of the right length are returned as-is. The
/// truncated vector form repeats its single stride on every axis,
/// which is harmless because the unit axes of a vector only ever see
/// coordinate 0. Scalars (no strides) expand to zeros.
pub fn expand_strides(shape: &[usize], strides: &[usize]) -> Vec<usize> {
    if strides.len() == shape.len() {
        return strides.to_vec();
    }
    vec![strides.first().copied().unwrap_or(0); shape.len()]
}

/// Map a coordinate to its flat offset: `Σᵢ coordᵢ × strideᵢ`.
pub fn coordinate_to_flat(
    shape: &[usize],
    strides: &[usize],
    coord: &[usize],
) -> Result<usize, AccessError> {
    if coord.len() != shape.len() {
        return Err(AccessError::DimMismatch {
            expected: shape.len(),
            got: coord.len(),
        });
    }
    let strides = expand_strides(shape, strides);
    let mut offset = 0;
    for ((&c, &size), &stride) in coord.iter().zip(shape).zip(&strides) {
        if c >= size {
            return Err(AccessError::IndexOutOfRange {
                index: c,
                total: size,
            });
        }
        offset += c * stride;
    }
    Ok(offset)
}

/// Map a flat offset back to the coordinate that produces it under
/// `shape` and `strides`; the inverse of [`coordinate_to_flat`].
///
/// Strides need not be row-major: axes are peeled off from the
/// largest stride to the smallest. Offsets that no in-bounds
/// coordinate reaches fail with [`AccessError::IndexOutOfRange`].
pub fn flat_to_coordinate(
    offset: usize,
    shape: &[usize],
    strides: &[usize],
) -> Result<Vec<usize>, AccessError> {
    let out_of_range = || AccessError::IndexOutOfRange {
        index: offset,
        total: shape.iter().product(),
    };

    let strides = expand_strides(shape, strides);
    let mut axes: Vec<usize> = (0..shape.len()).filter(|&i| shape[i] > 1).collect();
    axes.sort_by_key(|&i| std::cmp::Reverse(strides[i]));

    let mut coord = vec![0; shape.len()];
    let mut pos = offset;
    for i in axes {
        let stride = strides[i];
        if stride == 0 {
            continue;
        }
        let index = pos / stride;
        if index >= shape[i] {
            return Err(out_of_range());
        }
        coord[i] = index;
        pos -= index * stride;
    }

    if pos != 0 || shape.contains(&0) {
        return Err(out_of_range());
    }
    Ok(coord)
}

/// Check that `axes` names every axis in `0..axes.len()` exactly once.
pub fn check_permutation(axes: &[usize]) -> Result<(), AccessError> {
    let mut seen = vec![false; axes.len()];
    for &axis in axes {
        match seen.get_mut(axis) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(AccessError::InvalidPermutation {
                    axes: axes.to_vec(),
                });
            }
        }
    }
    Ok(())
}

/// The permutation that undoes `axes`, which must be a valid
/// permutation.
pub fn invert_permutation(axes: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; axes.len()];
    for (i, &axis) in axes.iter().enumerate() {
        inverse[axis] = i;
    }
    inverse
}

/// Where the element at `offset` lands when the data is physically
/// rearranged by the permutation `axes`.
///
/// The coordinate of `offset` is resolved under `old_shape` and
/// `old_strides`, then recombined with `new_strides` in permuted
/// order. Only needed when materializing a transposed copy; lazy
/// views use the permuted strides directly.
pub fn transpose_index(
    offset: usize,
    old_shape: &[usize],
    axes: &[usize],
    old_strides: &[usize],
    new_strides: &[usize],
) -> Result<usize, AccessError> {
    if axes.len() != old_shape.len() {
        return Err(AccessError::DimMismatch {
            expected: old_shape.len(),
            got: axes.len(),
        });
    }
    if new_strides.len() != axes.len() {
        return Err(AccessError::DimMismatch {
            expected: axes.len(),
            got: new_strides.len(),
        });
    }
    check_permutation(axes)?;
    let old_coord = flat_to_coordinate(offset, old_shape, old_strides)?;
    Ok(axes
        .iter()
        .zip(new_strides)
        .map(|(&axis, &stride)| old_coord[axis] * stride)
        .sum())
}

/// The inverse of [`transpose_index`]: maps an offset in the
/// transposed layout back to the original one.
pub fn untranspose_index(
    offset: usize,
    old_shape: &[usize],
    axes: &[usize],
    old_strides: &[usize],
    new_strides: &[usize],
) -> Result<usize, AccessError> {
    transpose_index(
        offset,
        old_shape,
        &invert_permutation(axes),
        old_strides,
        new_strides,
    )
}
