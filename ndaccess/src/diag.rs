/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Diagonals of row-major grids.

use crate::access::AccessPattern;
use crate::error::AccessError;
use crate::iter::FlatIterator;
use crate::shape::Shape;
use crate::slice::Range;

/// Flat offsets of the `k`-th diagonal of a row-major `rows × cols`
/// grid, in increasing order.
///
/// `k = 0` is the main diagonal, `k > 0` lies above it and `k < 0`
/// below it. A diagonal that misses the grid entirely has no offsets.
///
/// Consecutive diagonal cells are `cols + 1` apart, so the offsets
/// are found by slicing the grid down to the rows the diagonal can
/// reach and stepping through the flat iteration of that view.
pub fn diagonal_offsets(rows: usize, cols: usize, k: isize) -> Result<Vec<usize>, AccessError> {
    let (r, c) = (rows as isize, cols as isize);
    if rows == 0 || cols == 0 || k >= c || -k >= r {
        return Ok(Vec::new());
    }

    let size = rows * cols;
    let grid = AccessPattern::row_major(Shape::new(vec![rows, cols]));
    let first = if k < 0 { -k * c } else { k };

    // Past row `cols - k` the diagonal has left the grid.
    let last_row = c - k;
    let ranges = if last_row < r {
        vec![Range::from(0..last_row)]
    } else {
        Vec::new()
    };
    let view = grid.slice(size, &ranges)?;

    let mut it = FlatIterator::new(&view.ap);
    let offsets = it.slice(Some(Range(first, None, c + 1)))?;
    Ok(offsets.into_iter().map(|offset| offset + view.start).collect())
}

/// A `rows × cols` row-major buffer with ones on the `k`-th diagonal
/// and zeros elsewhere.
pub fn eye(rows: usize, cols: usize, k: isize) -> Result<Vec<f64>, AccessError> {
    let mut data = vec![0.0; rows * cols];
    for offset in diagonal_offsets(rows, cols, k)? {
        data[offset] = 1.0;
    }
    Ok(data)
}
