// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::error::{CriticalPointError, Result};
use crate::geometry::Dimension;
use crate::kernel::orientation::{is_smaller, orientation};
use crate::kernel::value_store::ExactValueStore;

const Y: usize = 1;

/// `true` iff edge `(vj, vk)` crosses the half-line leaving `p` in the +x
/// direction. Works on perturbed coordinates, so vertices never lie
/// exactly on the half-line.
pub fn crosses_half_line(store: &ExactValueStore, p: usize, vj: usize, vk: usize) -> Result<bool> {
    // lower endpoint first
    let (lo, hi) = if is_smaller(store, vk, Y, vj, Y)? {
        (vk, vj)
    } else {
        (vj, vk)
    };

    if is_smaller(store, lo, Y, p, Y)? && is_smaller(store, p, Y, hi, Y)? {
        // the edge spans p's height; it is to the right iff (p, lo, hi) turns left
        return Ok(orientation(store, &[p, lo, hi])?.is_positive());
    }
    Ok(false)
}

/// Even-odd rule: `p` is inside triangle `(a, b, c)` iff the half-line
/// from `p` crosses an odd number of its edges.
pub fn point_in_triangle(store: &ExactValueStore, p: usize, triangle: [usize; 3]) -> Result<bool> {
    expect_dimension(store, Dimension::Two, 3)?;
    let [a, b, c] = triangle;

    let mut crossings = 0;
    for (vj, vk) in [(a, b), (b, c), (c, a)] {
        if crosses_half_line(store, p, vj, vk)? {
            crossings += 1;
        }
    }
    Ok(crossings % 2 == 1)
}

/// `p` is inside tetrahedron `(a, b, c, d)` iff replacing any one vertex
/// by `p` keeps the orientation of the tetrahedron.
pub fn point_in_tetrahedron(store: &ExactValueStore, p: usize, tetrahedron: [usize; 4]) -> Result<bool> {
    expect_dimension(store, Dimension::Three, 4)?;
    let [a, b, c, d] = tetrahedron;

    let reference = orientation(store, &[a, b, c, d])?;
    for face in [[p, b, c, d], [a, p, c, d], [a, b, p, d], [a, b, c, p]] {
        if orientation(store, &face)? != reference {
            return Ok(false);
        }
    }
    Ok(true)
}

fn expect_dimension(store: &ExactValueStore, expected: Dimension, arity: usize) -> Result<()> {
    if store.dimension() != expected {
        return Err(CriticalPointError::ArityMismatch {
            dimension: store.dimension().get(),
            arity,
        });
    }
    Ok(())
}
