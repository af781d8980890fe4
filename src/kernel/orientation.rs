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

//! Orientation predicate over an [`ExactValueStore`] with Simulation of
//! Simplicity tie-breaking.
//!
//! Rows are homogeneous, `[1, x, y]` in 2D and `[1, x, y, z]` in 3D, so
//! the determinant equals the usual `orient2d` / `orient3d` value:
//! positive for counter-clockwise triangles and for tetrahedra whose
//! fourth vertex lies on the positive side of the first three.

use std::cmp::Ordering;

use rug::Integer;
use tracing::trace;

use crate::error::{CriticalPointError, Result};
use crate::geometry::Dimension;
use crate::kernel::value_store::ExactValueStore;
use crate::numeric::perturbed::{EpsilonPolynomial, determinant};

/// Definite sign of a perturbed determinant. There is no zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn from_ordering(ordering: Ordering) -> Option<Sign> {
        match ordering {
            Ordering::Less => Some(Sign::Negative),
            Ordering::Greater => Some(Sign::Positive),
            Ordering::Equal => None,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }

    pub fn flip(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Sign of the orientation determinant of `samples` (3 indices for a 2D
/// store, 4 for a 3D store).
///
/// The unperturbed determinant is evaluated exactly first; only when it is
/// zero is the perturbed polynomial expanded.
pub fn orientation(store: &ExactValueStore, samples: &[usize]) -> Result<Sign> {
    let dimension = store.dimension();
    if samples.len() != dimension.simplex_arity() {
        return Err(CriticalPointError::ArityMismatch {
            dimension: dimension.get(),
            arity: samples.len(),
        });
    }

    let rows = samples
        .iter()
        .map(|&s| store.row(s))
        .collect::<Result<Vec<_>>>()?;

    if let Some(sign) = Sign::from_ordering(raw_determinant(dimension, &rows).cmp0()) {
        return Ok(sign);
    }
    perturbed_orientation(store, samples)
}

/// `true` iff coordinate `k` of sample `i` is below coordinate `l` of
/// sample `j` after perturbation. Ties go to the pair with the larger key,
/// whose perturbation is smaller.
pub fn is_smaller(store: &ExactValueStore, i: usize, k: usize, j: usize, l: usize) -> Result<bool> {
    let a = store.value(i, k)?;
    let b = store.value(j, l)?;
    Ok(match a.cmp(b) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => store.perturbation_key(i, k) > store.perturbation_key(j, l),
    })
}

/// Full ε-expansion of the homogeneous determinant of `samples`.
pub fn perturbed_determinant(store: &ExactValueStore, samples: &[usize]) -> Result<EpsilonPolynomial> {
    let matrix = samples
        .iter()
        .map(|&s| {
            let row = store.row(s)?;
            let mut entries = Vec::with_capacity(row.len() + 1);
            entries.push(EpsilonPolynomial::constant(Integer::from(1)));
            for (c, value) in row.iter().enumerate() {
                entries.push(EpsilonPolynomial::perturbed(
                    value.clone(),
                    store.perturbation_key(s, c),
                ));
            }
            Ok(entries)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(determinant(&matrix))
}

fn perturbed_orientation(store: &ExactValueStore, samples: &[usize]) -> Result<Sign> {
    let det = perturbed_determinant(store, samples)?;
    match det.leading_term() {
        Some((monomial, coefficient)) => {
            trace!(
                ?samples,
                order = monomial.degree(),
                "orientation decided by symbolic perturbation"
            );
            Sign::from_ordering(coefficient.cmp0()).ok_or_else(|| unresolved(samples))
        }
        None => Err(unresolved(samples)),
    }
}

fn unresolved(samples: &[usize]) -> CriticalPointError {
    CriticalPointError::UnresolvedDegeneracy {
        samples: samples.to_vec(),
    }
}

fn raw_determinant(dimension: Dimension, rows: &[&[Integer]]) -> Integer {
    match dimension {
        Dimension::Two => orient2d(rows[0], rows[1], rows[2]),
        Dimension::Three => orient3d(rows[0], rows[1], rows[2], rows[3]),
    }
}

fn diff(a: &[Integer], b: &[Integer], axis: usize) -> Integer {
    Integer::from(&a[axis] - &b[axis])
}

fn orient2d(a: &[Integer], b: &[Integer], c: &[Integer]) -> Integer {
    let (bx, by) = (diff(b, a, 0), diff(b, a, 1));
    let (cx, cy) = (diff(c, a, 0), diff(c, a, 1));
    Integer::from(&bx * &cy) - Integer::from(&by * &cx)
}

/// `((b - a) x (c - a)) . (d - a)`
fn orient3d(a: &[Integer], b: &[Integer], c: &[Integer], d: &[Integer]) -> Integer {
    let ab = [diff(b, a, 0), diff(b, a, 1), diff(b, a, 2)];
    let ac = [diff(c, a, 0), diff(c, a, 1), diff(c, a, 2)];
    let ad = [diff(d, a, 0), diff(d, a, 1), diff(d, a, 2)];

    let cross = [
        Integer::from(&ab[1] * &ac[2]) - Integer::from(&ab[2] * &ac[1]),
        Integer::from(&ab[2] * &ac[0]) - Integer::from(&ab[0] * &ac[2]),
        Integer::from(&ab[0] * &ac[1]) - Integer::from(&ab[1] * &ac[0]),
    ];

    Integer::from(&cross[0] * &ad[0]) + Integer::from(&cross[1] * &ad[1]) + Integer::from(&cross[2] * &ad[2])
}
