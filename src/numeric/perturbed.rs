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

//! Polynomials in a symbolic infinitesimal `ε`, used to break exact ties.
//!
//! Coordinate `j` of sample `i` is perturbed by `ε^(2^k)` with a key
//! `k = i·d − j`. A product of such perturbations is `ε^(Σ 2^k)`; because
//! the keys of distinct rows never collide, the exponent is the binary
//! number whose set bits are the keys. Ordering two products by exponent
//! is then a lexicographic comparison of their keys sorted high to low.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::{Add, Mul, Neg, Sub};

use rug::Integer;

/// Product of perturbations, keys kept in descending order.
///
/// The derived `Ord` sorts by increasing power of `ε`, so the empty
/// monomial (the constant term) comes first.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(Vec<u64>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(Vec::new())
    }

    pub fn epsilon(key: u64) -> Self {
        Monomial(vec![key])
    }

    pub fn keys(&self) -> &[u64] {
        &self.0
    }

    /// Number of perturbation factors.
    pub fn degree(&self) -> usize {
        self.0.len()
    }

    fn product(&self, other: &Monomial) -> Monomial {
        let mut keys = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            if self.0[i] >= other.0[j] {
                keys.push(self.0[i]);
                i += 1;
            } else {
                keys.push(other.0[j]);
                j += 1;
            }
        }
        keys.extend_from_slice(&self.0[i..]);
        keys.extend_from_slice(&other.0[j..]);
        Monomial(keys)
    }
}

/// Sparse polynomial in `ε` with exact integer coefficients. Zero
/// coefficients are never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpsilonPolynomial {
    terms: BTreeMap<Monomial, Integer>,
}

impl EpsilonPolynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: Integer) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::one(), value);
        p
    }

    /// `value + ε^(2^key)`
    pub fn perturbed(value: Integer, key: u64) -> Self {
        let mut p = Self::constant(value);
        p.add_term(Monomial::epsilon(key), Integer::from(1));
        p
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn constant_term(&self) -> Integer {
        self.terms
            .get(&Monomial::one())
            .cloned()
            .unwrap_or_default()
    }

    /// Lowest-order term with a non-zero coefficient; it dominates the sign
    /// as `ε → 0`.
    pub fn leading_term(&self) -> Option<(&Monomial, &Integer)> {
        self.terms.iter().next()
    }

    /// Sign of the polynomial for an arbitrarily small positive `ε`.
    pub fn sign(&self) -> Ordering {
        self.leading_term()
            .map_or(Ordering::Equal, |(_, c)| c.cmp0())
    }

    fn add_term(&mut self, monomial: Monomial, coefficient: Integer) {
        if coefficient.cmp0() == Ordering::Equal {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += coefficient;
                if slot.get().cmp0() == Ordering::Equal {
                    slot.remove();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
        }
    }
}

impl<'a, 'b> Add<&'b EpsilonPolynomial> for &'a EpsilonPolynomial {
    type Output = EpsilonPolynomial;

    fn add(self, rhs: &'b EpsilonPolynomial) -> EpsilonPolynomial {
        let mut result = self.clone();
        for (m, c) in &rhs.terms {
            result.add_term(m.clone(), c.clone());
        }
        result
    }
}

impl<'a, 'b> Sub<&'b EpsilonPolynomial> for &'a EpsilonPolynomial {
    type Output = EpsilonPolynomial;

    fn sub(self, rhs: &'b EpsilonPolynomial) -> EpsilonPolynomial {
        let mut result = self.clone();
        for (m, c) in &rhs.terms {
            result.add_term(m.clone(), Integer::from(-c));
        }
        result
    }
}

impl<'a, 'b> Mul<&'b EpsilonPolynomial> for &'a EpsilonPolynomial {
    type Output = EpsilonPolynomial;

    fn mul(self, rhs: &'b EpsilonPolynomial) -> EpsilonPolynomial {
        let mut result = EpsilonPolynomial::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                result.add_term(ma.product(mb), Integer::from(ca * cb));
            }
        }
        result
    }
}

impl<'a> Neg for &'a EpsilonPolynomial {
    type Output = EpsilonPolynomial;

    fn neg(self) -> EpsilonPolynomial {
        EpsilonPolynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), Integer::from(-c)))
                .collect(),
        }
    }
}

/// Determinant of a square matrix of polynomials, by cofactor expansion
/// along the first row.
pub fn determinant(rows: &[Vec<EpsilonPolynomial>]) -> EpsilonPolynomial {
    if rows.is_empty() {
        return EpsilonPolynomial::constant(Integer::from(1));
    }
    let columns: Vec<usize> = (0..rows.len()).collect();
    expand(rows, 0, &columns)
}

fn expand(rows: &[Vec<EpsilonPolynomial>], row: usize, columns: &[usize]) -> EpsilonPolynomial {
    if columns.len() == 1 {
        return rows[row][columns[0]].clone();
    }

    let mut acc = EpsilonPolynomial::zero();
    for (pos, &col) in columns.iter().enumerate() {
        let entry = &rows[row][col];
        if entry.is_zero() {
            continue;
        }
        let minor_columns: Vec<usize> = columns.iter().copied().filter(|&c| c != col).collect();
        let term = entry * &expand(rows, row + 1, &minor_columns);
        acc = if pos % 2 == 0 { &acc + &term } else { &acc - &term };
    }
    acc
}
