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

use std::ops::{Index, IndexMut};

use num_traits::{Float, NumCast};

/// Spatial location of a mesh vertex. Only used for reporting; membership
/// is decided on vector values, never on positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Float, const N: usize> {
    pub coords: [T; N],
}

pub type Point3 = Point<f64, 3>;

impl<T: Float, const N: usize> Point<T, N> {
    pub fn new(coords: [T; N]) -> Self {
        Point { coords }
    }

    pub fn origin() -> Self {
        Point {
            coords: [T::zero(); N],
        }
    }

    /// Arithmetic mean of `points`; `None` when empty.
    pub fn centroid<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<T, N>>,
        T: 'a,
    {
        let mut sum = [T::zero(); N];
        let mut count = 0usize;
        for p in points {
            for (s, c) in sum.iter_mut().zip(p.coords.iter()) {
                *s = *s + *c;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = <T as NumCast>::from(count)?;
        Some(Point {
            coords: sum.map(|s| s / n),
        })
    }
}

impl Point3 {
    /// Embeds a planar position at `z = 0`.
    pub fn planar(x: f64, y: f64) -> Self {
        Point::new([x, y, 0.0])
    }
}

impl<T: Float, const N: usize> Default for Point<T, N> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<T: Float, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Float, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}
