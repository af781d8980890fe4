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

use std::slice::ChunksExact;

use crate::error::{CriticalPointError, Result};
use crate::geometry::Dimension;

/// Per-vertex vector samples of a piecewise-linear field, stored flat.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    dimension: Dimension,
    components: Vec<f64>,
}

impl VectorField {
    /// `components` holds `dimension` values per sample, sample after sample.
    pub fn new(dimension: usize, components: Vec<f64>) -> Result<Self> {
        let dimension = Dimension::try_from(dimension)?;
        if components.len() % dimension.get() != 0 {
            return Err(CriticalPointError::MalformedField {
                dimension: dimension.get(),
                components: components.len(),
            });
        }
        Ok(VectorField {
            dimension,
            components,
        })
    }

    pub fn planar(samples: &[[f64; 2]]) -> Self {
        VectorField {
            dimension: Dimension::Two,
            components: samples.iter().flatten().copied().collect(),
        }
    }

    pub fn spatial(samples: &[[f64; 3]]) -> Self {
        VectorField {
            dimension: Dimension::Three,
            components: samples.iter().flatten().copied().collect(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.components.len() / self.dimension.get()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn sample(&self, index: usize) -> Option<&[f64]> {
        let d = self.dimension.get();
        self.components.get(index * d..(index + 1) * d)
    }

    pub fn samples(&self) -> ChunksExact<'_, f64> {
        self.components.chunks_exact(self.dimension.get())
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }
}

/// Cells of a simplicial mesh as 0-based vertex tuples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimplexList {
    Triangles(Vec<[usize; 3]>),
    Tetrahedra(Vec<[usize; 4]>),
}

impl SimplexList {
    pub fn len(&self) -> usize {
        match self {
            SimplexList::Triangles(t) => t.len(),
            SimplexList::Tetrahedra(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            SimplexList::Triangles(_) => Dimension::Two,
            SimplexList::Tetrahedra(_) => Dimension::Three,
        }
    }

    pub fn arity(&self) -> usize {
        self.dimension().simplex_arity()
    }

    pub fn vertices(&self, simplex: usize) -> Option<&[usize]> {
        match self {
            SimplexList::Triangles(t) => t.get(simplex).map(|s| s.as_slice()),
            SimplexList::Tetrahedra(t) => t.get(simplex).map(|s| s.as_slice()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.len()).filter_map(move |i| self.vertices(i))
    }
}
