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

//! Critical point scanner.
//!
//! A [`CriticalPointDetector`] is built from a vector field and a simplex
//! list (validation and exact loading happen here), then consumed by
//! [`CriticalPointDetector::detect`], which scans every simplex once and
//! yields the final [`CriticalPoints`].

pub mod config;

pub use config::{DetectorConfig, PrecisionPolicy};

use rayon::prelude::*;
use tracing::{info, info_span};

use crate::error::{CriticalPointError, Result};
use crate::geometry::{Dimension, Point3};
use crate::kernel::predicates::{point_in_tetrahedron, point_in_triangle};
use crate::kernel::value_store::ExactValueStore;
use crate::mesh::{SimplexList, VectorField};
use crate::numeric::session::PrecisionSession;

pub struct CriticalPointDetector<'m> {
    store: ExactValueStore,
    simplices: &'m SimplexList,
    parallel: bool,
}

impl<'m> CriticalPointDetector<'m> {
    pub fn new(field: &VectorField, simplices: &'m SimplexList, config: DetectorConfig) -> Result<Self> {
        validate(field, simplices)?;

        let precision = config.resolve_precision(field)?;
        let session = PrecisionSession::open(precision);
        let store = ExactValueStore::from_field(session, field)?;

        Ok(CriticalPointDetector {
            store,
            simplices,
            parallel: config.parallel,
        })
    }

    pub fn store(&self) -> &ExactValueStore {
        &self.store
    }

    pub fn simplices(&self) -> &SimplexList {
        self.simplices
    }

    pub fn dimension(&self) -> Dimension {
        self.store.dimension()
    }

    /// Whether the interpolated field vanishes inside simplex `simplex`.
    pub fn contains_zero(&self, simplex: usize) -> Result<bool> {
        let vertices = self
            .simplices
            .vertices(simplex)
            .ok_or(CriticalPointError::SimplexOutOfRange {
                index: simplex,
                count: self.simplices.len(),
            })?;

        let q = self.store.query_index();
        match *vertices {
            [a, b, c] => point_in_triangle(&self.store, q, [a + 1, b + 1, c + 1]),
            [a, b, c, d] => point_in_tetrahedron(&self.store, q, [a + 1, b + 1, c + 1, d + 1]),
            _ => Err(CriticalPointError::ArityMismatch {
                dimension: self.dimension().get(),
                arity: vertices.len(),
            }),
        }
    }

    /// Scans every simplex in input order.
    pub fn detect(self) -> Result<CriticalPoints> {
        let span = info_span!(
            "critical_point_scan",
            dimension = self.dimension().get(),
            samples = self.store.sample_count(),
            simplices = self.simplices.len()
        );
        let _enter = span.enter();
        info!(parallel = self.parallel, "detecting critical points");

        let hits = if self.parallel {
            self.scan_parallel()?
        } else {
            self.scan_sequential()?
        };

        info!(count = hits.len(), "detected simplices with critical points");
        Ok(CriticalPoints {
            dimension: self.dimension(),
            simplices: hits,
        })
    }

    fn scan_sequential(&self) -> Result<Vec<usize>> {
        let mut hits = Vec::new();
        for t in 0..self.simplices.len() {
            if self.contains_zero(t)? {
                hits.push(t);
            }
        }
        Ok(hits)
    }

    fn scan_parallel(&self) -> Result<Vec<usize>> {
        let flags = (0..self.simplices.len())
            .into_par_iter()
            .map(|t| self.contains_zero(t))
            .collect::<Result<Vec<bool>>>()?;

        Ok(flags
            .into_iter()
            .enumerate()
            .filter_map(|(t, hit)| hit.then_some(t))
            .collect())
    }
}

fn validate(field: &VectorField, simplices: &SimplexList) -> Result<()> {
    if field.is_empty() {
        return Err(CriticalPointError::EmptyVectorField);
    }
    if simplices.is_empty() {
        return Err(CriticalPointError::EmptySimplexList);
    }
    if simplices.dimension() != field.dimension() {
        return Err(CriticalPointError::ArityMismatch {
            dimension: field.dimension().get(),
            arity: simplices.arity(),
        });
    }

    let sample_count = field.len();
    for (simplex, vertices) in simplices.iter().enumerate() {
        for (n, &vertex) in vertices.iter().enumerate() {
            if vertex >= sample_count {
                return Err(CriticalPointError::VertexOutOfRange {
                    simplex,
                    vertex,
                    sample_count,
                });
            }
            if vertices[..n].contains(&vertex) {
                return Err(CriticalPointError::RepeatedVertex { simplex, vertex });
            }
        }
    }
    Ok(())
}

/// Indices of the simplices found to contain a zero of the field, in
/// input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPoints {
    dimension: Dimension,
    simplices: Vec<usize>,
}

impl CriticalPoints {
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn simplices(&self) -> &[usize] {
        &self.simplices
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.simplices.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.simplices
    }

    /// Centroid of each flagged simplex. Simplices with a vertex outside
    /// `points` are skipped.
    pub fn centroids(&self, simplices: &SimplexList, points: &[Point3]) -> Vec<(usize, Point3)> {
        self.simplices
            .iter()
            .filter_map(|&t| {
                let vertices = simplices.vertices(t)?;
                let corners = vertices
                    .iter()
                    .map(|&v| points.get(v))
                    .collect::<Option<Vec<_>>>()?;
                Point3::centroid(corners).map(|c| (t, c))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a CriticalPoints {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}
