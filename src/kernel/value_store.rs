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

use std::sync::Arc;

use rug::Integer;
use tracing::debug;

use crate::error::{CriticalPointError, Result};
use crate::geometry::Dimension;
use crate::mesh::VectorField;
use crate::numeric::fixed_point::Precision;
use crate::numeric::session::PrecisionSession;

/// Write phase of an [`ExactValueStore`].
///
/// Samples are addressed `1..=sample_count`; index 0 is a sentinel and
/// `sample_count + 1` is reserved for the query point, which `freeze`
/// fills with the exact zero vector.
pub struct ValueStoreBuilder {
    session: Arc<PrecisionSession>,
    dimension: Dimension,
    sample_count: usize,
    values: Vec<Integer>,
    loaded: Vec<bool>,
}

impl ValueStoreBuilder {
    pub fn load(session: Arc<PrecisionSession>, dimension: Dimension, sample_count: usize) -> Self {
        let slots = (sample_count + 2) * dimension.get();
        ValueStoreBuilder {
            session,
            dimension,
            sample_count,
            values: vec![Integer::new(); slots],
            loaded: vec![false; slots],
        }
    }

    pub fn query_index(&self) -> usize {
        self.sample_count + 1
    }

    /// Encodes and stores coordinate `coordinate` (0-based) of `sample`.
    pub fn set(&mut self, sample: usize, coordinate: usize, value: f64) -> Result<()> {
        let fixed = self.session.encode(value)?;
        self.set_exact(sample, coordinate, fixed)
    }

    /// Stores an already-encoded coordinate.
    pub fn set_exact(&mut self, sample: usize, coordinate: usize, value: Integer) -> Result<()> {
        if sample == 0 || sample > self.sample_count {
            return Err(CriticalPointError::SampleOutOfRange {
                index: sample,
                max: self.sample_count,
            });
        }
        let slot = slot(self.dimension, sample, coordinate)?;
        self.values[slot] = value;
        self.loaded[slot] = true;
        Ok(())
    }

    /// Loads the query point and ends the write phase.
    pub fn freeze(mut self) -> Result<ExactValueStore> {
        let d = self.dimension.get();
        if let Some(slot) = (d..(self.sample_count + 1) * d).find(|&s| !self.loaded[s]) {
            return Err(CriticalPointError::IncompleteStore { sample: slot / d });
        }

        let query = self.query_index();
        for c in 0..d {
            self.values[query * d + c] = Integer::new();
        }

        debug!(
            session = self.session.id(),
            samples = self.sample_count,
            dimension = d,
            "value store frozen"
        );
        Ok(ExactValueStore {
            session: self.session,
            dimension: self.dimension,
            sample_count: self.sample_count,
            values: self.values,
        })
    }
}

/// Read-only table of exactly represented sample coordinates.
///
/// Immutable once built, so it can be shared across scanning threads.
#[derive(Debug)]
pub struct ExactValueStore {
    session: Arc<PrecisionSession>,
    dimension: Dimension,
    sample_count: usize,
    values: Vec<Integer>,
}

impl ExactValueStore {
    /// Bulk-loads every sample of `field`: vertex `v` becomes sample `v + 1`.
    pub fn from_field(session: Arc<PrecisionSession>, field: &VectorField) -> Result<Self> {
        let mut builder = ValueStoreBuilder::load(session, field.dimension(), field.len());
        for (v, sample) in field.samples().enumerate() {
            for (c, &value) in sample.iter().enumerate() {
                builder.set(v + 1, c, value)?;
            }
        }
        builder.freeze()
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Index of the zero vector.
    pub fn query_index(&self) -> usize {
        self.sample_count + 1
    }

    pub fn session(&self) -> &Arc<PrecisionSession> {
        &self.session
    }

    pub fn precision(&self) -> Precision {
        self.session.precision()
    }

    /// All coordinates of `sample` (valid range `1..=query_index()`).
    pub fn row(&self, sample: usize) -> Result<&[Integer]> {
        if sample == 0 || sample > self.query_index() {
            return Err(CriticalPointError::SampleOutOfRange {
                index: sample,
                max: self.query_index(),
            });
        }
        let d = self.dimension.get();
        Ok(&self.values[sample * d..(sample + 1) * d])
    }

    pub fn value(&self, sample: usize, coordinate: usize) -> Result<&Integer> {
        let row = self.row(sample)?;
        row.get(coordinate)
            .ok_or(CriticalPointError::CoordinateOutOfRange {
                index: coordinate,
                dimension: self.dimension.get(),
            })
    }

    /// Perturbation key `i·d − j` of sample `i`, 1-based coordinate `j`.
    /// Smaller keys carry larger perturbations.
    pub(crate) fn perturbation_key(&self, sample: usize, coordinate: usize) -> u64 {
        let d = self.dimension.get() as u64;
        sample as u64 * d - (coordinate as u64 + 1)
    }
}

fn slot(dimension: Dimension, sample: usize, coordinate: usize) -> Result<usize> {
    let d = dimension.get();
    if coordinate >= d {
        return Err(CriticalPointError::CoordinateOutOfRange {
            index: coordinate,
            dimension: d,
        });
    }
    Ok(sample * d + coordinate)
}
