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

use tracing::debug;

use crate::error::Result;
use crate::mesh::VectorField;
use crate::numeric::fixed_point::{Precision, choose_precision, max_abs};

/// How the fixed-point format of a field is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecisionPolicy {
    /// Widest fractional part that keeps the field's largest component
    /// within 16 significant digits.
    #[default]
    FromData,
    /// A caller-chosen format; samples that do not fit are rejected.
    Fixed(Precision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorConfig {
    pub precision: PrecisionPolicy,
    /// Shard the scan over the rayon thread pool. Results are identical to
    /// a sequential scan.
    pub parallel: bool,
}

impl DetectorConfig {
    pub fn with_precision(mut self, precision: PrecisionPolicy) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn resolve_precision(&self, field: &VectorField) -> Result<Precision> {
        match self.precision {
            PrecisionPolicy::Fixed(p) => Ok(p),
            PrecisionPolicy::FromData => {
                let max = max_abs(field.components().iter().copied());
                let p = choose_precision(max)?;
                debug!(
                    max_abs = max,
                    total_digits = p.total_digits(),
                    fractional_digits = p.fractional_digits(),
                    "precision chosen from data"
                );
                Ok(p)
            }
        }
    }
}
