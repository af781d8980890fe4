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

//! Error types for critical point detection.
//!
//! Variants fall into three classes (see [`ErrorClass`]): configuration
//! problems detected before a scan, precision problems detected while
//! loading samples, and internal invariant violations of the perturbation
//! scheme.

use thiserror::Error;

/// Result type alias for detector operations.
pub type Result<T> = std::result::Result<T, CriticalPointError>;

/// Coarse classification of a [`CriticalPointError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Invalid input shape; reported before any scanning.
    Configuration,
    /// Sample magnitudes or digit widths outside the exact-arithmetic budget.
    Precision,
    /// The perturbation scheme failed to produce a sign. Not an input error.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriticalPointError {
    // ========== Configuration ==========
    /// Only 2D and 3D vector fields are supported.
    #[error("invalid dimension {0}: expected 2 or 3")]
    InvalidDimension(usize),

    /// Simplex arity does not match the field dimension.
    #[error("simplex arity {arity} does not match a {dimension}D vector field")]
    ArityMismatch { dimension: usize, arity: usize },

    #[error("empty vector field")]
    EmptyVectorField,

    #[error("empty simplex list")]
    EmptySimplexList,

    /// Flat component buffer length is not a multiple of the dimension.
    #[error("vector field has {components} components, not a multiple of dimension {dimension}")]
    MalformedField { dimension: usize, components: usize },

    #[error("simplex {simplex} references vertex {vertex}, but the field has {sample_count} samples")]
    VertexOutOfRange {
        simplex: usize,
        vertex: usize,
        sample_count: usize,
    },

    #[error("simplex index {index} outside a list of {count} simplices")]
    SimplexOutOfRange { index: usize, count: usize },

    #[error("simplex {simplex} references vertex {vertex} more than once")]
    RepeatedVertex { simplex: usize, vertex: usize },

    #[error("sample index {index} outside 1..={max}")]
    SampleOutOfRange { index: usize, max: usize },

    #[error("coordinate index {index} outside 0..{dimension}")]
    CoordinateOutOfRange { index: usize, dimension: usize },

    /// A sample slot was never written before the store was frozen.
    #[error("sample {sample} was not loaded before freezing the value store")]
    IncompleteStore { sample: usize },

    // ========== Precision ==========
    #[error("magnitude {max_abs} needs {integer_digits} integer digits (at most {limit} supported)")]
    MagnitudeTooLarge {
        max_abs: f64,
        integer_digits: u32,
        limit: u32,
    },

    #[error("invalid fixed-point format {total}.{fractional}: need 0 <= fractional < total <= {limit}")]
    InvalidPrecision {
        total: u32,
        fractional: u32,
        limit: u32,
    },

    #[error("value {value} does not fit in {total_digits} digits with {fractional_digits} fractional digits")]
    DigitBudgetExceeded {
        value: f64,
        total_digits: u32,
        fractional_digits: u32,
    },

    /// NaN, infinities and other values without a finite decimal expansion.
    #[error("value {0} cannot be encoded as an exact decimal")]
    Unencodable(f64),

    // ========== Internal ==========
    /// Every coefficient of the perturbed determinant vanished.
    #[error("symbolic perturbation left determinant of samples {samples:?} undecided")]
    UnresolvedDegeneracy { samples: Vec<usize> },
}

impl CriticalPointError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidDimension(_)
            | Self::ArityMismatch { .. }
            | Self::EmptyVectorField
            | Self::EmptySimplexList
            | Self::MalformedField { .. }
            | Self::VertexOutOfRange { .. }
            | Self::SimplexOutOfRange { .. }
            | Self::RepeatedVertex { .. }
            | Self::SampleOutOfRange { .. }
            | Self::CoordinateOutOfRange { .. }
            | Self::IncompleteStore { .. } => ErrorClass::Configuration,
            Self::MagnitudeTooLarge { .. }
            | Self::InvalidPrecision { .. }
            | Self::DigitBudgetExceeded { .. }
            | Self::Unencodable(_) => ErrorClass::Precision,
            Self::UnresolvedDegeneracy { .. } => ErrorClass::Internal,
        }
    }
}
