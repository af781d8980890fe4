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

//! Robust detection of critical points (zeros) of piecewise-linear vector
//! fields on triangle and tetrahedral meshes.
//!
//! Sample values are encoded as exact fixed-point integers and every
//! geometric decision goes through exact predicates with Simulation of
//! Simplicity, so each zero is reported by exactly one simplex of a
//! conforming mesh, regardless of degeneracies in the input.

pub mod detector;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod numeric;

pub use detector::{CriticalPointDetector, CriticalPoints, DetectorConfig, PrecisionPolicy};
pub use error::{CriticalPointError, ErrorClass, Result};
