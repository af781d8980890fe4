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
use std::sync::atomic::{AtomicU64, Ordering};

use rug::Integer;
use tracing::debug;

use crate::error::Result;
use crate::numeric::fixed_point::{Precision, choose_precision};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Exact-arithmetic context shared by a value store and the predicates
/// evaluated against it.
///
/// A session fixes the digit widths of every encoded sample. It is opened
/// once per detector, shared through `Arc`, and closed when the last
/// holder drops it.
#[derive(Debug)]
pub struct PrecisionSession {
    id: u64,
    precision: Precision,
}

impl PrecisionSession {
    pub fn open(precision: Precision) -> Arc<Self> {
        let id = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        debug!(
            session = id,
            total_digits = precision.total_digits(),
            fractional_digits = precision.fractional_digits(),
            "precision session opened"
        );
        Arc::new(PrecisionSession { id, precision })
    }

    /// Opens a session sized for samples bounded by `max_abs`.
    pub fn for_magnitude(max_abs: f64) -> Result<Arc<Self>> {
        Ok(Self::open(choose_precision(max_abs)?))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn encode(&self, value: f64) -> Result<Integer> {
        self.precision.encode(value)
    }

    pub fn decode(&self, fixed: &Integer) -> f64 {
        self.precision.decode(fixed)
    }
}

impl Drop for PrecisionSession {
    fn drop(&mut self) {
        debug!(session = self.id, "precision session closed");
    }
}
