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

use critpoint::geometry::Dimension;
use critpoint::kernel::{
    ExactValueStore, Sign, ValueStoreBuilder, crosses_half_line, is_smaller, orientation,
    point_in_tetrahedron, point_in_triangle,
};
use critpoint::mesh::VectorField;
use critpoint::numeric::fixed_point::Precision;
use critpoint::numeric::session::PrecisionSession;

fn planar_store(samples: &[[f64; 2]]) -> ExactValueStore {
    let field = VectorField::planar(samples);
    ExactValueStore::from_field(PrecisionSession::open(Precision::LEGACY), &field).unwrap()
}

fn spatial_store(samples: &[[f64; 3]]) -> ExactValueStore {
    let field = VectorField::spatial(samples);
    ExactValueStore::from_field(PrecisionSession::open(Precision::LEGACY), &field).unwrap()
}

#[test]
fn query_is_the_origin() {
    let store = planar_store(&[[3.0, 4.0], [5.0, 6.0]]);
    let q = store.query_index();
    assert_eq!(q, 3);
    assert!(store.row(q).unwrap().iter().all(|v| *v == 0));
}

#[test]
fn ties_break_by_index() {
    let store = planar_store(&[[1.0, 2.0], [1.0, 2.0]]);
    assert!(is_smaller(&store, 1, 0, 2, 0).unwrap() != is_smaller(&store, 2, 0, 1, 0).unwrap());
    assert!(is_smaller(&store, 1, 0, 1, 1).unwrap());
}

#[test]
fn orientation_is_antisymmetric() {
    let store = planar_store(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
    let s = orientation(&store, &[1, 2, 3]).unwrap();
    assert_eq!(orientation(&store, &[2, 1, 3]).unwrap(), s.flip());
    assert_eq!(orientation(&store, &[2, 3, 1]).unwrap(), s);
}

#[test]
fn triangle_membership() {
    let store = planar_store(&[[1.0, 0.0], [-1.0, 1.0], [-1.0, -1.0], [2.0, 2.0]]);
    let q = store.query_index();
    assert!(point_in_triangle(&store, q, [1, 2, 3]).unwrap());
    assert!(point_in_triangle(&store, q, [3, 1, 2]).unwrap());
    assert!(!point_in_triangle(&store, q, [1, 2, 4]).unwrap());
}

#[test]
fn half_line_crossings() {
    let store = planar_store(&[[1.0, -1.0], [1.0, 1.0], [-1.0, -1.0], [-1.0, 1.0]]);
    let q = store.query_index();
    assert!(crosses_half_line(&store, q, 1, 2).unwrap());
    assert!(crosses_half_line(&store, q, 2, 1).unwrap());
    assert!(!crosses_half_line(&store, q, 3, 4).unwrap());
}

#[test]
fn tetrahedron_membership() {
    let store = spatial_store(&[
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [5.0, 5.0, -1.0],
    ]);
    let q = store.query_index();
    assert!(point_in_tetrahedron(&store, q, [1, 2, 3, 4]).unwrap());
    assert!(point_in_tetrahedron(&store, q, [2, 1, 3, 4]).unwrap());
    assert!(!point_in_tetrahedron(&store, q, [1, 2, 3, 5]).unwrap());
}

#[test]
fn predicates_check_the_store_dimension() {
    let store = planar_store(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 2.0]]);
    let q = store.query_index();
    assert!(point_in_tetrahedron(&store, q, [1, 2, 3, 4]).is_err());
}

#[test]
fn built_store_matches_field_store() {
    let session = PrecisionSession::open(Precision::LEGACY);
    let mut builder = ValueStoreBuilder::load(session, Dimension::Two, 3);
    for (i, [x, y]) in [[1.0, 0.0], [-1.0, 1.0], [-1.0, -1.0]].into_iter().enumerate() {
        builder.set(i + 1, 0, x).unwrap();
        builder.set(i + 1, 1, y).unwrap();
    }
    let store = builder.freeze().unwrap();
    assert_eq!(orientation(&store, &[1, 2, 3]).unwrap(), Sign::Positive);
    assert!(point_in_triangle(&store, store.query_index(), [1, 2, 3]).unwrap());
}
