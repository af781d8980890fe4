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

use critpoint::geometry::Point3;
use critpoint::mesh::grid::{grid_points, tetrahedralize_grid, triangulate_grid};
use critpoint::mesh::{SimplexList, VectorField};
use critpoint::{CriticalPointDetector, CriticalPointError, DetectorConfig, ErrorClass};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn detect(field: &VectorField, simplices: &SimplexList) -> Vec<usize> {
    detect_with(field, simplices, DetectorConfig::default())
}

fn detect_with(field: &VectorField, simplices: &SimplexList, config: DetectorConfig) -> Vec<usize> {
    CriticalPointDetector::new(field, simplices, config)
        .unwrap()
        .detect()
        .unwrap()
        .into_vec()
}

fn planar_grid_field(x: usize, y: usize, f: impl Fn(f64, f64) -> [f64; 2]) -> VectorField {
    let samples: Vec<[f64; 2]> = grid_points(x, y, 1).iter().map(|p| f(p[0], p[1])).collect();
    VectorField::planar(&samples)
}

fn spatial_grid_field(
    x: usize,
    y: usize,
    z: usize,
    f: impl Fn(f64, f64, f64) -> [f64; 3],
) -> VectorField {
    let samples: Vec<[f64; 3]> = grid_points(x, y, z)
        .iter()
        .map(|p| f(p[0], p[1], p[2]))
        .collect();
    VectorField::spatial(&samples)
}

#[test]
fn triangle_around_zero() {
    let field = VectorField::planar(&[[1.0, 0.0], [-1.0, 1.0], [-1.0, -1.0]]);
    let tris = SimplexList::Triangles(vec![[0, 1, 2]]);
    assert_eq!(detect(&field, &tris), vec![0]);
}

#[test]
fn triangle_away_from_zero() {
    let field = VectorField::planar(&[[1.0, 1.0], [2.0, 1.0], [1.0, 2.0]]);
    let tris = SimplexList::Triangles(vec![[0, 1, 2]]);
    assert!(detect(&field, &tris).is_empty());
}

#[test]
fn constant_field_has_no_zero() {
    let field = VectorField::spatial(&[[1.0, 1.0, 1.0]; 4]);
    let tets = SimplexList::Tetrahedra(vec![[0, 1, 2, 3]]);
    assert!(detect(&field, &tets).is_empty());
}

#[test]
fn zero_at_a_vertex_gets_a_definite_answer() {
    let field = VectorField::planar(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    let tris = SimplexList::Triangles(vec![[0, 1, 2]]);
    assert!(detect(&field, &tris).is_empty());

    let field = VectorField::spatial(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);
    let tets = SimplexList::Tetrahedra(vec![[0, 1, 2, 3]]);
    assert!(detect(&field, &tets).is_empty());

    let field = VectorField::spatial(&[
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 1.0],
        [1.0, 2.0, 1.0],
        [2.0, 1.0, 1.0],
    ]);
    assert!(detect(&field, &tets).is_empty());
}

#[test]
fn flat_tetrahedron_through_zero_is_deterministic() {
    let field = VectorField::spatial(&[
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ]);
    let tets = SimplexList::Tetrahedra(vec![[0, 1, 2, 3]]);
    // the zero sample carries the smallest perturbation, so it lands outside the perturbed sliver
    let first = detect(&field, &tets);
    assert!(first.is_empty());
    for _ in 0..3 {
        assert_eq!(detect(&field, &tets), first);
    }
}

#[test]
fn octahedron_fan_claims_the_zero_once() {
    let field = VectorField::spatial(&[
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ]);
    let tets = SimplexList::Tetrahedra(vec![[4, 5, 0, 2], [4, 5, 2, 1], [4, 5, 1, 3], [4, 5, 3, 0]]);
    assert_eq!(detect(&field, &tets), vec![2]);
}

#[test]
fn planar_grid_cases() {
    let tris = triangulate_grid(3, 3);
    let field = planar_grid_field(3, 3, |x, y| [x - 1.0, y - 1.0]);
    assert_eq!(detect(&field, &tris), vec![0]);

    let field = planar_grid_field(3, 3, |x, y| [-(y - 1.0), x - 1.0]);
    assert_eq!(detect(&field, &tris), vec![4]);

    let tris = triangulate_grid(2, 2);
    let field = planar_grid_field(2, 2, |x, y| [2.0 * x - 1.0, 2.0 * y - 1.0]);
    assert_eq!(detect(&field, &tris), vec![0]);

    let field = planar_grid_field(2, 2, |x, y| [x - y, x + y - 1.0]);
    assert_eq!(detect(&field, &tris), vec![1]);
}

#[test]
fn spatial_grid_cases() {
    let tets = tetrahedralize_grid(3, 3, 3);
    let field = spatial_grid_field(3, 3, 3, |x, y, z| [x - 1.0, y - 1.0, z - 1.0]);
    assert_eq!(detect(&field, &tets), vec![3]);

    let field = spatial_grid_field(3, 3, 3, |x, y, z| [-(y - 1.0), x - 1.0, z - 1.0]);
    assert_eq!(detect(&field, &tets), vec![11]);

    let tets = tetrahedralize_grid(2, 2, 2);
    let field = spatial_grid_field(2, 2, 2, |x, y, z| {
        [2.0 * x - 1.0, 2.0 * y - 1.0, 2.0 * z - 1.0]
    });
    assert_eq!(detect(&field, &tets), vec![4]);
}

#[test]
fn linear_fields_have_exactly_one_hit() {
    let mut rng = StdRng::seed_from_u64(7);
    let tets = tetrahedralize_grid(4, 4, 4);
    let mut checked = 0;

    while checked < 10 {
        let a: [[f64; 3]; 3] =
            std::array::from_fn(|_| std::array::from_fn(|_| rng.random_range(-3..=3) as f64));
        let det = a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0]);
        if det == 0.0 {
            continue;
        }
        // odd quarters keep the zero off every grid plane
        let c: [f64; 3] = std::array::from_fn(|_| (2 * rng.random_range(0..6) + 1) as f64 / 4.0);

        let field = spatial_grid_field(4, 4, 4, |x, y, z| {
            let d = [x - c[0], y - c[1], z - c[2]];
            std::array::from_fn(|r| a[r][0] * d[0] + a[r][1] * d[1] + a[r][2] * d[2])
        });
        let hits = detect(&field, &tets);
        assert_eq!(hits.len(), 1, "zero at {:?}", c);

        let points = grid_points(4, 4, 4);
        let vertices = tets.vertices(hits[0]).unwrap();
        for axis in 0..3 {
            let lo = vertices.iter().map(|&v| points[v][axis]).fold(f64::MAX, f64::min);
            let hi = vertices.iter().map(|&v| points[v][axis]).fold(f64::MIN, f64::max);
            assert!(lo <= c[axis] && c[axis] <= hi);
        }
        checked += 1;
    }
}

#[test]
fn parallel_scan_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(42);
    let tets = tetrahedralize_grid(5, 5, 5);
    let samples: Vec<[f64; 3]> = (0..125)
        .map(|_| std::array::from_fn(|_| rng.random_range(-2..=2) as f64))
        .collect();
    let field = VectorField::spatial(&samples);

    let sequential = detect(&field, &tets);
    let parallel = detect_with(&field, &tets, DetectorConfig::default().with_parallel(true));
    assert_eq!(sequential, parallel);

    let mut sorted = sequential.clone();
    sorted.dedup();
    assert_eq!(sorted, sequential);
    assert!(sequential.iter().all(|&t| t < tets.len()));
}

#[test]
fn scan_order_does_not_change_membership() {
    let mut rng = StdRng::seed_from_u64(3);
    let tris = triangulate_grid(6, 6);
    let samples: Vec<[f64; 2]> = (0..36)
        .map(|_| std::array::from_fn(|_| rng.random_range(-1..=1) as f64))
        .collect();
    let field = VectorField::planar(&samples);
    let baseline = detect(&field, &tris);

    let SimplexList::Triangles(cells) = &tris else {
        unreachable!()
    };
    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.shuffle(&mut rng);
    let shuffled = SimplexList::Triangles(
        order
            .iter()
            .map(|&t| {
                let mut cell = cells[t];
                cell.shuffle(&mut rng);
                cell
            })
            .collect(),
    );

    let mut remapped: Vec<usize> = detect(&field, &shuffled).into_iter().map(|t| order[t]).collect();
    remapped.sort_unstable();
    assert_eq!(remapped, baseline);
}

#[test]
fn contains_zero_is_idempotent() {
    let tets = tetrahedralize_grid(3, 3, 3);
    let field = spatial_grid_field(3, 3, 3, |x, y, z| [x - 1.0, y - 1.0, z - 1.0]);
    let detector = CriticalPointDetector::new(&field, &tets, DetectorConfig::default()).unwrap();

    let first: Vec<bool> = (0..tets.len()).map(|t| detector.contains_zero(t).unwrap()).collect();
    let second: Vec<bool> = (0..tets.len()).map(|t| detector.contains_zero(t).unwrap()).collect();
    assert_eq!(first, second);

    let result = detector.detect().unwrap();
    let expected: Vec<usize> = first
        .iter()
        .enumerate()
        .filter_map(|(t, &hit)| hit.then_some(t))
        .collect();
    assert_eq!(result.simplices(), expected.as_slice());
}

#[test]
fn configuration_errors() {
    let field = VectorField::planar(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    let tris = SimplexList::Triangles(vec![[0, 1, 5]]);
    let err = CriticalPointDetector::new(&field, &tris, DetectorConfig::default())
        .err()
        .unwrap();
    assert_eq!(err.class(), ErrorClass::Configuration);

    let tets = SimplexList::Tetrahedra(vec![[0, 1, 2, 0]]);
    let spatial = VectorField::spatial(&[[1.0, 0.0, 0.0]; 3]);
    assert_eq!(
        CriticalPointDetector::new(&spatial, &tets, DetectorConfig::default()).err(),
        Some(CriticalPointError::RepeatedVertex { simplex: 0, vertex: 0 })
    );
}

#[test]
fn oversized_values_are_precision_errors() {
    let field = VectorField::planar(&[[1.0e11, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    let tris = SimplexList::Triangles(vec![[0, 1, 2]]);
    let err = CriticalPointDetector::new(&field, &tris, DetectorConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, CriticalPointError::MagnitudeTooLarge { .. }));
    assert_eq!(err.class(), ErrorClass::Precision);
}

#[test]
fn centroids_follow_the_mesh() {
    let tris = triangulate_grid(3, 3);
    let field = planar_grid_field(3, 3, |x, y| [-(y - 1.0), x - 1.0]);
    let result = CriticalPointDetector::new(&field, &tris, DetectorConfig::default())
        .unwrap()
        .detect()
        .unwrap();
    let points = grid_points(3, 3, 1);
    let centroids = result.centroids(&tris, &points);
    assert_eq!(centroids.len(), 1);

    let (t, c) = centroids[0];
    let vertices = tris.vertices(t).unwrap();
    let expected = Point3::centroid(vertices.iter().map(|&v| &points[v])).unwrap();
    assert_eq!(c, expected);
}
