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

//! Simplicial meshes of regular grids. Vertex `(i, j, k)` has index
//! `i + X*j + X*Y*k`.

use crate::geometry::Point3;
use crate::mesh::field::SimplexList;

/// Two triangles per grid quad.
pub fn triangulate_grid(x: usize, y: usize) -> SimplexList {
    let mut triangles = Vec::with_capacity(2 * x.saturating_sub(1) * y.saturating_sub(1));

    for row in 1..y {
        for col in 1..x {
            // v is the lower-left corner, vxy the diagonally opposite one
            let v = x * (row - 1) + (col - 1);
            let vx = x * (row - 1) + col;
            let vy = x * row + (col - 1);
            let vxy = x * row + col;

            triangles.push([v, vx, vxy]);
            triangles.push([v, vxy, vy]);
        }
    }
    SimplexList::Triangles(triangles)
}

/// Five tetrahedra per grid cube: four corner tets around a central one.
pub fn tetrahedralize_grid(x: usize, y: usize, z: usize) -> SimplexList {
    let xy = x * y;
    let mut tets =
        Vec::with_capacity(5 * x.saturating_sub(1) * y.saturating_sub(1) * z.saturating_sub(1));

    for slice in 1..z {
        for row in 1..y {
            for col in 1..x {
                let v = xy * (slice - 1) + x * (row - 1) + (col - 1);

                let vx = xy * (slice - 1) + x * (row - 1) + col;
                let vy = xy * (slice - 1) + x * row + (col - 1);
                let vz = xy * slice + x * (row - 1) + (col - 1);

                let vxy = xy * (slice - 1) + x * row + col;
                let vyz = xy * slice + x * row + (col - 1);
                let vxz = xy * slice + x * (row - 1) + col;

                let vxyz = xy * slice + x * row + col;

                tets.push([v, vx, vz, vy]);
                tets.push([vxz, vxyz, vz, vx]);
                tets.push([vyz, vz, vy, vxyz]);
                tets.push([vxy, vxyz, vx, vy]);
                tets.push([vz, vx, vxyz, vy]);
            }
        }
    }
    SimplexList::Tetrahedra(tets)
}

/// Grid vertex positions in index order, unit spacing.
pub fn grid_points(x: usize, y: usize, z: usize) -> Vec<Point3> {
    let mut points = Vec::with_capacity(x * y * z);
    for k in 0..z {
        for j in 0..y {
            for i in 0..x {
                points.push(Point3::new([i as f64, j as f64, k as f64]));
            }
        }
    }
    points
}
