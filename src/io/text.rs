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

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    detector::CriticalPoints,
    geometry::{Dimension, Point3},
    mesh::{SimplexList, VectorField},
};

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

// Non-empty, non-comment tokens across lines.
fn tokenize<R: BufRead>(r: R) -> io::Result<Vec<String>> {
    let mut toks = Vec::new();
    for line in r.lines() {
        let l = line?;
        let trimmed = l.split('#').next().unwrap_or("").trim();
        if trimmed.is_empty() {
            continue;
        }
        toks.extend(trimmed.split_whitespace().map(|s| s.to_string()));
    }
    Ok(toks)
}

/// Number of whitespace-separated tokens on the first non-empty line.
pub fn count_columns<P: AsRef<Path>>(path: P) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let l = line?;
        let trimmed = l.split('#').next().unwrap_or("").trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.split_whitespace().count());
        }
    }
    Ok(0)
}

/// Read sample records from a text file.
/// Format:
///   x y vx vy          (2D)
///   x y z vx vy vz     (3D)
pub fn read_field<P: AsRef<Path>>(
    path: P,
    dimension: Dimension,
) -> io::Result<(Vec<Point3>, VectorField)> {
    parse_field(BufReader::new(File::open(path)?), dimension)
}

pub fn parse_field<R: BufRead>(
    reader: R,
    dimension: Dimension,
) -> io::Result<(Vec<Point3>, VectorField)> {
    let d = dimension.get();
    let record = 2 * d;

    let values = tokenize(reader)?
        .iter()
        .enumerate()
        .map(|(n, tok)| {
            tok.parse::<f64>().map_err(|_| {
                invalid(format!("field: bad value '{}' in record {}", tok, n / record))
            })
        })
        .collect::<io::Result<Vec<f64>>>()?;

    if values.len() % record != 0 {
        return Err(invalid(format!(
            "field: {} values do not form whole {}-column records",
            values.len(),
            record
        )));
    }

    let mut points = Vec::with_capacity(values.len() / record);
    let mut components = Vec::with_capacity(values.len() / 2);
    for rec in values.chunks_exact(record) {
        let (pos, vec) = rec.split_at(d);
        let z = if d == 3 { pos[2] } else { 0.0 };
        points.push(Point3::new([pos[0], pos[1], z]));
        components.extend_from_slice(vec);
    }

    let field = VectorField::new(d, components).map_err(|e| invalid(e.to_string()))?;
    Ok((points, field))
}

/// Read simplices as rows of 0-based vertex indices: 3 per triangle (2D),
/// 4 per tetrahedron (3D).
pub fn read_simplices<P: AsRef<Path>>(path: P, dimension: Dimension) -> io::Result<SimplexList> {
    parse_simplices(BufReader::new(File::open(path)?), dimension)
}

pub fn parse_simplices<R: BufRead>(reader: R, dimension: Dimension) -> io::Result<SimplexList> {
    let arity = dimension.simplex_arity();
    let indices = tokenize(reader)?
        .iter()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| invalid(format!("simplices: bad index '{}'", tok)))
        })
        .collect::<io::Result<Vec<usize>>>()?;

    if indices.len() % arity != 0 {
        return Err(invalid(format!(
            "simplices: {} indices do not form whole {}-vertex records",
            indices.len(),
            arity
        )));
    }

    let chunks = indices.chunks_exact(arity);
    Ok(match dimension {
        Dimension::Two => SimplexList::Triangles(chunks.map(|c| [c[0], c[1], c[2]]).collect()),
        Dimension::Three => {
            SimplexList::Tetrahedra(chunks.map(|c| [c[0], c[1], c[2], c[3]]).collect())
        }
    })
}

/// Write one line per flagged simplex:
///   <simplex index> <cx> <cy> <cz>
/// where (cx, cy, cz) is the centroid of the simplex's points.
/// Returns the number of lines written.
pub fn write_critical_points<W: Write>(
    out: &mut W,
    result: &CriticalPoints,
    simplices: &SimplexList,
    points: &[Point3],
) -> io::Result<usize> {
    let centroids = result.centroids(simplices, points);
    if centroids.len() != result.len() {
        return Err(invalid(
            "critical points: simplex references a vertex without a point",
        ));
    }
    for (t, c) in &centroids {
        writeln!(out, "{} {} {} {}", t, c[0], c[1], c[2])?;
    }
    Ok(centroids.len())
}

pub fn write_critical_points_file<P: AsRef<Path>>(
    path: P,
    result: &CriticalPoints,
    simplices: &SimplexList,
    points: &[Point3],
) -> io::Result<usize> {
    let mut out = BufWriter::new(File::create(path)?);
    let written = write_critical_points(&mut out, result, simplices, points)?;
    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn planar_records() {
        let text = "0 0 1 0\n# comment\n1 0 -1 1\n\n0 1 -1 -1\n";
        let (points, field) = parse_field(Cursor::new(text), Dimension::Two).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point3::new([0.0, 1.0, 0.0]));
        assert_eq!(field.sample(1), Some(&[-1.0, 1.0][..]));
    }

    #[test]
    fn spatial_records() {
        let text = "0 0 1 0.5 0.5 0.5\n";
        let (points, field) = parse_field(Cursor::new(text), Dimension::Three).unwrap();
        assert_eq!(points[0], Point3::new([0.0, 0.0, 1.0]));
        assert_eq!(field.dimension(), Dimension::Three);
        assert_eq!(field.sample(0), Some(&[0.5, 0.5, 0.5][..]));
    }

    #[test]
    fn partial_record_is_invalid() {
        let err = parse_field(Cursor::new("0 0 1 0\n1 1 1\n"), Dimension::Two).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = parse_field(Cursor::new("0 0 x 0\n"), Dimension::Two).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn simplex_records() {
        let tris = parse_simplices(Cursor::new("0 1 2\n1 2 3\n"), Dimension::Two).unwrap();
        assert_eq!(tris, SimplexList::Triangles(vec![[0, 1, 2], [1, 2, 3]]));

        let tets = parse_simplices(Cursor::new("0 1 2 3\n"), Dimension::Three).unwrap();
        assert_eq!(tets, SimplexList::Tetrahedra(vec![[0, 1, 2, 3]]));

        let err = parse_simplices(Cursor::new("0 1 2 3\n"), Dimension::Two).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = parse_simplices(Cursor::new("0 -1 2\n"), Dimension::Two).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
