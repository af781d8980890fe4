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

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use critpoint::geometry::Dimension;
use critpoint::io::text::{count_columns, read_field, read_simplices, write_critical_points_file};
use critpoint::mesh::SimplexList;
use critpoint::mesh::grid::{tetrahedralize_grid, triangulate_grid};
use critpoint::numeric::fixed_point::Precision;
use critpoint::{CriticalPointDetector, DetectorConfig, PrecisionPolicy};

/// Detect simplices containing zeros of a piecewise-linear vector field.
#[derive(Parser, Debug)]
#[command(name = "critpoint")]
#[command(about = "Robust critical point detection on triangle and tetrahedral meshes")]
struct Args {
    /// Sample file: `x y vx vy` or `x y z vx vy vz` per line.
    field: PathBuf,

    /// Simplex file: 3 or 4 zero-based vertex indices per line.
    #[arg(required_unless_present = "grid", conflicts_with = "grid")]
    simplices: Option<PathBuf>,

    /// Mesh the samples as a regular grid of X Y [Z] vertices instead.
    #[arg(long, num_args = 2..=3, value_names = ["X", "Y", "Z"])]
    grid: Option<Vec<usize>>,

    /// Output path (defaults to FIELD.cp.txt).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scan simplices on the rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Use the fixed 15.14 digit layout instead of sizing it from the data.
    #[arg(long)]
    legacy_precision: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn infer_dimension(args: &Args) -> Result<Dimension> {
    let field_columns = count_columns(&args.field)
        .with_context(|| format!("reading {}", args.field.display()))?;

    if let Some(grid) = &args.grid {
        return grid_dimension(field_columns, grid.len());
    }

    let simplex_columns = match &args.simplices {
        Some(path) => {
            count_columns(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => bail!("either a simplex file or --grid is required"),
    };
    columns_dimension(field_columns, simplex_columns)
}

/// Field records carry a position and a vector, `2 * d` columns in total.
fn grid_dimension(field_columns: usize, grid_axes: usize) -> Result<Dimension> {
    let dimension = match grid_axes {
        2 => Dimension::Two,
        3 => Dimension::Three,
        n => bail!("--grid takes 2 or 3 sizes, got {}", n),
    };
    if field_columns != 2 * dimension.get() {
        bail!(
            "a {} grid needs {} field columns, found {}",
            dimension,
            2 * dimension.get(),
            field_columns
        );
    }
    Ok(dimension)
}

fn columns_dimension(field_columns: usize, simplex_columns: usize) -> Result<Dimension> {
    match (field_columns, simplex_columns) {
        (4, 3) => Ok(Dimension::Two),
        (6, 4) => Ok(Dimension::Three),
        (f, s) => bail!(
            "cannot infer dimension from {} field columns and {} simplex columns",
            f,
            s
        ),
    }
}

fn load_simplices(args: &Args, dimension: Dimension, sample_count: usize) -> Result<SimplexList> {
    if let Some(grid) = &args.grid {
        let vertices: usize = grid.iter().product();
        if vertices != sample_count {
            bail!(
                "grid {:?} has {} vertices but the field has {} samples",
                grid,
                vertices,
                sample_count
            );
        }
        return Ok(match dimension {
            Dimension::Two => triangulate_grid(grid[0], grid[1]),
            Dimension::Three => tetrahedralize_grid(grid[0], grid[1], grid[2]),
        });
    }

    let path = args
        .simplices
        .as_ref()
        .context("either a simplex file or --grid is required")?;
    read_simplices(path, dimension).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dimension = infer_dimension(&args)?;
    let (points, field) = read_field(&args.field, dimension)
        .with_context(|| format!("reading {}", args.field.display()))?;
    let simplices = load_simplices(&args, dimension, field.len())?;
    info!(
        samples = field.len(),
        simplices = simplices.len(),
        %dimension,
        "loaded mesh"
    );

    let precision = if args.legacy_precision {
        PrecisionPolicy::Fixed(Precision::LEGACY)
    } else {
        PrecisionPolicy::FromData
    };
    let config = DetectorConfig::default()
        .with_precision(precision)
        .with_parallel(args.parallel);

    let result = CriticalPointDetector::new(&field, &simplices, config)?.detect()?;

    let output = args.output.clone().unwrap_or_else(|| {
        let mut name = args.field.clone().into_os_string();
        name.push(".cp.txt");
        PathBuf::from(name)
    });
    let written = write_critical_points_file(&output, &result, &simplices, &points)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(count = written, output = %output.display(), "wrote critical points");

    Ok(())
}
