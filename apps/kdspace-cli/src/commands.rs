//! Command implementations
//!
//! Each command loads a point file, runs its queries, and returns a report
//! that renders either as plain text or as JSON.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use kdspace_core::{read_points, KdTree, Point, PointIndex, PointSet, Rect};

use crate::config::{Backend, OutputFormat};
use crate::error::{CliError, CliResult};

/// Render a report in the requested format
pub fn render<T: Serialize + fmt::Display>(report: &T, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Summary of a point file
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub file: PathBuf,
    /// Points in the file, duplicates included
    pub points_read: usize,
    /// Distinct points stored
    pub distinct: usize,
    pub bounds: Option<Rect>,
    pub height: usize,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file:     {}", self.file.display())?;
        writeln!(f, "points:   {} ({} distinct)", self.points_read, self.distinct)?;
        match &self.bounds {
            Some(bounds) => writeln!(f, "bounds:   {}", bounds)?,
            None => writeln!(f, "bounds:   (empty)")?,
        }
        write!(f, "height:   {}", self.height)
    }
}

pub fn info(file: &Path) -> CliResult<InfoReport> {
    let points = read_points(file)?;
    let points_read = points.len();
    let tree: KdTree = points.into_iter().collect();

    Ok(InfoReport {
        file: file.to_path_buf(),
        points_read,
        distinct: tree.len(),
        bounds: tree.bounds(),
        height: tree.height(),
    })
}

/// Result of a nearest-point query
#[derive(Debug, Clone, Serialize)]
pub struct NearestReport {
    pub query: Point,
    pub backend: Backend,
    pub nearest: Option<Point>,
    pub distance: Option<f64>,
    /// Only reported by the k-d tree
    pub nodes_visited: Option<usize>,
}

impl fmt::Display for NearestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.nearest, self.distance) {
            (Some(point), Some(distance)) => {
                write!(f, "nearest to {}: {} (distance {})", self.query, point, distance)?
            }
            _ => write!(f, "nearest to {}: none (no points)", self.query)?,
        }
        if let Some(visited) = self.nodes_visited {
            write!(f, "\n{} visited {} nodes", self.backend, visited)?;
        }
        Ok(())
    }
}

pub fn nearest(file: &Path, query: Point, backend: Backend) -> CliResult<NearestReport> {
    let points = read_points(file)?;

    let (nearest, nodes_visited) = match backend {
        Backend::KdTree => {
            let tree: KdTree = points.into_iter().collect();
            let (nearest, stats) = tree.nearest_with_stats(&query);
            (nearest, Some(stats.nodes_visited))
        }
        Backend::Brute => {
            let set: PointSet = points.into_iter().collect();
            (set.nearest(&query), None)
        }
    };

    Ok(NearestReport {
        query,
        backend,
        nearest,
        distance: nearest.map(|p| p.distance_to(&query)),
        nodes_visited,
    })
}

/// Result of a range query
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub rect: Rect,
    pub backend: Backend,
    /// Matching points sorted by y, then x
    pub points: Vec<Point>,
    /// Only reported by the k-d tree
    pub nodes_visited: Option<usize>,
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points in {}", self.points.len(), self.rect)?;
        for point in &self.points {
            write!(f, "\n  {}", point)?;
        }
        if let Some(visited) = self.nodes_visited {
            write!(f, "\n{} visited {} nodes", self.backend, visited)?;
        }
        Ok(())
    }
}

pub fn range(file: &Path, rect: Rect, backend: Backend) -> CliResult<RangeReport> {
    let points = read_points(file)?;

    let (mut found, nodes_visited) = match backend {
        Backend::KdTree => {
            let tree: KdTree = points.into_iter().collect();
            let (found, stats) = tree.range_with_stats(&rect);
            (found, Some(stats.nodes_visited))
        }
        Backend::Brute => {
            let set: PointSet = points.into_iter().collect();
            (set.range(&rect), None)
        }
    };
    found.sort();

    Ok(RangeReport {
        rect,
        backend,
        points: found,
        nodes_visited,
    })
}

/// A query on which the two index variants disagreed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mismatch {
    Nearest {
        query: Point,
        kdtree: Option<Point>,
        brute: Option<Point>,
    },
    Range {
        rect: Rect,
        kdtree: usize,
        brute: usize,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(point: &Option<Point>) -> String {
            point.map_or_else(|| "none".to_string(), |p| p.to_string())
        }
        match self {
            Mismatch::Nearest {
                query,
                kdtree,
                brute,
            } => write!(
                f,
                "nearest {}: kdtree {} vs brute {}",
                query,
                show(kdtree),
                show(brute)
            ),
            Mismatch::Range { rect, kdtree, brute } => {
                write!(f, "range {}: kdtree {} points vs brute {}", rect, kdtree, brute)
            }
        }
    }
}

/// Outcome of cross-checking both variants over a query grid
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub points: usize,
    pub grid: usize,
    pub nearest_queries: usize,
    pub range_queries: usize,
    /// Nodes the k-d tree visited across all nearest queries
    pub kdtree_nodes_visited: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, {} nearest and {} range queries on a {}x{} grid",
            self.points, self.nearest_queries, self.range_queries, self.grid, self.grid
        )?;
        if self.nearest_queries > 0 {
            write!(
                f,
                "\nkdtree visited {:.1} nodes per nearest query",
                self.kdtree_nodes_visited as f64 / self.nearest_queries as f64
            )?;
        }
        for mismatch in &self.mismatches {
            write!(f, "\nMISMATCH {}", mismatch)?;
        }
        if self.passed() {
            write!(f, "\nok")?;
        }
        Ok(())
    }
}

/// Grid coordinates spanning `[min, max]` widened by a tenth on each side
///
/// Computed so that bounds near `f64::MAX` never produce an infinite line.
fn grid_lines(min: f64, max: f64, n: usize) -> Vec<f64> {
    let pad = max * 0.1 - min * 0.1;
    let lo = (min - pad).max(f64::MIN);
    let hi = (max + pad).min(f64::MAX);
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / last;
            (lo * (1.0 - t) + hi * t).clamp(lo, hi)
        })
        .collect()
}

pub fn verify(file: &Path, grid: usize) -> CliResult<VerifyReport> {
    if grid < 2 {
        return Err(CliError::InvalidConfig(format!(
            "verify grid must be at least 2, got {}",
            grid
        )));
    }

    let points = read_points(file)?;
    let brute: PointSet = points.iter().copied().collect();
    let tree: KdTree = points.into_iter().collect();

    let mut report = VerifyReport {
        points: tree.len(),
        grid,
        nearest_queries: 0,
        range_queries: 0,
        kdtree_nodes_visited: 0,
        mismatches: Vec::new(),
    };

    let Some(bounds) = tree.bounds() else {
        return Ok(report);
    };

    let xs = grid_lines(bounds.xmin(), bounds.xmax(), grid);
    let ys = grid_lines(bounds.ymin(), bounds.ymax(), grid);

    for &x in &xs {
        for &y in &ys {
            let query = Point::new(x, y)?;
            let (from_tree, stats) = tree.nearest_with_stats(&query);
            let from_brute = brute.nearest(&query);
            report.nearest_queries += 1;
            report.kdtree_nodes_visited += stats.nodes_visited;

            // Ties may pick different points; only the distance has to agree
            let dist = |p: Option<Point>| p.map(|p| p.distance_squared_to(&query));
            if dist(from_tree) != dist(from_brute) {
                tracing::warn!(%query, "nearest mismatch");
                report.mismatches.push(Mismatch::Nearest {
                    query,
                    kdtree: from_tree,
                    brute: from_brute,
                });
            }
        }
    }

    for xw in xs.windows(2) {
        for yw in ys.windows(2) {
            let rect = Rect::new(xw[0], yw[0], xw[1], yw[1])?;
            let mut from_tree = tree.range(&rect);
            let mut from_brute = brute.range(&rect);
            from_tree.sort();
            from_brute.sort();
            report.range_queries += 1;

            if from_tree != from_brute {
                tracing::warn!(%rect, "range mismatch");
                report.mismatches.push(Mismatch::Range {
                    rect,
                    kdtree: from_tree.len(),
                    brute: from_brute.len(),
                });
            }
        }
    }

    tracing::info!(
        nearest = report.nearest_queries,
        range = report.range_queries,
        mismatches = report.mismatches.len(),
        "verification finished"
    );
    Ok(report)
}
