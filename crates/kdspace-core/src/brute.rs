//! Brute-force point set
//!
//! Stores points in an ordered set and answers every query with a linear
//! scan. It is the reference the k-d tree is cross-checked against.

use std::collections::BTreeSet;

use crate::geometry::{Point, Rect};
use crate::index::PointIndex;

/// A point set backed by a `BTreeSet`, iterated in y-then-x order
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: BTreeSet<Point>,
}

impl PointSet {
    /// Create an empty point set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding rectangle of the stored points, `None` if empty
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(&self.points)
    }

    /// Iterate in ascending y-then-x order
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl PointIndex for PointSet {
    fn insert(&mut self, point: Point) {
        if !self.points.insert(point) {
            tracing::trace!(%point, "duplicate insert ignored");
        }
    }

    fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    fn range(&self, rect: &Rect) -> Vec<Point> {
        self.points
            .iter()
            .filter(|p| rect.contains(p))
            .copied()
            .collect()
    }

    fn nearest(&self, query: &Point) -> Option<Point> {
        let mut best: Option<(Point, f64)> = None;
        for point in &self.points {
            let dist_sq = point.distance_squared_to(query);
            if best.map_or(true, |(_, best_dist)| dist_sq < best_dist) {
                best = Some((*point, dist_sq));
            }
        }
        best.map(|(point, _)| point)
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.points.iter().copied())
    }
}

impl Extend<Point> for PointSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
