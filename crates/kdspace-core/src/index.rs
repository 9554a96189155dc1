//! The contract shared by every point index variant

use crate::geometry::{Point, Rect};

/// A set of distinct points answering range and nearest-point queries
///
/// Implementations must agree on every query for the same set of points;
/// only the cost of answering differs.
pub trait PointIndex {
    /// Add a point; inserting a point already present is a no-op
    fn insert(&mut self, point: Point);

    /// Check whether an exactly equal point is stored
    fn contains(&self, point: &Point) -> bool;

    /// All stored points inside `rect` (boundary inclusive), in no particular order
    fn range(&self, rect: &Rect) -> Vec<Point>;

    /// A stored point at minimum distance from `query`, `None` if empty
    fn nearest(&self, query: &Point) -> Option<Point>;

    /// Number of stored points
    fn len(&self) -> usize;

    /// Iterate over every stored point
    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
