//! Planar geometry primitives
//!
//! `Point` and `Rect` validate their coordinates on construction so that every
//! value reaching an index is comparable: points are finite, rectangles are
//! never inverted and never NaN (their bounds may be infinite).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SpatialError, SpatialResult};

/// An immutable point in the plane
///
/// Equality is exact coordinate match. Ordering is by y, ties broken by x.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = SpatialError;

    fn try_from(raw: RawPoint) -> SpatialResult<Self> {
        Point::new(raw.x, raw.y)
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = SpatialError;

    fn try_from((x, y): (f64, f64)) -> SpatialResult<Self> {
        Point::new(x, y)
    }
}

/// Maps `-0.0` onto `0.0` so bitwise ordering agrees with `==`.
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl Point {
    /// Create a point, rejecting NaN and infinite coordinates
    pub fn new(x: f64, y: f64) -> SpatialResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SpatialError::InvalidArgument(format!(
                "point coordinates must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(Self {
            x: normalize_zero(x),
            y: normalize_zero(y),
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Splitting orientation of a k-d tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Splits on x: left subtree holds smaller x
    Vertical,
    /// Splits on y: bottom subtree holds smaller y
    Horizontal,
}

impl Axis {
    /// The axis used by children of a node split on `self`
    pub fn next(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// The coordinate of `point` this axis compares
    pub fn coord(self, point: &Point) -> f64 {
        match self {
            Axis::Vertical => point.x,
            Axis::Horizontal => point.y,
        }
    }
}

/// An axis-aligned rectangle, boundary inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRect")]
pub struct Rect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

#[derive(Deserialize)]
struct RawRect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl TryFrom<RawRect> for Rect {
    type Error = SpatialError;

    fn try_from(raw: RawRect) -> SpatialResult<Self> {
        Rect::new(raw.xmin, raw.ymin, raw.xmax, raw.ymax)
    }
}

impl Rect {
    /// Create a rectangle from its bounds
    ///
    /// Fails if any bound is NaN or if a minimum exceeds its maximum.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> SpatialResult<Self> {
        if xmin.is_nan() || ymin.is_nan() || xmax.is_nan() || ymax.is_nan() {
            return Err(SpatialError::InvalidArgument(
                "rectangle bounds must not be NaN".to_string(),
            ));
        }
        if xmin > xmax || ymin > ymax {
            return Err(SpatialError::InvalidArgument(format!(
                "inverted rectangle [{}, {}] x [{}, {}]",
                xmin, xmax, ymin, ymax
            )));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// The whole plane
    pub fn plane() -> Self {
        Self {
            xmin: f64::NEG_INFINITY,
            ymin: f64::NEG_INFINITY,
            xmax: f64::INFINITY,
            ymax: f64::INFINITY,
        }
    }

    /// Smallest rectangle containing every point, `None` for no points
    pub fn bounding<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            xmin: first.x,
            ymin: first.y,
            xmax: first.x,
            ymax: first.y,
        };
        for p in points {
            bounds.xmin = bounds.xmin.min(p.x);
            bounds.ymin = bounds.ymin.min(p.y);
            bounds.xmax = bounds.xmax.max(p.x);
            bounds.ymax = bounds.ymax.max(p.y);
        }
        Some(bounds)
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Check if a point lies inside or on the boundary
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }

    /// Check if this rectangle shares at least one point with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.xmin <= other.xmax
            && self.xmax >= other.xmin
            && self.ymin <= other.ymax
            && self.ymax >= other.ymin
    }

    /// Squared distance from a point to the nearest point of the rectangle
    ///
    /// Zero when the point is inside.
    pub fn distance_squared_to(&self, point: &Point) -> f64 {
        let dx = if point.x < self.xmin {
            self.xmin - point.x
        } else if point.x > self.xmax {
            point.x - self.xmax
        } else {
            0.0
        };
        let dy = if point.y < self.ymin {
            self.ymin - point.y
        } else if point.y > self.ymax {
            point.y - self.ymax
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, point: &Point) -> f64 {
        self.distance_squared_to(point).sqrt()
    }

    /// Split at `at` along `axis` into (left/bottom, right/top) halves
    ///
    /// Both halves keep the splitting line, matching the inclusive boundary
    /// used by `contains`.
    pub(crate) fn split(&self, at: &Point, axis: Axis) -> (Rect, Rect) {
        match axis {
            Axis::Vertical => (
                Rect {
                    xmax: at.x,
                    ..*self
                },
                Rect {
                    xmin: at.x,
                    ..*self
                },
            ),
            Axis::Horizontal => (
                Rect {
                    ymax: at.y,
                    ..*self
                },
                Rect {
                    ymin: at.y,
                    ..*self
                },
            ),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}
