//! kdspace-core - 2D point index with pruned spatial search
//!
//! This crate stores points in the plane and answers two kinds of queries:
//!
//! - **Range**: every stored point inside an axis-aligned rectangle
//! - **Nearest**: the stored point closest to a query point
//!
//! # Key Components
//!
//! - **Point / Rect**: immutable geometry primitives with exact comparison
//! - **PointIndex**: the shared contract for insertion and queries
//! - **PointSet**: brute-force variant backed by an ordered set
//! - **KdTree**: alternating-axis binary tree that prunes subtrees whose
//!   region cannot contribute to a query
//! - **loader**: reading points from whitespace-separated text files
//!
//! Both index variants return identical answers; `PointSet` is the oracle the
//! k-d tree is checked against.

pub mod brute;
pub mod error;
pub mod geometry;
pub mod index;
pub mod kdtree;
pub mod loader;

pub use brute::PointSet;
pub use error::{SpatialError, SpatialResult};
pub use geometry::{Axis, Point, Rect};
pub use index::PointIndex;
pub use kdtree::{KdTree, SearchStats};
pub use loader::{parse_points, read_points};
