//! 2D k-d tree
//!
//! A k-d tree partitions the plane by alternating splits: the root compares
//! x, its children compare y, their children x again, and so on. Every node
//! implicitly owns a region of the plane (the whole plane for the root, each
//! child's region is its parent's region cut at the parent's point), which
//! lets queries skip entire subtrees:
//!
//! - Range queries skip subtrees whose region misses the query rectangle
//! - Nearest queries search the query's side first, then skip the other side
//!   when its region is farther away than the best point found so far
//!
//! The tree is never rebalanced, so sorted insertion order degrades it to a
//! linked list; random order gives O(log n) expected depth.

use std::fmt;

use crate::geometry::{Axis, Point, Rect};
use crate::index::PointIndex;

struct Node {
    point: Point,
    axis: Axis,
    /// Points whose `axis` coordinate is smaller than `point`'s
    left: Option<Box<Node>>,
    /// Points whose `axis` coordinate is greater or equal
    right: Option<Box<Node>>,
}

impl Node {
    fn new(point: Point, axis: Axis) -> Self {
        Self {
            point,
            axis,
            left: None,
            right: None,
        }
    }

    /// Children ordered (query side, far side) with their regions
    fn children_toward(&self, query: &Point, region: &Rect) -> [(Option<&Node>, Rect); 2] {
        let (lo, hi) = region.split(&self.point, self.axis);
        let left = (self.left.as_deref(), lo);
        let right = (self.right.as_deref(), hi);
        if self.axis.coord(query) < self.axis.coord(&self.point) {
            [left, right]
        } else {
            [right, left]
        }
    }
}

/// Work done by a single query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose point was examined
    pub nodes_visited: usize,
}

/// A 2D k-d tree of distinct points
#[derive(Default)]
pub struct KdTree {
    root: Option<Box<Node>>,
    size: usize,
}

impl KdTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of the deepest node, counting the root as 1 (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Bounding rectangle of the stored points, `None` if empty
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.iter())
    }

    /// Iterate over the stored points in pre-order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    /// Range query that also reports how many nodes were examined
    pub fn range_with_stats(&self, rect: &Rect) -> (Vec<Point>, SearchStats) {
        let mut found = Vec::new();
        let mut stats = SearchStats::default();
        let mut stack: Vec<(&Node, Rect)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, Rect::plane()));
        }

        while let Some((node, region)) = stack.pop() {
            stats.nodes_visited += 1;
            if rect.contains(&node.point) {
                found.push(node.point);
            }

            let (lo, hi) = region.split(&node.point, node.axis);
            for (child, child_region) in [(node.right.as_deref(), hi), (node.left.as_deref(), lo)] {
                if let Some(child) = child {
                    if child_region.intersects(rect) {
                        stack.push((child, child_region));
                    }
                }
            }
        }
        (found, stats)
    }

    /// Nearest query that also reports how many nodes were examined
    pub fn nearest_with_stats(&self, query: &Point) -> (Option<Point>, SearchStats) {
        let mut best: Option<(Point, f64)> = None;
        let mut stats = SearchStats::default();
        let mut stack: Vec<(&Node, Rect)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, Rect::plane()));
        }

        while let Some((node, region)) = stack.pop() {
            // A region farther than the best distance cannot hold a closer point.
            // Checked on pop since `best` may have improved after the push.
            if let Some((_, best_dist)) = best {
                if region.distance_squared_to(query) > best_dist {
                    continue;
                }
            }

            stats.nodes_visited += 1;
            let dist_sq = node.point.distance_squared_to(query);
            if best.map_or(true, |(_, best_dist)| dist_sq < best_dist) {
                best = Some((node.point, dist_sq));
            }

            // Far side goes on the stack first so the query side is searched first
            let [near, far] = node.children_toward(query, &region);
            for (child, child_region) in [far, near] {
                if let Some(child) = child {
                    stack.push((child, child_region));
                }
            }
        }
        (best.map(|(point, _)| point), stats)
    }
}

impl Clone for KdTree {
    fn clone(&self) -> Self {
        // Detached copies in pre-order, each with its parent's index and side
        let mut copies: Vec<(Box<Node>, Option<(usize, bool)>)> = Vec::with_capacity(self.size);
        let mut stack: Vec<(&Node, Option<(usize, bool)>)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, None));
        }
        while let Some((node, parent)) = stack.pop() {
            let index = copies.len();
            copies.push((Box::new(Node::new(node.point, node.axis)), parent));
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some((index, false))));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, Some((index, true))));
            }
        }

        // Parents precede their children, so link from the back
        let mut root = None;
        while let Some((copy, parent)) = copies.pop() {
            match parent {
                Some((index, true)) => copies[index].0.left = Some(copy),
                Some((index, false)) => copies[index].0.right = Some(copy),
                None => root = Some(copy),
            }
        }
        Self {
            root,
            size: self.size,
        }
    }
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// Dropping nested boxes recurses once per level, which overflows the stack on
// degenerate trees; unlink the nodes onto a heap stack instead.
impl Drop for KdTree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl PointIndex for KdTree {
    fn insert(&mut self, point: Point) {
        let mut slot = &mut self.root;
        let mut axis = Axis::Vertical;
        while let Some(node) = slot {
            if node.point == point {
                tracing::trace!(%point, "duplicate insert ignored");
                return;
            }
            slot = if axis.coord(&point) < axis.coord(&node.point) {
                &mut node.left
            } else {
                &mut node.right
            };
            axis = axis.next();
        }
        *slot = Some(Box::new(Node::new(point, axis)));
        self.size += 1;
    }

    fn contains(&self, point: &Point) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.point == *point {
                return true;
            }
            current = if node.axis.coord(point) < node.axis.coord(&node.point) {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        false
    }

    fn range(&self, rect: &Rect) -> Vec<Point> {
        self.range_with_stats(rect).0
    }

    fn nearest(&self, query: &Point) -> Option<Point> {
        self.nearest_with_stats(query).0
    }

    fn len(&self) -> usize {
        self.size
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.iter().copied())
    }
}

impl Extend<Point> for KdTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl FromIterator<Point> for KdTree {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Pre-order iterator over a `KdTree`
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(&node.point)
    }
}

impl<'a> IntoIterator for &'a KdTree {
    type Item = &'a Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
