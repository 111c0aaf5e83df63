//! Point quad-tree used for box queries and grid clustering

use super::bbox::BoundingBox;
use super::index::NeighborIndex;
use super::point::{Coord, GeoPoint};
use crate::config::QuadTreeConfig;

/// Quad-tree over geo points
///
/// Like [`super::KDTree`], nodes hold indices into the owned point list. The
/// tree is never mutated after construction.
#[derive(Debug)]
pub struct QuadTree<T = ()> {
    points: Vec<GeoPoint<T>>,
    coords: Vec<Coord>,
    root: QuadNode,
}

#[derive(Debug)]
struct QuadNode {
    bounds: BoundingBox,
    depth: usize,
    ids: Vec<usize>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl<T> QuadTree<T> {
    /// Builds a tree with the default capacity and depth limits
    pub fn new(points: Vec<GeoPoint<T>>) -> Self {
        Self::with_config(points, &QuadTreeConfig::default())
    }

    pub fn with_config(points: Vec<GeoPoint<T>>, config: &QuadTreeConfig) -> Self {
        let coords: Vec<Coord> = points.iter().map(GeoPoint::coord).collect();
        let bounds = BoundingBox::covering(coords.iter().copied()).unwrap_or(config.empty_bounds);

        let mut root = QuadNode::leaf(bounds, 0);
        for id in 0..coords.len() {
            root.insert(id, &coords, config);
        }

        let tree = QuadTree { points, coords, root };
        log::trace!(
            "built quad-tree over {} points, depth {}",
            tree.count(),
            tree.depth()
        );
        tree
    }

    /// Bounding box of the root node
    pub fn bounds(&self) -> BoundingBox {
        self.root.bounds
    }

    pub fn points(&self) -> &[GeoPoint<T>] {
        &self.points
    }

    /// Coordinates of [`Self::points`], index for index
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Consumes the tree and hands the points back in their original order
    pub fn into_points(self) -> Vec<GeoPoint<T>> {
        self.points
    }

    /// Returns all points contained in `range`
    pub fn query(&self, range: &BoundingBox) -> Vec<&GeoPoint<T>> {
        self.query_ids(range)
            .into_iter()
            .map(|i| &self.points[i])
            .collect()
    }

    /// Same as [`QuadTree::query`] but yields indices into [`QuadTree::points`]
    pub fn query_ids(&self, range: &BoundingBox) -> Vec<usize> {
        let mut out = Vec::new();
        self.root.query_into(range, &self.coords, &mut out);
        out
    }

    /// Number of indexed points
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Number of levels, a lone root counts as 1
    pub fn depth(&self) -> usize {
        self.root.levels()
    }
}

impl<T> NeighborIndex for QuadTree<T> {
    fn neighbors(&self, center: &Coord, radius: f64) -> Vec<usize> {
        if radius < 0.0 || radius.is_nan() {
            return Vec::new();
        }
        let r2 = radius * radius;
        // Padded so rounding in the box test cannot drop a point the distance test keeps
        let mut ids = self.query_ids(&BoundingBox::around(center, radius + 1e-9));
        ids.retain(|&i| self.coords[i].sq_dist(center) <= r2);
        ids
    }
}

impl QuadNode {
    fn leaf(bounds: BoundingBox, depth: usize) -> Self {
        QuadNode {
            bounds,
            depth,
            ids: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, id: usize, coords: &[Coord], config: &QuadTreeConfig) {
        if let Some(children) = self.children.as_mut() {
            let q = self.bounds.quadrant_of(&coords[id]);
            children[q].insert(id, coords, config);
            return;
        }

        self.ids.push(id);
        // A zero-span box cannot be divided any further
        if self.ids.len() > config.capacity && self.depth < config.max_depth && !self.bounds.is_point() {
            self.subdivide(coords, config);
        }
    }

    fn subdivide(&mut self, coords: &[Coord], config: &QuadTreeConfig) {
        let depth = self.depth + 1;
        let [q0, q1, q2, q3] = self.bounds.quadrants();
        let mut children = Box::new([
            QuadNode::leaf(q0, depth),
            QuadNode::leaf(q1, depth),
            QuadNode::leaf(q2, depth),
            QuadNode::leaf(q3, depth),
        ]);
        for id in std::mem::take(&mut self.ids) {
            let q = self.bounds.quadrant_of(&coords[id]);
            children[q].insert(id, coords, config);
        }
        self.children = Some(children);
    }

    fn query_into(&self, range: &BoundingBox, coords: &[Coord], out: &mut Vec<usize>) {
        if !self.bounds.intersects(range) {
            return;
        }
        match &self.children {
            None => out.extend(self.ids.iter().copied().filter(|&i| range.contains(&coords[i]))),
            Some(children) => {
                for child in children.iter() {
                    child.query_into(range, coords, out);
                }
            }
        }
    }

    fn levels(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => 1 + children.iter().map(QuadNode::levels).max().unwrap_or(0),
        }
    }
}
