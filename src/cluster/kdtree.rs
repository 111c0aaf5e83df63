//! This code is heavily based on <https://godoc.org/code.google.com/p/eaburns/kdtree>
//!
//! Original code is under New BSD License.
//! Author: Ethan Burns <burns.ethan@gmail.com>

use super::index::NeighborIndex;
use super::point::{Coord, GeoPoint};

/// K-D Tree for radius queries over geo points
///
/// Points are separated from nodes. Nodes hold only indices into the points slice.
/// Even depths split on longitude, odd depths on latitude.
#[derive(Debug)]
pub struct KDTree<T = ()> {
    points: Vec<GeoPoint<T>>,
    coords: Vec<Coord>,
    root: Option<Box<KDTreeNode>>,
}

/// A node in the K-D tree
#[derive(Debug)]
pub struct KDTreeNode {
    /// Index of the point associated with this node
    pub point_id: usize,
    /// Indices of points with coordinates equal to this node's point
    pub equal_ids: Vec<usize>,

    split: usize,
    left: Option<Box<KDTreeNode>>,
    right: Option<Box<KDTreeNode>>,
}

impl<T> KDTree<T> {
    /// Builds a balanced tree by recursive median partitioning
    pub fn new(points: Vec<GeoPoint<T>>) -> Self {
        let coords: Vec<Coord> = points.iter().map(GeoPoint::coord).collect();
        // Non-finite coordinates are never within range of anything, and would
        // break the ordering the median split relies on
        let ids: Vec<usize> = (0..coords.len()).filter(|&i| coords[i].is_finite()).collect();
        let root = if ids.is_empty() {
            None
        } else {
            build_tree(0, pre_sort(&coords, ids))
        };
        log::trace!("built k-d tree over {} points", coords.len());

        KDTree {
            points,
            coords,
            root,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
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

    /// Finds all points that are within a given distance from the given coordinate
    ///
    /// To avoid allocation, the `nodes` vector can be pre-allocated with a larger
    /// capacity and re-used across multiple calls.
    pub fn in_range(&self, pt: &Coord, dist: f64, mut nodes: Vec<usize>) -> Vec<usize> {
        if dist < 0.0 || dist.is_nan() {
            return nodes;
        }
        self.in_range_recursive(self.root.as_deref(), pt, dist * dist, &mut nodes);
        nodes
    }

    /// Returns every point whose Euclidean (degree space) distance to `center`
    /// is at most `radius`
    pub fn range_query(&self, center: &Coord, radius: f64) -> Vec<&GeoPoint<T>> {
        self.in_range(center, radius, Vec::new())
            .into_iter()
            .map(|i| &self.points[i])
            .collect()
    }

    fn in_range_recursive(&self, t: Option<&KDTreeNode>, pt: &Coord, r2: f64, nodes: &mut Vec<usize>) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let node_pt = &self.coords[t.point_id];
        let diff = pt.0[t.split] - node_pt.0[t.split];

        let (this_side, other_side) = if diff < 0.0 {
            (t.left.as_deref(), t.right.as_deref())
        } else {
            (t.right.as_deref(), t.left.as_deref())
        };

        self.in_range_recursive(this_side, pt, r2, nodes);
        // Anything across the split plane is at least |diff| away
        if diff * diff <= r2 {
            if node_pt.sq_dist(pt) <= r2 {
                nodes.push(t.point_id);
                nodes.extend_from_slice(&t.equal_ids);
            }
            self.in_range_recursive(other_side, pt, r2, nodes);
        }
    }

    /// Returns the height of the K-D tree
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

impl<T> NeighborIndex for KDTree<T> {
    fn neighbors(&self, center: &Coord, radius: f64) -> Vec<usize> {
        self.in_range(center, radius, Vec::new())
    }
}

impl KDTreeNode {
    fn height(&self) -> usize {
        let ht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        ht.max(rht) + 1
    }
}

/// Builds a tree node by finding the median point and recursively building left and right subtrees
fn build_tree(depth: usize, nodes: PreSorted<'_>) -> Option<Box<KDTreeNode>> {
    let split = depth % 2;
    match nodes.cur[split].len() {
        0 => None,
        1 => Some(Box::new(KDTreeNode {
            point_id: nodes.cur[split][0],
            equal_ids: Vec::new(),
            split,
            left: None,
            right: None,
        })),
        _ => {
            let (med, equal, left, right) = nodes.split_med(split);
            Some(Box::new(KDTreeNode {
                point_id: med,
                equal_ids: equal,
                split,
                left: build_tree(depth + 1, left),
                right: build_tree(depth + 1, right),
            }))
        }
    }
}

/// Holds point ids pre-sorted on each dimension
struct PreSorted<'a> {
    coords: &'a [Coord],
    /// Currently sorted set of point IDs by dimension
    cur: [Vec<usize>; 2],
}

/// Pre-sorts point ids on each dimension, ties broken by the other dimension
fn pre_sort(coords: &[Coord], ids: Vec<usize>) -> PreSorted<'_> {
    let mut p = PreSorted {
        coords,
        cur: [ids.clone(), ids],
    };
    for i in 0..2 {
        p.cur[i].sort_by(|&a, &b| {
            coords[a].0[i]
                .total_cmp(&coords[b].0[i])
                .then_with(|| coords[a].0[1 - i].total_cmp(&coords[b].0[1 - i]))
        });
    }
    p
}

impl<'a> PreSorted<'a> {
    /// Returns the median point on the split dimension, the ids equal to it and
    /// two PreSorted sets (still sorted on each dimension) holding the ids that
    /// are less than and greater than or equal to the median on that dimension.
    fn split_med(self, dim: usize) -> (usize, Vec<usize>, PreSorted<'a>, PreSorted<'a>) {
        let coords = self.coords;
        let sorted = &self.cur[dim];

        let mut m = sorted.len() / 2;
        while m > 0 && coords[sorted[m - 1]].0[dim] == coords[sorted[m]].0[dim] {
            m -= 1;
        }
        let mut mh = m;
        while mh < sorted.len() - 1 && coords[sorted[mh + 1]] == coords[sorted[m]] {
            mh += 1;
        }
        let med = sorted[m];
        let equal = sorted[m + 1..=mh].to_vec();
        let pivot = coords[med].0[dim];

        let mut left = PreSorted {
            coords,
            cur: [Vec::new(), Vec::new()],
        };
        left.cur[dim] = sorted[..m].to_vec();

        let mut right = PreSorted {
            coords,
            cur: [Vec::new(), Vec::new()],
        };
        right.cur[dim] = sorted[mh + 1..].to_vec();

        let other = 1 - dim;
        left.cur[other] = Vec::with_capacity(left.cur[dim].len());
        right.cur[other] = Vec::with_capacity(right.cur[dim].len());

        for &n in &self.cur[other] {
            // The median and its duplicates stay on this node
            if coords[n] == coords[med] {
                continue;
            }
            if coords[n].0[dim] < pivot {
                left.cur[other].push(n);
            } else {
                right.cur[other].push(n);
            }
        }

        (med, equal, left, right)
    }
}
