use super::cancel::Interrupt;
use super::distance::meters_to_degrees;
use super::index::{IndexKind, NeighborIndex};
use super::kdtree::KDTree;
use super::point::{Coord, GeoPoint};
use super::quadtree::QuadTree;
use super::result::{Cluster, Partition};
use crate::config::QuadTreeConfig;
use bitvec::prelude::*;

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighborhood (including P)
//
// A point marked NOISE may later be reached as a border point of a cluster,
// so noise is only settled once every point has been visited.

/// Points handed back by an algorithm together with their partition
pub type Clustered<T> = (Partition, Vec<GeoPoint<T>>);

/// Density clustering configured once with its parameters and index kind
#[derive(Debug, Clone)]
pub struct Dbscan {
    eps: f64,
    min_points: usize,
    index: IndexKind,
    quad_tree: QuadTreeConfig,
}

impl Dbscan {
    /// # Arguments
    ///
    /// * `eps` - Clustering radius in meters
    /// * `min_points` - Minimum number of points in eps-neighbourhood, the point itself included
    /// * `index` - Index answering the neighborhood queries
    pub fn new(eps: f64, min_points: usize, index: IndexKind) -> Self {
        Dbscan {
            eps,
            min_points,
            index,
            quad_tree: QuadTreeConfig::default(),
        }
    }

    /// Overrides the limits used when the quad-tree backs the queries
    pub fn with_quad_tree(mut self, quad_tree: QuadTreeConfig) -> Self {
        self.quad_tree = quad_tree;
        self
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index
    }

    /// Clusters `points`, returning them alongside the partition
    pub fn run<T, C: Interrupt>(&self, points: Vec<GeoPoint<T>>, cancel: &C) -> Result<Clustered<T>, C::Error> {
        if points.len() <= self.min_points {
            log::debug!(
                "dbscan: {} points <= min_points {}, returning singletons",
                points.len(),
                self.min_points
            );
            return Ok((Partition::singletons(points.len()), points));
        }

        let eps = meters_to_degrees(self.eps);
        log::debug!(
            "dbscan: {} points, eps={:.1} m, min_points={}, index={}",
            points.len(),
            self.eps,
            self.min_points,
            self.index
        );

        match self.index {
            IndexKind::KdTree => {
                let tree = KDTree::new(points);
                let partition = db_scan(&tree, tree.coords(), eps, self.min_points, cancel)?;
                Ok((partition, tree.into_points()))
            }
            IndexKind::QuadTree => {
                let tree = QuadTree::with_config(points, &self.quad_tree);
                let partition = db_scan(&tree, tree.coords(), eps, self.min_points, cancel)?;
                Ok((partition, tree.into_points()))
            }
        }
    }
}

/// Clusters coordinates using DBSCAN over a prebuilt index
///
/// # Arguments
///
/// * `index` - Index built over `coords`, in the same order
/// * `eps` - Clustering radius in degree space
/// * `min_points` - Minimum number of points in eps-neighbourhood (density threshold)
///
/// Every coordinate ends up in exactly one cluster or in the noise list.
/// Inputs of at most `min_points` coordinates come back as singletons.
pub fn db_scan<I: NeighborIndex + ?Sized, C: Interrupt>(
    index: &I,
    coords: &[Coord],
    eps: f64,
    min_points: usize,
    cancel: &C,
) -> Result<Partition, C::Error> {
    let n = coords.len();
    if n <= min_points {
        return Ok(Partition::singletons(n));
    }

    let mut visited = bitvec![0; n];
    let mut members = bitvec![0; n];
    let mut neighbor_unique = bitvec![0; n];
    let mut clusters = Vec::new();
    let mut c = 0;

    for i in 0..n {
        if visited[i] {
            continue;
        }
        cancel.check()?;
        visited.set(i, true);

        let neighbor_pts = index.neighbors(&coords[i], eps);
        if neighbor_pts.len() < min_points {
            continue;
        }

        let mut cluster = Cluster { c, points: vec![i] };
        members.set(i, true);
        c += 1;
        // expandCluster goes here inline
        for &j in &neighbor_pts {
            neighbor_unique.set(j, true);
        }

        let mut neighbor_pts = neighbor_pts;
        let mut j = 0;
        // neighbor_pts grows while it is being walked
        while j < neighbor_pts.len() {
            let k = neighbor_pts[j];
            if !visited[k] {
                cancel.check()?;
                visited.set(k, true);
                let more_neighbors = index.neighbors(&coords[k], eps);
                if more_neighbors.len() >= min_points {
                    for &p in &more_neighbors {
                        if !neighbor_unique[p] {
                            neighbor_pts.push(p);
                            neighbor_unique.set(p, true);
                        }
                    }
                }
            }

            if !members[k] {
                cluster.points.push(k);
                members.set(k, true);
            }
            j += 1;
        }

        for &p in &neighbor_pts {
            neighbor_unique.set(p, false);
        }
        clusters.push(cluster);
    }

    let noise = members.iter_zeros().collect();
    Ok(Partition { clusters, noise })
}

/// Simple O(N) way to find points in neighbourhood
///
/// This is equivalent to `index.neighbors(p, eps)` and is kept as the
/// reference the indexes are checked against.
pub fn region_query(coords: &[Coord], p: &Coord, eps: f64) -> Vec<usize> {
    let mut result = Vec::new();

    for (i, point) in coords.iter().enumerate() {
        if point.sq_dist(p) <= eps * eps {
            result.push(i);
        }
    }

    result
}
