use std::time::Duration;

use super::bbox::BoundingBox;
use super::point::{Coord, GeoPoint, centroid_and_bounds};

/// Algorithm that produced a [`ClusterResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMode {
    Grid,
    Density,
}

impl std::fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterMode::Grid => write!(f, "grid"),
            ClusterMode::Density => write!(f, "density"),
        }
    }
}

/// A cluster found by one of the algorithms, as indices into the input
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Cluster ID, in insertion order
    pub c: usize,
    /// Indices of points belonging to this cluster
    pub points: Vec<usize>,
}

/// Index-level cluster/noise split shared by both algorithms
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub clusters: Vec<Cluster>,
    pub noise: Vec<usize>,
}

impl Partition {
    /// Every point in its own cluster
    pub fn singletons(n: usize) -> Self {
        Partition {
            clusters: (0..n).map(|i| Cluster { c: i, points: vec![i] }).collect(),
            noise: Vec::new(),
        }
    }

    /// Moves the points into the groups named by this partition
    ///
    /// Relies on the partition naming every index exactly once.
    fn materialize<T>(self, points: Vec<GeoPoint<T>>) -> (Vec<Vec<GeoPoint<T>>>, Vec<GeoPoint<T>>) {
        let mut slots: Vec<Option<GeoPoint<T>>> = points.into_iter().map(Some).collect();
        let mut take = |ids: Vec<usize>| -> Vec<GeoPoint<T>> {
            ids.into_iter().filter_map(|i| slots[i].take()).collect()
        };

        let clusters = self
            .clusters
            .into_iter()
            .map(|c| take(c.points))
            .filter(|c| !c.is_empty())
            .collect();
        let noise = take(self.noise);
        (clusters, noise)
    }
}

/// Output of one clustering invocation
#[derive(Debug, Clone)]
pub struct ClusterResult<T = ()> {
    /// Non-empty groups of co-located points
    pub clusters: Vec<Vec<GeoPoint<T>>>,
    /// Points that belong to no cluster, always empty in grid mode
    pub noise: Vec<GeoPoint<T>>,
    pub mode: ClusterMode,
    pub duration: Duration,
    /// Why `mode` was chosen
    pub rationale: String,
}

impl<T> ClusterResult<T> {
    pub(crate) fn from_partition(
        partition: Partition,
        points: Vec<GeoPoint<T>>,
        mode: ClusterMode,
        duration: Duration,
        rationale: String,
    ) -> Self {
        let (clusters, noise) = partition.materialize(points);
        ClusterResult {
            clusters,
            noise,
            mode,
            duration,
            rationale,
        }
    }

    /// Total number of points across clusters and noise
    pub fn point_count(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum::<usize>() + self.noise.len()
    }

    /// One marker per cluster followed by one marker per noise point
    pub fn markers(&self) -> Vec<Marker> {
        let clusters = self.clusters.iter().filter_map(|c| Marker::for_group(c));
        let noise = self.noise.iter().filter_map(|p| Marker::for_group(std::slice::from_ref(p)));
        clusters.chain(noise).collect()
    }
}

/// What the renderer draws for a cluster or a lone point
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Centroid of the members
    pub position: Coord,
    pub bounds: BoundingBox,
    /// Member ids in cluster order
    pub ids: Vec<String>,
}

impl Marker {
    fn for_group<T>(points: &[GeoPoint<T>]) -> Option<Self> {
        let (position, bounds) = centroid_and_bounds(points)?;
        Some(Marker {
            position,
            bounds,
            ids: points.iter().map(|p| p.id().to_string()).collect(),
        })
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// True when the renderer should show a count badge
    pub fn is_cluster(&self) -> bool {
        self.count() > 1
    }
}
