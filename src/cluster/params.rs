//! Clustering parameters derived from the visible map radius
//!
//! All functions are total: a negative or NaN radius is treated as zero and
//! an infinite one lands on the corresponding clamp. None of them look at the
//! point set, so results can be cached per radius.

/// Neighbor radius used when no viewport radius is known, in meters
pub const DEFAULT_NEIGHBOR_RADIUS: f64 = 200.0;

/// Minimum cluster size used when no viewport radius is known
pub const DEFAULT_MIN_POINTS: usize = 3;

/// Grid depth used when no viewport radius is known
pub const DEFAULT_GRID_DEPTH: u32 = 6;

/// Below this many points density clustering stays responsive
pub const STRATEGY_THRESHOLD: usize = 5_000;

/// Share of the viewport radius used as DBSCAN epsilon
const NEIGHBOR_RADIUS_FRACTION: f64 = 0.02;
const MIN_NEIGHBOR_RADIUS: f64 = 25.0;
const MAX_NEIGHBOR_RADIUS: f64 = 10_000.0;

const MIN_CLUSTER_POINTS: usize = 2;
const MAX_CLUSTER_POINTS: usize = 10;
/// Radius (m) at which the minimum cluster size grows by one, doubling each step
const MIN_POINTS_STEP: f64 = 1_000.0;

const MIN_GRID_DEPTH: u32 = 1;
const MAX_GRID_DEPTH: u32 = 10;
/// Radius (m) at which the grid gets one level coarser, doubling each step
const GRID_DEPTH_STEP: f64 = 500.0;

fn sanitize(r: f64) -> f64 {
    if r.is_nan() || r < 0.0 { 0.0 } else { r }
}

/// DBSCAN epsilon in meters for a viewport of radius `r` meters
pub fn neighbor_radius(r: f64) -> f64 {
    (sanitize(r) * NEIGHBOR_RADIUS_FRACTION).clamp(MIN_NEIGHBOR_RADIUS, MAX_NEIGHBOR_RADIUS)
}

/// DBSCAN minimum neighborhood size for a viewport of radius `r` meters
pub fn min_cluster_points(r: f64) -> usize {
    let steps = (1.0 + sanitize(r) / MIN_POINTS_STEP).log2().floor();
    if steps >= (MAX_CLUSTER_POINTS - MIN_CLUSTER_POINTS) as f64 {
        return MAX_CLUSTER_POINTS;
    }
    MIN_CLUSTER_POINTS + steps as usize
}

/// Grid subdivision depth for a viewport of radius `r` meters
///
/// Wider viewports get coarser grids.
pub fn grid_depth(r: f64) -> u32 {
    let steps = (1.0 + sanitize(r) / GRID_DEPTH_STEP).log2().floor();
    if steps >= (MAX_GRID_DEPTH - MIN_GRID_DEPTH) as f64 {
        return MIN_GRID_DEPTH;
    }
    MAX_GRID_DEPTH - steps as u32
}

/// Parameters for one clustering invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// DBSCAN epsilon, meters
    pub neighbor_radius: f64,
    /// DBSCAN minimum neighborhood size, the point itself included
    pub min_points: usize,
    /// Number of times the grid box span is halved
    pub grid_depth: u32,
}

impl ClusterParams {
    pub fn for_radius(r: f64) -> Self {
        ClusterParams {
            neighbor_radius: neighbor_radius(r),
            min_points: min_cluster_points(r),
            grid_depth: grid_depth(r),
        }
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        ClusterParams {
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            min_points: DEFAULT_MIN_POINTS,
            grid_depth: DEFAULT_GRID_DEPTH,
        }
    }
}
