//! Helpers shared by the unit tests

use crate::cluster::{ClusterResult, GeoPoint};

/// Degrees per grid step used by [`grid_points`], about 11 m
pub const STEP: f64 = 0.0001;

/// Builds points from small integer offsets so neighborhoods actually overlap
///
/// Point `i` gets id `i` and payload `i`.
pub fn grid_points(raw: &[(u8, u8)]) -> Vec<GeoPoint<usize>> {
    raw.iter()
        .enumerate()
        .map(|(i, &(x, y))| GeoPoint::with_payload(i.to_string(), 59.9 + y as f64 * STEP, 30.2 + x as f64 * STEP, i))
        .collect()
}

/// True if clusters and noise together hold every index in `0..n` exactly once
pub fn is_partition<T>(result: &ClusterResult<T>, n: usize) -> bool {
    if result.clusters.iter().any(Vec::is_empty) {
        return false;
    }
    let mut ids: Vec<usize> = result
        .clusters
        .iter()
        .flatten()
        .chain(result.noise.iter())
        .filter_map(|p| p.id().parse().ok())
        .collect();
    ids.sort_unstable();
    ids == (0..n).collect::<Vec<_>>()
}

/// Cluster membership in a canonical order, ignoring cluster ids
pub fn membership<T>(result: &ClusterResult<T>) -> (Vec<Vec<String>>, Vec<String>) {
    let mut clusters: Vec<Vec<String>> = result
        .clusters
        .iter()
        .map(|c| {
            let mut ids: Vec<String> = c.iter().map(|p| p.id().to_string()).collect();
            ids.sort();
            ids
        })
        .collect();
    clusters.sort();
    let mut noise: Vec<String> = result.noise.iter().map(|p| p.id().to_string()).collect();
    noise.sort();
    (clusters, noise)
}
