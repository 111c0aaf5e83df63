//! Adaptive geo clustering for map viewports
//!
//! Groups geo points into clusters with either grid partitioning (fast, no
//! noise) or DBSCAN (precise, with noise), picking the algorithm per request
//! and deriving its parameters from the visible map radius.
//!
//! ```
//! use geo_cluster::{ClusteringContext, GeoPoint, cluster};
//!
//! let points: Vec<GeoPoint> = vec![
//!     GeoPoint::new("a", 59.9559, 30.2447),
//!     GeoPoint::new("b", 59.9560, 30.2448),
//! ];
//! let ctx = ClusteringContext::new(2_000.0, points.len());
//! let result = cluster(points, &ctx);
//! assert_eq!(result.point_count(), 2);
//! ```

pub mod cluster;
pub mod config;
pub mod engine;
pub mod scheduler;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_support;

pub use cluster::{
    BoundingBox, CancelToken, ClusterError, ClusterMode, ClusterParams, ClusterResult, ClusteringContext, Coord,
    GeoPoint, IndexKind, Interrupt, KDTree, Marker, QuadTree, Uninterrupted, params,
};
pub use config::{EngineConfig, QuadTreeConfig};
pub use engine::{ClusterEngine, build_index, cluster};
pub use scheduler::{ClusterScheduler, Completed};
