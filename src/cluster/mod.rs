//! Package cluster implements the spatial indexes and clustering algorithms on (lat, lon)
pub mod bbox;
pub mod cancel;
pub mod context;
pub mod dbscan;
pub mod distance;
pub mod error;
pub mod grid;
pub mod index;
pub mod kdtree;
pub mod params;
pub mod point;
pub mod quadtree;
pub mod result;
pub mod strategy;

#[cfg(test)]
mod grid_test;
#[cfg(test)]
mod strategy_test;

pub use bbox::BoundingBox;
pub use cancel::{CancelToken, Interrupt, Uninterrupted};
pub use context::ClusteringContext;
pub use dbscan::{Clustered, Dbscan, db_scan, region_query};
pub use distance::{DEGREE_RAD, EARTH_R, METERS_PER_DEGREE, distance_spherical, meters_to_degrees};
pub use error::ClusterError;
pub use grid::{GridClustering, grid_cells};
pub use index::{IndexKind, NeighborIndex};
pub use kdtree::KDTree;
pub use params::ClusterParams;
pub use point::{Coord, GeoPoint, centroid_and_bounds};
pub use quadtree::QuadTree;
pub use result::{Cluster, ClusterMode, ClusterResult, Marker, Partition};
pub use strategy::{Selection, Strategy, select};
