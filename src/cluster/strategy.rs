//! Picks grid or density clustering for a request
//!
//! The choice is a pure function of the context: density clustering is only
//! used for filtered point sets small enough to stay responsive.

use super::cancel::Interrupt;
use super::context::ClusteringContext;
use super::dbscan::{Clustered, Dbscan};
use super::grid::GridClustering;
use super::point::GeoPoint;
use super::result::ClusterMode;
use crate::config::EngineConfig;

/// Outcome of [`select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub mode: ClusterMode,
    pub rationale: String,
}

/// Chooses the clustering mode for `ctx`
pub fn select(ctx: &ClusteringContext, threshold: usize) -> Selection {
    let size = ctx.data_size();
    if ctx.filter_active() && size < threshold {
        Selection {
            mode: ClusterMode::Density,
            rationale: format!("filter active and {size} points < threshold {threshold}: density clustering for precision"),
        }
    } else if !ctx.filter_active() {
        Selection {
            mode: ClusterMode::Grid,
            rationale: format!("no filter active on {size} points: grid clustering for speed"),
        }
    } else {
        Selection {
            mode: ClusterMode::Grid,
            rationale: format!("{size} points >= threshold {threshold}: grid clustering for speed"),
        }
    }
}

/// A configured clustering algorithm
#[derive(Debug, Clone)]
pub enum Strategy {
    Grid(GridClustering),
    Density(Dbscan),
}

impl Strategy {
    /// Builds the algorithm for `mode` from the context parameters
    pub fn for_mode(mode: ClusterMode, ctx: &ClusteringContext, config: &EngineConfig) -> Self {
        let params = ctx.params();
        match mode {
            ClusterMode::Grid => Strategy::Grid(
                GridClustering::new(params.grid_depth, ctx.viewport_radius()).with_quad_tree(config.quad_tree),
            ),
            ClusterMode::Density => Strategy::Density(
                Dbscan::new(params.neighbor_radius, params.min_points, config.density_index)
                    .with_quad_tree(config.quad_tree),
            ),
        }
    }

    pub fn mode(&self) -> ClusterMode {
        match self {
            Strategy::Grid(_) => ClusterMode::Grid,
            Strategy::Density(_) => ClusterMode::Density,
        }
    }

    pub fn run<T, C: Interrupt>(&self, points: Vec<GeoPoint<T>>, cancel: &C) -> Result<Clustered<T>, C::Error> {
        match self {
            Strategy::Grid(grid) => grid.run(points, cancel),
            Strategy::Density(dbscan) => dbscan.run(points, cancel),
        }
    }
}
