//! Entry points used by the map collaborator

use std::time::Instant;

use crate::cluster::{
    CancelToken, ClusterError, ClusterResult, ClusteringContext, GeoPoint, Interrupt, QuadTree, Selection, Strategy,
    Uninterrupted, select,
};
use crate::config::EngineConfig;

/// Clustering engine holding the configuration shared by all invocations
///
/// The engine itself is stateless between calls; each call builds and owns its
/// own index.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    config: EngineConfig,
}

impl ClusterEngine {
    pub fn new(config: EngineConfig) -> Self {
        ClusterEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mode and rationale that [`ClusterEngine::cluster`] would use for `ctx`
    pub fn selection(&self, ctx: &ClusteringContext) -> Selection {
        match self.config.forced_mode {
            Some(mode) => Selection {
                mode,
                rationale: format!("{mode} clustering forced by configuration"),
            },
            None => select(ctx, self.config.strategy_threshold),
        }
    }

    /// Clusters `points` with the strategy selected for `ctx`
    pub fn cluster<T>(&self, points: Vec<GeoPoint<T>>, ctx: &ClusteringContext) -> ClusterResult<T> {
        let Ok(result) = self.run(points, ctx, &Uninterrupted);
        result
    }

    /// Same as [`ClusterEngine::cluster`], abandoning the pass once `cancel` fires
    pub fn cluster_cancellable<T>(
        &self,
        points: Vec<GeoPoint<T>>,
        ctx: &ClusteringContext,
        cancel: &CancelToken,
    ) -> Result<ClusterResult<T>, ClusterError> {
        self.run(points, ctx, cancel)
    }

    fn run<T, C: Interrupt>(
        &self,
        points: Vec<GeoPoint<T>>,
        ctx: &ClusteringContext,
        interrupt: &C,
    ) -> Result<ClusterResult<T>, C::Error> {
        let start = Instant::now();
        let sized;
        let ctx = if ctx.data_size() == points.len() {
            ctx
        } else {
            log::warn!(
                "context reports {} points but {} were passed, selecting on the latter",
                ctx.data_size(),
                points.len()
            );
            sized = ctx.clone().with_data_size(points.len());
            &sized
        };
        let Selection { mode, rationale } = self.selection(ctx);
        log::debug!("selected {mode} clustering: {rationale}");

        let strategy = Strategy::for_mode(mode, ctx, &self.config);
        let (partition, points) = strategy.run(points, interrupt)?;
        let result = ClusterResult::from_partition(partition, points, mode, start.elapsed(), rationale);

        log::debug!(
            "{mode} clustering done in {:?}: {} clusters, {} noise",
            result.duration,
            result.clusters.len(),
            result.noise.len()
        );
        Ok(result)
    }

    /// Builds a quad-tree for ad-hoc range queries
    pub fn build_index<T>(&self, points: Vec<GeoPoint<T>>) -> QuadTree<T> {
        QuadTree::with_config(points, &self.config.quad_tree)
    }
}

/// Clusters `points` for `ctx` with the default engine configuration
pub fn cluster<T>(points: Vec<GeoPoint<T>>, ctx: &ClusteringContext) -> ClusterResult<T> {
    ClusterEngine::default().cluster(points, ctx)
}

/// Builds a quad-tree over `points` with the default limits
pub fn build_index<T>(points: Vec<GeoPoint<T>>) -> QuadTree<T> {
    ClusterEngine::default().build_index(points)
}
