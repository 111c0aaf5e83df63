#[cfg(test)]
mod tests {
    use crate::cluster::{ClusterMode, ClusteringContext, IndexKind, Strategy, params, select};
    use crate::config::EngineConfig;
    use quickcheck::quickcheck;

    #[test]
    fn test_filtered_small_set_uses_density() {
        let ctx = ClusteringContext::new(3_000.0, 120).with_filter(true);
        let selection = select(&ctx, params::STRATEGY_THRESHOLD);
        assert_eq!(selection.mode, ClusterMode::Density);
        assert!(selection.rationale.contains("filter active"));
    }

    #[test]
    fn test_unfiltered_set_uses_grid() {
        let ctx = ClusteringContext::new(3_000.0, 120);
        assert_eq!(select(&ctx, params::STRATEGY_THRESHOLD).mode, ClusterMode::Grid);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ctx = ClusteringContext::new(3_000.0, 100).with_filter(true);
        assert_eq!(select(&ctx, 100).mode, ClusterMode::Grid);
        assert_eq!(select(&ctx, 101).mode, ClusterMode::Density);
    }

    #[test]
    fn test_strategy_takes_context_parameters() {
        let ctx = ClusteringContext::new(5_000.0, 10).with_filter(true);
        let config = EngineConfig::default().with_density_index(IndexKind::QuadTree);

        match Strategy::for_mode(ClusterMode::Density, &ctx, &config) {
            Strategy::Density(dbscan) => {
                assert_eq!(dbscan.eps(), params::neighbor_radius(5_000.0));
                assert_eq!(dbscan.min_points(), params::min_cluster_points(5_000.0));
                assert_eq!(dbscan.index_kind(), IndexKind::QuadTree);
            }
            other => panic!("expected density strategy, got {other:?}"),
        }

        let grid = Strategy::for_mode(ClusterMode::Grid, &ctx, &config);
        assert_eq!(grid.mode(), ClusterMode::Grid);
        if let Strategy::Grid(g) = grid {
            assert_eq!(g.depth(), params::grid_depth(5_000.0));
        }
    }

    #[test]
    fn test_context_without_radius_uses_defaults() {
        let ctx = ClusteringContext::without_radius(10);
        assert_eq!(ctx.viewport_radius(), None);
        assert_eq!(ctx.params().neighbor_radius, params::DEFAULT_NEIGHBOR_RADIUS);
        assert_eq!(ctx.params().min_points, params::DEFAULT_MIN_POINTS);

        let invalid = ClusteringContext::new(-1.0, 10);
        assert_eq!(invalid.viewport_radius(), None);
        assert_eq!(invalid.params(), ctx.params());
    }

    quickcheck! {
        fn prop_selection_rule(size: u16, filter: bool, threshold: u16) -> bool {
            let ctx = ClusteringContext::new(1_000.0, size as usize).with_filter(filter);
            let expected = if filter && size < threshold {
                ClusterMode::Density
            } else {
                ClusterMode::Grid
            };
            select(&ctx, threshold as usize).mode == expected
        }
    }
}
