#[cfg(test)]
mod tests {
    use crate::cluster::{BoundingBox, CancelToken, ClusterError, ClusterMode, ClusteringContext, GeoPoint};
    use crate::config::EngineConfig;
    use crate::engine::{ClusterEngine, build_index, cluster};
    use crate::test_support::{STEP, grid_points, is_partition, membership};

    fn two_blobs() -> Vec<GeoPoint<usize>> {
        let mut raw: Vec<(u8, u8)> = (0..10u8).map(|i| (i % 3, i / 3)).collect();
        raw.extend((0..10u8).map(|i| (200 + i % 3, 200 + i / 3)));
        raw.push((100, 100));
        grid_points(&raw)
    }

    #[test]
    fn test_filtered_small_set_runs_dbscan() {
        let points = two_blobs();
        let ctx = ClusteringContext::new(2_000.0, points.len()).with_filter(true);
        let result = cluster(points, &ctx);

        assert_eq!(result.mode, ClusterMode::Density);
        assert!(is_partition(&result, 21));
        assert_eq!(result.clusters.len(), 2);
        assert_eq!(result.noise.len(), 1);
        assert_eq!(result.noise[0].payload(), Some(&20));
        assert!(!result.rationale.is_empty());
    }

    #[test]
    fn test_unfiltered_set_runs_grid() {
        let points = two_blobs();
        let ctx = ClusteringContext::new(2_000.0, points.len());
        let result = cluster(points, &ctx);

        assert_eq!(result.mode, ClusterMode::Grid);
        assert!(result.noise.is_empty());
        assert!(is_partition(&result, 21));
    }

    #[test]
    fn test_payload_travels_with_point() {
        let points = two_blobs();
        let ctx = ClusteringContext::new(2_000.0, points.len());
        let result = cluster(points, &ctx);
        for p in result.clusters.iter().flatten().chain(result.noise.iter()) {
            assert_eq!(p.payload().map(|v| v.to_string()).as_deref(), Some(p.id()));
        }
    }

    #[test]
    fn test_empty_input() {
        let ctx = ClusteringContext::new(2_000.0, 0).with_filter(true);
        let result = cluster(Vec::<GeoPoint>::new(), &ctx);
        assert!(result.clusters.is_empty());
        assert!(result.noise.is_empty());
        assert!(result.markers().is_empty());
    }

    #[test]
    fn test_same_input_same_partition() {
        let engine = ClusterEngine::default();
        for filter in [false, true] {
            let ctx = ClusteringContext::new(1_500.0, 21).with_filter(filter);
            let first = engine.cluster(two_blobs(), &ctx);
            let second = engine.cluster(two_blobs(), &ctx);
            assert_eq!(membership(&first), membership(&second));
        }
    }

    #[test]
    fn test_forced_mode_overrides_selection() {
        let engine = ClusterEngine::new(EngineConfig::default().with_forced_mode(Some(ClusterMode::Density)));
        let ctx = ClusteringContext::new(2_000.0, 21);
        let result = engine.cluster(two_blobs(), &ctx);
        assert_eq!(result.mode, ClusterMode::Density);
        assert!(result.rationale.contains("forced"));
    }

    #[test]
    fn test_threshold_from_config() {
        let engine = ClusterEngine::new(EngineConfig::default().with_strategy_threshold(10));
        let ctx = ClusteringContext::new(2_000.0, 21).with_filter(true);
        assert_eq!(engine.selection(&ctx).mode, ClusterMode::Grid);
    }

    #[test]
    fn test_selection_uses_actual_point_count() {
        let engine = ClusterEngine::new(EngineConfig::default().with_strategy_threshold(10));
        // Context still describes an earlier, empty viewport
        let ctx = ClusteringContext::new(2_000.0, 0).with_filter(true);
        assert_eq!(engine.selection(&ctx).mode, ClusterMode::Density);

        let result = engine.cluster(two_blobs(), &ctx);
        assert_eq!(result.mode, ClusterMode::Grid);
        assert!(is_partition(&result, 21));
    }

    #[test]
    fn test_plain_and_cancellable_paths_agree() {
        let engine = ClusterEngine::default();
        let ctx = ClusteringContext::new(1_500.0, 21).with_filter(true);
        let plain = engine.cluster(two_blobs(), &ctx);
        let cancellable = engine
            .cluster_cancellable(two_blobs(), &ctx, &CancelToken::new())
            .expect("not cancelled");
        assert_eq!(plain.mode, cancellable.mode);
        assert_eq!(membership(&plain), membership(&cancellable));
    }

    #[test]
    fn test_cancelled_pass() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let ctx = ClusteringContext::new(2_000.0, 21).with_filter(true);
        let err = ClusterEngine::default()
            .cluster_cancellable(two_blobs(), &ctx, &cancel)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, ClusterError::Cancelled);
    }

    #[test]
    fn test_non_finite_point_kept_by_both_modes() {
        for mode in [ClusterMode::Grid, ClusterMode::Density] {
            let mut points = two_blobs();
            points.push(GeoPoint::with_payload("21", f64::NAN, 30.2, 21));
            points.push(GeoPoint::with_payload("22", 59.9, f64::INFINITY, 22));

            let engine = ClusterEngine::new(EngineConfig::default().with_forced_mode(Some(mode)));
            let ctx = ClusteringContext::new(2_000.0, points.len()).with_filter(true);
            let result = engine.cluster(points, &ctx);
            assert!(is_partition(&result, 23), "{mode} lost a point");
        }
    }

    #[test]
    fn test_markers() {
        let points = two_blobs();
        let ctx = ClusteringContext::new(2_000.0, points.len()).with_filter(true);
        let result = cluster(points, &ctx);
        let markers = result.markers();

        assert_eq!(markers.len(), 3);
        assert_eq!(markers.iter().filter(|m| m.is_cluster()).count(), 2);
        assert_eq!(markers.iter().map(|m| m.count()).sum::<usize>(), 21);
        let lone = markers.iter().find(|m| !m.is_cluster()).expect("noise marker");
        assert_eq!(lone.ids, vec!["20".to_string()]);
        assert!(lone.bounds.is_point());
    }

    #[test]
    fn test_build_index_range_query() {
        let index = build_index(two_blobs());
        assert_eq!(index.count(), 21);

        let first_blob = BoundingBox::new(30.2, 59.9, 30.2 + 2.0 * STEP, 59.9 + 3.0 * STEP);
        assert_eq!(index.query(&first_blob).len(), 10);
    }
}
