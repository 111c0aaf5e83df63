#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::cluster::{CancelToken, ClusterError, ClusterMode, ClusterResult, GeoPoint, GridClustering};
    use crate::test_support::{grid_points, is_partition, membership};
    use quickcheck::quickcheck;

    fn run(points: Vec<GeoPoint<usize>>, depth: u32) -> ClusterResult<usize> {
        let (partition, points) = GridClustering::new(depth, None)
            .run(points, &CancelToken::new())
            .expect("not cancelled");
        ClusterResult::from_partition(partition, points, ClusterMode::Grid, Duration::ZERO, String::new())
    }

    #[test]
    fn test_empty_input() {
        let result = run(Vec::new(), 4);
        assert!(result.clusters.is_empty());
        assert!(result.noise.is_empty());
    }

    #[test]
    fn test_scenario_d_corners_depth_one() {
        let points = vec![
            GeoPoint::with_payload("0", 0.0, 0.0, 0),
            GeoPoint::with_payload("1", 0.0, 2.0, 1),
            GeoPoint::with_payload("2", 2.0, 0.0, 2),
            GeoPoint::with_payload("3", 2.0, 2.0, 3),
        ];
        let result = run(points, 1);
        assert!(is_partition(&result, 4));
        assert!(result.noise.is_empty());
        assert_eq!(result.clusters.len(), 4);
    }

    #[test]
    fn test_identical_points_share_one_cell() {
        let result = run(grid_points(&[(5, 5); 30]), 10);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(result.clusters[0].len(), 30);
    }

    #[test]
    fn test_depth_zero_is_one_cell() {
        let result = run(grid_points(&[(0, 0), (255, 255), (10, 200)]), 0);
        assert_eq!(result.clusters.len(), 1);
        assert!(is_partition(&result, 3));
    }

    #[test]
    fn test_boundary_point_claimed_once() {
        // (5, 5) lies exactly on the shared corner of all four depth-1 cells
        let result = run(grid_points(&[(0, 0), (10, 10), (5, 5), (0, 10), (10, 0)]), 1);
        assert!(is_partition(&result, 5));
        assert_eq!(result.clusters.len(), 4);
    }

    #[test]
    fn test_flat_row_of_points() {
        // Zero height box still splits along its width
        let raw: Vec<(u8, u8)> = (0..16u8).map(|i| (i * 10, 0)).collect();
        let result = run(grid_points(&raw), 2);
        assert!(is_partition(&result, 16));
        assert_eq!(result.clusters.len(), 4);
    }

    #[test]
    fn test_non_finite_point_is_kept() {
        let points = vec![
            GeoPoint::with_payload("0", 1.0, 1.0, 0),
            GeoPoint::with_payload("1", 2.0, 2.0, 1),
            GeoPoint::with_payload("2", f64::NAN, 1.5, 2),
        ];
        let result = run(points, 3);
        assert!(is_partition(&result, 3));
        assert!(result.noise.is_empty());
        let last = result.clusters.last().expect("clusters present");
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id(), "2");
    }

    #[test]
    fn test_cancelled_run() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = GridClustering::new(3, Some(1_000.0))
            .run(grid_points(&[(0, 0), (9, 9)]), &cancel)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, ClusterError::Cancelled);
    }

    quickcheck! {
        fn prop_partition_is_total_without_noise(raw: Vec<(u8, u8)>, depth: u8) -> bool {
            let result = run(grid_points(&raw), (depth % 11) as u32);
            result.noise.is_empty() && is_partition(&result, raw.len())
        }

        fn prop_deterministic(raw: Vec<(u8, u8)>, depth: u8) -> bool {
            let depth = (depth % 11) as u32;
            membership(&run(grid_points(&raw), depth)) == membership(&run(grid_points(&raw), depth))
        }
    }
}
