#[cfg(test)]
mod tests {
    use crate::{read_points, viewport_radius, write_markers};
    use geo_cluster::{ClusterEngine, ClusteringContext};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_main_program() {
        // Create a test CSV file
        let test_csv = "latitude,longitude,name
40.7128,-74.0060,a
40.7130,-74.0062,b
40.7132,-74.0064,c
40.7500,-73.9900,d
40.7502,-73.9902,e
40.7504,-73.9904,f
not,a-number,g
40.8000,-73.9500,h
41.0000,-74.0000,i";

        let test_file = PathBuf::from("test_points_geo_cluster.csv");
        fs::write(&test_file, test_csv).expect("Failed to create test CSV");

        // Read points, the unparsable row is skipped
        let points = read_points(&test_file).expect("Failed to read CSV");
        fs::remove_file(&test_file).ok();

        assert_eq!(points.len(), 8);
        assert_eq!(points[0].payload().map(|r| r[2].as_str()), Some("a"));
        assert_eq!(points[7].id(), "9");

        let radius = viewport_radius(&points).expect("points present");
        assert!(radius > 10_000.0 && radius < 50_000.0, "radius {radius}");

        let ctx = ClusteringContext::new(radius, points.len()).with_filter(true);
        let result = ClusterEngine::default().cluster(points, &ctx);
        assert_eq!(result.point_count(), 8);

        let mut out = Vec::new();
        write_markers(&mut out, &result.markers()).expect("write markers");
        let text = String::from_utf8(out).expect("utf8 output");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("latitude,longitude,count,ids"));
        let counts: usize = lines
            .map(|l| l.split(',').nth(2).and_then(|c| c.parse::<usize>().ok()).unwrap_or(0))
            .sum();
        assert_eq!(counts, 8);
    }

    #[test]
    fn test_headerless_input() {
        let test_file = PathBuf::from("test_points_geo_cluster_headerless.csv");
        fs::write(&test_file, "1.0,2.0\n3.0,4.0\n5.0\n").expect("Failed to create test CSV");

        let points = read_points(&test_file).expect("Failed to read CSV");
        fs::remove_file(&test_file).ok();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].latitude(), 1.0);
        assert_eq!(points[0].longitude(), 2.0);
        assert_eq!(points[1].id(), "2");
    }

    #[test]
    fn test_missing_file() {
        assert!(read_points(&PathBuf::from("does/not/exist.csv")).is_err());
    }
}
