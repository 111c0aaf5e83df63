//! Geo point clustering tool
//!
//! Reads geographic points from CSV files, clusters them the way the map view
//! does and writes one marker per cluster plus one per noise point.

use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use geo_cluster::cluster::distance_spherical;
use geo_cluster::{
    BoundingBox, ClusterEngine, ClusterMode, ClusteringContext, EngineConfig, GeoPoint, IndexKind, Marker,
};

#[cfg(test)]
mod main_test;

#[derive(Parser)]
#[command(name = "geo_cluster")]
#[command(about = "Adaptive geo point clustering tool", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude columns (extra columns are carried through)
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file with markers (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Visible map radius in meters (default: derived from the points' extent)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Treat the point set as filtered, enabling density clustering on small sets
    #[arg(short, long)]
    filter_active: bool,

    /// Index backing density clustering
    #[arg(long, value_enum, default_value_t = IndexArg::Kd)]
    index: IndexArg,

    /// Clustering strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndexArg {
    Kd,
    Quad,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Auto,
    Grid,
    Density,
}

impl From<IndexArg> for IndexKind {
    fn from(arg: IndexArg) -> Self {
        match arg {
            IndexArg::Kd => IndexKind::KdTree,
            IndexArg::Quad => IndexKind::QuadTree,
        }
    }
}

impl StrategyArg {
    fn forced_mode(self) -> Option<ClusterMode> {
        match self {
            StrategyArg::Auto => None,
            StrategyArg::Grid => Some(ClusterMode::Grid),
            StrategyArg::Density => Some(ClusterMode::Density),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("reading {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("no points found in {0:?}")]
    NoPoints(PathBuf),
}

/// Raw CSV record kept as the point payload
type Record = Vec<String>;

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let points = read_points(&args.input)?;
    if points.is_empty() {
        return Err(CliError::NoPoints(args.input.clone()));
    }
    log::debug!("read {} points from {:?}", points.len(), args.input);

    let radius = args.radius.or_else(|| viewport_radius(&points));
    let ctx = match radius {
        Some(r) => ClusteringContext::new(r, points.len()),
        None => ClusteringContext::without_radius(points.len()),
    }
    .with_filter(args.filter_active);
    log::debug!("viewport radius {:?} m, parameters {:?}", ctx.viewport_radius(), ctx.params());

    let config = EngineConfig::default()
        .with_density_index(args.index.into())
        .with_forced_mode(args.strategy.forced_mode());
    let result = ClusterEngine::new(config).cluster(points, &ctx);

    log::debug!(
        "{} mode ({}): {} clusters, {} noise points in {:?}",
        result.mode,
        result.rationale,
        result.clusters.len(),
        result.noise.len(),
        result.duration
    );

    let markers = result.markers();
    match &args.output {
        None => write_markers(io::stdout().lock(), &markers)?,
        Some(output_file) => {
            let file = File::create(output_file).map_err(|source| CliError::Io {
                path: output_file.clone(),
                source,
            })?;
            write_markers(file, &markers)?;
            log::debug!("markers written to {output_file:?}");
        }
    }

    Ok(())
}

/// Reads points from a CSV file in a single pass
///
/// Expected format: `latitude,longitude[,...]` (header row is optional).
/// Point ids are taken from the 1-based data row number. Rows with
/// unparsable or non-finite coordinates are skipped.
///
/// Each point carries its raw record as payload.
fn read_points(filename: &PathBuf) -> Result<Vec<GeoPoint<Record>>, CliError> {
    let file = File::open(filename).map_err(|source| CliError::Io {
        path: filename.clone(),
        source,
    })?;
    let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect::<Record>());
    }

    // Determine if first row is header
    let has_header = records
        .first()
        .and_then(|r| r.first())
        .is_some_and(|v| v.trim().parse::<f64>().is_err());
    let start_idx = if has_header { 1 } else { 0 };

    let mut points = Vec::with_capacity(records.len());
    for (row, record) in records.into_iter().skip(start_idx).enumerate() {
        if record.len() < 2 {
            continue;
        }
        let lat = record[0].trim().parse::<f64>();
        let lon = record[1].trim().parse::<f64>();
        match (lat, lon) {
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => {
                points.push(GeoPoint::with_payload((row + 1).to_string(), lat, lon, record));
            }
            _ => log::warn!("skipping row {} with invalid coordinates", row + 1),
        }
    }

    Ok(points)
}

/// Radius of the smallest viewport showing every point, in meters
///
/// Spherical distance from the center of the points' bounding box to its corner.
fn viewport_radius<T>(points: &[GeoPoint<T>]) -> Option<f64> {
    let bounds = BoundingBox::covering(points.iter().map(GeoPoint::coord))?;
    let corner = geo_cluster::Coord([bounds.max_x, bounds.max_y]);
    Some(distance_spherical(&bounds.center(), &corner) * 1000.0)
}

/// Writes markers as `latitude,longitude,count,ids`
///
/// Member ids are joined with `;`.
fn write_markers<W: io::Write>(out: W, markers: &[Marker]) -> Result<(), CliError> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["latitude", "longitude", "count", "ids"])?;
    for m in markers {
        writer.write_record([
            m.position.lat().to_string(),
            m.position.lon().to_string(),
            m.count().to_string(),
            m.ids.join(";"),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
