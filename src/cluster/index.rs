use super::point::Coord;

/// Spatial index able to answer "which points lie within `radius` of `center`"
///
/// Radius is in degree space and the test is inclusive. Returned values are
/// indices into the point list the index was built from, in no particular
/// order.
pub trait NeighborIndex {
    fn neighbors(&self, center: &Coord, radius: f64) -> Vec<usize>;
}

/// Which index backs the neighbor queries of a density clustering run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexKind {
    QuadTree,
    #[default]
    KdTree,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::QuadTree => write!(f, "quad-tree"),
            IndexKind::KdTree => write!(f, "k-d tree"),
        }
    }
}
