use super::bbox::BoundingBox;
use super::cancel::Interrupt;
use super::dbscan::Clustered;
use super::point::GeoPoint;
use super::quadtree::QuadTree;
use super::result::{Cluster, Partition};
use crate::config::QuadTreeConfig;
use bitvec::prelude::*;

/// Deepest grid we will build, keeps `1 << depth` well inside `usize`
const MAX_GRID_SHIFT: u32 = 20;

/// Grid-partition clustering: every non-empty cell of a regular grid is a cluster
#[derive(Debug, Clone)]
pub struct GridClustering {
    depth: u32,
    viewport_radius: Option<f64>,
    quad_tree: QuadTreeConfig,
}

impl GridClustering {
    /// `depth` is the number of times the index box span is halved to get the
    /// cell size. The viewport radius is only reported in logs.
    pub fn new(depth: u32, viewport_radius: Option<f64>) -> Self {
        GridClustering {
            depth,
            viewport_radius,
            quad_tree: QuadTreeConfig::default(),
        }
    }

    pub fn with_quad_tree(mut self, quad_tree: QuadTreeConfig) -> Self {
        self.quad_tree = quad_tree;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Clusters `points`, returning them alongside the partition
    ///
    /// The partition never has noise.
    pub fn run<T, C: Interrupt>(&self, points: Vec<GeoPoint<T>>, cancel: &C) -> Result<Clustered<T>, C::Error> {
        if points.is_empty() {
            return Ok((Partition::default(), points));
        }

        log::debug!(
            "grid: {} points, depth={}, viewport radius={:?} m",
            points.len(),
            self.depth,
            self.viewport_radius
        );
        let tree = QuadTree::with_config(points, &self.quad_tree);
        let partition = grid_cells(&tree, self.depth, cancel)?;
        Ok((partition, tree.into_points()))
    }
}

/// Walks a regular grid over the tree bounds and turns each non-empty cell into a cluster
///
/// Points lying on a shared cell edge are claimed by the first cell that
/// reports them.
pub fn grid_cells<T, C: Interrupt>(tree: &QuadTree<T>, depth: u32, cancel: &C) -> Result<Partition, C::Error> {
    let n = tree.count();
    let bounds = tree.bounds();
    let cells_per_side = 1usize << depth.min(MAX_GRID_SHIFT);
    let cell = bounds.width().max(bounds.height()) / cells_per_side as f64;

    if !(cell > 0.0 && cell.is_finite()) {
        // Degenerate box, everything shares one cell
        let clusters = if n == 0 {
            Vec::new()
        } else {
            vec![Cluster {
                c: 0,
                points: (0..n).collect(),
            }]
        };
        return Ok(Partition {
            clusters,
            noise: Vec::new(),
        });
    }

    let cols = ((bounds.width() / cell).ceil() as usize).clamp(1, cells_per_side);
    let rows = ((bounds.height() / cell).ceil() as usize).clamp(1, cells_per_side);

    let coords = tree.coords();
    let mut claimed = bitvec![0; n];
    let mut clusters = Vec::new();

    // Cells are visited in grid order, but only rows and columns that can
    // hold a point are looked at
    for row in candidate_cells(coords.iter().map(|c| c.lat()), bounds.min_y, cell, rows) {
        cancel.check()?;
        let min_y = bounds.min_y + row as f64 * cell;
        // Last row/column is snapped to the box edge so nothing falls off
        let max_y = if row + 1 == rows {
            bounds.max_y
        } else {
            bounds.min_y + (row + 1) as f64 * cell
        };

        let row_box = BoundingBox {
            min_x: bounds.min_x,
            min_y,
            max_x: bounds.max_x,
            max_y,
        };
        let row_ids: Vec<usize> = tree
            .query_ids(&row_box)
            .into_iter()
            .filter(|&i| !claimed[i])
            .collect();
        if row_ids.is_empty() {
            continue;
        }

        for col in candidate_cells(row_ids.iter().map(|&i| coords[i].lon()), bounds.min_x, cell, cols) {
            let min_x = bounds.min_x + col as f64 * cell;
            let max_x = if col + 1 == cols {
                bounds.max_x
            } else {
                bounds.min_x + (col + 1) as f64 * cell
            };

            let cell_box = BoundingBox {
                min_x,
                min_y,
                max_x,
                max_y,
            };
            let ids: Vec<usize> = tree
                .query_ids(&cell_box)
                .into_iter()
                .filter(|&i| !claimed[i])
                .collect();
            if ids.is_empty() {
                continue;
            }
            for &i in &ids {
                claimed.set(i, true);
            }
            clusters.push(Cluster {
                c: clusters.len(),
                points: ids,
            });
        }
    }

    // Non-finite coordinates fall in no cell, they share one trailing cluster
    let stray: Vec<usize> = claimed.iter_zeros().collect();
    if !stray.is_empty() {
        log::warn!("grid: {} points outside every cell, grouping them together", stray.len());
        clusters.push(Cluster {
            c: clusters.len(),
            points: stray,
        });
    }

    Ok(Partition {
        clusters,
        noise: Vec::new(),
    })
}

/// Sorted cell indices along one axis that may contain one of `values`
///
/// Each value contributes its own cell and both neighbours, which covers
/// values sitting on a cell edge after rounding.
fn candidate_cells(values: impl Iterator<Item = f64>, origin: f64, cell: f64, count: usize) -> Vec<usize> {
    let last = count.saturating_sub(1) as f64;
    let mut cells: Vec<usize> = values
        .flat_map(|v| {
            let k = ((v - origin) / cell).floor();
            [k - 1.0, k, k + 1.0]
        })
        .filter(|k| k.is_finite())
        .map(|k| k.clamp(0.0, last) as usize)
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}
