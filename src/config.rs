//! Engine configuration
//!
//! Everything here has a sensible [`Default`]; callers usually only touch the
//! strategy threshold or the index kind used by density clustering.

use crate::cluster::{BoundingBox, ClusterMode, IndexKind, params};

/// Quad-tree construction limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTreeConfig {
    /// Points a node holds before it subdivides
    pub capacity: usize,
    /// Hard limit on subdivision, a node at this depth never splits
    pub max_depth: usize,
    /// Bounds used when the tree is built over no points
    pub empty_bounds: BoundingBox,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        QuadTreeConfig {
            capacity: 8,
            max_depth: 16,
            empty_bounds: BoundingBox::WORLD,
        }
    }
}

/// Settings shared by every clustering invocation of a [`crate::ClusterEngine`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub quad_tree: QuadTreeConfig,
    /// Dataset size below which density clustering is allowed
    pub strategy_threshold: usize,
    /// Index backing DBSCAN neighbor queries
    pub density_index: IndexKind,
    /// Skip selection and always run this mode
    pub forced_mode: Option<ClusterMode>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            quad_tree: QuadTreeConfig::default(),
            strategy_threshold: params::STRATEGY_THRESHOLD,
            density_index: IndexKind::KdTree,
            forced_mode: None,
        }
    }
}

impl EngineConfig {
    pub fn with_quad_tree(mut self, quad_tree: QuadTreeConfig) -> Self {
        self.quad_tree = quad_tree;
        self
    }

    pub fn with_strategy_threshold(mut self, threshold: usize) -> Self {
        self.strategy_threshold = threshold;
        self
    }

    pub fn with_density_index(mut self, kind: IndexKind) -> Self {
        self.density_index = kind;
        self
    }

    pub fn with_forced_mode(mut self, mode: Option<ClusterMode>) -> Self {
        self.forced_mode = mode;
        self
    }
}
