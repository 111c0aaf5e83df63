use super::params::ClusterParams;

/// Inputs describing one clustering request
///
/// Built once per viewport change and never modified. The derived parameters
/// depend on the viewport radius only.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringContext {
    viewport_radius: Option<f64>,
    data_size: usize,
    filter_active: bool,
    params: ClusterParams,
}

impl ClusteringContext {
    /// Context for a viewport spanning `viewport_radius` meters
    ///
    /// Negative or NaN radii are treated as unknown and fall back to the
    /// default parameters.
    pub fn new(viewport_radius: f64, data_size: usize) -> Self {
        if viewport_radius.is_nan() || viewport_radius < 0.0 {
            log::warn!("ignoring invalid viewport radius {viewport_radius}");
            return Self::without_radius(data_size);
        }
        ClusteringContext {
            viewport_radius: Some(viewport_radius),
            data_size,
            filter_active: false,
            params: ClusterParams::for_radius(viewport_radius),
        }
    }

    /// Context used when the map has not reported a radius yet
    pub fn without_radius(data_size: usize) -> Self {
        ClusteringContext {
            viewport_radius: None,
            data_size,
            filter_active: false,
            params: ClusterParams::default(),
        }
    }

    /// Marks whether a content filter is narrowing the point set
    pub fn with_filter(mut self, active: bool) -> Self {
        self.filter_active = active;
        self
    }

    /// Replaces the reported data size, the derived parameters are unchanged
    pub fn with_data_size(mut self, data_size: usize) -> Self {
        self.data_size = data_size;
        self
    }

    pub fn viewport_radius(&self) -> Option<f64> {
        self.viewport_radius
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }
}
