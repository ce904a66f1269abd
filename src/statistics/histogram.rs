//! Binned distribution output shared by the pair and angular statistics

/// A histogram over a fixed domain of radii or angles
///
/// Stores bin centers alongside the per-bin values; the normalization
/// convention (density, correlation ratio) is set by the producing
/// operation and documented there.
#[derive(Debug, Clone)]
pub struct Histogram {
    centers: Vec<f64>,
    values: Vec<f64>,
    bin_width: f64,
}

impl Histogram {
    /// Bundle bin centers and values produced by a distribution function
    pub(crate) const fn new(centers: Vec<f64>, values: Vec<f64>, bin_width: f64) -> Self {
        Self {
            centers,
            values,
            bin_width,
        }
    }

    /// Bin center positions, in increasing order
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// Per-bin values, aligned with [`Self::centers`]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Width shared by all bins
    pub const fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of bins
    pub const fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether the histogram has no bins
    pub const fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// All (bin center, value) pairs in bin order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.centers
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Integral of the histogram under its bin measure
    pub fn integral(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.bin_width
    }
}
