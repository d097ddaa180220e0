use crate::axis::BinAxis;
use crate::form_factor::FormFactorType;

/// A binned distribution of accumulated pair weights.
///
/// Two shapes share this surface: [`Distribution1D`](Distribution1D) stores the plain
/// per-bin weight sums, while [`WeightedDistribution1D`](WeightedDistribution1D) also tracks
/// the distance-weighted sum of every bin so an effective bin centre can be reconstructed.
/// Kernels and managers are generic over this trait, so the choice costs nothing
/// in the inner loop.
pub trait PairDistribution: Clone + Send + Sync + 'static {
    /// Whether this shape consumes raw distances; kernels use it to pick between the
    /// batch evaluators returning distances and those returning bin indices directly
    const TRACKS_DISTANCE: bool;

    /// A zeroed distribution of a given number of bins
    fn with_bins(bins: usize) -> Self;

    /// Number of bins
    fn bins(&self) -> usize;

    /// Adds a weight into a bin; `d` is the raw pair distance, ignored by the plain shape
    fn add_to_bin(&mut self, bin: usize, d: f64, w: f64);

    /// Accumulates another distribution into this one
    fn add_assign(&mut self, other: &Self);

    /// Removes a previously accumulated distribution from this one
    fn sub_assign(&mut self, other: &Self);

    /// The weight accumulated in a given bin
    fn weight(&self, bin: usize) -> f64;

    /// All per-bin weights
    fn weights(&self) -> Vec<f64>;

    /// Representative distance of a bin: the axis centre, or the weighted mean
    /// of the distances that actually fell into the bin
    fn effective_centre<A: BinAxis>(&self, bin: usize, axis: &A) -> f64;
}

/// Plain per-bin weight sums.
///
/// # Examples
/// ```
/// use saxshell_scatter::{Distribution1D, PairDistribution};
/// let mut p = Distribution1D::with_bins(10);
/// p.add_to_bin(3, 3.1, 72.0);
/// assert_eq!(p.weight(3), 72.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Distribution1D {
    data: Vec<f64>,
}

impl PairDistribution for Distribution1D {
    const TRACKS_DISTANCE: bool = false;

    fn with_bins(bins: usize) -> Distribution1D {
        Distribution1D { data: vec![0.0; bins] }
    }

    fn bins(&self) -> usize { self.data.len() }

    #[inline(always)]
    fn add_to_bin(&mut self, bin: usize, _d: f64, w: f64) {
        self.data[bin] += w;
    }

    fn add_assign(&mut self, other: &Distribution1D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a += b; }
    }

    fn sub_assign(&mut self, other: &Distribution1D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a -= b; }
    }

    fn weight(&self, bin: usize) -> f64 { self.data[bin] }

    fn weights(&self) -> Vec<f64> { self.data.clone() }

    fn effective_centre<A: BinAxis>(&self, bin: usize, axis: &A) -> f64 {
        return axis.centre(bin);
    }
}

/// Per-bin weight sums together with the distance-weighted sums needed for
/// effective bin centres.
#[derive(Clone, Debug, Default)]
pub struct WeightedDistribution1D {
    weights: Vec<f64>,
    weighted_distances: Vec<f64>,
}

impl PairDistribution for WeightedDistribution1D {
    const TRACKS_DISTANCE: bool = true;

    fn with_bins(bins: usize) -> WeightedDistribution1D {
        WeightedDistribution1D { weights: vec![0.0; bins], weighted_distances: vec![0.0; bins] }
    }

    fn bins(&self) -> usize { self.weights.len() }

    #[inline(always)]
    fn add_to_bin(&mut self, bin: usize, d: f64, w: f64) {
        self.weights[bin] += w;
        self.weighted_distances[bin] += w * d;
    }

    fn add_assign(&mut self, other: &WeightedDistribution1D) {
        for (a, b) in self.weights.iter_mut().zip(other.weights.iter()) { *a += b; }
        for (a, b) in self.weighted_distances.iter_mut().zip(other.weighted_distances.iter()) { *a += b; }
    }

    fn sub_assign(&mut self, other: &WeightedDistribution1D) {
        for (a, b) in self.weights.iter_mut().zip(other.weights.iter()) { *a -= b; }
        for (a, b) in self.weighted_distances.iter_mut().zip(other.weighted_distances.iter()) { *a -= b; }
    }

    fn weight(&self, bin: usize) -> f64 { self.weights[bin] }

    fn weights(&self) -> Vec<f64> { self.weights.clone() }

    fn effective_centre<A: BinAxis>(&self, bin: usize, axis: &A) -> f64 {
        if self.weights[bin].abs() > 1e-12 {
            return self.weighted_distances[bin] / self.weights[bin];
        }
        return axis.centre(bin);
    }
}

/// Weights keyed by one species tag and the distance bin.
#[derive(Clone, Debug)]
pub struct Distribution2D {
    bins: usize,
    data: Vec<f64>,     // FormFactorType::COUNT x bins
}

impl Distribution2D {
    pub fn with_bins(bins: usize) -> Distribution2D {
        Distribution2D { bins, data: vec![0.0; FormFactorType::COUNT * bins] }
    }

    pub fn bins(&self) -> usize { self.bins }

    #[inline(always)]
    pub fn add_to_bin(&mut self, ff: FormFactorType, bin: usize, w: f64) {
        self.data[ff.index() * self.bins + bin] += w;
    }

    pub fn weight(&self, ff: FormFactorType, bin: usize) -> f64 {
        self.data[ff.index() * self.bins + bin]
    }

    /// The distance distribution of one species channel
    pub fn channel(&self, ff: FormFactorType) -> &[f64] {
        let lo = ff.index() * self.bins;
        return &self.data[lo..lo + self.bins];
    }

    /// Per-bin weights summed over all species channels
    pub fn collapsed(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.bins];
        for ff in 0..FormFactorType::COUNT {
            for (o, v) in out.iter_mut().zip(self.data[ff * self.bins..(ff + 1) * self.bins].iter()) {
                *o += v;
            }
        }
        return out;
    }

    pub fn add_assign(&mut self, other: &Distribution2D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a += b; }
    }

    pub fn sub_assign(&mut self, other: &Distribution2D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a -= b; }
    }
}

/// Weights keyed by two species tags and the distance bin.
#[derive(Clone, Debug)]
pub struct Distribution3D {
    bins: usize,
    data: Vec<f64>,     // FormFactorType::COUNT^2 x bins
}

impl Distribution3D {
    pub fn with_bins(bins: usize) -> Distribution3D {
        Distribution3D { bins, data: vec![0.0; FormFactorType::COUNT * FormFactorType::COUNT * bins] }
    }

    pub fn bins(&self) -> usize { self.bins }

    #[inline(always)]
    pub fn add_to_bin(&mut self, ff1: FormFactorType, ff2: FormFactorType, bin: usize, w: f64) {
        self.data[(ff1.index() * FormFactorType::COUNT + ff2.index()) * self.bins + bin] += w;
    }

    pub fn weight(&self, ff1: FormFactorType, ff2: FormFactorType, bin: usize) -> f64 {
        self.data[(ff1.index() * FormFactorType::COUNT + ff2.index()) * self.bins + bin]
    }

    /// The distance distribution of one pair-of-species channel
    pub fn channel(&self, ff1: FormFactorType, ff2: FormFactorType) -> &[f64] {
        let lo = (ff1.index() * FormFactorType::COUNT + ff2.index()) * self.bins;
        return &self.data[lo..lo + self.bins];
    }

    /// Per-bin weights summed over all pair-of-species channels
    pub fn collapsed(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.bins];
        for pair in 0..FormFactorType::COUNT * FormFactorType::COUNT {
            for (o, v) in out.iter_mut().zip(self.data[pair * self.bins..(pair + 1) * self.bins].iter()) {
                *o += v;
            }
        }
        return out;
    }

    pub fn add_assign(&mut self, other: &Distribution3D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a += b; }
    }

    pub fn sub_assign(&mut self, other: &Distribution3D) {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) { *a -= b; }
    }
}
