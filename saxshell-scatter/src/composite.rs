use std::cell::OnceCell;
use std::sync::Arc;
use crate::axis::{BinAxis, QAxis};
use crate::debye::{shared_table, ScatteringCurve, SincTable};
use crate::distribution::PairDistribution;

/// histogram tails are truncated to the last non-zero bin, but never below this many bins
pub(crate) const MIN_BINS: usize = 10;

/// finds the truncated length: one past the last non-zero bin, with a floor of [`MIN_BINS`]
pub(crate) fn truncated_length(p_tot: &[f64]) -> usize {
    let mut len = MIN_BINS.min(p_tot.len());
    for i in (MIN_BINS.min(p_tot.len())..p_tot.len()).rev() {
        if p_tot[i] != 0.0 {
            len = i + 1;
            break;
        }
    }
    return len;
}

/// The behaviour a fitter needs from any decomposed distance histogram, regardless of
/// whether form factors are resolved per bin.
pub trait CompositeHistogram: Send {
    /// Rescales the hydration-layer weighting; the factor replaces whatever was applied before
    fn apply_water_scaling_factor(&mut self, c: f64);

    /// Rescales the excluded-volume channel; a no-op for histograms without one
    fn apply_excluded_volume_scaling_factor(&mut self, c: f64);

    /// The currently applied hydration scaling
    fn water_scaling_factor(&self) -> f64;

    /// The currently applied excluded-volume scaling
    fn excluded_volume_scaling_factor(&self) -> f64 { 1.0 }

    /// Whether this histogram carries an excluded-volume channel worth fitting
    fn has_excluded_volume(&self) -> bool { false }

    /// The intensity curve of the current scaling state
    fn debye_transform(&self) -> ScatteringCurve;

    /// The total distance distribution under the current scaling state
    fn total(&self) -> Vec<f64>;

    /// The q points of the transform
    fn q(&self) -> Vec<f64>;
}

/// A plain total distance histogram, the result of `calculate()`.
#[derive(Clone)]
pub struct DistanceHistogram {
    p: Vec<f64>,
    d: Vec<f64>,
    q_axis: QAxis,
    uniform_width: Option<f64>,
    table: OnceCell<Arc<SincTable>>,
}

impl DistanceHistogram {
    /// Wraps a computed distribution, truncating the tail to the last non-zero bin.
    ///
    /// A plain distribution shares the process-wide sinc table of its axis; one carrying
    /// effective bin centres gets a private table instead.
    pub fn from_distribution<D: PairDistribution, A: BinAxis>(dist: &D, axis: &A, q_axis: QAxis) -> DistanceHistogram {
        let p_full = dist.weights();
        let len = truncated_length(&p_full);
        let p = p_full[..len].to_vec();
        let d: Vec<f64> = (0..len).map(|k| dist.effective_centre(k, axis)).collect();
        let uniform_width = if D::TRACKS_DISTANCE { None } else { Some(axis.centre(1) - axis.centre(0)) };
        DistanceHistogram { p, d, q_axis, uniform_width, table: OnceCell::new() }
    }

    /// The accumulated weights, one per retained distance bin
    pub fn p(&self) -> &[f64] { &self.p }

    /// The representative distance of every retained bin
    pub fn d(&self) -> &[f64] { &self.d }

    /// The q points this histogram will be transformed on
    pub fn q(&self) -> Vec<f64> { self.q_axis.as_vector() }

    fn table(&self) -> &Arc<SincTable> {
        self.table.get_or_init(|| match self.uniform_width {
            Some(width) => shared_table(&self.q_axis, width, self.p.len().max(MIN_BINS)),
            None => Arc::new(SincTable::new(&self.q_axis.as_vector(), &self.d)),
        })
    }

    /// `I(q) = sum_k P(d_k) sinc(q d_k)` over the configured q axis
    pub fn debye_transform(&self) -> ScatteringCurve {
        let table = self.table();
        ScatteringCurve { q: self.q(), i: table.transform(&self.p) }
    }
}

/// The three-way decomposition of a distance histogram into atom-atom, atom-water and
/// water-water components.
///
/// The components are stored unscaled; [`apply_water_scaling_factor`](CompositeHistogram::apply_water_scaling_factor)
/// records the current factor and recomputes the total, so re-applying a factor always
/// replaces the previous one instead of compounding with it.
#[derive(Clone)]
pub struct CompositeDistanceHistogram {
    p_aa: Vec<f64>,
    p_aw: Vec<f64>,
    p_ww: Vec<f64>,
    p_tot: Vec<f64>,
    d: Vec<f64>,
    q_axis: QAxis,
    uniform_width: Option<f64>,
    cw: f64,
    partials: OnceCell<[Vec<f64>; 3]>,
}

impl CompositeDistanceHistogram {
    /// Assembles the decomposition from the three computed distributions.
    ///
    /// All channels share one axis; the tail is truncated consistently across them,
    /// to the last non-zero bin of the total (with the usual floor).
    pub fn new<D: PairDistribution, A: BinAxis>(aa: &D, aw: &D, ww: &D, axis: &A, q_axis: QAxis) -> CompositeDistanceHistogram {
        let mut total = aa.clone();
        total.add_assign(aw);
        total.add_assign(aw);
        total.add_assign(ww);

        let p_tot_full = total.weights();
        let len = truncated_length(&p_tot_full);
        let d: Vec<f64> = (0..len).map(|k| total.effective_centre(k, axis)).collect();
        let uniform_width = if D::TRACKS_DISTANCE { None } else { Some(axis.centre(1) - axis.centre(0)) };

        CompositeDistanceHistogram {
            p_aa: aa.weights()[..len].to_vec(),
            p_aw: aw.weights()[..len].to_vec(),
            p_ww: ww.weights()[..len].to_vec(),
            p_tot: p_tot_full[..len].to_vec(),
            d,
            q_axis,
            uniform_width,
            cw: 1.0,
            partials: OnceCell::new(),
        }
    }

    /// The atom-atom component
    pub fn aa(&self) -> &[f64] { &self.p_aa }

    /// The atom-water component (single orientation; it enters the total twice)
    pub fn aw(&self) -> &[f64] { &self.p_aw }

    /// The water-water component
    pub fn ww(&self) -> &[f64] { &self.p_ww }

    /// The representative distance of every retained bin
    pub fn d(&self) -> &[f64] { &self.d }

    fn recompute_total(&mut self) {
        let c = self.cw;
        self.p_tot = (0..self.p_aa.len())
            .map(|k| self.p_aa[k] + 2.0 * c * self.p_aw[k] + c * c * self.p_ww[k])
            .collect();
    }

    /// The per-channel sinc products, computed once and recombined under any scaling
    fn partial_intensities(&self) -> &[Vec<f64>; 3] {
        self.partials.get_or_init(|| {
            let table = match self.uniform_width {
                Some(width) => shared_table(&self.q_axis, width, self.p_aa.len().max(MIN_BINS)),
                None => Arc::new(SincTable::new(&self.q_axis.as_vector(), &self.d)),
            };
            [table.transform(&self.p_aa), table.transform(&self.p_aw), table.transform(&self.p_ww)]
        })
    }

    /// The intensity of the macromolecule alone, without its hydration layer
    pub fn debye_transform_sans_hydration(&self) -> ScatteringCurve {
        let [i_aa, _, _] = self.partial_intensities();
        ScatteringCurve { q: self.q(), i: i_aa.clone() }
    }
}

impl CompositeHistogram for CompositeDistanceHistogram {
    fn apply_water_scaling_factor(&mut self, c: f64) {
        self.cw = c;
        self.recompute_total();
    }

    fn apply_excluded_volume_scaling_factor(&mut self, _c: f64) {
        // this decomposition has no excluded-volume channel
    }

    fn water_scaling_factor(&self) -> f64 { self.cw }

    fn debye_transform(&self) -> ScatteringCurve {
        let [i_aa, i_aw, i_ww] = self.partial_intensities();
        let c = self.cw;
        let i = (0..i_aa.len())
            .map(|m| i_aa[m] + 2.0 * c * i_aw[m] + c * c * i_ww[m])
            .collect();
        ScatteringCurve { q: self.q(), i }
    }

    fn total(&self) -> Vec<f64> { self.p_tot.clone() }

    fn q(&self) -> Vec<f64> { self.q_axis.as_vector() }
}
