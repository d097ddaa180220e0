use std::cell::OnceCell;
use std::sync::Arc;
use itertools::iproduct;
use saxshell_pdb::calc::Vec3;
use crate::axis::{BinAxis, QAxis, VariableDistanceAxis};
use crate::body::Body;
use crate::compact::{CompactCoordinates, CompactCoordinatesData, CompactCoordinatesFF};
use crate::composite::{truncated_length, CompositeHistogram, MIN_BINS};
use crate::debye::{shared_table, ScatteringCurve, SincTable};
use crate::distance_calculator::{cross_correlation, cross_correlation_exv_grid, self_correlation};
use crate::distribution::{Distribution1D, Distribution2D, Distribution3D, PairDistribution};
use crate::form_factor::{atomic_form_factor, ExvFormFactorTable, FormFactorType};
use crate::site::Water;

const EXV: FormFactorType = FormFactorType::ExcludedVolume;
const FF_COUNT: usize = FormFactorType::COUNT;

/// normalised form-factor values of every species at every q point; the excluded-volume
/// slot holds the Gaussian-sphere shape
fn form_factor_matrix(q: &[f64], exv: &ExvFormFactorTable) -> Vec<[f64; FF_COUNT]> {
    q.iter().map(|&q_m| {
        let mut row = [0.0; FF_COUNT];
        for a in 0..FF_COUNT - 1 {
            row[a] = atomic_form_factor(FormFactorType::from_index(a)).evaluate_normalized(q_m);
        }
        row[EXV.index()] = exv.evaluate_normalized(q_m);
        return row;
    }).collect()
}

/// The form-factor-resolved decomposition with the excluded volume carried per atomic site.
///
/// Channels: `p_aa[ff1][ff2]` with the `EXCLUDED_VOLUME` species standing in for the
/// displaced-solvent dummies, `p_aw[ff]` (its `EXCLUDED_VOLUME` row is the water-dummy
/// cross term) and `p_ww`. The Debye transform recombines the per-channel sinc products
/// with the normalised form factors, entering the excluded-volume channel with a negative
/// amplitude scaled by the fitted factor.
pub struct CompositeDistanceHistogramFFAvg {
    p_aa: Distribution3D,
    p_aw: Distribution2D,
    p_ww: Distribution1D,
    len: usize,
    width: f64,
    q_axis: QAxis,
    exv: ExvFormFactorTable,
    cw: f64,
    cx: f64,
    // per-channel sinc products: [aa, ax, xx, aw, wx, ww]
    partials: OnceCell<[Vec<f64>; 6]>,
}

impl CompositeDistanceHistogramFFAvg {
    pub fn new(p_aa: Distribution3D, p_aw: Distribution2D, p_ww: Distribution1D,
               bin_width: f64, q_axis: QAxis, exv: ExvFormFactorTable) -> CompositeDistanceHistogramFFAvg {
        let len = truncated_length(&Self::unscaled_total(&p_aa, &p_aw, &p_ww));
        CompositeDistanceHistogramFFAvg {
            p_aa, p_aw, p_ww, len, width: bin_width, q_axis, exv, cw: 1.0, cx: 1.0,
            partials: OnceCell::new(),
        }
    }

    /// the total pair counts of the atomic channels, before any scaling
    fn unscaled_total(p_aa: &Distribution3D, p_aw: &Distribution2D, p_ww: &Distribution1D) -> Vec<f64> {
        let mut total = vec![0.0; p_ww.bins()];
        for (a, b) in iproduct!(0..FF_COUNT - 1, 0..FF_COUNT - 1) {
            for (t, v) in total.iter_mut().zip(p_aa.channel(FormFactorType::from_index(a), FormFactorType::from_index(b))) {
                *t += v;
            }
        }
        for a in 0..FF_COUNT - 1 {
            for (t, v) in total.iter_mut().zip(p_aw.channel(FormFactorType::from_index(a))) {
                *t += 2.0 * v;
            }
        }
        for (t, v) in total.iter_mut().zip(p_ww.weights().iter()) { *t += v; }
        return total;
    }

    /// The atom-atom distance distribution of one pair of species
    pub fn aa_channel(&self, ff1: FormFactorType, ff2: FormFactorType) -> &[f64] {
        return &self.p_aa.channel(ff1, ff2)[..self.len];
    }

    /// The atom-water distance distribution of one species
    pub fn aw_channel(&self, ff: FormFactorType) -> &[f64] {
        return &self.p_aw.channel(ff)[..self.len];
    }

    fn partial_intensities(&self) -> &[Vec<f64>; 6] {
        self.partials.get_or_init(|| {
            let q = self.q_axis.as_vector();
            let table = shared_table(&self.q_axis, self.width, self.len.max(MIN_BINS));
            let ff = form_factor_matrix(&q, &self.exv);
            let n_q = q.len();

            let mut i_aa = vec![0.0; n_q];
            let mut i_ax = vec![0.0; n_q];
            let mut i_xx = vec![0.0; n_q];
            let mut i_aw = vec![0.0; n_q];
            let mut i_wx = vec![0.0; n_q];
            let f_water = |m: usize| atomic_form_factor(FormFactorType::O).evaluate_normalized(table.q()[m]);

            for a in 0..FF_COUNT - 1 {
                let ff_a = FormFactorType::from_index(a);
                for b in 0..FF_COUNT - 1 {
                    let s = &self.p_aa.channel(ff_a, FormFactorType::from_index(b))[..self.len];
                    if s.iter().all(|v| *v == 0.0) { continue; }
                    for m in 0..n_q {
                        i_aa[m] += ff[m][a] * ff[m][b] * table.transform_row(m, s);
                    }
                }
                let s_ax = &self.p_aa.channel(ff_a, EXV)[..self.len];
                if !s_ax.iter().all(|v| *v == 0.0) {
                    for m in 0..n_q {
                        i_ax[m] += ff[m][a] * ff[m][EXV.index()] * table.transform_row(m, s_ax);
                    }
                }
                let s_aw = &self.p_aw.channel(ff_a)[..self.len];
                if !s_aw.iter().all(|v| *v == 0.0) {
                    for m in 0..n_q {
                        i_aw[m] += ff[m][a] * f_water(m) * table.transform_row(m, s_aw);
                    }
                }
            }
            let s_xx = &self.p_aa.channel(EXV, EXV)[..self.len];
            let s_wx = &self.p_aw.channel(EXV)[..self.len];
            for m in 0..n_q {
                i_xx[m] = ff[m][EXV.index()] * ff[m][EXV.index()] * table.transform_row(m, s_xx);
                i_wx[m] = ff[m][EXV.index()] * f_water(m) * table.transform_row(m, s_wx);
            }
            let p_ww = self.p_ww.weights();
            let i_ww: Vec<f64> = (0..n_q)
                .map(|m| f_water(m) * f_water(m) * table.transform_row(m, &p_ww[..self.len]))
                .collect();

            [i_aa, i_ax, i_xx, i_aw, i_wx, i_ww]
        })
    }
}

impl CompositeHistogram for CompositeDistanceHistogramFFAvg {
    fn apply_water_scaling_factor(&mut self, c: f64) { self.cw = c; }

    fn apply_excluded_volume_scaling_factor(&mut self, c: f64) { self.cx = c; }

    fn water_scaling_factor(&self) -> f64 { self.cw }

    fn excluded_volume_scaling_factor(&self) -> f64 { self.cx }

    fn has_excluded_volume(&self) -> bool { true }

    fn debye_transform(&self) -> ScatteringCurve {
        let [i_aa, i_ax, i_xx, i_aw, i_wx, i_ww] = self.partial_intensities();
        let (cw, cx) = (self.cw, self.cx);
        let i = (0..i_aa.len())
            .map(|m| i_aa[m] - cx * i_ax[m] + cx * cx * i_xx[m]
                + 2.0 * cw * i_aw[m] - 2.0 * cw * cx * i_wx[m] + cw * cw * i_ww[m])
            .collect();
        ScatteringCurve { q: self.q(), i }
    }

    fn total(&self) -> Vec<f64> {
        let full = Self::unscaled_total(&self.p_aa, &self.p_aw, &self.p_ww);
        return full[..self.len].to_vec();
    }

    fn q(&self) -> Vec<f64> { self.q_axis.as_vector() }
}

/// An excluded-volume dummy atom produced by an external grid generator.
#[derive(Clone, Debug)]
pub struct ExvDummy {
    pub pos: Vec3,
    /// solvent volume displaced by this dummy, in A^3
    pub volume: f64,
}

/// The form-factor-resolved decomposition with the excluded volume described by
/// grid-derived dummy atoms on their own, possibly non-uniform, distance axis.
pub struct CompositeDistanceHistogramFFGrid {
    p_aa: Distribution3D,
    p_aw: Distribution2D,
    p_ww: Distribution1D,
    p_ax: Distribution2D,
    p_xx: Distribution1D,
    p_wx: Distribution1D,
    len: usize,
    width: f64,
    exv_axis: VariableDistanceAxis,
    q_axis: QAxis,
    exv: ExvFormFactorTable,
    cw: f64,
    cx: f64,
    partials: OnceCell<[Vec<f64>; 6]>,
}

impl CompositeDistanceHistogramFFGrid {
    /// Computes the full decomposition for a molecule plus a set of grid dummies.
    ///
    /// The atomic channels are binned on the molecule's uniform axis; the dummy channels
    /// are binned on the supplied excluded-volume axis.
    pub fn calculate<A: BinAxis>(bodies: &[Body], waters: &[Water], dummies: &[ExvDummy],
                                 axis: &A, exv_axis: VariableDistanceAxis, q_axis: QAxis,
                                 exv: ExvFormFactorTable) -> CompositeDistanceHistogramFFGrid {
        // no per-atom displaced charges: the dummies carry the excluded volume here
        let data = CompactCoordinatesFF::from_bodies_without_exv(bodies);
        let waters_cc = CompactCoordinates::from_waters(waters);
        let dummies_cc = CompactCoordinates::from_raw(
            dummies.iter()
                .map(|d| CompactCoordinatesData {
                    x: d.pos.x, y: d.pos.y, z: d.pos.z,
                    w: ExvFormFactorTable::charge_of_volume(d.volume),
                })
                .collect());

        let p_aa = crate::distance_calculator::self_correlation_ff(&data, axis);
        let p_aw = crate::distance_calculator::cross_correlation_ff(&data, &waters_cc, axis);
        let p_ww: Distribution1D = self_correlation(&waters_cc, axis);
        let p_ax = cross_correlation_exv_grid(&data, &dummies_cc, &exv_axis);
        let p_xx: Distribution1D = self_correlation(&dummies_cc, &exv_axis);
        let p_wx: Distribution1D = cross_correlation(&waters_cc, &dummies_cc, &exv_axis);

        let len = truncated_length(&CompositeDistanceHistogramFFAvg::unscaled_total(&p_aa, &p_aw, &p_ww));
        CompositeDistanceHistogramFFGrid {
            p_aa, p_aw, p_ww, p_ax, p_xx, p_wx,
            len,
            width: axis.centre(1) - axis.centre(0),
            exv_axis, q_axis, exv, cw: 1.0, cx: 1.0,
            partials: OnceCell::new(),
        }
    }

    /// The atomic-dummy cross distribution of one species, on the excluded-volume axis
    pub fn ax_channel(&self, ff: FormFactorType) -> &[f64] {
        return self.p_ax.channel(ff);
    }

    /// The dummy-dummy distribution on the excluded-volume axis
    pub fn xx(&self) -> Vec<f64> { self.p_xx.weights() }

    fn partial_intensities(&self) -> &[Vec<f64>; 6] {
        self.partials.get_or_init(|| {
            let q = self.q_axis.as_vector();
            let n_q = q.len();
            let table = shared_table(&self.q_axis, self.width, self.len.max(MIN_BINS));
            let exv_centres: Vec<f64> = (0..self.exv_axis.bins()).map(|k| self.exv_axis.centre(k)).collect();
            let exv_table = SincTable::new(&q, &exv_centres);
            let ff = form_factor_matrix(&q, &self.exv);
            let f_water = |m: usize| atomic_form_factor(FormFactorType::O).evaluate_normalized(q[m]);

            let mut i_aa = vec![0.0; n_q];
            let mut i_ax = vec![0.0; n_q];
            let mut i_aw = vec![0.0; n_q];
            for a in 0..FF_COUNT - 1 {
                let ff_a = FormFactorType::from_index(a);
                for b in 0..FF_COUNT - 1 {
                    let s = &self.p_aa.channel(ff_a, FormFactorType::from_index(b))[..self.len];
                    if s.iter().all(|v| *v == 0.0) { continue; }
                    for m in 0..n_q {
                        i_aa[m] += ff[m][a] * ff[m][b] * table.transform_row(m, s);
                    }
                }
                let s_ax = self.p_ax.channel(ff_a);
                if !s_ax.iter().all(|v| *v == 0.0) {
                    for m in 0..n_q {
                        // each (atom, dummy) pair was counted once
                        i_ax[m] += 2.0 * ff[m][a] * ff[m][EXV.index()] * exv_table.transform_row(m, s_ax);
                    }
                }
                let s_aw = &self.p_aw.channel(ff_a)[..self.len];
                if !s_aw.iter().all(|v| *v == 0.0) {
                    for m in 0..n_q {
                        i_aw[m] += ff[m][a] * f_water(m) * table.transform_row(m, s_aw);
                    }
                }
            }
            let p_xx = self.p_xx.weights();
            let p_wx = self.p_wx.weights();
            let p_ww = self.p_ww.weights();
            let mut i_xx = vec![0.0; n_q];
            let mut i_wx = vec![0.0; n_q];
            let mut i_ww = vec![0.0; n_q];
            for m in 0..n_q {
                let fx = ff[m][EXV.index()];
                i_xx[m] = fx * fx * exv_table.transform_row(m, &p_xx);
                i_wx[m] = 2.0 * fx * f_water(m) * exv_table.transform_row(m, &p_wx);
                i_ww[m] = f_water(m) * f_water(m) * table.transform_row(m, &p_ww[..self.len]);
            }

            [i_aa, i_ax, i_xx, i_aw, i_wx, i_ww]
        })
    }
}

impl CompositeHistogram for CompositeDistanceHistogramFFGrid {
    fn apply_water_scaling_factor(&mut self, c: f64) { self.cw = c; }

    fn apply_excluded_volume_scaling_factor(&mut self, c: f64) { self.cx = c; }

    fn water_scaling_factor(&self) -> f64 { self.cw }

    fn excluded_volume_scaling_factor(&self) -> f64 { self.cx }

    fn has_excluded_volume(&self) -> bool { true }

    fn debye_transform(&self) -> ScatteringCurve {
        let [i_aa, i_ax, i_xx, i_aw, i_wx, i_ww] = self.partial_intensities();
        let (cw, cx) = (self.cw, self.cx);
        let i = (0..i_aa.len())
            .map(|m| i_aa[m] - cx * i_ax[m] + cx * cx * i_xx[m]
                + 2.0 * cw * i_aw[m] - cw * cx * i_wx[m] + cw * cw * i_ww[m])
            .collect();
        ScatteringCurve { q: self.q(), i }
    }

    fn total(&self) -> Vec<f64> {
        let full = CompositeDistanceHistogramFFAvg::unscaled_total(&self.p_aa, &self.p_aw, &self.p_ww);
        return full[..self.len].to_vec();
    }

    fn q(&self) -> Vec<f64> { self.q_axis.as_vector() }
}
