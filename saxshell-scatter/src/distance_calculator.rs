//! Stateless kernels accumulating binned weighted pair distances.
//!
//! Two entry points exist: the self-correlation of one coordinate set and the
//! cross-correlation of two sets. Work is chunked by outer-index ranges and dispatched
//! to the process-wide worker pool; every chunk accumulates into a private distribution
//! and the chunks are summed on the calling thread after the join, so the result does not
//! depend on the number of workers.
//!
//! Distances at or beyond the axis maximum are discarded; a distance of zero lands in bin 0.

use rayon::prelude::*;
use crate::axis::BinAxis;
use crate::compact::{CompactCoordinates, CompactCoordinatesFF};
use crate::distribution::{Distribution2D, Distribution3D, PairDistribution};
use crate::form_factor::FormFactorType;

/// number of reference sites processed by one worker job
pub(crate) const JOB_SIZE: usize = 256;

#[inline(always)]
fn add8<D: PairDistribution, A: BinAxis>(p: &mut D, a: &CompactCoordinates, i: usize,
                                         b: &CompactCoordinates, j: usize, axis: &A, factor: f64) {
    if D::TRACKS_DISTANCE {
        let (distances, weights) = a.evaluate8(i, b, j);
        for k in 0..8 {
            let bin = axis.bin(distances[k]);
            if bin < p.bins() { p.add_to_bin(bin, distances[k], factor * weights[k]); }
        }
    } else {
        let (bins, weights) = a.evaluate8_rounded(i, b, j, axis);
        for k in 0..8 {
            if bins[k] < p.bins() { p.add_to_bin(bins[k], 0.0, factor * weights[k]); }
        }
    }
}

#[inline(always)]
fn add4<D: PairDistribution, A: BinAxis>(p: &mut D, a: &CompactCoordinates, i: usize,
                                         b: &CompactCoordinates, j: usize, axis: &A, factor: f64) {
    if D::TRACKS_DISTANCE {
        let (distances, weights) = a.evaluate4(i, b, j);
        for k in 0..4 {
            let bin = axis.bin(distances[k]);
            if bin < p.bins() { p.add_to_bin(bin, distances[k], factor * weights[k]); }
        }
    } else {
        let (bins, weights) = a.evaluate4_rounded(i, b, j, axis);
        for k in 0..4 {
            if bins[k] < p.bins() { p.add_to_bin(bins[k], 0.0, factor * weights[k]); }
        }
    }
}

#[inline(always)]
fn add1<D: PairDistribution, A: BinAxis>(p: &mut D, a: &CompactCoordinates, i: usize,
                                         b: &CompactCoordinates, j: usize, axis: &A, factor: f64) {
    let (d, w) = a.data()[i].evaluate(&b.data()[j]);
    let bin = axis.bin(d);
    if bin < p.bins() { p.add_to_bin(bin, d, factor * w); }
}

/// Accumulates, for each unordered site pair of one coordinate set, twice the weight
/// product into the bin of their distance, and adds the diagonal (the sum of squared
/// weights) into bin 0.
pub fn self_correlation<D: PairDistribution, A: BinAxis>(data: &CompactCoordinates, axis: &A) -> D {
    let n = data.size();
    let starts: Vec<usize> = (0..n).step_by(JOB_SIZE).collect();
    let partials: Vec<D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n);
            let mut p = D::with_bins(axis.bins());
            for i in lo..hi {
                let mut j = i + 1;
                while j + 8 <= n { add8(&mut p, data, i, data, j, axis, 2.0); j += 8; }
                while j + 4 <= n { add4(&mut p, data, i, data, j, axis, 2.0); j += 4; }
                while j < n { add1(&mut p, data, i, data, j, axis, 2.0); j += 1; }
            }
            return p;
        })
        .collect();

    let mut out = D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    if n > 0 && axis.bins() > 0 {
        out.add_to_bin(0, 0.0, data.sum_of_squared_weights());
    }
    return out;
}

/// Accumulates, for each ordered pair of sites drawn from two coordinate sets,
/// the weight product into the bin of their distance.
pub fn cross_correlation<D: PairDistribution, A: BinAxis>(a: &CompactCoordinates, b: &CompactCoordinates, axis: &A) -> D {
    let (n_a, n_b) = (a.size(), b.size());
    let starts: Vec<usize> = (0..n_a).step_by(JOB_SIZE).collect();
    let partials: Vec<D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n_a);
            let mut p = D::with_bins(axis.bins());
            for i in lo..hi {
                let mut j = 0;
                while j + 8 <= n_b { add8(&mut p, a, i, b, j, axis, 1.0); j += 8; }
                while j + 4 <= n_b { add4(&mut p, a, i, b, j, axis, 1.0); j += 4; }
                while j < n_b { add1(&mut p, a, i, b, j, axis, 1.0); j += 1; }
            }
            return p;
        })
        .collect();

    let mut out = D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    return out;
}

/// The form-factor-resolved self-correlation.
///
/// Every unordered pair contributes to the `(ff_i, ff_j)` channel with its weight product,
/// to the `(ff, EXCLUDED_VOLUME)` channels with the atomic-times-displaced products, and to
/// the `(EXCLUDED_VOLUME, EXCLUDED_VOLUME)` channel with the displaced-charge product.
/// The diagonal enters bin 0 the same way.
pub fn self_correlation_ff<A: BinAxis>(data: &CompactCoordinatesFF, axis: &A) -> Distribution3D {
    const EXV: FormFactorType = FormFactorType::ExcludedVolume;
    let n = data.size();
    let coords = data.coordinates();
    let starts: Vec<usize> = (0..n).step_by(JOB_SIZE).collect();
    let partials: Vec<Distribution3D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n);
            let mut p = Distribution3D::with_bins(axis.bins());
            for i in lo..hi {
                let (ff_i, w_i, wx_i) = (data.ff_type(i), coords.data()[i].w, data.exv_weight(i));
                for j in (i + 1)..n {
                    let (d, _) = coords.data()[i].evaluate(&coords.data()[j]);
                    let bin = axis.bin(d);
                    if bin >= axis.bins() { continue; }
                    let (ff_j, w_j, wx_j) = (data.ff_type(j), coords.data()[j].w, data.exv_weight(j));
                    p.add_to_bin(ff_i, ff_j, bin, 2.0 * w_i * w_j);
                    p.add_to_bin(ff_i, EXV, bin, w_i * wx_j);
                    p.add_to_bin(ff_j, EXV, bin, w_j * wx_i);
                    p.add_to_bin(EXV, EXV, bin, 2.0 * wx_i * wx_j);
                }
            }
            return p;
        })
        .collect();

    let mut out = Distribution3D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    if axis.bins() > 0 {
        for i in 0..n {
            let (ff_i, w_i, wx_i) = (data.ff_type(i), coords.data()[i].w, data.exv_weight(i));
            out.add_to_bin(ff_i, ff_i, 0, w_i * w_i);
            out.add_to_bin(ff_i, EXV, 0, 2.0 * w_i * wx_i);
            out.add_to_bin(EXV, EXV, 0, wx_i * wx_i);
        }
    }
    return out;
}

/// The form-factor-resolved cross-correlation between two disjoint coordinate sets,
/// e.g. two bodies of an assembly.
///
/// Every pair represents both orderings of the full double sum, so the atomic products
/// enter with a factor of two and the excluded-volume cross terms enter once per direction,
/// mirroring the storage convention of [`self_correlation_ff`](self_correlation_ff).
pub fn cross_correlation_ff_pair<A: BinAxis>(a: &CompactCoordinatesFF, b: &CompactCoordinatesFF, axis: &A) -> Distribution3D {
    const EXV: FormFactorType = FormFactorType::ExcludedVolume;
    let (n_a, n_b) = (a.size(), b.size());
    let (ca, cb) = (a.coordinates(), b.coordinates());
    let starts: Vec<usize> = (0..n_a).step_by(JOB_SIZE).collect();
    let partials: Vec<Distribution3D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n_a);
            let mut p = Distribution3D::with_bins(axis.bins());
            for i in lo..hi {
                let (ff_i, w_i, wx_i) = (a.ff_type(i), ca.data()[i].w, a.exv_weight(i));
                for j in 0..n_b {
                    let (d, _) = ca.data()[i].evaluate(&cb.data()[j]);
                    let bin = axis.bin(d);
                    if bin >= axis.bins() { continue; }
                    let (ff_j, w_j, wx_j) = (b.ff_type(j), cb.data()[j].w, b.exv_weight(j));
                    p.add_to_bin(ff_i, ff_j, bin, 2.0 * w_i * w_j);
                    p.add_to_bin(ff_i, EXV, bin, w_i * wx_j);
                    p.add_to_bin(ff_j, EXV, bin, w_j * wx_i);
                    p.add_to_bin(EXV, EXV, bin, 2.0 * wx_i * wx_j);
                }
            }
            return p;
        })
        .collect();

    let mut out = Distribution3D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    return out;
}

/// The form-factor-resolved cross-correlation against a hydration layer.
///
/// Every (site, water) pair contributes to the `[ff]` channel with the atomic weight product
/// and to the `[EXCLUDED_VOLUME]` channel with the displaced-times-water product.
pub fn cross_correlation_ff<A: BinAxis>(data: &CompactCoordinatesFF, waters: &CompactCoordinates, axis: &A) -> Distribution2D {
    const EXV: FormFactorType = FormFactorType::ExcludedVolume;
    let n = data.size();
    let n_w = waters.size();
    let coords = data.coordinates();
    let starts: Vec<usize> = (0..n).step_by(JOB_SIZE).collect();
    let partials: Vec<Distribution2D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n);
            let mut p = Distribution2D::with_bins(axis.bins());
            for i in lo..hi {
                let (ff_i, w_i, wx_i) = (data.ff_type(i), coords.data()[i].w, data.exv_weight(i));
                for j in 0..n_w {
                    let (d, _) = coords.data()[i].evaluate(&waters.data()[j]);
                    let bin = axis.bin(d);
                    if bin >= axis.bins() { continue; }
                    let w_j = waters.data()[j].w;
                    p.add_to_bin(ff_i, bin, w_i * w_j);
                    p.add_to_bin(EXV, bin, wx_i * w_j);
                }
            }
            return p;
        })
        .collect();

    let mut out = Distribution2D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    return out;
}

/// Cross-correlation between atomic sites and externally supplied excluded-volume dummies,
/// resolved by the atomic species; used by the grid-based excluded-volume description.
pub fn cross_correlation_exv_grid<A: BinAxis>(data: &CompactCoordinatesFF, dummies: &CompactCoordinates, axis: &A) -> Distribution2D {
    let n = data.size();
    let n_x = dummies.size();
    let coords = data.coordinates();
    let starts: Vec<usize> = (0..n).step_by(JOB_SIZE).collect();
    let partials: Vec<Distribution2D> = starts.into_par_iter()
        .map(|lo| {
            let hi = (lo + JOB_SIZE).min(n);
            let mut p = Distribution2D::with_bins(axis.bins());
            for i in lo..hi {
                let (ff_i, w_i) = (data.ff_type(i), coords.data()[i].w);
                for j in 0..n_x {
                    let (d, _) = coords.data()[i].evaluate(&dummies.data()[j]);
                    let bin = axis.bin(d);
                    if bin >= axis.bins() { continue; }
                    p.add_to_bin(ff_i, bin, w_i * dummies.data()[j].w);
                }
            }
            return p;
        })
        .collect();

    let mut out = Distribution2D::with_bins(axis.bins());
    for p in &partials { out.add_assign(p); }
    return out;
}
