//! The Debye transform: `I(q) = sum_k P(d_k) sinc(q d_k)`, evaluated through a
//! precomputed sinc lookup.
//!
//! For the default uniform distance axis the table is shared process-wide between all
//! histograms binned on that axis; a histogram carrying its own effective bin centres
//! (weighted bins, grid axes) builds a private table instead.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;
use saxshell_io::out_writer;
use crate::axis::QAxis;

/// `sin(x)/x`, guarded by a small-x series so the limit `sinc(0) = 1` is exact.
#[inline(always)]
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-4 {
        let x2 = x * x;
        return 1.0 - x2 / 6.0 + x2 * x2 / 120.0;
    }
    return x.sin() / x;
}

/// A dense table of `sinc(q_m * d_k)` turning the Debye sum into one inner product per q.
pub struct SincTable {
    q: Vec<f64>,
    d_bins: usize,
    values: Vec<f64>,       // q.len() x d_bins
}

impl SincTable {
    /// Builds a table for arbitrary bin centres
    pub fn new(q: &[f64], d: &[f64]) -> SincTable {
        let mut values = Vec::with_capacity(q.len() * d.len());
        for q_m in q {
            for d_k in d {
                values.push(sinc(q_m * d_k));
            }
        }
        SincTable { q: q.to_vec(), d_bins: d.len(), values }
    }

    /// The q points of this table
    pub fn q(&self) -> &[f64] { &self.q }

    /// Number of distance bins covered
    pub fn d_bins(&self) -> usize { self.d_bins }

    #[inline(always)]
    pub fn lookup(&self, m: usize, k: usize) -> f64 {
        return self.values[m * self.d_bins + k];
    }

    /// The inner product of a distance distribution with row `m` of this table
    pub fn transform_row(&self, m: usize, p: &[f64]) -> f64 {
        let row = &self.values[m * self.d_bins..m * self.d_bins + p.len()];
        return p.iter().zip(row.iter()).map(|(w, s)| w * s).sum();
    }

    /// Full transform of a distance distribution; one intensity per q point
    pub fn transform(&self, p: &[f64]) -> Vec<f64> {
        assert!(p.len() <= self.d_bins, "distribution of {} bins exceeds the table ({} bins)", p.len(), self.d_bins);
        return (0..self.q.len()).map(|m| self.transform_row(m, p)).collect();
    }
}

type TableKey = (u64, u64, usize, u64, usize);

static SHARED_TABLES: Lazy<Mutex<HashMap<TableKey, Arc<SincTable>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the process-wide sinc table for a uniform distance axis, building it on first use.
///
/// Tables are keyed by the q axis and the bin width; all histograms sharing the default
/// axis share one table.
pub fn shared_table(q_axis: &QAxis, bin_width: f64, bins: usize) -> Arc<SincTable> {
    let key: TableKey = (q_axis.min.to_bits(), q_axis.max.to_bits(), q_axis.bins, bin_width.to_bits(), bins);
    let mut tables = SHARED_TABLES.lock().unwrap();
    if let Some(table) = tables.get(&key) {
        if table.d_bins() >= bins { return Arc::clone(table); }
    }
    let q = q_axis.as_vector();
    let d: Vec<f64> = (0..bins).map(|k| k as f64 * bin_width).collect();
    let table = Arc::new(SincTable::new(&q, &d));
    tables.insert(key, Arc::clone(&table));
    return table;
}

/// A computed intensity curve on the configured q axis.
#[derive(Clone, Debug)]
pub struct ScatteringCurve {
    pub q: Vec<f64>,
    pub i: Vec<f64>,
}

impl ScatteringCurve {
    /// Writes the curve as a two-column `(q, I)` text table
    pub fn write(&self, out_fname: &str) -> std::io::Result<()> {
        let mut writer = out_writer(out_fname, false);
        writeln!(writer, "# q [1/A]           I(q)")?;
        for (q, i) in self.q.iter().zip(self.i.iter()) {
            writeln!(writer, "{:<14.8e} {:14.8e}", q, i)?;
        }
        return Ok(());
    }
}
