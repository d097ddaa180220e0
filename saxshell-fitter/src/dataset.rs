use std::collections::HashMap;
use std::io::BufRead;
use log::{debug, info, warn};
use thiserror::Error;
use saxshell_io::{open_file, read_columns};

/// Errors raised while loading an experimental dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File {file_name} holds no usable data rows")]
    NoData { file_name: String },
    #[error("File {file_name} has {found} columns; at least two (q, I) are required")]
    TooFewColumns { file_name: String, found: usize },
}

/// An experimental scattering measurement: columns `(q, I, sigma_I)`, sorted by q.
///
/// The loader accepts whitespace- or comma-separated text; rows whose values fail to parse
/// as numbers are treated as header lines. The momentum transfer unit is sniffed from the
/// headers (a `[nm]` token means inverse nanometres and rescales q by 1/10); inverse
/// angstroms are the default. Rows outside the requested q window are dropped.
#[derive(Clone, Debug)]
pub struct SaxsData {
    x: Vec<f64>,
    y: Vec<f64>,
    yerr: Vec<f64>,
}

impl SaxsData {
    /// Creates a dataset from its columns; the rows are sorted by q
    pub fn new(x: Vec<f64>, y: Vec<f64>, yerr: Vec<f64>) -> SaxsData {
        let mut order: Vec<usize> = (0..x.len()).collect();
        order.sort_by(|a, b| x[*a].partial_cmp(&x[*b]).unwrap());
        SaxsData {
            x: order.iter().map(|&i| x[i]).collect(),
            y: order.iter().map(|&i| y[i]).collect(),
            yerr: order.iter().map(|&i| yerr[i]).collect(),
        }
    }

    /// Loads a measurement file, keeping rows with `q_min <= q <= q_max`.
    pub fn from_file(file_name: &str, q_min: f64, q_max: f64) -> Result<SaxsData, DatasetError> {
        let reader = open_file(file_name)?;
        let data = Self::from_reader(reader, q_min, q_max, file_name)?;
        info!("{} rows loaded from {}", data.len(), file_name);
        return Ok(data);
    }

    /// Loads a measurement from an open reader; see [`from_file`](SaxsData::from_file).
    pub fn from_reader<R: BufRead>(reader: R, q_min: f64, q_max: f64, file_name: &str) -> Result<SaxsData, DatasetError> {
        let (rows, headers) = read_columns(reader)?;

        // most common column count decides the data shape; stray rows are skipped
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for row in &rows { *counts.entry(row.len()).or_insert(0) += 1; }
        let columns = counts.into_iter().max_by_key(|(_, n)| *n).map(|(c, _)| c)
            .ok_or(DatasetError::NoData { file_name: file_name.to_string() })?;
        if columns < 2 {
            return Err(DatasetError::TooFewColumns { file_name: file_name.to_string(), found: columns });
        }
        if columns > 3 {
            warn!("{}: {} columns found; the extra ones are ignored", file_name, columns);
        }

        let q_scale = if headers.iter().any(|h| h.contains("[nm]")) {
            debug!("{}: unit [nm] detected, scaling q by 1/10", file_name);
            0.1
        } else { 1.0 };

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut yerr = Vec::new();
        for row in rows {
            if row.len() != columns { continue; }
            let q = row[0] * q_scale;
            if q < q_min || q > q_max { continue; }
            let sigma = if columns >= 3 { row[2] } else { 1.0 };
            if sigma <= 0.0 {
                warn!("{}: dropping a row with non-positive sigma at q = {}", file_name, q);
                continue;
            }
            x.push(q);
            y.push(row[1]);
            yerr.push(sigma);
        }
        if x.is_empty() {
            return Err(DatasetError::NoData { file_name: file_name.to_string() });
        }
        return Ok(SaxsData::new(x, y, yerr));
    }

    /// Builds a synthetic measurement from a model curve, attaching a declared
    /// relative error to every point.
    pub fn from_model(q: &[f64], i: &[f64], relative_error: f64) -> SaxsData {
        let yerr = i.iter().map(|v| (v.abs() * relative_error).max(1e-12)).collect();
        return SaxsData::new(q.to_vec(), i.to_vec(), yerr);
    }

    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    pub fn x(&self) -> &[f64] { &self.x }

    pub fn y(&self) -> &[f64] { &self.y }

    pub fn yerr(&self) -> &[f64] { &self.yerr }

    /// Linearly interpolates a model curve `(q_m, i_m)` onto this dataset's q points.
    ///
    /// The model axis must be sorted; points outside it are clamped to the end values.
    pub fn splice(&self, q_model: &[f64], i_model: &[f64]) -> Vec<f64> {
        assert_eq!(q_model.len(), i_model.len(), "model curve axes disagree");
        self.x.iter().map(|&q| {
            if q <= q_model[0] { return i_model[0]; }
            if q >= q_model[q_model.len() - 1] { return i_model[i_model.len() - 1]; }
            let hi = q_model.partition_point(|v| *v < q);
            let lo = hi - 1;
            let t = (q - q_model[lo]) / (q_model[hi] - q_model[lo]);
            return i_model[lo] + t * (i_model[hi] - i_model[lo]);
        }).collect()
    }
}
