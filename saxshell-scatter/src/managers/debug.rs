use saxshell_pdb::calc::Vec3;
use crate::axis::QAxis;
use crate::body::Body;
use crate::debye::{sinc, ScatteringCurve};
use crate::site::Water;

/// Reference intensity computed by direct double summation over all sites,
/// with no histogram in between.
///
/// Quadratic in the number of sites and therefore for validation only: the optimised
/// histogram pipeline must agree with this curve to a small relative tolerance.
pub struct DebugDistanceHistogram {
    q_axis: QAxis,
}

impl DebugDistanceHistogram {
    pub fn new(q_axis: QAxis) -> DebugDistanceHistogram {
        DebugDistanceHistogram { q_axis }
    }

    /// `I(q) = sum_i sum_j w_i w_j sinc(q r_ij)` over every atom and hydration site
    pub fn debye_transform(&self, bodies: &[Body], waters: &[Water]) -> ScatteringCurve {
        let mut sites: Vec<(Vec3, f64)> = Vec::new();
        for body in bodies {
            for a in body.atoms() { sites.push((a.pos.clone(), a.weight)); }
        }
        for w in waters { sites.push((w.pos.clone(), w.weight)); }

        let q = self.q_axis.as_vector();
        let mut intensities = Vec::with_capacity(q.len());
        for q_m in &q {
            let mut i_q = 0.0;
            for (p_i, w_i) in &sites {
                for (p_j, w_j) in &sites {
                    i_q += w_i * w_j * sinc(q_m * p_i.distance_to(p_j));
                }
            }
            intensities.push(i_q);
        }
        return ScatteringCurve { q, i: intensities };
    }
}
