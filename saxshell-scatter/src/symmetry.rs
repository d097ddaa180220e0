use saxshell_pdb::calc::{Rototranslation, Vec3};

/// A symmetry operation attached to a [`Body`](crate::Body), describing virtual copies
/// of the body that contribute to the scattering without being materialised as
/// separate bodies.
///
/// The `k`-th copy (`k = 1..=repetitions`) applies the rotation `k` times about the body's
/// centre and shifts by `k` times the translation vector.
#[derive(Clone, Debug)]
pub struct Symmetry {
    /// Euler-like rotation angles in radians, applied about the body centre
    pub rotation: Vec3,
    /// translation applied after the rotation
    pub translation: Vec3,
    /// number of virtual copies generated by this operation
    pub repetitions: u32,
}

impl Symmetry {
    pub fn new(rotation: Vec3, translation: Vec3, repetitions: u32) -> Symmetry {
        Symmetry { rotation, translation, repetitions }
    }

    /// A pure translational repeat
    pub fn translational(translation: Vec3, repetitions: u32) -> Symmetry {
        Symmetry { rotation: Vec3::from_float(0.0), translation, repetitions }
    }

    /// Transforms a point into its `k`-th symmetric copy, rotating about `origin`
    pub fn apply(&self, origin: &Vec3, point: &Vec3, k: u32) -> Vec3 {
        let mut out = point.clone();
        let angles = Vec3::new(
            self.rotation.x * k as f64,
            self.rotation.y * k as f64,
            self.rotation.z * k as f64,
        );
        let mut shift = self.translation.clone();
        shift *= k as f64;
        let transform = Rototranslation::from_euler_angles(origin, &angles, &shift);
        transform.apply_mut(&mut out);
        return out;
    }
}
