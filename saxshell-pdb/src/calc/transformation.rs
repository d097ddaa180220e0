use std::fmt;
use crate::calc::{Matrix3x3, Vec3};

/// Rotation-translation operation in 3D.
///
/// A [`Rototranslation`] rotates points about an axis (or by a given rotation matrix) around
/// an origin; the origin is subtracted before the rotation and added back afterwards.
pub struct Rototranslation {
    origin: Vec3,
    rotation_matrix: Matrix3x3,
    inverse_rotation_matrix: Matrix3x3,
    translation: Vec3,
}

impl fmt::Debug for Rototranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rototranslation")
            .field("rotation_matrix", &self.rotation_matrix)
            .field("origin", &self.origin)
            .finish()
    }
}

impl Rototranslation {
    /// Creates a transformation that rotates 3D points around a given axis.
    ///
    /// The rotation matrix is computed using the
    /// [Rodrigues' rotation formula](https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula):
    /// `cos_theta * u_identity + sin_theta * u_cross + (1.0 - cos_theta) * u_dot`
    ///
    /// # Example
    /// ```
    /// use saxshell_pdb::assert_vec3_eq;
    /// use saxshell_pdb::calc::{Rototranslation, Vec3};
    /// let start = Vec3::new(0.0, 0.0, 0.0);
    /// let end = Vec3::new(0.0, 0.0, 1.0);
    /// let rot = Rototranslation::around_axis(&start, &end, std::f64::consts::FRAC_PI_2);
    /// let mut p = Vec3::new(1.0, 0.0, 0.0);
    /// rot.apply_mut(&mut p);
    /// assert_vec3_eq!(p, Vec3::new(0.0, 1.0, 0.0), 1e-9, "90 deg rotation about Z");
    /// ```
    pub fn around_axis(start: &Vec3, end: &Vec3, angle_rad: f64) -> Rototranslation {
        let mut axis = end.clone();
        axis -= start;
        axis.normalize();
        let cos_theta = angle_rad.cos();
        let sin_theta = angle_rad.sin();

        let mut u_dot = Vec3::outer(&axis, &axis);
        let mut u_cross = Matrix3x3::from_array([
            0.0, -axis.z, axis.y,
            axis.z, 0.0, -axis.x,
            -axis.y, axis.x, 0.0,
        ]);

        let mut u_rot = Matrix3x3::identity();
        u_rot *= cos_theta;
        u_cross *= sin_theta;
        u_dot *= 1.0 - cos_theta;
        u_rot += &u_cross;
        u_rot += &u_dot;

        return Rototranslation {
            origin: start.clone(),
            inverse_rotation_matrix: u_rot.transposed(),
            rotation_matrix: u_rot,
            translation: Vec3::from_float(0.0),
        };
    }

    /// Creates a transformation that rotates points by Euler angles about an origin
    /// and then shifts them by a translation vector.
    pub fn from_euler_angles(origin: &Vec3, angles: &Vec3, translation: &Vec3) -> Rototranslation {
        let rot = Matrix3x3::from_euler_angles(angles.x, angles.y, angles.z);
        Rototranslation {
            origin: origin.clone(),
            inverse_rotation_matrix: rot.transposed(),
            rotation_matrix: rot,
            translation: translation.clone(),
        }
    }

    /// Returns the rotation matrix of this transformation
    pub fn rotation_matrix(&self) -> &Matrix3x3 { &self.rotation_matrix }

    /// Returns the origin of the rotation
    pub fn origin(&self) -> &Vec3 { &self.origin }

    /// Applies this transformation to a point, modifying it in place
    pub fn apply_mut(&self, point: &mut Vec3) {
        *point -= &self.origin;
        let rotated = self.rotation_matrix.multiply(point);
        *point = rotated;
        *point += &self.origin;
        *point += &self.translation;
    }

    /// Applies the inverse of this transformation to a point, modifying it in place
    pub fn apply_inverse_mut(&self, point: &mut Vec3) {
        *point -= &self.translation;
        *point -= &self.origin;
        let rotated = self.inverse_rotation_matrix.multiply(point);
        *point = rotated;
        *point += &self.origin;
    }
}
