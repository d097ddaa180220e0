use std::fmt;
use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};
use crate::calc::Matrix3x3;

/// 3D vector used to manipulate with atomic coordinates.
///
/// [`Vec3`] struct contains 3D coordinates; it is used to store the location of a
/// [`PdbAtom`](crate::PdbAtom). The struct implements also a few operators, such as `-=` or `+=`,
/// to facilitate vector arithmetics.
///
/// ```
/// use saxshell_pdb::calc::Vec3;
/// let mut center = Vec3::from_float(0.0);
/// for v in [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)] { center += &v; }
/// center /= 2.0;
/// assert!((center.x - 0.5).abs() < 1e-9);
/// assert!((center.distance_to(&Vec3::new(0.5, 0.5, 0.0))) < 1e-9);
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    /// the ``x`` coordinate of this vector
    pub x: f64,
    /// the ``y`` coordinate of this vector
    pub y: f64,
    /// the ``z`` coordinate of this vector
    pub z: f64,
}

macro_rules! vec_operation {
    ($lhs:expr, $rhs:expr, $OP:tt ) => {
        $lhs.x $OP $rhs.x;
        $lhs.y $OP $rhs.y;
        $lhs.z $OP $rhs.z;
    };
}

macro_rules! scalar_operation {
    ($lhs:expr, $rhs:expr, $OP:tt ) => {
        $lhs.x $OP $rhs;
        $lhs.y $OP $rhs;
        $lhs.z $OP $rhs;
    };
}

impl Vec3 {
    /// Creates a vector from its three components
    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Creates a vector with all three components set to the same value
    pub fn from_float(value: f64) -> Vec3 {
        Vec3 { x: value, y: value, z: value }
    }

    /// Creates a vector by parsing the coordinate columns of a PDB `ATOM` record
    pub(crate) fn from_pdb_columns(pdb_line: &str) -> Option<Vec3> {
        let x = pdb_line.get(30..38)?.trim().parse::<f64>().ok()?;
        let y = pdb_line.get(38..46)?.trim().parse::<f64>().ok()?;
        let z = pdb_line.get(46..54)?.trim().parse::<f64>().ok()?;
        Some(Vec3 { x, y, z })
    }

    /// Length of this vector
    pub fn length(&self) -> f64 {
        return (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
    }

    /// Squared length of this vector
    pub fn length_squared(&self) -> f64 {
        return self.x * self.x + self.y * self.y + self.z * self.z;
    }

    /// Normalizes this vector so its length is 1.0
    pub fn normalize(&mut self) {
        let l = self.length();
        if l > 0.0 { scalar_operation!(self, l, /=); }
    }

    /// Distance between the points defined by this vector and another one
    pub fn distance_to(&self, other: &Vec3) -> f64 {
        return self.distance_squared_to(other).sqrt();
    }

    /// Squared distance between the points defined by this vector and another one
    pub fn distance_squared_to(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        return dx * dx + dy * dy + dz * dz;
    }

    /// Dot product of two vectors
    pub fn dot(&self, other: &Vec3) -> f64 {
        return self.x * other.x + self.y * other.y + self.z * other.z;
    }

    /// Cross product of two vectors
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Outer product of two vectors, returned as a 3x3 matrix
    pub fn outer(a: &Vec3, b: &Vec3) -> Matrix3x3 {
        Matrix3x3::from_array([
            a.x * b.x, a.x * b.y, a.x * b.z,
            a.y * b.x, a.y * b.y, a.y * b.z,
            a.z * b.x, a.z * b.y, a.z * b.z,
        ])
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    /// Indexing operator provides access to X, Y, Z components of a vector
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of range for Vec3"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    /// Indexing operator provides mutable access to X, Y, Z components of a vector
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of range for Vec3"),
        }
    }
}

impl SubAssign<&Vec3> for Vec3 {
    /// Performs the `-=` operation.
    ///
    /// ```
    /// use saxshell_pdb::calc::Vec3;
    /// let mut v0 = Vec3::new(1.0, 2.0, 3.0);
    /// v0 -= &Vec3::new(1.0, 2.0, 3.0);
    /// assert!((v0.x).abs() < 0.000001);
    /// ```
    fn sub_assign(&mut self, other: &Vec3) {
        vec_operation!(self, other, -=);
    }
}

impl AddAssign<&Vec3> for Vec3 {
    /// Performs the `+=` operation.
    fn add_assign(&mut self, other: &Vec3) {
        vec_operation!(self, other, +=);
    }
}

impl MulAssign<f64> for Vec3 {
    /// Performs the `*=` operation that multiplies this vector by a constant.
    fn mul_assign(&mut self, rhs: f64) {
        scalar_operation!(self, rhs, *=);
    }
}

impl DivAssign<f64> for Vec3 {
    /// Performs the `/=` operation that divides this vector by a constant.
    fn div_assign(&mut self, rhs: f64) {
        scalar_operation!(self, rhs, /=);
    }
}

impl fmt::Debug for Vec3 {
    /// Debug formatting of a Vec3 prints all its fields
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}, {:.3}]", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.3} {:8.3} {:8.3}", self.x, self.y, self.z)
    }
}
