use saxshell_pdb::{assert_delta, assert_vec3_eq};
use saxshell_pdb::calc::{Matrix3x3, Rototranslation, Vec3};

#[test]
fn test_vec3_operations() {
    let mut v = Vec3::new(3.0, 4.0, 0.0);
    assert_delta!(v.length(), 5.0, 1e-9);
    v.normalize();
    assert_delta!(v.length(), 1.0, 1e-9);

    let a = Vec3::new(1.0, 0.0, 0.0);
    let b = Vec3::new(0.0, 1.0, 0.0);
    assert_delta!(a.dot(&b), 0.0, 1e-9);
    assert_vec3_eq!(a.cross(&b), Vec3::new(0.0, 0.0, 1.0), 1e-9, "x cross y");
    assert_delta!(a.distance_to(&b), 2.0f64.sqrt(), 1e-9);
}

#[test]
fn test_rotation_about_axis() {
    let rot = Rototranslation::around_axis(
        &Vec3::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, 1.0), std::f64::consts::PI);
    let mut p = Vec3::new(1.0, 0.0, 5.0);
    rot.apply_mut(&mut p);
    assert_vec3_eq!(p, Vec3::new(-1.0, 0.0, 5.0), 1e-9, "180 deg about Z");

    rot.apply_inverse_mut(&mut p);
    assert_vec3_eq!(p, Vec3::new(1.0, 0.0, 5.0), 1e-9, "inverse restores the point");
}

#[test]
fn test_rotation_preserves_distances() {
    let rot = Rototranslation::around_axis(
        &Vec3::new(1.0, -2.0, 0.5), &Vec3::new(-0.3, 1.0, 2.0), 0.7);
    let mut p = Vec3::new(1.0, 2.0, 3.0);
    let mut q = Vec3::new(-1.0, 0.5, 1.0);
    let d_before = p.distance_to(&q);
    rot.apply_mut(&mut p);
    rot.apply_mut(&mut q);
    assert_delta!(p.distance_to(&q), d_before, 1e-9);
}

#[test]
fn test_euler_rotation_matrix_is_orthonormal() {
    let m = Matrix3x3::from_euler_angles(0.3, -0.8, 1.2);
    assert_delta!(m.det(), 1.0, 1e-9);
    let mt = m.transposed();
    // R * R^T must be the identity
    for row in 0..3 {
        for col in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 { sum += m.elem(row, k) * mt.elem(k, col); }
            let expected = if row == col { 1.0 } else { 0.0 };
            assert_delta!(sum, expected, 1e-9);
        }
    }
}
