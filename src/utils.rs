use nalgebra::{SMatrix, Vector3, Vector6};

// ========== Basics: small vector helpers ==========

#[inline]
pub fn col3(a: f64, b: f64, c: f64) -> Vector3<f64> {
    Vector3::new(a, b, c)
}

// ========== Twist assembly ==========

/// Stack an angular part and a linear part into a 6-vector twist (ω on top, v below).
/// ```
/// use screw_kinematics::utils::{col3, twist};
/// let s = twist(col3(0., 0., 1.), col3(0., -1., 0.));
/// assert_eq!(s.as_slice(), &[0., 0., 1., 0., -1., 0.]);
/// ```
pub fn twist(omega: Vector3<f64>, v: Vector3<f64>) -> Vector6<f64> {
    let mut s = Vector6::zeros();
    s.fixed_rows_mut::<3>(0).copy_from(&omega);
    s.fixed_rows_mut::<3>(3).copy_from(&v);
    s
}

/// Split a twist into its angular and linear parts.
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::utils::{col3, split_twist};
/// let (w, v) = split_twist(&Vector6::new(0., 0., 1., 0.2, -0.4, 0.));
/// assert_eq!((w, v), (col3(0., 0., 1.), col3(0.2, -0.4, 0.)));
/// ```
pub fn split_twist(s: &Vector6<f64>) -> (Vector3<f64>, Vector3<f64>) {
    (
        s.fixed_rows::<3>(0).into_owned(),
        s.fixed_rows::<3>(3).into_owned(),
    )
}

// ========== Element-wise checks ==========

/// True when every entry is neither NaN nor infinite.
pub fn all_finite<const R: usize, const C: usize>(m: &SMatrix<f64, R, C>) -> bool {
    m.iter().all(|x| x.is_finite())
}

/// Largest absolute entry-wise difference between two matrices of equal shape.
/// ```
/// use screw_kinematics::{mat3, utils::max_abs_diff};
/// let a = mat3!([1., 0., 0.], [0., 1., 0.], [0., 0., 1.]);
/// let b = mat3!([1., 0., 0.], [0., 1., 0.5], [0., 0., 1.]);
/// assert_eq!(max_abs_diff(&a, &b), 0.5);
/// ```
pub fn max_abs_diff<const R: usize, const C: usize>(
    a: &SMatrix<f64, R, C>,
    b: &SMatrix<f64, R, C>,
) -> f64 {
    (a - b).abs().max()
}
