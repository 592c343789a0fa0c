//! Screw-theory forward kinematics for serial manipulators.
//!
//! Follows the conventions of *Modern Robotics* (Lynch & Park): twists are
//! 6-vectors with the angular part on top, poses are 4x4 homogeneous matrices,
//! and end-effector poses come from the product of exponentials of the joint
//! screw axes with a home configuration `M`.
//!
//! ```text
//! vec_to_so3 ──► vec_to_se3 ──► exp_twist ──► fkin_space / fkin_body
//!                adjoint ─────► body_screw_axes
//! ```
//!
//! The free functions below and in [`kinematics`] form the stateless core.
//! [`robot`], [`sampling`] and [`check`] are a driver layer built on top of it.

#[macro_use]
pub mod macros;
pub mod check;
pub mod error;
pub mod expm;
pub mod kinematics;
pub mod robot;
pub mod sampling;
pub mod utils;

pub use nalgebra;

use nalgebra::{SMatrix, Vector3, Vector6};

pub use error::{ConfigError, Error, KinematicsError, Result};
pub use expm::{exp_twist_pade, expm4};
pub use kinematics::*;
pub use robot::{Joint, Manipulator};

/// Determines whether a scalar is small enough to be treated as zero
///
/// # Arguments
/// * `z` - A scalar input to check
/// # Returns
/// * `true` if z is close to zero, false otherwise
/// # Example
/// ```
/// use screw_kinematics::near_zero;
/// assert!(near_zero(-1e-7));
/// assert!(!near_zero(1e-3));
/// ```
pub fn near_zero(z: f64) -> bool {
    z.abs() < 1e-6
}

// *** CHAPTER 3: RIGID-BODY MOTIONS ***

/// Inverts a rotation matrix
/// # Arguments
/// * `r` - A 3x3 rotation matrix
/// # Returns
/// * The inverse of r
pub fn rot_inv(r: SMatrix<f64, 3, 3>) -> SMatrix<f64, 3, 3> {
    r.transpose()
}

/// Converts a 3-vector to an so(3) representation
/// # Arguments
/// * `omg` - A 3-vector representing angular velocity
/// # Returns
/// * The skew symmetric representation of omg, i.e. the matrix of `omg × ·`
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use screw_kinematics::{mat3, vec_to_so3};
/// let omg = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(vec_to_so3(omg), mat3!([ 0.0, -3.0,  2.0],
///                                   [ 3.0,  0.0, -1.0],
///                                   [-2.0,  1.0,  0.0]));
/// ```
pub fn vec_to_so3(omg: Vector3<f64>) -> SMatrix<f64, 3, 3> {
    mat3!(
        0.0, -omg[2], omg[1],
        omg[2], 0.0, -omg[0],
        -omg[1], omg[0], 0.0,
    )
}

/// Converts an so(3) representation to a 3-vector
/// # Arguments
/// * `so3mat` - A 3x3 skew-symmetric matrix
/// # Returns
/// * The 3-vector corresponding to so3mat
pub fn so3_to_vec(so3mat: SMatrix<f64, 3, 3>) -> Vector3<f64> {
    Vector3::new(so3mat[(2, 1)], so3mat[(0, 2)], so3mat[(1, 0)])
}

/// Converts a 3-vector of exponential coordinates for rotation into axis-angle form
/// # Arguments
/// * `expc3` - A 3-vector of exponential coordinates for rotation
/// # Returns
/// * A tuple containing the unit rotation axis and the corresponding rotation angle,
///   `(0, 0)` when expc3 is near zero
pub fn axis_ang_3(expc3: Vector3<f64>) -> (Vector3<f64>, f64) {
    let theta = expc3.norm();
    if near_zero(theta) {
        (Vector3::zeros(), 0.0)
    } else {
        (expc3 / theta, theta)
    }
}

/// Converts a 3x3 skew-symmetric matrix in so(3) to a rotation matrix using the matrix exponential
/// # Arguments
/// * `so3mat` - A 3x3 skew-symmetric matrix
/// # Returns
/// * The rotation matrix corresponding to so3mat (Rodrigues' formula)
/// # Example
/// ```
/// use screw_kinematics::{mat3, matrix_exp3, near_zero};
/// let so3mat = mat3!([0.0, -3.0, 2.0], [3.0, 0.0, -1.0], [-2.0, 1.0, 0.0]);
/// let r = matrix_exp3(so3mat);
/// assert!(near_zero((r - mat3!([-0.69492056, 0.71352099, 0.08929286],
///                              [-0.19200697, -0.30378504, 0.93319235],
///                              [0.69297817, 0.6313497, 0.34810748])).abs().max()));
/// ```
pub fn matrix_exp3(so3mat: SMatrix<f64, 3, 3>) -> SMatrix<f64, 3, 3> {
    let omgtheta = so3_to_vec(so3mat);
    if near_zero(omgtheta.norm()) {
        // third-order series, exact to machine precision below the near_zero threshold
        SMatrix::<f64, 3, 3>::identity() + so3mat + so3mat * so3mat / 2.0 + so3mat * so3mat * so3mat / 6.0
    } else {
        let (omghat, theta) = axis_ang_3(omgtheta);
        let omgmat = vec_to_so3(omghat);
        SMatrix::<f64, 3, 3>::identity()
            + theta.sin() * omgmat
            + (1.0 - theta.cos()) * (omgmat * omgmat)
    }
}

/// Converts a rotation matrix and a position vector into homogeneous transformation matrix
/// # Arguments
/// * `r` - A 3x3 rotation matrix
/// * `p` - A 3-vector representing position
/// # Returns
/// * A 4x4 homogeneous transformation matrix corresponding to the inputs
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use screw_kinematics::{mat3, mat4, rp_to_trans};
/// let r = mat3!([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]);
/// let t = rp_to_trans(r, Vector3::new(1.0, 2.0, 5.0));
/// assert_eq!(t, mat4!([1.0, 0.0,  0.0, 1.0],
///                     [0.0, 0.0, -1.0, 2.0],
///                     [0.0, 1.0,  0.0, 5.0],
///                     [0.0, 0.0,  0.0, 1.0]));
/// ```
pub fn rp_to_trans(r: SMatrix<f64, 3, 3>, p: Vector3<f64>) -> SMatrix<f64, 4, 4> {
    let mut t = SMatrix::<f64, 4, 4>::identity();
    t.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    t.fixed_view_mut::<3, 1>(0, 3).copy_from(&p);
    t
}

/// Converts a homogeneous transformation matrix into a rotation matrix and position vector
/// # Arguments
/// * `t` - A 4x4 homogeneous transformation matrix
/// # Returns
/// * A tuple containing the corresponding rotation matrix and position vector
pub fn trans_to_rp(t: SMatrix<f64, 4, 4>) -> (SMatrix<f64, 3, 3>, Vector3<f64>) {
    (
        t.fixed_view::<3, 3>(0, 0).into_owned(),
        t.fixed_view::<3, 1>(0, 3).into_owned(),
    )
}

/// Inverts a homogeneous transformation matrix
/// # Arguments
/// * `t` - A 4x4 homogeneous transformation matrix
/// # Returns
/// * The inverse of t, `[[Rᵗ, -Rᵗp], [0, 1]]`, without a general matrix inversion
/// # Example
/// ```
/// use screw_kinematics::{mat4, trans_inv};
/// let t = mat4!([1.0, 0.0,  0.0, 0.0],
///               [0.0, 0.0, -1.0, 0.0],
///               [0.0, 1.0,  0.0, 3.0],
///               [0.0, 0.0,  0.0, 1.0]);
/// assert_eq!(trans_inv(t), mat4!([1.0,  0.0, 0.0,  0.0],
///                                [0.0,  0.0, 1.0, -3.0],
///                                [0.0, -1.0, 0.0,  0.0],
///                                [0.0,  0.0, 0.0,  1.0]));
/// ```
pub fn trans_inv(t: SMatrix<f64, 4, 4>) -> SMatrix<f64, 4, 4> {
    let (r, p) = trans_to_rp(t);
    let rt = rot_inv(r);
    rp_to_trans(rt, -(rt * p))
}

/// Converts a spatial velocity vector into a 4x4 matrix in se3
/// # Arguments
/// * `v` - A 6-vector representing a spatial velocity (ω, v)
/// # Returns
/// * The 4x4 se3 representation of v, `[[ [ω], v ], [0, 0]]`
/// # Example
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::{mat4, vec_to_se3};
/// let v = Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
/// assert_eq!(vec_to_se3(v), mat4!([ 0.0, -3.0,  2.0, 4.0],
///                                 [ 3.0,  0.0, -1.0, 5.0],
///                                 [-2.0,  1.0,  0.0, 6.0],
///                                 [ 0.0,  0.0,  0.0, 0.0]));
/// ```
pub fn vec_to_se3(v: Vector6<f64>) -> SMatrix<f64, 4, 4> {
    let (omega, linear) = utils::split_twist(&v);
    let mut se3mat = SMatrix::<f64, 4, 4>::zeros();
    se3mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&vec_to_so3(omega));
    se3mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&linear);
    se3mat
}

/// Computes the adjoint representation of a homogeneous transformation matrix
/// # Arguments
/// * `t` - A 4x4 homogeneous transformation matrix. The bottom row is assumed to be
///   `(0, 0, 0, 1)` and the rotation block orthonormal; neither is checked.
/// # Returns
/// * The 6x6 adjoint representation of t, `[[R, 0], [[p]R, R]]`
/// # Example
/// ```
/// use nalgebra::SMatrix;
/// use screw_kinematics::{adjoint, mat4};
/// let t = mat4!([1.0, 0.0,  0.0, 0.0],
///               [0.0, 0.0, -1.0, 0.0],
///               [0.0, 1.0,  0.0, 3.0],
///               [0.0, 0.0,  0.0, 1.0]);
/// assert_eq!(adjoint(t), SMatrix::<f64, 6, 6>::from_row_slice(&[
///     1.0, 0.0,  0.0, 0.0, 0.0,  0.0,
///     0.0, 0.0, -1.0, 0.0, 0.0,  0.0,
///     0.0, 1.0,  0.0, 0.0, 0.0,  0.0,
///     0.0, 0.0,  3.0, 1.0, 0.0,  0.0,
///     3.0, 0.0,  0.0, 0.0, 0.0, -1.0,
///     0.0, 0.0,  0.0, 0.0, 1.0,  0.0,
/// ]));
/// ```
pub fn adjoint(t: SMatrix<f64, 4, 4>) -> SMatrix<f64, 6, 6> {
    let (r, p) = trans_to_rp(t);
    let mut adt = SMatrix::<f64, 6, 6>::zeros();
    adt.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    adt.fixed_view_mut::<3, 3>(3, 0).copy_from(&(vec_to_so3(p) * r));
    adt.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
    adt
}

/// Computes the matrix exponential of an se3 representation of exponential coordinates
/// # Arguments
/// * `se3mat` - A 4x4 matrix in se3
/// # Returns
/// * The matrix exponential of se3mat, an element of SE(3)
/// # Example
/// ```
/// use screw_kinematics::{mat4, matrix_exp6, near_zero};
/// let se3mat = mat4!([0.0, 0.0,         0.0,        0.0],
///                    [0.0, 0.0,        -1.57079632, 2.35619449],
///                    [0.0, 1.57079632,  0.0,        2.35619449],
///                    [0.0, 0.0,         0.0,        0.0]);
/// let t = matrix_exp6(se3mat);
/// assert!(near_zero((t - mat4!([1.0, 0.0,  0.0, 0.0],
///                              [0.0, 0.0, -1.0, 0.0],
///                              [0.0, 1.0,  0.0, 3.0],
///                              [0.0, 0.0,  0.0, 1.0])).abs().max()));
/// ```
pub fn matrix_exp6(se3mat: SMatrix<f64, 4, 4>) -> SMatrix<f64, 4, 4> {
    let omgmat_theta: SMatrix<f64, 3, 3> = se3mat.fixed_view::<3, 3>(0, 0).into_owned();
    let v_theta: Vector3<f64> = se3mat.fixed_view::<3, 1>(0, 3).into_owned();
    let omgtheta = so3_to_vec(omgmat_theta);
    if near_zero(omgtheta.norm()) {
        // small or zero rotation: truncated series of G(θ) = I + [ωθ]/2 + [ωθ]²/6
        let g = SMatrix::<f64, 3, 3>::identity()
            + omgmat_theta / 2.0
            + omgmat_theta * omgmat_theta / 6.0;
        rp_to_trans(matrix_exp3(omgmat_theta), g * v_theta)
    } else {
        let (omghat, theta) = axis_ang_3(omgtheta);
        let omgmat = vec_to_so3(omghat);
        let r = matrix_exp3(omgmat_theta);
        let p = ((SMatrix::<f64, 3, 3>::identity() * theta
            + (1.0 - theta.cos()) * omgmat
            + (theta - theta.sin()) * (omgmat * omgmat))
            * v_theta)
            / theta;
        rp_to_trans(r, p)
    }
}

/// Exponentiates a screw axis scaled by a joint coordinate
/// # Arguments
/// * `s` - A 6-vector screw axis (ω, v)
/// * `theta` - The joint coordinate (angle for revolute, distance for prismatic joints)
/// # Returns
/// * `exp([S]θ)`, the SE(3) displacement produced by moving theta along s
/// # Example
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::{exp_twist, mat4, near_zero};
/// let s = Vector6::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0);
/// let t = exp_twist(s, std::f64::consts::FRAC_PI_2);
/// assert!(near_zero((t - mat4!([0.0, -1.0, 0.0, 0.0],
///                              [1.0,  0.0, 0.0, 0.0],
///                              [0.0,  0.0, 1.0, 0.0],
///                              [0.0,  0.0, 0.0, 1.0])).abs().max()));
/// ```
pub fn exp_twist(s: Vector6<f64>, theta: f64) -> SMatrix<f64, 4, 4> {
    matrix_exp6(vec_to_se3(s) * theta)
}

/// Computes the Frobenius norm to describe the distance of a matrix from the SO(3) manifold
/// # Arguments
/// * `mat` - A 3x3 matrix
/// # Returns
/// * A quantity describing the distance of mat from the SO(3) manifold, `1e9` when det(mat) <= 0
pub fn distance_to_so3(mat: SMatrix<f64, 3, 3>) -> f64 {
    if mat.determinant() > 0.0 {
        (mat.transpose() * mat - SMatrix::<f64, 3, 3>::identity()).norm()
    } else {
        1e9
    }
}

/// Computes the Frobenius norm to describe the distance of a matrix from the SE(3) manifold
/// # Arguments
/// * `mat` - A 4x4 matrix
/// # Returns
/// * A quantity describing the distance of mat from the SE(3) manifold, `1e9` when det(R) <= 0
/// # Example
/// ```
/// use screw_kinematics::{distance_to_se3, mat4, near_zero};
/// let mat = mat4!([1.0, 0.0,  0.0,   1.2],
///                 [0.0, 0.1, -0.95,  1.5],
///                 [0.0, 1.0,  0.1,  -0.9],
///                 [0.0, 0.0,  0.1,   0.98]);
/// assert!(near_zero(distance_to_se3(mat) - 0.134931));
/// ```
pub fn distance_to_se3(mat: SMatrix<f64, 4, 4>) -> f64 {
    let r: SMatrix<f64, 3, 3> = mat.fixed_view::<3, 3>(0, 0).into_owned();
    if r.determinant() > 0.0 {
        let mut d = mat;
        d.fixed_view_mut::<3, 3>(0, 0).copy_from(&(r.transpose() * r));
        d.fixed_view_mut::<3, 1>(0, 3).fill(0.0);
        (d - SMatrix::<f64, 4, 4>::identity()).norm()
    } else {
        1e9
    }
}

/// Returns true if a matrix is close to or on the manifold SO(3)
pub fn test_if_so3(mat: SMatrix<f64, 3, 3>) -> bool {
    distance_to_so3(mat).abs() < 1e-3
}

/// Returns true if a matrix is close to or on the manifold SE(3)
pub fn test_if_se3(mat: SMatrix<f64, 4, 4>) -> bool {
    distance_to_se3(mat).abs() < 1e-3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::col3;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn skew_is_antisymmetric() {
        for v in [col3(1.0, 2.0, 3.0), col3(-0.3, 7.5, 0.0), col3(1e3, -2e-4, 5.0)] {
            let s = vec_to_so3(v);
            assert!((s + s.transpose()).abs().max() < 1e-9);
            assert_eq!(s.diagonal(), Vector3::zeros());
        }
    }

    #[test]
    fn skew_times_vector_is_cross_product() {
        let a = col3(0.4, -1.2, 2.5);
        let b = col3(3.0, 0.7, -0.9);
        assert_relative_eq!(vec_to_so3(a) * b, a.cross(&b), epsilon = 1e-12);
    }

    #[test]
    fn so3_round_trip() {
        let v = col3(1.5, -2.0, 0.25);
        assert_eq!(so3_to_vec(vec_to_so3(v)), v);
    }

    #[test]
    fn se3_round_trip() {
        let v = Vector6::new(0.1, 0.2, 0.3, 4.0, 5.0, 6.0);
        let se3mat = vec_to_se3(v);
        assert_eq!(se3mat.row(3).into_owned(), nalgebra::RowVector4::zeros());
        let omega = so3_to_vec(se3mat.fixed_view::<3, 3>(0, 0).into_owned());
        let linear = se3mat.fixed_view::<3, 1>(0, 3).into_owned();
        assert_eq!(utils::twist(omega, linear), v);
    }

    #[test]
    fn exp_twist_at_zero_is_identity() {
        for s in [
            Vector6::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0),
            Vector6::new(1.0, 0.0, 0.0, 0.0, 131.56, 0.0),
            Vector6::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
        ] {
            assert_eq!(exp_twist(s, 0.0), SMatrix::<f64, 4, 4>::identity());
        }
    }

    #[test]
    fn prismatic_twist_is_pure_translation() {
        let s = Vector6::new(0.0, 0.0, 0.0, 0.6, 0.0, 0.8);
        for theta in [-2.5, 0.3, 7.0] {
            let (r, p) = trans_to_rp(exp_twist(s, theta));
            assert_relative_eq!(r, SMatrix::<f64, 3, 3>::identity(), epsilon = 1e-12);
            assert_relative_eq!(p, col3(0.6, 0.0, 0.8) * theta, epsilon = 1e-12);
        }
    }

    #[test]
    fn revolute_twist_about_z() {
        let t = exp_twist(Vector6::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0), FRAC_PI_2);
        let (r, p) = trans_to_rp(t);
        assert_relative_eq!(r, mat3!([0, -1, 0], [1, 0, 0], [0, 0, 1]), epsilon = 1e-12);
        assert_relative_eq!(p, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn unit_axis_rotation_angle_equals_theta() {
        let omega = col3(1.0, 2.0, 2.0) / 3.0;
        let s = crate::utils::twist(omega, col3(0.5, -0.1, 0.3));
        let theta = 1.1;
        let (r, _) = trans_to_rp(exp_twist(s, theta));
        let angle = ((r.trace() - 1.0) / 2.0).acos();
        assert_relative_eq!(angle, theta, epsilon = 1e-12);
        assert!(test_if_so3(r));
    }

    #[test]
    fn small_rotation_branch_is_continuous() {
        // one side of the near_zero threshold against the other
        let s = Vector6::new(0.0, 1.0, 0.0, 2.0, 0.0, 1.0);
        let below = exp_twist(s, 9.9e-7);
        let above = exp_twist(s, 1.01e-6);
        assert!((below - above).abs().max() < 1e-7);
    }

    #[test]
    fn trans_inv_is_inverse() {
        let t = exp_twist(Vector6::new(0.0, 0.6, 0.8, 1.0, -2.0, 0.5), 2.2);
        assert_relative_eq!(t * trans_inv(t), SMatrix::<f64, 4, 4>::identity(), epsilon = 1e-12);
    }

    #[test]
    fn adjoint_exponential_compatibility() {
        let t = rp_to_trans(
            matrix_exp3(vec_to_so3(col3(0.3, -0.4, 1.2))),
            col3(0.5, 1.5, -2.0),
        );
        let v = Vector6::new(0.2, -0.7, 0.4, 1.0, 0.3, -0.6);
        let lhs = matrix_exp6(vec_to_se3(adjoint(t) * v));
        let rhs = t * matrix_exp6(vec_to_se3(v)) * trans_inv(t);
        assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
    }

    #[test]
    fn adjoint_of_inverse_is_inverse_of_adjoint() {
        let t = exp_twist(Vector6::new(1.0, 0.0, 0.0, 0.0, 0.3, -0.2), PI / 3.0);
        assert_relative_eq!(
            adjoint(trans_inv(t)) * adjoint(t),
            SMatrix::<f64, 6, 6>::identity(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn manifold_tests() {
        assert!(test_if_se3(SMatrix::<f64, 4, 4>::identity()));
        assert!(!test_if_so3(mat3!([1.0, 0.0, 0.0], [0.0, 0.1, -0.95], [0.0, 1.0, 0.1])));
        assert_eq!(distance_to_so3(-SMatrix::<f64, 3, 3>::identity()), 1e9);
    }
}
