use nalgebra::{SMatrix, Vector6};

use crate::error::{KinematicsError, Result};
use crate::utils::all_finite;
use crate::{adjoint, exp_twist, trans_inv};

// *** CHAPTER 4: FORWARD KINEMATICS ***

/// Where the home configuration enters a body-frame product of exponentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyComposition {
    /// `M · exp([B1]θ1) ⋯ exp([Bn]θn)`. Consistent with [`fkin_space`] for body axes
    /// obtained from [`body_screw_axes`].
    #[default]
    HomeLeading,
    /// `exp([B1]θ1) ⋯ exp([Bn]θn) · M`, accumulated by pre-multiplying from the last
    /// joint down to the first. This is the spatial-frame product: it only reproduces
    /// the end-effector pose when the axes passed in are expressed in the space frame.
    HomeTrailing,
}

fn ensure_joint_count(axes: usize, thetas: usize) -> Result<()> {
    if axes == thetas {
        Ok(())
    } else {
        Err(KinematicsError::DimensionMismatch {
            what: "joint angles",
            expected: axes,
            got: thetas,
        })
    }
}

fn ensure_finite<const R: usize, const C: usize>(
    operation: &'static str,
    m: SMatrix<f64, R, C>,
) -> Result<SMatrix<f64, R, C>> {
    if all_finite(&m) {
        Ok(m)
    } else {
        Err(KinematicsError::NumericDegeneracy { operation })
    }
}

/// Computes forward kinematics in the space frame for an open chain robot
/// # Arguments
/// * `m` - The home configuration (position and orientation) of the end-effector
/// * `slist` - The joint screw axes in the space frame when the manipulator is at the home position
/// * `thetalist` - A list of joint coordinates, one per screw axis
/// # Returns
/// * A homogeneous transformation matrix representing the end-effector frame when the joints are
///   at the specified coordinates (i.t.o Space Frame), `exp([S1]θ1) ⋯ exp([Sn]θn) · M`
/// # Errors
/// * `DimensionMismatch` if `slist` and `thetalist` differ in length
/// * `NumericDegeneracy` if the pose contains NaN or infinite entries
/// # Example
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::{fkin_space, mat4, near_zero};
/// let m = mat4!([-1.0, 0.0,  0.0, 0.0],
///               [ 0.0, 1.0,  0.0, 6.0],
///               [ 0.0, 0.0, -1.0, 2.0],
///               [ 0.0, 0.0,  0.0, 1.0]);
/// let slist = [
///     Vector6::new(0.0, 0.0,  1.0,  4.0, 0.0,  0.0),
///     Vector6::new(0.0, 0.0,  0.0,  0.0, 1.0,  0.0),
///     Vector6::new(0.0, 0.0, -1.0, -6.0, 0.0, -0.1),
/// ];
/// let thetalist = [std::f64::consts::PI / 2.0, 3.0, std::f64::consts::PI];
/// let t = fkin_space(m, &slist, &thetalist).unwrap();
/// assert!(near_zero((t - mat4!([0.0, 1.0,  0.0, -5.0],
///                              [1.0, 0.0,  0.0,  4.0],
///                              [0.0, 0.0, -1.0,  1.68584073],
///                              [0.0, 0.0,  0.0,  1.0])).abs().max()));
/// ```
pub fn fkin_space(
    m: SMatrix<f64, 4, 4>,
    slist: &[Vector6<f64>],
    thetalist: &[f64],
) -> Result<SMatrix<f64, 4, 4>> {
    ensure_joint_count(slist.len(), thetalist.len())?;
    let mut t = SMatrix::<f64, 4, 4>::identity();
    for (s, &theta) in slist.iter().zip(thetalist) {
        t *= exp_twist(*s, theta);
    }
    ensure_finite("fkin_space", t * m)
}

/// Computes forward kinematics in the body frame for an open chain robot
/// # Arguments
/// * `m` - The home configuration (position and orientation) of the end-effector
/// * `blist` - The joint screw axes in the end-effector frame when the manipulator is at the home position
/// * `thetalist` - A list of joint coordinates, one per screw axis
/// # Returns
/// * A homogeneous transformation matrix representing the end-effector frame when the joints are
///   at the specified coordinates (i.t.o Body Frame), `M · exp([B1]θ1) ⋯ exp([Bn]θn)`
/// # Errors
/// * Same as [`fkin_space`]
/// # Example
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::{fkin_body, mat4, near_zero};
/// let m = mat4!([-1.0, 0.0,  0.0, 0.0],
///               [ 0.0, 1.0,  0.0, 6.0],
///               [ 0.0, 0.0, -1.0, 2.0],
///               [ 0.0, 0.0,  0.0, 1.0]);
/// let blist = [
///     Vector6::new(0.0, 0.0, -1.0, 2.0, 0.0, 0.0),
///     Vector6::new(0.0, 0.0,  0.0, 0.0, 1.0, 0.0),
///     Vector6::new(0.0, 0.0,  1.0, 0.0, 0.0, 0.1),
/// ];
/// let thetalist = [std::f64::consts::PI / 2.0, 3.0, std::f64::consts::PI];
/// let t = fkin_body(m, &blist, &thetalist).unwrap();
/// assert!(near_zero((t - mat4!([0.0, 1.0,  0.0, -5.0],
///                              [1.0, 0.0,  0.0,  4.0],
///                              [0.0, 0.0, -1.0,  1.68584073],
///                              [0.0, 0.0,  0.0,  1.0])).abs().max()));
/// ```
pub fn fkin_body(
    m: SMatrix<f64, 4, 4>,
    blist: &[Vector6<f64>],
    thetalist: &[f64],
) -> Result<SMatrix<f64, 4, 4>> {
    fkin_body_with(BodyComposition::HomeLeading, m, blist, thetalist)
}

/// Body-frame product of exponentials with an explicit [`BodyComposition`]
pub fn fkin_body_with(
    composition: BodyComposition,
    m: SMatrix<f64, 4, 4>,
    blist: &[Vector6<f64>],
    thetalist: &[f64],
) -> Result<SMatrix<f64, 4, 4>> {
    ensure_joint_count(blist.len(), thetalist.len())?;
    let t = match composition {
        BodyComposition::HomeLeading => {
            let mut t = SMatrix::<f64, 4, 4>::identity();
            for (b, &theta) in blist.iter().zip(thetalist) {
                t *= exp_twist(*b, theta);
            }
            m * t
        }
        BodyComposition::HomeTrailing => {
            let mut t = m;
            for (b, &theta) in blist.iter().zip(thetalist).rev() {
                t = exp_twist(*b, theta) * t;
            }
            t
        }
    };
    ensure_finite("fkin_body", t)
}

/// Expresses space-frame screw axes in the end-effector frame at the home configuration
/// # Arguments
/// * `slist` - The joint screw axes in the space frame
/// * `m` - The home configuration of the end-effector; must be a valid SE(3) matrix
/// # Returns
/// * The body screw axes `Bi = [Ad_{M⁻¹}] Si`, in the same order as slist
/// # Example
/// ```
/// use nalgebra::Vector6;
/// use screw_kinematics::{body_screw_axes, mat4};
/// let m = mat4!([1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]);
/// let blist = body_screw_axes(&[Vector6::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0)], m).unwrap();
/// assert_eq!(blist[0], Vector6::new(0.0, 0.0, 1.0, 0.0, 2.0, 0.0));
/// ```
pub fn body_screw_axes(slist: &[Vector6<f64>], m: SMatrix<f64, 4, 4>) -> Result<Vec<Vector6<f64>>> {
    change_axis_frame("body_screw_axes", adjoint(trans_inv(m)), slist)
}

/// Expresses body-frame screw axes in the space frame, `Si = [Ad_M] Bi`
pub fn space_screw_axes(blist: &[Vector6<f64>], m: SMatrix<f64, 4, 4>) -> Result<Vec<Vector6<f64>>> {
    change_axis_frame("space_screw_axes", adjoint(m), blist)
}

/// Every converted axis must be finite, not just the adjoint.
fn change_axis_frame(
    operation: &'static str,
    ad: SMatrix<f64, 6, 6>,
    axes: &[Vector6<f64>],
) -> Result<Vec<Vector6<f64>>> {
    let ad = ensure_finite(operation, ad)?;
    axes.iter()
        .map(|axis| ensure_finite(operation, ad * *axis))
        .collect()
}
