//! General-purpose matrix exponential for 4x4 matrices.
//!
//! Scaling and squaring with a degree-13 Padé approximant (Higham, 2005). This
//! is the reference against which the closed-form [`matrix_exp6`](crate::matrix_exp6)
//! is checked, and the fallback for inputs that are not well-formed twists.

use nalgebra::{SMatrix, Vector6};

use crate::error::{KinematicsError, Result};
use crate::utils::all_finite;
use crate::vec_to_se3;

/// Padé(13) numerator coefficients b_0..b_13.
const PADE_13: [f64; 14] = [
    64_764_752_532_480_000.0,
    32_382_376_266_240_000.0,
    7_771_770_303_897_600.0,
    1_187_353_796_428_800.0,
    129_060_195_264_000.0,
    10_559_470_521_600.0,
    670_442_572_800.0,
    33_522_128_640.0,
    1_323_241_920.0,
    40_840_800.0,
    960_960.0,
    16_380.0,
    182.0,
    1.0,
];

/// Largest 1-norm for which Padé(13) needs no scaling.
const THETA_13: f64 = 5.371_920_351_148_152;

fn one_norm(a: &SMatrix<f64, 4, 4>) -> f64 {
    a.column_iter()
        .map(|c| c.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Computes the matrix exponential of an arbitrary 4x4 matrix
/// # Arguments
/// * `a` - Any finite 4x4 matrix
/// # Returns
/// * `exp(a)`, or `NumericDegeneracy` when a is non-finite, the Padé denominator is
///   singular, or repeated squaring overflows
/// # Example
/// ```
/// use nalgebra::SMatrix;
/// use screw_kinematics::expm4;
/// let e = expm4(SMatrix::<f64, 4, 4>::zeros()).unwrap();
/// assert_eq!(e, SMatrix::<f64, 4, 4>::identity());
/// ```
pub fn expm4(a: SMatrix<f64, 4, 4>) -> Result<SMatrix<f64, 4, 4>> {
    let degenerate = KinematicsError::NumericDegeneracy { operation: "expm4" };
    if !all_finite(&a) {
        return Err(degenerate);
    }

    let norm = one_norm(&a);
    let squarings = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };
    let a = a / 2f64.powi(squarings);

    let b = &PADE_13;
    let id = SMatrix::<f64, 4, 4>::identity();
    let a2 = a * a;
    let a4 = a2 * a2;
    let a6 = a4 * a2;
    let u = a
        * (a6 * (a6 * b[13] + a4 * b[11] + a2 * b[9])
            + a6 * b[7]
            + a4 * b[5]
            + a2 * b[3]
            + id * b[1]);
    let v = a6 * (a6 * b[12] + a4 * b[10] + a2 * b[8])
        + a6 * b[6]
        + a4 * b[4]
        + a2 * b[2]
        + id * b[0];

    let mut e = (v - u).lu().solve(&(v + u)).ok_or(degenerate)?;
    for _ in 0..squarings {
        e = e * e;
    }

    if all_finite(&e) {
        Ok(e)
    } else {
        Err(degenerate)
    }
}

/// Exponentiates a scaled screw axis with the general Padé routine
/// # Arguments
/// * `s` - A 6-vector screw axis
/// * `theta` - The joint coordinate
/// # Returns
/// * `exp([S]θ)`; agrees with [`exp_twist`](crate::exp_twist) to rounding error
pub fn exp_twist_pade(s: Vector6<f64>, theta: f64) -> Result<SMatrix<f64, 4, 4>> {
    expm4(vec_to_se3(s) * theta)
}
