//! Cross-checking space-frame against body-frame forward kinematics.
//!
//! For body axes derived with [`body_screw_axes`](crate::body_screw_axes), both
//! products of exponentials describe the same end-effector pose. A disagreement
//! beyond rounding error points at a bad home configuration or a composition-order bug.

use nalgebra::SMatrix;
use tracing::{debug, warn};

use crate::error::Result;
use crate::robot::Manipulator;
use crate::utils::max_abs_diff;

/// Both poses for one joint-angle vector.
#[derive(Debug, Clone)]
pub struct FrameComparison {
    pub thetas: Vec<f64>,
    pub spatial: SMatrix<f64, 4, 4>,
    pub body: SMatrix<f64, 4, 4>,
    /// Largest entry-wise difference between `spatial` and `body`.
    pub max_error: f64,
    /// `max_error` is within the tolerance the comparison was made with.
    pub consistent: bool,
}

/// Outcome of checking a batch of joint-angle vectors.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub tolerance: f64,
    pub cases: Vec<FrameComparison>,
}

impl CheckReport {
    /// True when every case agrees within tolerance.
    pub fn passed(&self) -> bool {
        self.failures() == 0
    }

    pub fn failures(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| !c.consistent)
            .count()
    }

    /// Largest error over all cases, 0 for an empty report.
    pub fn worst_error(&self) -> f64 {
        self.cases.iter().map(|c| c.max_error).fold(0.0, f64::max)
    }
}

/// Compute both poses of `manipulator` at `thetas` and test them for agreement
/// within `tolerance` (absolute, entry-wise).
pub fn compare_frames(
    manipulator: &Manipulator,
    thetas: &[f64],
    tolerance: f64,
) -> Result<FrameComparison> {
    let spatial = manipulator.fkin_space(thetas)?;
    let body = manipulator.fkin_body(thetas)?;
    let max_error = max_abs_diff(&spatial, &body);
    Ok(FrameComparison {
        thetas: thetas.to_vec(),
        spatial,
        body,
        max_error,
        consistent: max_error <= tolerance,
    })
}

/// Compare frames for every vector in `batch`.
///
/// Stops at the first kinematics error (wrong joint count, non-finite pose).
pub fn check_batch(
    manipulator: &Manipulator,
    batch: &[Vec<f64>],
    tolerance: f64,
) -> Result<CheckReport> {
    let mut cases = Vec::with_capacity(batch.len());
    for (i, thetas) in batch.iter().enumerate() {
        let case = compare_frames(manipulator, thetas, tolerance)?;
        if case.consistent {
            debug!(case = i, max_error = case.max_error, "frames agree");
        } else {
            warn!(
                case = i,
                max_error = case.max_error,
                tolerance,
                thetas = ?case.thetas,
                "space and body frame poses disagree"
            );
        }
        cases.push(case);
    }
    Ok(CheckReport { tolerance, cases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Joint;
    use crate::sampling::joint_angle_batch;
    use crate::KinematicsError;
    use nalgebra::Vector6;

    fn wrist() -> Manipulator {
        let home = mat4!([0, 0, 1, 0.3], [0, 1, 0, 0.1], [-1, 0, 0, 0.5], [0, 0, 0, 1]);
        Manipulator::new(
            "wrist",
            home,
            vec![
                Joint::new("yaw", Vector6::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0)),
                Joint::new("pitch", Vector6::new(0.0, 1.0, 0.0, -0.5, 0.0, 0.0)),
                Joint::new("slide", Vector6::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn random_batch_passes() {
        let arm = wrist();
        let report = check_batch(&arm, &joint_angle_batch(99, arm.dof(), 8), 1e-9).unwrap();
        assert_eq!(report.cases.len(), 8);
        assert!(report.passed());
        assert!(report.worst_error() < 1e-9);
    }

    #[test]
    fn home_case_is_exact() {
        let arm = wrist();
        let case = compare_frames(&arm, &[0.0; 3], 0.0).unwrap();
        assert_eq!(case.max_error, 0.0);
        assert!(case.consistent);
        assert_eq!(case.spatial, arm.home());
    }

    #[test]
    fn consistency_follows_tolerance() {
        let arm = wrist();
        let thetas = [0.7, -1.2, 0.05];
        let loose = compare_frames(&arm, &thetas, 1e-9).unwrap();
        assert!(loose.consistent);
        let strict = compare_frames(&arm, &thetas, -1.0).unwrap();
        assert!(!strict.consistent);
        assert_eq!(strict.max_error, loose.max_error);
    }

    #[test]
    fn failures_are_counted() {
        let arm = wrist();
        let mut report = check_batch(&arm, &joint_angle_batch(1, 3, 2), 1e-9).unwrap();
        report.cases[1].max_error = 1.0;
        report.cases[1].consistent = false;
        assert!(!report.passed());
        assert_eq!(report.failures(), 1);
        assert_eq!(report.worst_error(), 1.0);
    }

    #[test]
    fn wrong_length_aborts_batch() {
        let arm = wrist();
        let batch = vec![vec![0.0; 3], vec![0.0; 2]];
        assert!(matches!(
            check_batch(&arm, &batch, 1e-9),
            Err(KinematicsError::DimensionMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn empty_report_passes() {
        let report = check_batch(&wrist(), &[], 1e-9).unwrap();
        assert!(report.passed());
        assert_eq!(report.worst_error(), 0.0);
    }
}
