//! Manipulator descriptions: a home configuration plus one space-frame screw
//! axis per joint, loadable from TOML.
//!
//! ```toml
//! name = "planar_rr"
//! home = [[1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
//!
//! [[joints]]
//! name = "shoulder"
//! screw = [0, 0, 1, 0, 0, 0]
//!
//! [[joints]]
//! screw = [0, 0, 1, 0, -1, 0]
//! ```
//!
//! Unnamed joints are called `j1`, `j2`, ... by position.

use std::path::Path;

use nalgebra::{SMatrix, Vector6};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::utils::all_finite;
use crate::{body_screw_axes, distance_to_se3, fkin_body, fkin_space, near_zero, test_if_se3};

// *** MANIPULATOR FILE FORMAT ***

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManipulatorFile {
    name: String,
    home: [[f64; 4]; 4],
    #[serde(default)]
    joints: Vec<JointFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JointFile {
    name: Option<String>,
    screw: [f64; 6],
}

// *** JOINTS AND MANIPULATORS ***

/// A single joint: its name and screw axis in the space frame at the home position.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub screw: Vector6<f64>,
}

impl Joint {
    pub fn new(name: impl Into<String>, screw: Vector6<f64>) -> Self {
        Self {
            name: name.into(),
            screw,
        }
    }
}

/// A validated serial manipulator.
///
/// Body-frame screw axes are derived once at construction, so repeated
/// forward-kinematics calls in either frame cost only the exponentials.
#[derive(Debug, Clone)]
pub struct Manipulator {
    name: String,
    home: SMatrix<f64, 4, 4>,
    joints: Vec<Joint>,
    space_axes: Vec<Vector6<f64>>,
    body_axes: Vec<Vector6<f64>>,
}

impl Manipulator {
    /// Build a manipulator, checking that `home` lies in SE(3) and every screw
    /// axis is finite and non-zero.
    pub fn new(
        name: impl Into<String>,
        home: SMatrix<f64, 4, 4>,
        joints: Vec<Joint>,
    ) -> Result<Self, ConfigError> {
        if !all_finite(&home) || !test_if_se3(home) {
            return Err(ConfigError::InvalidHome(format!(
                "distance to SE(3) is {:.3e}",
                distance_to_se3(home)
            )));
        }
        if joints.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "joints".into(),
                message: "at least one joint is required".into(),
            });
        }
        for (i, joint) in joints.iter().enumerate() {
            if !all_finite(&joint.screw) {
                return Err(ConfigError::InvalidValue {
                    field: format!("joints[{i}].screw"),
                    message: "entries must be finite".into(),
                });
            }
            if near_zero(joint.screw.norm()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("joints[{i}].screw"),
                    message: "screw axis must be non-zero".into(),
                });
            }
        }

        let space_axes: Vec<_> = joints.iter().map(|j| j.screw).collect();
        let body_axes = body_screw_axes(&space_axes, home)?;

        Ok(Self {
            name: name.into(),
            home,
            joints,
            space_axes,
            body_axes,
        })
    }

    /// Parse and validate a TOML manipulator description.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ManipulatorFile = toml::from_str(s)?;
        let home = SMatrix::<f64, 4, 4>::from_fn(|r, c| file.home[r][c]);
        let joints = file
            .joints
            .into_iter()
            .enumerate()
            .map(|(i, j)| {
                Joint::new(
                    j.name.unwrap_or_else(|| format!("j{}", i + 1)),
                    Vector6::from_column_slice(&j.screw),
                )
            })
            .collect();
        Self::new(file.name, home, joints)
    }

    /// Load a TOML manipulator description from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let manipulator = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            name = %manipulator.name,
            dof = manipulator.dof(),
            "loaded manipulator"
        );
        Ok(manipulator)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// End-effector pose with all joints at zero.
    pub fn home(&self) -> SMatrix<f64, 4, 4> {
        self.home
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Number of joints.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    pub fn space_axes(&self) -> &[Vector6<f64>] {
        &self.space_axes
    }

    pub fn body_axes(&self) -> &[Vector6<f64>] {
        &self.body_axes
    }

    /// End-effector pose from the space-frame product of exponentials.
    pub fn fkin_space(&self, thetalist: &[f64]) -> Result<SMatrix<f64, 4, 4>> {
        fkin_space(self.home, &self.space_axes, thetalist)
    }

    /// End-effector pose from the body-frame product of exponentials.
    pub fn fkin_body(&self, thetalist: &[f64]) -> Result<SMatrix<f64, 4, 4>> {
        fkin_body(self.home, &self.body_axes, thetalist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PLANAR_RR: &str = r#"
        name = "planar_rr"
        home = [[1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]

        [[joints]]
        name = "shoulder"
        screw = [0, 0, 1, 0, 0, 0]

        [[joints]]
        screw = [0, 0, 1, 0, -1, 0]
    "#;

    #[test]
    fn parses_planar_arm() {
        let arm = Manipulator::from_toml_str(PLANAR_RR).unwrap();
        assert_eq!(arm.name(), "planar_rr");
        assert_eq!(arm.dof(), 2);
        assert_eq!(arm.joints()[0].name, "shoulder");
        assert_eq!(arm.joints()[1].name, "j2");
        assert_eq!(arm.home(), mat4!([1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]));
        assert_eq!(arm.space_axes()[1], Vector6::new(0.0, 0.0, 1.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn body_axes_are_derived() {
        let arm = Manipulator::from_toml_str(PLANAR_RR).unwrap();
        // joints at x = 0 and x = 1 seen from the tip at x = 2
        assert_relative_eq!(arm.body_axes()[0], Vector6::new(0.0, 0.0, 1.0, 0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(arm.body_axes()[1], Vector6::new(0.0, 0.0, 1.0, 0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn planar_arm_reaches_expected_point() {
        let arm = Manipulator::from_toml_str(PLANAR_RR).unwrap();
        let thetas = [std::f64::consts::FRAC_PI_2, -std::f64::consts::FRAC_PI_2];
        let expected = mat4!([1, 0, 0, 1], [0, 1, 0, 1], [0, 0, 1, 0], [0, 0, 0, 1]);
        assert_relative_eq!(arm.fkin_space(&thetas).unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(arm.fkin_body(&thetas).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_rigid_home() {
        let src = PLANAR_RR.replace("[1, 0, 0, 2]", "[2, 0, 0, 2]");
        assert!(matches!(
            Manipulator::from_toml_str(&src),
            Err(ConfigError::InvalidHome(_))
        ));
    }

    #[test]
    fn rejects_empty_joint_list() {
        let src = r#"
            name = "nothing"
            home = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
        "#;
        let err = Manipulator::from_toml_str(src).unwrap_err();
        assert!(err.to_string().contains("at least one joint"));
    }

    #[test]
    fn rejects_zero_screw() {
        let src = PLANAR_RR.replace("[0, 0, 1, 0, -1, 0]", "[0, 0, 0, 0, 0, 0]");
        let err = Manipulator::from_toml_str(&src).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "joints[1].screw"));
    }

    #[test]
    fn rejects_wrong_screw_length() {
        let src = PLANAR_RR.replace("[0, 0, 1, 0, -1, 0]", "[0, 0, 1, 0, -1]");
        assert!(matches!(
            Manipulator::from_toml_str(&src),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Manipulator::from_file("does/not/exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn wrong_joint_count_is_dimension_mismatch() {
        let arm = Manipulator::from_toml_str(PLANAR_RR).unwrap();
        assert!(arm.fkin_space(&[0.0]).is_err());
        assert!(arm.fkin_body(&[0.0, 0.0, 0.0]).is_err());
    }
}
