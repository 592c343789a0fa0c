use thiserror::Error;

/// Top-level error type for screw_kinematics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),
}

/// Failures of the kinematics core.
///
/// Copy + static messages, these sit on every forward-kinematics call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KinematicsError {
    #[error("Dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Numeric degeneracy in {operation}: non-finite result")]
    NumericDegeneracy { operation: &'static str },
}

/// Manipulator description errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Home configuration is not in SE(3): {0}")]
    InvalidHome(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),
}

pub type Result<T, E = KinematicsError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_kinematics_error() {
        let err = KinematicsError::DimensionMismatch {
            what: "joint angles",
            expected: 6,
            got: 5,
        };
        let top: Error = err.into();
        assert!(matches!(top, Error::Kinematics(_)));
        assert!(top.to_string().contains("expected 6, got 5"));
    }

    #[test]
    fn error_from_config_error() {
        let err = ConfigError::InvalidHome("bottom row".into());
        let top: Error = err.into();
        assert!(matches!(top, Error::Config(_)));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            KinematicsError::DimensionMismatch {
                what: "joint angles",
                expected: 2,
                got: 3
            }
            .to_string(),
            "Dimension mismatch in joint angles: expected 2, got 3"
        );
        assert_eq!(
            KinematicsError::NumericDegeneracy { operation: "expm4" }.to_string(),
            "Numeric degeneracy in expm4: non-finite result"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "joints".into(),
                message: "at least one joint is required".into()
            }
            .to_string(),
            "Invalid value for joints: at least one joint is required"
        );
    }
}
