//! Core errors shared by the math kernel and the camera (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Inverse requested for a matrix whose determinant is exactly zero.
    #[error("Matrix is singular (determinant is zero)")]
    SingularMatrix,

    /// Degenerate projection parameter handed to the camera.
    #[error("Invalid camera parameter `{name}` = {value}: {reason}")]
    InvalidCameraParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_the_field() {
        let err = CoreError::InvalidCameraParameter {
            name: "near",
            value: -1.0,
            reason: "must be positive",
        };
        let msg = err.to_string();
        assert!(msg.contains("`near`"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("must be positive"));
    }
}
