//! Edge-detection parameters pushed to the processing service.
//!
//! The record serializes exactly as the `update_parameters` endpoint
//! expects it: integer thresholds, the kernel size as a bare integer,
//! and a float sigma.

use serde::{Deserialize, Serialize};

/// Gaussian kernel sizes the service accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum KernelSize {
    /// 3x3 kernel.
    K3,
    /// 5x5 kernel.
    #[default]
    K5,
    /// 7x7 kernel.
    K7,
    /// 9x9 kernel.
    K9,
}

impl KernelSize {
    /// All accepted sizes, for building the selection control.
    pub const ALL: [Self; 4] = [Self::K3, Self::K5, Self::K7, Self::K9];

    /// Kernel edge length in pixels.
    #[must_use]
    pub const fn pixels(self) -> u8 {
        match self {
            Self::K3 => 3,
            Self::K5 => 5,
            Self::K7 => 7,
            Self::K9 => 9,
        }
    }
}

impl From<KernelSize> for u8 {
    fn from(size: KernelSize) -> Self {
        size.pixels()
    }
}

impl TryFrom<u8> for KernelSize {
    type Error = ParamError;

    fn try_from(value: u8) -> Result<Self, ParamError> {
        match value {
            3 => Ok(Self::K3),
            5 => Ok(Self::K5),
            7 => Ok(Self::K7),
            9 => Ok(Self::K9),
            other => Err(ParamError::UnsupportedKernel(other)),
        }
    }
}

/// A rejected parameter value.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// Kernel size outside the accepted set.
    #[error("gaussian kernel size must be 3, 5, 7 or 9, got {0}")]
    UnsupportedKernel(u8),

    /// Sigma must be finite and non-negative.
    #[error("gaussian sigma must be a finite value >= 0, got {0}")]
    InvalidSigma(f32),
}

/// Canny threshold and Gaussian smoothing parameters.
///
/// Thresholds are hysteresis bounds on the 0-255 gradient scale; a sigma
/// of 0 lets the service derive it from the kernel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Weak-edge threshold, 0-255.
    pub lower_threshold: u8,
    /// Strong-edge threshold, 0-255.
    pub upper_threshold: u8,
    /// Gaussian kernel size.
    pub gaussian_size: KernelSize,
    /// Gaussian sigma.
    pub gaussian_sigma: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            lower_threshold: 100,
            upper_threshold: 200,
            gaussian_size: KernelSize::K5,
            gaussian_sigma: 0.0,
        }
    }
}

/// A single-field update to [`EdgeParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    /// Set the weak-edge threshold.
    LowerThreshold(u8),
    /// Set the strong-edge threshold.
    UpperThreshold(u8),
    /// Set the Gaussian kernel size.
    GaussianSize(KernelSize),
    /// Set the Gaussian sigma.
    GaussianSigma(f32),
}

impl EdgeParams {
    /// Apply one update, validating the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidSigma`] for a negative or non-finite
    /// sigma; the record is left unchanged.
    pub fn apply(&mut self, update: ParamUpdate) -> Result<(), ParamError> {
        match update {
            ParamUpdate::LowerThreshold(value) => self.lower_threshold = value,
            ParamUpdate::UpperThreshold(value) => self.upper_threshold = value,
            ParamUpdate::GaussianSize(size) => self.gaussian_size = size,
            ParamUpdate::GaussianSigma(sigma) => {
                if !sigma.is_finite() || sigma < 0.0 {
                    return Err(ParamError::InvalidSigma(sigma));
                }
                self.gaussian_sigma = sigma;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn wire_shape_matches_endpoint_contract() {
        // The endpoint expects the kernel size as a bare integer, not an
        // enum tag.
        let value = serde_json::to_value(EdgeParams::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "lower_threshold": 100,
                "upper_threshold": 200,
                "gaussian_size": 5,
                "gaussian_sigma": 0.0,
            })
        );
    }

    #[test]
    fn kernel_roundtrips_through_its_integer_size() {
        for size in KernelSize::ALL {
            assert_eq!(KernelSize::try_from(size.pixels()), Ok(size));
        }
        assert_eq!(
            KernelSize::try_from(4),
            Err(ParamError::UnsupportedKernel(4))
        );
    }

    #[test]
    fn kernel_deserializes_from_integer() {
        let params: EdgeParams = serde_json::from_str(
            r#"{"lower_threshold":10,"upper_threshold":20,"gaussian_size":9,"gaussian_sigma":1.5}"#,
        )
        .unwrap();
        assert_eq!(params.gaussian_size, KernelSize::K9);
        assert_eq!(params.gaussian_sigma, 1.5);
    }

    #[test]
    fn negative_sigma_is_rejected_and_record_unchanged() {
        let mut params = EdgeParams::default();
        let err = params.apply(ParamUpdate::GaussianSigma(-0.5));
        assert_eq!(err, Err(ParamError::InvalidSigma(-0.5)));
        assert_eq!(params, EdgeParams::default());
    }

    #[test]
    fn nan_sigma_is_rejected() {
        let mut params = EdgeParams::default();
        assert!(params.apply(ParamUpdate::GaussianSigma(f32::NAN)).is_err());
        assert_eq!(params.gaussian_sigma, 0.0);
    }

    #[test]
    fn threshold_updates_apply() {
        let mut params = EdgeParams::default();
        params.apply(ParamUpdate::LowerThreshold(50)).unwrap();
        params.apply(ParamUpdate::UpperThreshold(120)).unwrap();
        assert_eq!(params.lower_threshold, 50);
        assert_eq!(params.upper_threshold, 120);
    }
}
