use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;

/// Squat analysis thresholds
///
/// `squat_angle_deg` decides rep boundaries while `fault_check_angle_deg`
/// only gates the inward-knee check. They are tuned independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepThresholds {
    /// Knee angle above which the leg is straight
    #[serde(default = "default_resting_angle")]
    pub resting_angle_deg: f64,

    /// Knee angle below which the leg is at full squat depth
    #[serde(default = "default_squat_angle")]
    pub squat_angle_deg: f64,

    /// Knee angle below which the inward-knee check runs
    #[serde(default = "default_fault_check_angle")]
    pub fault_check_angle_deg: f64,

    /// Minimum knee-hip horizontal separation, normalized image units
    #[serde(default = "default_min_knee_hip_separation")]
    pub min_knee_hip_separation: f64,
}

pub const RESTING_ANGLE_ENV: &str = "SQUAT_RESTING_ANGLE_DEG";
pub const SQUAT_ANGLE_ENV: &str = "SQUAT_DEPTH_ANGLE_DEG";
pub const FAULT_CHECK_ANGLE_ENV: &str = "SQUAT_FAULT_CHECK_ANGLE_DEG";
pub const MIN_SEPARATION_ENV: &str = "SQUAT_MIN_KNEE_HIP_SEPARATION";

// Default value functions
fn default_resting_angle() -> f64 {
    170.0
}

fn default_squat_angle() -> f64 {
    90.0
}

fn default_fault_check_angle() -> f64 {
    140.0
}

fn default_min_knee_hip_separation() -> f64 {
    0.05
}

impl Default for RepThresholds {
    fn default() -> Self {
        Self {
            resting_angle_deg: default_resting_angle(),
            squat_angle_deg: default_squat_angle(),
            fault_check_angle_deg: default_fault_check_angle(),
            min_knee_hip_separation: default_min_knee_hip_separation(),
        }
    }
}

impl RepThresholds {
    /// Create thresholds from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let thresholds = Self {
            resting_angle_deg: env_or(RESTING_ANGLE_ENV, default_resting_angle())?,
            squat_angle_deg: env_or(SQUAT_ANGLE_ENV, default_squat_angle())?,
            fault_check_angle_deg: env_or(FAULT_CHECK_ANGLE_ENV, default_fault_check_angle())?,
            min_knee_hip_separation: env_or(
                MIN_SEPARATION_ENV,
                default_min_knee_hip_separation(),
            )?,
        };

        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that the thresholds describe a usable squat range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_angle("resting_angle_deg", self.resting_angle_deg)?;
        check_angle("squat_angle_deg", self.squat_angle_deg)?;
        check_angle("fault_check_angle_deg", self.fault_check_angle_deg)?;

        if self.squat_angle_deg >= self.resting_angle_deg {
            return Err(ConfigError::InvalidThreshold {
                name: "squat_angle_deg",
                reason: format!(
                    "must be below resting_angle_deg ({} >= {})",
                    self.squat_angle_deg, self.resting_angle_deg
                ),
            });
        }

        if !self.min_knee_hip_separation.is_finite() || self.min_knee_hip_separation < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "min_knee_hip_separation",
                reason: format!("must be a non-negative number, got {}", self.min_knee_hip_separation),
            });
        }

        Ok(())
    }

    /// Angle span covered by the progress readout
    pub fn progress_span_deg(&self) -> f64 {
        self.resting_angle_deg - self.squat_angle_deg
    }
}

fn check_angle(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 || value > 180.0 {
        return Err(ConfigError::InvalidThreshold {
            name,
            reason: format!("must be within (0, 180] degrees, got {}", value),
        });
    }
    Ok(())
}

fn env_or(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvValue { var, value }),
        Err(_) => Ok(default),
    }
}
