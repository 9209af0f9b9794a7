use serde::{Deserialize, Serialize};

/// Squat hysteresis phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepPhase {
    Resting,
    Descending,
}

impl std::fmt::Display for RepPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepPhase::Resting => write!(f, "resting"),
            RepPhase::Descending => write!(f, "descending"),
        }
    }
}

/// Body side of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    Left,
    Right,
}

/// Per-session counters, owned by the caller and threaded through every
/// `RepAnalyzer::analyze` call for that session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub rep_count: u32,
    pub in_rep_progress: bool,
}

impl SessionState {
    /// Fresh session: no reps, standing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RepPhase {
        if self.in_rep_progress {
            RepPhase::Descending
        } else {
            RepPhase::Resting
        }
    }

    /// Return to the start-of-session values
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Skeleton line color the UI should draw for a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayColor {
    Neutral,
    Warning,
}

/// Outcome of analyzing one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub left_knee_angle_deg: f64,
    pub right_knee_angle_deg: f64,
    /// Descent progress, 0 (standing) to 100 (full depth)
    pub squat_progress_percent: u8,
    pub rep_count: u32,
    pub form_fault: bool,
    pub left_knee_inward: bool,
    pub right_knee_inward: bool,
}

impl AnalysisResult {
    /// A knee angle could not be computed (NaN or infinite landmark input)
    pub fn is_degenerate(&self) -> bool {
        !self.left_knee_angle_deg.is_finite() || !self.right_knee_angle_deg.is_finite()
    }

    pub fn overlay_color(&self) -> OverlayColor {
        if self.form_fault {
            OverlayColor::Warning
        } else {
            OverlayColor::Neutral
        }
    }
}
