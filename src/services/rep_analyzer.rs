/// Squat Repetition Analyzer
///
/// Per-frame analysis of a squat session:
/// - Knee angles from hip/knee/ankle landmarks
/// - Descent progress (0-100) driven by the deeper leg
/// - Rep counting with hysteresis: either leg below the squat angle starts
///   a rep, both legs back above it completes one
/// - Inward-knee (valgus) fault detection during deep squats
///
/// The analyzer holds only configuration. Session counters live in a
/// `SessionState` the caller owns and passes into every call, in capture
/// order.

use tracing::{debug, info, trace, warn};

use crate::config::RepThresholds;
use crate::error::{AnalysisError, ConfigError};
use crate::models::{AnalysisResult, LandmarkPoint, LegSide, PoseFrame, PoseLandmark, SessionState};
use crate::services::geometry::{angle_at, horizontal_distance};

/// Landmarks up to and including the right ankle must be present
pub const REQUIRED_LANDMARKS: usize = PoseLandmark::RightAnkle.index() + 1;

/// Hip, knee and ankle of one leg
#[derive(Debug, Clone, Copy)]
struct Leg<'a> {
    hip: &'a LandmarkPoint,
    knee: &'a LandmarkPoint,
    ankle: &'a LandmarkPoint,
}

impl<'a> Leg<'a> {
    fn from_landmarks(landmarks: &'a [LandmarkPoint], side: LegSide) -> Self {
        let (hip, knee, ankle) = match side {
            LegSide::Left => (
                PoseLandmark::LeftHip,
                PoseLandmark::LeftKnee,
                PoseLandmark::LeftAnkle,
            ),
            LegSide::Right => (
                PoseLandmark::RightHip,
                PoseLandmark::RightKnee,
                PoseLandmark::RightAnkle,
            ),
        };

        Self {
            hip: &landmarks[hip.index()],
            knee: &landmarks[knee.index()],
            ankle: &landmarks[ankle.index()],
        }
    }

    fn knee_angle(&self) -> f64 {
        angle_at(self.hip, self.knee, self.ankle)
    }

    fn knee_hip_distance(&self) -> f64 {
        horizontal_distance(self.hip, self.knee)
    }
}

/// Squat repetition analyzer
#[derive(Debug, Clone, Default)]
pub struct RepAnalyzer {
    thresholds: RepThresholds,
}

impl RepAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom thresholds
    pub fn with_thresholds(thresholds: RepThresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &RepThresholds {
        &self.thresholds
    }

    /// Analyze one frame of landmarks and advance the session
    ///
    /// # Arguments
    /// * `landmarks` - Full-body landmarks in schema order
    /// * `is_mirrored` - Whether the camera feed is mirrored
    /// * `state` - Session counters, updated in place
    ///
    /// # Returns
    /// `MissingLandmarks` when the frame is too short to hold both legs; the
    /// session is left untouched. NaN angles never cross a threshold, so a
    /// corrupted frame yields a degenerate result without moving the session.
    pub fn analyze(
        &self,
        landmarks: &[LandmarkPoint],
        is_mirrored: bool,
        state: &mut SessionState,
    ) -> Result<AnalysisResult, AnalysisError> {
        if landmarks.len() < REQUIRED_LANDMARKS {
            return Err(AnalysisError::MissingLandmarks {
                found: landmarks.len(),
                required: REQUIRED_LANDMARKS,
            });
        }

        let left = Leg::from_landmarks(landmarks, LegSide::Left);
        let right = Leg::from_landmarks(landmarks, LegSide::Right);

        let left_knee_angle = left.knee_angle();
        let right_knee_angle = right.knee_angle();
        debug!(
            left_knee_angle,
            right_knee_angle, is_mirrored, "Computed knee angles"
        );

        let squat_progress_percent = self.squat_progress(left_knee_angle, right_knee_angle);
        self.update_rep_state(left_knee_angle, right_knee_angle, state);
        let (left_knee_inward, right_knee_inward) =
            self.check_knees_inward(&left, &right, left_knee_angle, right_knee_angle);

        let result = AnalysisResult {
            left_knee_angle_deg: left_knee_angle,
            right_knee_angle_deg: right_knee_angle,
            squat_progress_percent,
            rep_count: state.rep_count,
            form_fault: left_knee_inward || right_knee_inward,
            left_knee_inward,
            right_knee_inward,
        };

        if result.is_degenerate() {
            warn!(
                left_knee_angle,
                right_knee_angle, "Invalid geometry: knee angle could not be computed"
            );
        }

        Ok(result)
    }

    /// Analyze a detector frame; see [`RepAnalyzer::analyze`]
    pub fn analyze_frame(
        &self,
        frame: &PoseFrame,
        state: &mut SessionState,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze(&frame.landmarks, frame.is_mirrored, state)
    }

    /// Descent progress from the deeper of the two knees
    ///
    /// 0 while both legs are at or above the resting angle, 100 at the
    /// squat angle and below.
    pub fn squat_progress(&self, left_knee_angle: f64, right_knee_angle: f64) -> u8 {
        let resting = self.thresholds.resting_angle_deg;
        if !(left_knee_angle < resting || right_knee_angle < resting) {
            return 0;
        }

        // f64::min skips a NaN operand, so the computable leg drives the readout
        let min_angle = left_knee_angle.min(right_knee_angle);
        let progress =
            ((resting - min_angle) / self.thresholds.progress_span_deg() * 100.0).round();

        progress.clamp(0.0, 100.0) as u8
    }

    fn update_rep_state(&self, left_knee_angle: f64, right_knee_angle: f64, state: &mut SessionState) {
        let squat = self.thresholds.squat_angle_deg;
        let either_below = left_knee_angle < squat || right_knee_angle < squat;
        let both_above = left_knee_angle > squat && right_knee_angle > squat;

        if either_below && !state.in_rep_progress {
            state.in_rep_progress = true;
            trace!(rep_count = state.rep_count, "Squat descent started");
        } else if both_above && state.in_rep_progress {
            state.rep_count += 1;
            state.in_rep_progress = false;
            info!(rep_count = state.rep_count, "Squat rep completed");
        }
    }

    /// Per-side inward-knee flags, only evaluated during a deep squat
    fn check_knees_inward(
        &self,
        left: &Leg<'_>,
        right: &Leg<'_>,
        left_knee_angle: f64,
        right_knee_angle: f64,
    ) -> (bool, bool) {
        let gate = self.thresholds.fault_check_angle_deg;
        if !(left_knee_angle < gate || right_knee_angle < gate) {
            return (false, false);
        }

        let left_distance = left.knee_hip_distance();
        let right_distance = right.knee_hip_distance();
        debug!(left_distance, right_distance, "Knee distance from hip");

        let min_separation = self.thresholds.min_knee_hip_separation;
        let left_inward = left_distance < min_separation;
        let right_inward = right_distance < min_separation;
        debug!(left_inward, right_inward, "Knee inward check");

        (left_inward, right_inward)
    }
}
