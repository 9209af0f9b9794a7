// Shared fixtures for squat analysis tests
#![allow(dead_code)]

use squat_coach::models::{LandmarkPoint, PoseFrame, PoseLandmark, POSE_LANDMARK_COUNT};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Geometry of one leg in a synthetic pose
#[derive(Debug, Clone, Copy)]
pub struct LegPose {
    /// Knee x position (normalized)
    pub knee_x: f32,
    /// Signed horizontal offset from knee to hip
    pub hip_offset_x: f32,
    /// Desired knee angle in degrees
    pub knee_angle_deg: f64,
}

impl LegPose {
    pub fn left(knee_angle_deg: f64) -> Self {
        Self {
            knee_x: 0.40,
            hip_offset_x: 0.10,
            knee_angle_deg,
        }
    }

    pub fn right(knee_angle_deg: f64) -> Self {
        Self {
            knee_x: 0.60,
            hip_offset_x: -0.10,
            knee_angle_deg,
        }
    }

    /// Knee-hip horizontal separation
    pub fn with_separation(mut self, separation: f32) -> Self {
        self.hip_offset_x = separation.copysign(self.hip_offset_x);
        self
    }

    /// Hip, knee, ankle positions producing the requested knee angle
    fn points(&self) -> (LandmarkPoint, LandmarkPoint, LandmarkPoint) {
        let knee = (f64::from(self.knee_x), 0.70_f64);
        let hip = (knee.0 + f64::from(self.hip_offset_x), 0.45_f64);

        // Rotate the knee->hip ray by the knee angle to place the ankle
        let (ux, uy) = (hip.0 - knee.0, hip.1 - knee.1);
        let len = (ux * ux + uy * uy).sqrt();
        let theta = self.knee_angle_deg.to_radians();
        let (sin, cos) = theta.sin_cos();
        let shin = 0.25 / len;
        let ankle = (
            knee.0 + (ux * cos - uy * sin) * shin,
            knee.1 + (ux * sin + uy * cos) * shin,
        );

        (
            LandmarkPoint::new(hip.0 as f32, hip.1 as f32),
            LandmarkPoint::new(knee.0 as f32, knee.1 as f32),
            LandmarkPoint::new(ankle.0 as f32, ankle.1 as f32),
        )
    }
}

/// Full 33-point pose with the given legs
pub fn pose_with_legs(left: LegPose, right: LegPose) -> Vec<LandmarkPoint> {
    let mut landmarks = vec![LandmarkPoint::new(0.5, 0.3); POSE_LANDMARK_COUNT];

    let (hip, knee, ankle) = left.points();
    landmarks[PoseLandmark::LeftHip.index()] = hip;
    landmarks[PoseLandmark::LeftKnee.index()] = knee;
    landmarks[PoseLandmark::LeftAnkle.index()] = ankle;

    let (hip, knee, ankle) = right.points();
    landmarks[PoseLandmark::RightHip.index()] = hip;
    landmarks[PoseLandmark::RightKnee.index()] = knee;
    landmarks[PoseLandmark::RightAnkle.index()] = ankle;

    landmarks
}

/// Full pose with default stance width and the given knee angles
pub fn pose_with_knee_angles(left_deg: f64, right_deg: f64) -> Vec<LandmarkPoint> {
    pose_with_legs(LegPose::left(left_deg), LegPose::right(right_deg))
}

/// Detector frame wrapping a pose
pub fn frame(frame_number: u64, landmarks: Vec<LandmarkPoint>) -> PoseFrame {
    PoseFrame::new(frame_number, frame_number * 33, landmarks).with_image_size(640, 480)
}

/// Left knee goes 180 -> 60 -> 180 while the right leg stays straight
pub fn left_leg_rep() -> Vec<Vec<LandmarkPoint>> {
    [180.0, 150.0, 120.0, 95.0, 60.0, 95.0, 120.0, 150.0, 180.0]
        .iter()
        .map(|&angle| pose_with_knee_angles(angle, 180.0))
        .collect()
}
