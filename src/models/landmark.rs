/// Pose landmark models
///
/// Landmarks arrive from an external pose detector in the 33-point
/// full-body schema, normalized to image coordinates in [0, 1].

use serde::{Deserialize, Serialize};

/// Number of points in the full-body pose schema
pub const POSE_LANDMARK_COUNT: usize = 33;

/// A single detected body joint position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// X coordinate (normalized 0-1)
    pub x: f32,
    /// Y coordinate (normalized 0-1)
    pub y: f32,
    /// Depth relative to the hips; carried through, not used by analysis
    #[serde(default)]
    pub z: f32,
    /// Detector confidence that the joint is visible; carried through
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

fn default_visibility() -> f32 {
    1.0
}

impl LandmarkPoint {
    /// Create a landmark from its 2-D position
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for LandmarkPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Full-body pose schema indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Position of this joint in a frame
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }
}

/// Landmarks for one instant, as produced by the pose detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame number in capture order
    #[serde(default)]
    pub frame_number: u64,
    /// Capture timestamp in milliseconds
    #[serde(default)]
    pub timestamp_ms: u64,
    /// Source image width in pixels (used by overlays, not analysis)
    #[serde(default)]
    pub image_width: u32,
    /// Source image height in pixels (used by overlays, not analysis)
    #[serde(default)]
    pub image_height: u32,
    /// Whether the camera feed is mirrored (front-facing)
    #[serde(default)]
    pub is_mirrored: bool,
    /// Landmarks in schema order; empty when no person was detected
    #[serde(default)]
    pub landmarks: Vec<LandmarkPoint>,
}

impl PoseFrame {
    /// Create a new pose frame
    pub fn new(frame_number: u64, timestamp_ms: u64, landmarks: Vec<LandmarkPoint>) -> Self {
        Self {
            frame_number,
            timestamp_ms,
            image_width: 0,
            image_height: 0,
            is_mirrored: false,
            landmarks,
        }
    }

    /// Set the source image dimensions
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Mark the frame as coming from a mirrored camera
    pub fn mirrored(mut self, is_mirrored: bool) -> Self {
        self.is_mirrored = is_mirrored;
        self
    }

    /// The detector found a person in this frame
    pub fn has_pose(&self) -> bool {
        !self.landmarks.is_empty()
    }
}
