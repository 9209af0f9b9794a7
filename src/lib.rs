//! Squat coach core
//!
//! Turns a stream of full-body pose landmark frames into a running squat
//! repetition count, a 0-100 descent progress readout and an inward-knee
//! form fault flag.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::RepThresholds;
pub use error::{AnalysisError, ConfigError, PipelineError};
pub use models::{
    AnalysisResult, LandmarkPoint, LegSide, OverlayColor, PoseFrame, PoseLandmark, RepPhase,
    SessionState,
};
pub use services::{AnalysisSnapshot, FramePipeline, PipelineStats, RepAnalyzer};
