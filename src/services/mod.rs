// Analysis services

pub mod frame_pipeline;
pub mod geometry;
pub mod rep_analyzer;

pub use frame_pipeline::{AnalysisSnapshot, FramePipeline, PipelineStats};
pub use rep_analyzer::{RepAnalyzer, REQUIRED_LANDMARKS};
