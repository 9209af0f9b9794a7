use thiserror::Error;

/// Reasons a frame could not be analyzed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Missing landmarks: frame has {found} points, at least {required} required")]
    MissingLandmarks { found: usize, required: usize },
}

/// Threshold configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid threshold {name}: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnvValue { var: &'static str, value: String },
}

/// Frame pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Frame pipeline is closed")]
    Closed,

    #[error("Frame pipeline worker failed: {0}")]
    WorkerPanicked(String),
}
