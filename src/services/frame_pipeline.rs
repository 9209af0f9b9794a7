/// Live frame pipeline
///
/// Runs a `RepAnalyzer` on a dedicated tokio task that owns the session
/// state. Frames are handed over through a single-slot channel: a frame
/// that arrives before the previous one was picked up replaces it, so the
/// worker always analyzes the newest pose, one frame at a time, in
/// submission order. Results are published as whole snapshots through a
/// watch channel; readers never see a half-written result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::models::{AnalysisResult, PoseFrame, SessionState};
use crate::services::rep_analyzer::RepAnalyzer;

/// Latest published analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisSnapshot {
    pub frame_number: u64,
    pub timestamp_ms: u64,
    pub result: AnalysisResult,
}

/// Frame counters for a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Frames handed to `submit`
    pub submitted: u64,
    /// Frames that produced a result
    pub analyzed: u64,
    /// Analyzed frames whose knee angles could not be computed
    pub degenerate_frames: u64,
    /// Analyzed frames flagged with knees caving in
    pub fault_frames: u64,
    /// Frames without a detected person
    pub skipped_no_pose: u64,
    /// Frames too short to hold both legs
    pub skipped_missing_landmarks: u64,
}

impl PipelineStats {
    /// Frames replaced by a newer one before the worker reached them
    pub fn dropped(&self) -> u64 {
        self.submitted
            .saturating_sub(self.analyzed + self.skipped_no_pose + self.skipped_missing_landmarks)
    }
}

#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    analyzed: AtomicU64,
    degenerate_frames: AtomicU64,
    fault_frames: AtomicU64,
    skipped_no_pose: AtomicU64,
    skipped_missing_landmarks: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            analyzed: self.analyzed.load(Ordering::Relaxed),
            degenerate_frames: self.degenerate_frames.load(Ordering::Relaxed),
            fault_frames: self.fault_frames.load(Ordering::Relaxed),
            skipped_no_pose: self.skipped_no_pose.load(Ordering::Relaxed),
            skipped_missing_landmarks: self.skipped_missing_landmarks.load(Ordering::Relaxed),
        }
    }
}

/// Single-consumer analysis pipeline
pub struct FramePipeline {
    frames: watch::Sender<Option<PoseFrame>>,
    results: watch::Receiver<Option<AnalysisSnapshot>>,
    counters: Arc<Counters>,
    worker: JoinHandle<SessionState>,
}

impl FramePipeline {
    /// Start a worker for a new session
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(analyzer: RepAnalyzer) -> Self {
        let (frame_tx, frame_rx) = watch::channel(None);
        let (result_tx, result_rx) = watch::channel(None);
        let counters = Arc::new(Counters::default());

        let worker = tokio::spawn(run_worker(analyzer, frame_rx, result_tx, counters.clone()));
        info!("Squat session started");

        Self {
            frames: frame_tx,
            results: result_rx,
            counters,
            worker,
        }
    }

    /// Hand a frame to the worker, replacing any frame it has not picked up yet
    pub fn submit(&self, frame: PoseFrame) -> Result<(), PipelineError> {
        // Counted before the send so a fast worker never gets ahead of it
        self.counters.submitted.fetch_add(1, Ordering::Relaxed);
        self.frames.send(Some(frame)).map_err(|_| {
            self.counters.submitted.fetch_sub(1, Ordering::Relaxed);
            PipelineError::Closed
        })
    }

    /// A receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Option<AnalysisSnapshot>> {
        self.results.clone()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Option<AnalysisSnapshot> {
        *self.results.borrow()
    }

    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    /// Close the session and wait for the worker to drain
    ///
    /// A frame still waiting in the slot is analyzed before the worker exits.
    pub async fn finish(self) -> Result<(SessionState, PipelineStats), PipelineError> {
        drop(self.frames);

        let state = self
            .worker
            .await
            .map_err(|e| PipelineError::WorkerPanicked(e.to_string()))?;
        let stats = self.counters.snapshot();

        info!(
            rep_count = state.rep_count,
            analyzed = stats.analyzed,
            dropped = stats.dropped(),
            "Squat session ended"
        );

        Ok((state, stats))
    }
}

async fn run_worker(
    analyzer: RepAnalyzer,
    mut frames: watch::Receiver<Option<PoseFrame>>,
    results: watch::Sender<Option<AnalysisSnapshot>>,
    counters: Arc<Counters>,
) -> SessionState {
    let mut state = SessionState::new();

    while frames.changed().await.is_ok() {
        let latest = frames.borrow_and_update().clone();
        let Some(frame) = latest else {
            continue;
        };

        if !frame.has_pose() {
            debug!(frame_number = frame.frame_number, "No pose detected, skipping frame");
            counters.skipped_no_pose.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        match analyzer.analyze_frame(&frame, &mut state) {
            Ok(result) => {
                counters.analyzed.fetch_add(1, Ordering::Relaxed);
                if result.is_degenerate() {
                    counters.degenerate_frames.fetch_add(1, Ordering::Relaxed);
                }
                if result.form_fault {
                    counters.fault_frames.fetch_add(1, Ordering::Relaxed);
                }
                results.send_replace(Some(AnalysisSnapshot {
                    frame_number: frame.frame_number,
                    timestamp_ms: frame.timestamp_ms,
                    result,
                }));
            }
            Err(e) => {
                warn!(frame_number = frame.frame_number, "Skipping frame: {}", e);
                counters.skipped_missing_landmarks.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_frames() {
        let stats = PipelineStats {
            submitted: 10,
            analyzed: 6,
            degenerate_frames: 1,
            fault_frames: 2,
            skipped_no_pose: 1,
            skipped_missing_landmarks: 1,
        };
        assert_eq!(stats.dropped(), 2);
        assert_eq!(PipelineStats::default().dropped(), 0);
    }

    #[tokio::test]
    async fn test_finish_without_frames() {
        let pipeline = FramePipeline::spawn(RepAnalyzer::new());
        assert!(pipeline.latest().is_none());

        let (state, stats) = pipeline.finish().await.unwrap();

        assert_eq!(state, SessionState::new());
        assert_eq!(stats, PipelineStats::default());
    }
}
