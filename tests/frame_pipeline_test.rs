/// Integration tests for FramePipeline
///
/// Tests cover:
/// - Sequential analysis of a live session
/// - Frames without a pose or with missing landmarks
/// - Fault and invalid-geometry totals counted by the worker
/// - Keep-latest hand-over when frames arrive faster than analysis
mod common;

use std::time::Duration;

use common::{frame, init_test_logging, left_leg_rep, pose_with_knee_angles, pose_with_legs, LegPose};
use squat_coach::models::{LandmarkPoint, PoseFrame, PoseLandmark};
use squat_coach::{AnalysisSnapshot, FramePipeline, RepAnalyzer};
use tokio::sync::watch;
use tokio::time::timeout;

/// Submit a frame and wait until its analysis is published
async fn submit_and_wait(
    pipeline: &FramePipeline,
    results: &mut watch::Receiver<Option<AnalysisSnapshot>>,
    detector_frame: PoseFrame,
) -> AnalysisSnapshot {
    let frame_number = detector_frame.frame_number;
    pipeline.submit(detector_frame).unwrap();

    timeout(Duration::from_secs(5), async {
        loop {
            results.changed().await.expect("pipeline worker stopped");
            if let Some(snapshot) = *results.borrow_and_update() {
                if snapshot.frame_number == frame_number {
                    return snapshot;
                }
            }
        }
    })
    .await
    .expect("timed out waiting for analysis")
}

#[tokio::test]
async fn test_pipeline_counts_rep() {
    init_test_logging();
    let pipeline = FramePipeline::spawn(RepAnalyzer::new());
    let mut results = pipeline.subscribe();

    let mut counts = Vec::new();
    for (i, landmarks) in left_leg_rep().into_iter().enumerate() {
        let snapshot = submit_and_wait(&pipeline, &mut results, frame(i as u64, landmarks)).await;
        counts.push(snapshot.result.rep_count);
    }

    assert_eq!(counts, vec![0, 0, 0, 0, 0, 1, 1, 1, 1]);
    assert_eq!(pipeline.latest().unwrap().frame_number, 8);

    let (state, stats) = pipeline.finish().await.unwrap();
    assert_eq!(state.rep_count, 1);
    assert!(!state.in_rep_progress);
    assert_eq!(stats.submitted, 9);
    assert_eq!(stats.analyzed, 9);
    assert_eq!(stats.dropped(), 0);
}

#[tokio::test]
async fn test_pipeline_skips_frames_without_pose() {
    let pipeline = FramePipeline::spawn(RepAnalyzer::new());
    let mut results = pipeline.subscribe();

    submit_and_wait(&pipeline, &mut results, frame(0, pose_with_knee_angles(70.0, 70.0))).await;

    pipeline.submit(frame(1, Vec::new())).unwrap();
    let (state, stats) = pipeline.finish().await.unwrap();

    assert!(state.in_rep_progress);
    assert_eq!(state.rep_count, 0);
    assert_eq!(stats.analyzed, 1);
    assert_eq!(stats.skipped_no_pose, 1);
    assert_eq!(results.borrow().unwrap().frame_number, 0);
}

#[tokio::test]
async fn test_pipeline_skips_short_frames() {
    let pipeline = FramePipeline::spawn(RepAnalyzer::new());
    let results = pipeline.subscribe();

    let short = pose_with_knee_angles(70.0, 70.0)[..20].to_vec();
    pipeline.submit(frame(0, short)).unwrap();
    let (state, stats) = pipeline.finish().await.unwrap();

    assert_eq!(state.rep_count, 0);
    assert!(!state.in_rep_progress);
    assert_eq!(stats.skipped_missing_landmarks, 1);
    assert_eq!(stats.analyzed, 0);
    assert!(results.borrow().is_none());
}

#[tokio::test]
async fn test_pipeline_keeps_only_latest_frame() {
    let pipeline = FramePipeline::spawn(RepAnalyzer::new());
    let results = pipeline.subscribe();

    // Burst of frames without yielding to the worker
    for i in 0..50u64 {
        let angle = if i % 2 == 0 { 170.0 } else { 120.0 };
        pipeline.submit(frame(i, pose_with_knee_angles(angle, angle))).unwrap();
    }

    let (_, stats) = pipeline.finish().await.unwrap();

    assert_eq!(stats.submitted, 50);
    assert!(stats.analyzed >= 1);
    assert_eq!(stats.analyzed + stats.dropped(), 50);
    // The newest frame is always analyzed
    assert_eq!(results.borrow().unwrap().frame_number, 49);
}

#[tokio::test]
async fn test_pipeline_counts_faults_and_invalid_geometry() {
    let pipeline = FramePipeline::spawn(RepAnalyzer::new());
    let mut results = pipeline.subscribe();

    let caving = pose_with_legs(LegPose::left(100.0).with_separation(0.02), LegPose::right(120.0));
    let mut corrupted = pose_with_knee_angles(170.0, 170.0);
    corrupted[PoseLandmark::LeftAnkle.index()] = LandmarkPoint::new(f32::INFINITY, 0.9);

    submit_and_wait(&pipeline, &mut results, frame(0, caving.clone())).await;
    submit_and_wait(&pipeline, &mut results, frame(1, pose_with_knee_angles(120.0, 120.0))).await;
    submit_and_wait(&pipeline, &mut results, frame(2, corrupted)).await;
    submit_and_wait(&pipeline, &mut results, frame(3, caving)).await;

    let (_, stats) = pipeline.finish().await.unwrap();

    assert_eq!(stats.analyzed, 4);
    assert_eq!(stats.fault_frames, 2);
    assert_eq!(stats.degenerate_frames, 1);
}
