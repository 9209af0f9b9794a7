use anyhow::{Context, Result};
use clap::Args;
use squat_coach::{AnalysisSnapshot, RepAnalyzer, SessionState};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::config::Config;
use crate::recording::FrameReader;
use crate::ui::{self, SessionSummary};

#[derive(Args)]
pub struct ReplayCommand {
    /// Pose recording (JSON Lines, one frame per line)
    file: PathBuf,

    /// Print one JSON result per analyzed frame instead of status lines
    #[arg(long)]
    json: bool,

    /// Only print the session summary
    #[arg(short, long, conflicts_with = "json")]
    quiet: bool,
}

impl ReplayCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let file = File::open(&self.file)
            .with_context(|| format!("Failed to open recording {}", self.file.display()))?;

        let analyzer = RepAnalyzer::with_thresholds(config.thresholds)?;
        let mut state = SessionState::new();
        let mut summary = SessionSummary::default();

        for frame in FrameReader::new(BufReader::new(file)) {
            let frame = frame?;

            if !frame.has_pose() {
                tracing::debug!(frame_number = frame.frame_number, "No pose detected, skipping frame");
                summary.skipped_no_pose += 1;
                continue;
            }

            let result = match analyzer.analyze_frame(&frame, &mut state) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(frame_number = frame.frame_number, "Skipping frame: {}", e);
                    summary.skipped_missing_landmarks += 1;
                    continue;
                }
            };
            summary.record(&result);

            let snapshot = AnalysisSnapshot {
                frame_number: frame.frame_number,
                timestamp_ms: frame.timestamp_ms,
                result,
            };

            if self.json {
                println!("{}", serde_json::to_string(&snapshot)?);
            } else if !self.quiet {
                println!("{}", ui::format_snapshot(&snapshot, &config.display));
            }
        }

        summary.reps = state.rep_count;
        if !self.json {
            ui::print_summary(&summary);
        }

        Ok(())
    }
}
