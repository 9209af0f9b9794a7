use anyhow::{Context, Result};
use clap::Args;
use squat_coach::{FramePipeline, RepAnalyzer};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::recording::parse_frame;
use crate::ui::{self, SessionSummary};

#[derive(Args)]
pub struct StreamCommand {
    /// Print one JSON result per published snapshot instead of status lines
    #[arg(long)]
    json: bool,
}

impl StreamCommand {
    /// Analyze frames arriving on stdin, showing only the freshest result
    pub async fn execute(self, config: &Config) -> Result<()> {
        let analyzer = RepAnalyzer::with_thresholds(config.thresholds)?;
        let pipeline = FramePipeline::spawn(analyzer);

        let mut results = pipeline.subscribe();
        let display = config.display.clone();
        let json = self.json;
        let printer = tokio::spawn(async move {
            while results.changed().await.is_ok() {
                let latest = *results.borrow_and_update();
                let Some(snapshot) = latest else {
                    continue;
                };

                if json {
                    match serde_json::to_string(&snapshot) {
                        Ok(line) => println!("{}", line),
                        Err(e) => tracing::error!("Failed to serialize result: {}", e),
                    }
                } else {
                    println!("{}", ui::format_snapshot(&snapshot, &display));
                }
            }
        });

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut line_number = 0;
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            pipeline.submit(parse_frame(&line, line_number)?)?;
        }

        let (state, stats) = pipeline.finish().await?;
        printer.await.context("Result printer failed")?;
        let summary = SessionSummary::from_pipeline(state.rep_count, &stats);

        if !self.json {
            ui::print_summary(&summary);
        }

        Ok(())
    }
}
