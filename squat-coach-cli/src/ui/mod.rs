use colored::{ColoredString, Colorize};
use squat_coach::{AnalysisResult, AnalysisSnapshot, OverlayColor, PipelineStats};

use crate::config::DisplayConfig;

/// Session totals printed after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub reps: u32,
    pub frames_analyzed: u64,
    pub skipped_no_pose: u64,
    pub skipped_missing_landmarks: u64,
    pub dropped: u64,
    pub degenerate_frames: u64,
    pub fault_frames: u64,
}

impl SessionSummary {
    /// Account for one analyzed frame
    pub fn record(&mut self, result: &AnalysisResult) {
        self.frames_analyzed += 1;
        self.reps = result.rep_count;
        if result.is_degenerate() {
            self.degenerate_frames += 1;
        }
        if result.form_fault {
            self.fault_frames += 1;
        }
    }

    /// Totals of a pipeline run, where not every result reaches the display
    pub fn from_pipeline(reps: u32, stats: &PipelineStats) -> Self {
        Self {
            reps,
            frames_analyzed: stats.analyzed,
            skipped_no_pose: stats.skipped_no_pose,
            skipped_missing_landmarks: stats.skipped_missing_landmarks,
            dropped: stats.dropped(),
            degenerate_frames: stats.degenerate_frames,
            fault_frames: stats.fault_frames,
        }
    }
}

/// Apply the color preference for this process
pub fn init_colors(display: &DisplayConfig) {
    if !display.color {
        colored::control::set_override(false);
    }
}

/// Progress bar filled in proportion to `percent`
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = (percent * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn paint(text: String, color: OverlayColor) -> ColoredString {
    match color {
        OverlayColor::Warning => text.red().bold(),
        OverlayColor::Neutral => text.yellow(),
    }
}

/// One status line for an analyzed frame
pub fn format_snapshot(snapshot: &AnalysisSnapshot, display: &DisplayConfig) -> String {
    let result = &snapshot.result;
    let bar = render_progress_bar(result.squat_progress_percent, display.progress_bar_width);

    let knees = if result.is_degenerate() {
        "knees: n/a".to_string()
    } else {
        format!(
            "knees L {:>5.1}° R {:>5.1}°",
            result.left_knee_angle_deg, result.right_knee_angle_deg
        )
    };

    let form = if result.form_fault {
        "KNEES IN".to_string()
    } else {
        "ok".to_string()
    };

    format!(
        "#{:05} {} {:>3}%  reps: {:<3} {}  {}",
        snapshot.frame_number,
        paint(bar, result.overlay_color()),
        result.squat_progress_percent,
        result.rep_count.to_string().bold(),
        knees,
        paint(form, result.overlay_color()),
    )
}

pub fn print_summary(summary: &SessionSummary) {
    println!();
    println!("Session Summary");
    println!("────────────────────────────────");
    println!("Reps: {}", summary.reps.to_string().green().bold());
    println!("Frames analyzed: {}", summary.frames_analyzed);
    println!("Skipped (no pose): {}", summary.skipped_no_pose);
    println!("Skipped (missing landmarks): {}", summary.skipped_missing_landmarks);
    if summary.dropped > 0 {
        println!("Dropped (superseded): {}", summary.dropped);
    }
    println!("Frames with invalid geometry: {}", summary.degenerate_frames);
    println!("Frames with knees caving in: {}", summary.fault_frames);
}
