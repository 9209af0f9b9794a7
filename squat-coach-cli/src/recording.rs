//! JSON Lines pose recordings: one `PoseFrame` object per line.

use anyhow::{Context, Result};
use squat_coach::PoseFrame;
use std::io::BufRead;

/// Iterator over the frames of a recording
pub struct FrameReader<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<PoseFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            self.line_number += 1;

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("Failed to read line {}", self.line_number)),
                    )
                }
            }

            if self.buffer.trim().is_empty() {
                continue;
            }

            return Some(parse_frame(&self.buffer, self.line_number));
        }
    }
}

/// Parse one recording line
pub fn parse_frame(line: &str, line_number: usize) -> Result<PoseFrame> {
    serde_json::from_str(line.trim())
        .with_context(|| format!("Invalid pose frame on line {}", line_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let input = "{\"frame_number\": 1, \"landmarks\": []}\n\n   \n{\"frame_number\": 2, \"landmarks\": [{\"x\": 0.1, \"y\": 0.2}]}\n";
        let frames: Vec<PoseFrame> = FrameReader::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].frame_number, 1);
        assert!(!frames[0].has_pose());
        assert_eq!(frames[1].landmarks.len(), 1);
    }

    #[test]
    fn test_reports_line_number_of_bad_frame() {
        let input = "{\"landmarks\": []}\nnot json\n";
        let mut reader = FrameReader::new(Cursor::new(input));

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
