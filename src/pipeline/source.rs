use std::{io::BufRead, time::Duration};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::DetectorOptions,
    types::{FrameSize, Hand, HandFrame, Handedness, Landmark},
};

/// How long a channel-backed source waits before reporting [`SourceError::Idle`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Supplies detector output one frame at a time.
///
/// `Ok(None)` means the source is exhausted and the session should end.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no frame available yet")]
    Idle,
    #[error("failed to read detector output: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed detector output on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Whether the next call may still yield frames.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceError::Idle | SourceError::Malformed { .. })
    }
}

/// Callback-style detectors push each result into the paired `Sender`.
impl LandmarkSource for Receiver<HandFrame> {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, SourceError> {
        match self.recv_timeout(POLL_INTERVAL) {
            Ok(frame) => Ok(Some(frame)),
            Err(RecvTimeoutError::Timeout) => Err(SourceError::Idle),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: Handedness,
    #[serde(default = "full_score")]
    score: f32,
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize, Debug)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<HandJson>,
}

fn full_score() -> f32 {
    1.0
}

/// Replays recorded detector output, one JSON object per line, and applies
/// the detector's confidence threshold and hand limit.
pub struct ReplaySource<R> {
    reader: R,
    options: DetectorOptions,
    frame_size: FrameSize,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R, options: DetectorOptions, frame_size: FrameSize) -> Self {
        Self {
            reader,
            options,
            frame_size,
            line: 0,
            buf: Vec::new(),
        }
    }

    fn decode(&self, raw: &[u8]) -> Result<HandFrame, SourceError> {
        let frame: FrameJson = serde_json::from_slice(raw).map_err(|source| {
            SourceError::Malformed {
                line: self.line,
                source,
            }
        })?;

        let hands = frame
            .hands
            .into_iter()
            .filter(|hand| {
                let keep = hand.score >= self.options.min_detection_confidence;
                if !keep {
                    log::debug!(
                        "line {}: dropping {} hand below confidence ({:.2})",
                        self.line,
                        hand.handedness,
                        hand.score
                    );
                }
                keep
            })
            .take(self.options.max_num_hands)
            .map(|hand| Hand::new(hand.landmarks, hand.handedness))
            .collect();

        Ok(HandFrame::new(hands, self.frame_size))
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, SourceError> {
        loop {
            self.buf.clear();
            // Bytes, not `read_line`: a line that is not UTF-8 is malformed, not fatal.
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let raw = self.buf.trim_ascii();
            if raw.is_empty() {
                continue;
            }
            return self.decode(raw).map(Some);
        }
    }
}
