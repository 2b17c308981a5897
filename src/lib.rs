//! Counts extended fingers on hands reported by an external landmark
//! detector.
//!
//! Detection itself lives outside this crate: a [`pipeline::LandmarkSource`]
//! hands over one frame of landmarks at a time, [`counter`] classifies each
//! digit of each hand, and [`tally`] sums the hands of a frame into the text
//! shown to the user.

pub mod config;
pub mod counter;
pub mod pipeline;
pub mod tally;
pub mod types;

pub use config::{Config, DetectorOptions};
pub use counter::{CountError, count_fingers, finger_states};
pub use tally::{FrameReport, HandCount, tally_frame};
pub use types::{FingerState, FrameSize, Hand, HandFrame, Handedness, Landmark};
