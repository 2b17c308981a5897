use std::fmt;

use serde::Deserialize;

pub const NUM_LANDMARKS: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Normalized landmark position. `x` grows to the right and `y` grows
/// downwards, both in `[0, 1]` of the frame. `z` is carried but never read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn to_pixels(&self, frame: FrameSize) -> (f32, f32) {
        (self.x * frame.width as f32, self.y * frame.height as f32)
    }
}

/// Chirality as reported by the detector, already mirrored for a selfie view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FingerState {
    Extended,
    Folded,
}

impl FingerState {
    pub fn label(&self) -> &'static str {
        match self {
            FingerState::Extended => "extended",
            FingerState::Folded => "folded",
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, FingerState::Extended)
    }
}

impl From<bool> for FingerState {
    fn from(extended: bool) -> Self {
        if extended {
            FingerState::Extended
        } else {
            FingerState::Folded
        }
    }
}

/// One detected hand. The landmark count is not checked on construction;
/// counting rejects anything other than [`NUM_LANDMARKS`] points.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const DEFAULT: FrameSize = FrameSize {
        width: 1280,
        height: 720,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Falls back to `fallback` when either dimension is still unknown (zero),
    /// which is what a camera reports before its first frame.
    pub fn or(self, fallback: FrameSize) -> FrameSize {
        if self.width == 0 || self.height == 0 {
            fallback
        } else {
            self
        }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        FrameSize::DEFAULT
    }
}

/// Everything the detector reported for one camera frame, in detector order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<Hand>,
    pub size: FrameSize,
}

impl HandFrame {
    pub fn new(hands: Vec<Hand>, size: FrameSize) -> Self {
        Self { hands, size }
    }

    pub fn empty(size: FrameSize) -> Self {
        Self {
            hands: Vec::new(),
            size,
        }
    }
}
