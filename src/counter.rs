use thiserror::Error;

use crate::types::{
    FingerState, Hand, Handedness, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, NUM_LANDMARKS,
    PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_MCP, THUMB_TIP,
};

/// (tip, pip) pairs for index, middle, ring and pinky.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    #[error("invalid hand: expected {expected} landmarks, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
}

/// Per-digit result, thumb first, then index, middle, ring, pinky.
pub fn finger_states(hand: &Hand) -> Result<[FingerState; 5], CountError> {
    if hand.landmarks.len() != NUM_LANDMARKS {
        return Err(CountError::InvalidInput {
            expected: NUM_LANDMARKS,
            actual: hand.landmarks.len(),
        });
    }

    let points = &hand.landmarks;
    let mut states = [FingerState::Folded; 5];
    states[0] = classify_thumb(points[THUMB_TIP].x, points[THUMB_MCP].x, hand.handedness);
    for (slot, &(tip, pip)) in states[1..].iter_mut().zip(FINGER_JOINTS.iter()) {
        *slot = classify_finger(points[tip].y, points[pip].y);
    }

    Ok(states)
}

/// Number of extended fingers on one hand, in `0..=5`.
pub fn count_fingers(hand: &Hand) -> Result<u8, CountError> {
    let states = finger_states(hand)?;
    Ok(states.iter().filter(|state| state.is_extended()).count() as u8)
}

// Horizontal displacement only; hand rotation is ignored.
fn classify_thumb(tip_x: f32, mcp_x: f32, handedness: Handedness) -> FingerState {
    let extended = match handedness {
        Handedness::Right => tip_x > mcp_x,
        Handedness::Left => tip_x < mcp_x,
    };
    FingerState::from(extended)
}

// Image y grows downwards, so a raised tip has the smaller y.
fn classify_finger(tip_y: f32, pip_y: f32) -> FingerState {
    FingerState::from(tip_y < pip_y)
}
