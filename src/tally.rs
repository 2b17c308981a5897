use crate::{
    counter::{CountError, finger_states},
    types::{FingerState, FrameSize, Hand, Handedness, WRIST},
};

/// Caption offset from the wrist, in pixels.
const LABEL_OFFSET: (i32, i32) = (-40, -20);

#[derive(Clone, Debug, PartialEq)]
pub struct HandCount {
    pub handedness: Handedness,
    pub count: u8,
    pub finger_states: [FingerState; 5],
    /// Pixel position for the per-hand caption, just above the wrist.
    pub label_anchor: (i32, i32),
}

impl HandCount {
    pub fn line(&self) -> String {
        format!("{} hand: {}", self.handedness, self.count)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub total: u32,
    pub hands: Vec<HandCount>,
    pub skipped: Vec<CountError>,
}

impl FrameReport {
    pub fn total_text(&self) -> String {
        format!("Total: {}", self.total)
    }

    pub fn per_hand_lines(&self) -> Vec<String> {
        self.hands.iter().map(HandCount::line).collect()
    }

    pub fn per_hand_text(&self) -> String {
        self.per_hand_lines().join("\n")
    }
}

/// Counts every hand of one frame independently and sums the results.
///
/// Hands that fail validation are left out of both the total and the
/// per-hand list and recorded in [`FrameReport::skipped`]; the rest of the
/// frame is still counted.
pub fn tally_frame(hands: &[Hand], frame: FrameSize) -> FrameReport {
    let mut report = FrameReport::default();

    for (index, hand) in hands.iter().enumerate() {
        let states = match finger_states(hand) {
            Ok(states) => states,
            Err(err) => {
                log::warn!("skipping hand {index} ({}): {err}", hand.handedness);
                report.skipped.push(err);
                continue;
            }
        };

        let count = states.iter().filter(|state| state.is_extended()).count() as u8;
        report.total += u32::from(count);
        report.hands.push(HandCount {
            handedness: hand.handedness,
            count,
            finger_states: states,
            label_anchor: label_anchor(hand, frame),
        });
    }

    report
}

fn label_anchor(hand: &Hand, frame: FrameSize) -> (i32, i32) {
    let (x, y) = hand.landmarks[WRIST].to_pixels(frame);
    (x as i32 + LABEL_OFFSET.0, y as i32 + LABEL_OFFSET.1)
}
