use crate::tally::FrameReport;

/// The two text fields shown next to the video: the frame total and one
/// line per detected hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    pub total: String,
    pub per_hand: String,
}

impl Default for Readout {
    fn default() -> Self {
        Self {
            total: FrameReport::default().total_text(),
            per_hand: String::new(),
        }
    }
}

impl Readout {
    /// Replaces both fields with the latest frame.
    pub fn apply(&mut self, report: &FrameReport) {
        self.total = report.total_text();
        self.per_hand = report.per_hand_text();
    }

    pub fn reset(&mut self) {
        *self = Readout::default();
    }
}
