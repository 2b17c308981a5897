pub mod readout;
pub mod session;
pub mod source;

// Re-exports for convenience
pub use readout::Readout;
pub use session::{CountingSession, SessionController, start_counting_session};
pub use source::{LandmarkSource, ReplaySource, SourceError};
