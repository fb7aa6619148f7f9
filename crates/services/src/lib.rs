#![forbid(unsafe_code)]

pub mod error;
pub mod events;
pub mod feedback;
pub mod tracker;

pub use tally_core::Clock;

pub use error::TrackerError;
pub use events::{EventOutcome, HostEvent, ReviewMode};
pub use feedback::{FeedbackSink, NullFeedback, RecordingFeedback};
pub use tracker::{AnswerReport, ProgressTracker};
