use tally_core::model::ReviewGrade;
use tally_core::status::StatusSummary;

use crate::tracker::AnswerReport;

/// Host screen the user is on, as far as session resets are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    Review,
    Overview,
    DeckBrowser,
    Other,
}

/// The five host events the tracker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The host switched into review mode from `previous`.
    ReviewModeEntered { previous: ReviewMode },
    Answered(ReviewGrade),
    UndoRequested,
    SessionClearRequested,
    RenderRequested,
}

/// What handling a `HostEvent` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    ModeEntered { session_reset: bool },
    Answered(AnswerReport),
    Undone { restored: bool },
    Cleared,
    Rendered(Option<StatusSummary>),
}
