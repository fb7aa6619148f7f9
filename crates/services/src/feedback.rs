use std::sync::Mutex;

use tally_core::model::FeedbackTier;

/// Receives the tier selected for each correct answer.
///
/// Implementations decide what the cue is (sound, animation, nothing).
pub trait FeedbackSink: Send + Sync {
    fn emit(&self, tier: FeedbackTier);
}

/// Sink that drops every tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn emit(&self, _tier: FeedbackTier) {}
}

/// Sink that keeps every emitted tier, in order.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    tiers: Mutex<Vec<FeedbackTier>>,
}

impl RecordingFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiers emitted so far.
    #[must_use]
    pub fn tiers(&self) -> Vec<FeedbackTier> {
        self.tiers
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn emit(&self, tier: FeedbackTier) {
        if let Ok(mut guard) = self.tiers.lock() {
            guard.push(tier);
        }
    }
}
