use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use tally_core::{
    model::{FeedbackTier, Outcome, ProgressRecord, ReviewGrade, SessionStats, TrackerSettings},
    rollover::{Rollover, check_rollover},
    scoring::apply_answer,
    status::{StatusSummary, format_status},
    time::Clock,
    timer,
    undo::UndoLedger,
};
use storage::repository::{ProgressRecordRepository, Storage, StorageError};

use crate::error::TrackerError;
use crate::events::{EventOutcome, HostEvent, ReviewMode};
use crate::feedback::{FeedbackSink, NullFeedback};

//
// ─── ANSWER REPORT ─────────────────────────────────────────────────────────────
//

/// Result of applying one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    pub outcome: Outcome,
    /// Tier handed to the feedback sink; `None` for a miss.
    pub tier: Option<FeedbackTier>,
    /// Active time charged for the card just answered.
    pub charged: Duration,
    /// Whether the daily counters rolled over before the answer was applied.
    pub rolled_over: bool,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Progress engine for one host session.
///
/// Owns the live `SessionStats` and the undo history; the durable record is
/// read from and written to the config store on every event. Events must be
/// delivered serially, which `&mut self` on every handler enforces.
pub struct ProgressTracker {
    clock: Clock,
    settings: TrackerSettings,
    records: Arc<dyn ProgressRecordRepository>,
    feedback: Arc<dyn FeedbackSink>,
    stats: SessionStats,
    ledger: UndoLedger,
}

impl ProgressTracker {
    /// Create a tracker with default settings, real-time clock and no feedback cues.
    #[must_use]
    pub fn new(records: Arc<dyn ProgressRecordRepository>) -> Self {
        let clock = Clock::default();
        let settings = TrackerSettings::default();
        Self {
            stats: SessionStats::new(clock.now()),
            ledger: UndoLedger::new(settings.undo_capacity()),
            clock,
            settings,
            records,
            feedback: Arc::new(NullFeedback),
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.records))
    }

    /// Open (and migrate) a `SQLite` config store and build a tracker on it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Sqlite` if the store cannot be opened.
    pub async fn open_sqlite(database_url: &str) -> Result<Self, TrackerError> {
        let storage = Storage::sqlite(database_url).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Override the clock (usually for deterministic testing).
    ///
    /// Restarts the observation baseline at the new clock's current time.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.stats = SessionStats::new(clock.now());
        self
    }

    /// Replace the settings. Drops any undo history.
    #[must_use]
    pub fn with_settings(mut self, settings: TrackerSettings) -> Self {
        self.ledger = UndoLedger::new(settings.undo_capacity());
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Mutable access to the clock, for tests that step time forward.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Number of answers that can currently be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.ledger.len()
    }

    /// Load the persisted record, filling absent or malformed keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` for store failures other than an
    /// unreadable record body, which is treated as an empty record.
    pub async fn load_record(&self) -> Result<ProgressRecord, TrackerError> {
        let today = self.clock.today();
        match self.records.load_record().await {
            Ok(Some(map)) => {
                let defaulted = ProgressRecord::defaulted_keys(&map);
                if !defaulted.is_empty() {
                    debug!(?defaulted, "filled progress record keys with defaults");
                }
                Ok(ProgressRecord::from_persisted(&map, today))
            }
            Ok(None) => Ok(ProgressRecord::new(today)),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "progress record unreadable, starting from defaults");
                Ok(ProgressRecord::new(today))
            }
            Err(err) => Err(err.into()),
        }
    }

    //
    // ─── EVENTS ────────────────────────────────────────────────────────────────
    //

    /// Route a host event to its handler.
    ///
    /// # Errors
    ///
    /// Propagates `TrackerError` from the handler.
    pub async fn dispatch(&mut self, event: HostEvent) -> Result<EventOutcome, TrackerError> {
        match event {
            HostEvent::ReviewModeEntered { previous } => Ok(EventOutcome::ModeEntered {
                session_reset: self.on_review_mode_entered(previous),
            }),
            HostEvent::Answered(grade) => self.on_answer(grade).await.map(EventOutcome::Answered),
            HostEvent::UndoRequested => self
                .on_undo_requested()
                .await
                .map(|restored| EventOutcome::Undone { restored }),
            HostEvent::SessionClearRequested => {
                self.on_session_clear_requested();
                Ok(EventOutcome::Cleared)
            }
            HostEvent::RenderRequested => {
                self.on_render_requested().await.map(EventOutcome::Rendered)
            }
        }
    }

    /// The host switched into review mode. Returns whether the session restarted.
    ///
    /// The first entry always starts a session. Afterwards, staying in review
    /// mode (`previous == Review`) never restarts it, and other transitions
    /// restart it only when the reset policy asks for it.
    pub fn on_review_mode_entered(&mut self, previous: ReviewMode) -> bool {
        if !self.stats.is_started() {
            self.reset_session("first review session");
            return true;
        }
        if previous == ReviewMode::Review || !self.settings.reset_policy().reset_on_review_entry {
            return false;
        }
        self.reset_session("review mode entered");
        true
    }

    /// Apply an answered card to the session and the persisted record.
    ///
    /// Either the whole answer is applied (record saved, stats updated,
    /// snapshot kept) or, if the save fails, nothing but a rollover is.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the record cannot be loaded or saved.
    pub async fn on_answer(&mut self, grade: ReviewGrade) -> Result<AnswerReport, TrackerError> {
        let now = self.clock.now();
        let mut record = self.load_record().await?;
        let rolled_over = self.roll_over(&mut record).await?;

        let snapshot = (self.stats.clone(), record.clone());

        let mut stats = self.stats.clone();
        let charged = timer::advance(&mut stats, &mut record, now, self.settings.idle_cap());
        let outcome = Outcome::from_grade(grade);
        let tier = apply_answer(&mut stats, &mut record, outcome, self.settings.thresholds());
        self.save(&record).await?;

        self.stats = stats;
        self.ledger.push(&snapshot.0, &snapshot.1);

        if let Some(tier) = tier {
            debug!(?tier, streak = self.stats.current_streak, "feedback tier selected");
            self.feedback.emit(tier);
        }

        Ok(AnswerReport {
            outcome,
            tier,
            charged,
            rolled_over,
        })
    }

    /// Revert the most recent answer. Returns `false` when there is nothing to undo.
    ///
    /// If the restored record cannot be saved the snapshot goes back on the
    /// ledger. On success the observation baseline moves to now so the undo
    /// itself is not charged as active time.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the restored record cannot be saved.
    pub async fn on_undo_requested(&mut self) -> Result<bool, TrackerError> {
        let Some(entry) = self.ledger.pop() else {
            debug!("undo requested with empty history");
            return Ok(false);
        };
        if let Err(err) = self.save(entry.record()).await {
            // Cannot evict: the pop just freed a slot.
            self.ledger.push(entry.stats(), entry.record());
            return Err(err);
        }

        let (mut stats, _record) = entry.into_parts();
        stats.last_observation_time = self.clock.now();
        self.stats = stats;

        info!(remaining = self.ledger.len(), "undid last answer");
        Ok(true)
    }

    /// Explicit user request to start the session over.
    pub fn on_session_clear_requested(&mut self) {
        self.reset_session("clear requested");
    }

    /// Charge elapsed time and produce the status summary.
    ///
    /// Returns `None` until a session has started.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the record cannot be loaded or saved.
    pub async fn on_render_requested(&mut self) -> Result<Option<StatusSummary>, TrackerError> {
        if !self.stats.is_started() {
            return Ok(None);
        }

        let now = self.clock.now();
        let mut record = self.load_record().await?;
        self.roll_over(&mut record).await?;

        let mut stats = self.stats.clone();
        let charged = timer::advance(&mut stats, &mut record, now, self.settings.idle_cap());
        if charged > Duration::zero() {
            self.save(&record).await?;
        }
        self.stats = stats;

        Ok(Some(format_status(&self.stats, &record)))
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    /// Apply the daily rollover, persisting immediately when it resets.
    async fn roll_over(&mut self, record: &mut ProgressRecord) -> Result<bool, TrackerError> {
        let Rollover::Reset { previous } = check_rollover(record, self.clock.today()) else {
            return Ok(false);
        };
        self.save(record).await?;
        info!(%previous, today = %record.daily_date, "daily counters rolled over");

        if self.settings.reset_policy().reset_on_rollover {
            self.reset_session("day rolled over");
        }
        Ok(true)
    }

    fn reset_session(&mut self, reason: &'static str) {
        self.stats.reset(self.clock.now());
        self.ledger.clear();
        info!(reason, "session reset");
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), TrackerError> {
        self.records.save_record(&record.to_persisted()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use tally_core::time::fixed_clock;

    fn tracker() -> (ProgressTracker, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let tracker = ProgressTracker::new(Arc::new(repo.clone())).with_clock(fixed_clock());
        (tracker, repo)
    }

    #[tokio::test]
    async fn render_before_session_start_shows_nothing() {
        let (mut tracker, repo) = tracker();
        assert_eq!(tracker.on_render_requested().await.unwrap(), None);
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn staying_in_review_keeps_the_session() {
        let (mut tracker, _repo) = tracker();
        assert!(tracker.on_review_mode_entered(ReviewMode::Overview));
        tracker.on_answer(ReviewGrade::Good).await.unwrap();

        assert!(!tracker.on_review_mode_entered(ReviewMode::Review));
        assert_eq!(tracker.stats().current_streak, 1);
        assert_eq!(tracker.undo_depth(), 1);
    }

    #[tokio::test]
    async fn undo_on_empty_history_is_a_no_op() {
        let (mut tracker, repo) = tracker();
        assert!(!tracker.on_undo_requested().await.unwrap());
        assert_eq!(repo.save_count(), 0);
    }
}
