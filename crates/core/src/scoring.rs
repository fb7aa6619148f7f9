//! Streak and accuracy bookkeeping for a single answer.

use crate::model::{FeedbackThresholds, FeedbackTier, Outcome, ProgressRecord, SessionStats};

/// Apply one answer to the session and the persisted record.
///
/// Returns the feedback tier for a correct answer and `None` for a miss.
/// The caller persists `record` afterwards in either case.
pub fn apply_answer(
    stats: &mut SessionStats,
    record: &mut ProgressRecord,
    outcome: Outcome,
    thresholds: &FeedbackThresholds,
) -> Option<FeedbackTier> {
    stats.session_total = stats.session_total.saturating_add(1);
    record.daily_reviews = record.daily_reviews.saturating_add(1);

    match outcome {
        Outcome::Correct => {
            stats.current_streak = stats.current_streak.saturating_add(1);
            stats.session_correct = stats.session_correct.saturating_add(1);
            stats.current_miss_streak = 0;
            record.daily_correct = record.daily_correct.saturating_add(1);

            record.best_streak = record.best_streak.max(stats.current_streak);
            record.daily_best_streak = record.daily_best_streak.max(stats.current_streak);

            Some(thresholds.tier_for(stats.current_streak))
        }
        Outcome::Incorrect => {
            stats.current_streak = 0;
            stats.current_miss_streak = stats.current_miss_streak.saturating_add(1);

            record.worst_miss_streak = record.worst_miss_streak.max(stats.current_miss_streak);
            record.daily_worst_miss_streak = record
                .daily_worst_miss_streak
                .max(stats.current_miss_streak);

            None
        }
    }
}
