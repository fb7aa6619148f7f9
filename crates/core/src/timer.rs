//! Active-time accounting between observations.

use chrono::{DateTime, Duration, Utc};

use crate::model::{ProgressRecord, SessionStats};

/// Longest gap, in seconds, charged for a single observation by default.
pub const DEFAULT_IDLE_CAP_SECS: i64 = 60;

/// Elapsed time between two observations, clamped to `[0, idle_cap]`.
///
/// A clock that moved backwards yields zero.
#[must_use]
pub fn clamp_elapsed(
    last_observation: DateTime<Utc>,
    now: DateTime<Utc>,
    idle_cap: Duration,
) -> Duration {
    now.signed_duration_since(last_observation)
        .min(idle_cap)
        .max(Duration::zero())
}

/// Charge the time since the last observation to both the session and today.
///
/// Returns the charged duration. Call before every scoring mutation and every
/// render so the two totals stay in step.
pub fn advance(
    stats: &mut SessionStats,
    record: &mut ProgressRecord,
    now: DateTime<Utc>,
    idle_cap: Duration,
) -> Duration {
    let elapsed = clamp_elapsed(stats.last_observation_time, now, idle_cap);
    stats.session_time_spent = saturating_add(stats.session_time_spent, elapsed);
    record.daily_time_spent = saturating_add(record.daily_time_spent, elapsed);
    stats.last_observation_time = now;
    elapsed
}

fn saturating_add(total: Duration, elapsed: Duration) -> Duration {
    total.checked_add(&elapsed).unwrap_or(Duration::MAX)
}
