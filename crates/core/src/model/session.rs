use chrono::{DateTime, Duration, Utc};

/// In-memory counters for the current review session.
///
/// Owned by the tracker for the lifetime of the host process. None of these
/// values are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub current_streak: u32,
    pub current_miss_streak: u32,
    pub session_correct: u32,
    pub session_total: u32,
    pub session_time_spent: Duration,
    pub last_observation_time: DateTime<Utc>,
    /// When the current session began; `None` until review mode is first entered.
    pub started_at: Option<DateTime<Utc>>,
}

impl SessionStats {
    /// Zeroed counters for a tracker that has not started a session yet.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            current_miss_streak: 0,
            session_correct: 0,
            session_total: 0,
            session_time_spent: Duration::zero(),
            last_observation_time: now,
            started_at: None,
        }
    }

    /// Zeroed counters for a session starting at `now`.
    #[must_use]
    pub fn started(now: DateTime<Utc>) -> Self {
        Self {
            started_at: Some(now),
            ..Self::new(now)
        }
    }

    /// Zero every session counter and restart the session at `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::started(now);
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Session accuracy as a truncated whole percentage (0 when nothing was answered).
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        super::percent(self.session_correct, self.session_total)
    }
}
