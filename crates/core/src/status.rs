//! Read-only status summary shown before each card.

use std::fmt;

use chrono::Duration;

use crate::model::{ProgressRecord, SessionStats};

/// Either the running streak or, after a miss, the running miss count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakDisplay {
    Streak(u32),
    Misses(u32),
}

/// Presentation-agnostic snapshot of session and daily progress.
///
/// Strings are pre-formatted only where the format is part of the banner's
/// contract (the clocks); everything else is left as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    /// Active session time as `MM:SS`.
    pub session_clock: String,
    pub streak: StreakDisplay,
    pub session_percent: u32,

    /// Today's active time, `"{h}h {m}m"` or `"{m}m {s}s"`.
    pub daily_time: String,
    pub daily_reviews: u32,
    pub daily_percent: u32,
    pub daily_best_streak: u32,
    pub daily_worst_miss_streak: u32,

    pub best_streak: u32,
    pub worst_miss_streak: u32,
}

/// Build the status summary from the live session and today's record.
#[must_use]
pub fn format_status(stats: &SessionStats, record: &ProgressRecord) -> StatusSummary {
    let streak = if stats.current_miss_streak > 0 {
        StreakDisplay::Misses(stats.current_miss_streak)
    } else {
        StreakDisplay::Streak(stats.current_streak)
    };

    StatusSummary {
        session_clock: format_session_clock(stats.session_time_spent),
        streak,
        session_percent: stats.accuracy_percent(),
        daily_time: format_daily_time(record.daily_time_spent),
        daily_reviews: record.daily_reviews,
        daily_percent: record.daily_accuracy_percent(),
        daily_best_streak: record.daily_best_streak,
        daily_worst_miss_streak: record.daily_worst_miss_streak,
        best_streak: record.best_streak,
        worst_miss_streak: record.worst_miss_streak,
    }
}

/// `MM:SS`, with minutes allowed to grow past two digits.
#[must_use]
pub fn format_session_clock(spent: Duration) -> String {
    let total = spent.num_seconds().max(0);
    let (mins, secs) = (total / 60, total % 60);
    format!("{mins:02}:{secs:02}")
}

/// `"{h}h {m}m"` from one hour upwards, `"{m}m {s}s"` below.
#[must_use]
pub fn format_daily_time(spent: Duration) -> String {
    let total = spent.num_seconds().max(0);
    let (hours, rem) = (total / 3600, total % 3600);
    let (mins, secs) = (rem / 60, rem % 60);
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m {secs}s")
    }
}

impl fmt::Display for StreakDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakDisplay::Streak(n) => write!(f, "Streak: {n}"),
            StreakDisplay::Misses(n) => write!(f, "Misses: {n}"),
        }
    }
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | Session: {}% || Today: {} | {} reviews | {}% correct | best {} | worst {} || All-time best {} | worst misses {}",
            self.session_clock,
            self.streak,
            self.session_percent,
            self.daily_time,
            self.daily_reviews,
            self.daily_percent,
            self.daily_best_streak,
            self.daily_worst_miss_streak,
            self.best_streak,
            self.worst_miss_streak,
        )
    }
}
