use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::model::FeedbackThresholds;
use crate::timer::DEFAULT_IDLE_CAP_SECS;
use crate::undo::DEFAULT_UNDO_CAPACITY;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("idle cap must be a positive number of seconds, got {0}")]
    IdleCapNotPositive(i64),
    #[error("undo capacity must be at least 1")]
    UndoCapacityZero,
    #[error("feedback thresholds must be strictly ascending and non-zero: {0:?}")]
    ThresholdsNotAscending([u32; 3]),
}

/// Which triggers, besides an explicit clear, restart the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SessionResetPolicy {
    /// Restart when the host switches into review mode from another mode.
    pub reset_on_review_entry: bool,
    /// Restart (and drop the undo history) when the daily counters roll over.
    pub reset_on_rollover: bool,
}

impl Default for SessionResetPolicy {
    fn default() -> Self {
        Self {
            reset_on_review_entry: true,
            reset_on_rollover: true,
        }
    }
}

/// Validated tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    idle_cap: Duration,
    undo_capacity: usize,
    thresholds: FeedbackThresholds,
    reset_policy: SessionResetPolicy,
}

/// Unvalidated tracker configuration, as a host might deserialize it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrackerSettingsDraft {
    pub idle_cap_secs: Option<i64>,
    pub undo_capacity: Option<usize>,
    pub feedback_thresholds: Option<[u32; 3]>,
    pub reset_policy: Option<SessionResetPolicy>,
}

impl TrackerSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the idle cap is not positive, the undo
    /// capacity is zero, or the thresholds are not strictly ascending.
    pub fn validate(self) -> Result<TrackerSettings, SettingsError> {
        let idle_cap_secs = self.idle_cap_secs.unwrap_or(DEFAULT_IDLE_CAP_SECS);
        if idle_cap_secs <= 0 {
            return Err(SettingsError::IdleCapNotPositive(idle_cap_secs));
        }
        let idle_cap = Duration::try_seconds(idle_cap_secs)
            .ok_or(SettingsError::IdleCapNotPositive(idle_cap_secs))?;

        let undo_capacity = self.undo_capacity.unwrap_or(DEFAULT_UNDO_CAPACITY);
        if undo_capacity == 0 {
            return Err(SettingsError::UndoCapacityZero);
        }

        let thresholds = match self.feedback_thresholds {
            Some(raw @ [tier1, tier2, tier3]) => FeedbackThresholds::new(tier1, tier2, tier3)
                .ok_or(SettingsError::ThresholdsNotAscending(raw))?,
            None => FeedbackThresholds::default(),
        };

        Ok(TrackerSettings {
            idle_cap,
            undo_capacity,
            thresholds,
            reset_policy: self.reset_policy.unwrap_or_default(),
        })
    }
}

impl TrackerSettings {
    #[must_use]
    pub fn idle_cap(&self) -> Duration {
        self.idle_cap
    }

    #[must_use]
    pub fn undo_capacity(&self) -> usize {
        self.undo_capacity
    }

    #[must_use]
    pub fn thresholds(&self) -> &FeedbackThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn reset_policy(&self) -> SessionResetPolicy {
        self.reset_policy
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            idle_cap: Duration::seconds(DEFAULT_IDLE_CAP_SECS),
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            thresholds: FeedbackThresholds::default(),
            reset_policy: SessionResetPolicy::default(),
        }
    }
}
