mod feedback;
mod record;
mod review;
mod session;
mod settings;

pub use feedback::{FeedbackThresholds, FeedbackTier};
pub use record::{ProgressRecord, RecordMap, keys};
pub use review::{Outcome, ReviewError, ReviewGrade};
pub use session::SessionStats;
pub use settings::{SessionResetPolicy, SettingsError, TrackerSettings, TrackerSettingsDraft};

/// Truncated whole percentage of `part` over `whole`; 0 when `whole` is 0.
pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = u64::from(part) * 100 / u64::from(whole);
    u32::try_from(pct).unwrap_or(u32::MAX)
}
