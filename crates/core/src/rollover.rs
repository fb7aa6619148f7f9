//! Daily counter rollover.

use chrono::NaiveDate;

use crate::model::ProgressRecord;

/// Result of comparing a record's day against today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// The record already belongs to today.
    Unchanged,
    /// Daily counters were zeroed; the record must be persisted.
    Reset { previous: NaiveDate },
}

impl Rollover {
    #[must_use]
    pub fn is_reset(self) -> bool {
        matches!(self, Rollover::Reset { .. })
    }
}

/// Reset the daily counters when `record.daily_date` is not `today`.
///
/// Idempotent: a second call with the same `today` is always `Unchanged`.
/// Dates are compared for equality only, so a clock that moves back a day
/// also rolls the counters over.
pub fn check_rollover(record: &mut ProgressRecord, today: NaiveDate) -> Rollover {
    if record.daily_date == today {
        return Rollover::Unchanged;
    }
    let previous = record.daily_date;
    record.reset_daily(today);
    Rollover::Reset { previous }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn busy_record(date: NaiveDate) -> ProgressRecord {
        let mut record = ProgressRecord::new(date);
        record.best_streak = 15;
        record.worst_miss_streak = 3;
        record.daily_reviews = 40;
        record.daily_correct = 31;
        record.daily_best_streak = 15;
        record.daily_worst_miss_streak = 3;
        record.daily_time_spent = Duration::minutes(12);
        record
    }

    #[test]
    fn same_day_is_untouched() {
        let mut record = busy_record(day(10));
        let before = record.clone();
        assert_eq!(check_rollover(&mut record, day(10)), Rollover::Unchanged);
        assert_eq!(record, before);
    }

    #[test]
    fn new_day_resets_daily_fields_only() {
        let mut record = busy_record(day(9));

        let result = check_rollover(&mut record, day(10));

        assert_eq!(result, Rollover::Reset { previous: day(9) });
        assert_eq!(record.daily_date, day(10));
        assert_eq!(record.daily_reviews, 0);
        assert_eq!(record.daily_correct, 0);
        assert_eq!(record.daily_best_streak, 0);
        assert_eq!(record.daily_worst_miss_streak, 0);
        assert_eq!(record.daily_time_spent, Duration::zero());
        assert_eq!(record.best_streak, 15);
        assert_eq!(record.worst_miss_streak, 3);
    }

    #[test]
    fn second_check_is_a_no_op() {
        let mut record = busy_record(day(1));
        assert!(check_rollover(&mut record, day(2)).is_reset());
        let after_first = record.clone();

        assert_eq!(check_rollover(&mut record, day(2)), Rollover::Unchanged);
        assert_eq!(record, after_first);
    }
}
