use chrono::{Duration, NaiveDate};
use serde_json::{Map, Value};

/// Flat key/value shape the record takes in the host's config store.
pub type RecordMap = Map<String, Value>;

/// Keys of the persisted record.
pub mod keys {
    pub const BEST_STREAK: &str = "best_streak";
    pub const WORST_MISS_STREAK: &str = "worst_miss_streak";
    pub const DAILY_DATE: &str = "daily_date";
    pub const DAILY_REVIEWS: &str = "daily_reviews";
    pub const DAILY_CORRECT: &str = "daily_correct";
    pub const DAILY_BEST_STREAK: &str = "daily_best_streak";
    pub const DAILY_WORST_MISS_STREAK: &str = "daily_worst_miss_streak";
    pub const DAILY_TIME_SPENT: &str = "daily_time_spent";

    pub const ALL: [&str; 8] = [
        BEST_STREAK,
        WORST_MISS_STREAK,
        DAILY_DATE,
        DAILY_REVIEWS,
        DAILY_CORRECT,
        DAILY_BEST_STREAK,
        DAILY_WORST_MISS_STREAK,
        DAILY_TIME_SPENT,
    ];
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound for a stored daily total.
const MAX_DAILY_SECONDS: f64 = 86_400.0;

/// Durable progress counters: all-time records plus today's totals.
///
/// Storage and retrieval belong to the config store; only the tracker writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub best_streak: u32,
    pub worst_miss_streak: u32,
    pub daily_date: NaiveDate,
    pub daily_reviews: u32,
    pub daily_correct: u32,
    pub daily_best_streak: u32,
    pub daily_worst_miss_streak: u32,
    pub daily_time_spent: Duration,
}

impl ProgressRecord {
    /// A fresh record with every counter at zero.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            best_streak: 0,
            worst_miss_streak: 0,
            daily_date: today,
            daily_reviews: 0,
            daily_correct: 0,
            daily_best_streak: 0,
            daily_worst_miss_streak: 0,
            daily_time_spent: Duration::zero(),
        }
    }

    /// Rehydrate a record from the config store.
    ///
    /// Absent or malformed keys fall back to their defaults (zero, or `today`
    /// for the daily date). Unknown keys are ignored.
    #[must_use]
    pub fn from_persisted(map: &RecordMap, today: NaiveDate) -> Self {
        let daily_reviews = read_count(map, keys::DAILY_REVIEWS).unwrap_or(0);
        Self {
            best_streak: read_count(map, keys::BEST_STREAK).unwrap_or(0),
            worst_miss_streak: read_count(map, keys::WORST_MISS_STREAK).unwrap_or(0),
            daily_date: read_date(map, keys::DAILY_DATE).unwrap_or(today),
            daily_reviews,
            daily_correct: read_count(map, keys::DAILY_CORRECT)
                .unwrap_or(0)
                .min(daily_reviews),
            daily_best_streak: read_count(map, keys::DAILY_BEST_STREAK).unwrap_or(0),
            daily_worst_miss_streak: read_count(map, keys::DAILY_WORST_MISS_STREAK).unwrap_or(0),
            daily_time_spent: read_seconds(map, keys::DAILY_TIME_SPENT)
                .unwrap_or_else(Duration::zero),
        }
    }

    /// Keys that `from_persisted` would have to default for this map.
    #[must_use]
    pub fn defaulted_keys(map: &RecordMap) -> Vec<&'static str> {
        keys::ALL
            .into_iter()
            .filter(|key| match *key {
                keys::DAILY_DATE => read_date(map, key).is_none(),
                keys::DAILY_TIME_SPENT => read_seconds(map, key).is_none(),
                _ => read_count(map, key).is_none(),
            })
            .collect()
    }

    /// Serialize every field into the config store's key/value shape.
    #[must_use]
    pub fn to_persisted(&self) -> RecordMap {
        let mut map = RecordMap::new();
        map.insert(keys::BEST_STREAK.into(), self.best_streak.into());
        map.insert(keys::WORST_MISS_STREAK.into(), self.worst_miss_streak.into());
        map.insert(
            keys::DAILY_DATE.into(),
            self.daily_date.format(DATE_FORMAT).to_string().into(),
        );
        map.insert(keys::DAILY_REVIEWS.into(), self.daily_reviews.into());
        map.insert(keys::DAILY_CORRECT.into(), self.daily_correct.into());
        map.insert(keys::DAILY_BEST_STREAK.into(), self.daily_best_streak.into());
        map.insert(
            keys::DAILY_WORST_MISS_STREAK.into(),
            self.daily_worst_miss_streak.into(),
        );
        map.insert(
            keys::DAILY_TIME_SPENT.into(),
            duration_to_seconds(self.daily_time_spent).into(),
        );
        map
    }

    /// Zero all daily counters and move the record to `today`.
    pub fn reset_daily(&mut self, today: NaiveDate) {
        self.daily_date = today;
        self.daily_reviews = 0;
        self.daily_correct = 0;
        self.daily_best_streak = 0;
        self.daily_worst_miss_streak = 0;
        self.daily_time_spent = Duration::zero();
    }

    /// Today's accuracy as a truncated whole percentage (0 when nothing was answered).
    #[must_use]
    pub fn daily_accuracy_percent(&self) -> u32 {
        super::percent(self.daily_correct, self.daily_reviews)
    }
}

fn read_count(map: &RecordMap, key: &str) -> Option<u32> {
    map.get(key)
        .and_then(Value::as_u64)
        .and_then(|val| u32::try_from(val).ok())
}

fn read_date(map: &RecordMap, key: &str) -> Option<NaiveDate> {
    map.get(key)
        .and_then(Value::as_str)
        .and_then(|val| NaiveDate::parse_from_str(val, DATE_FORMAT).ok())
}

// Stored as float seconds; negative values clamp to zero, anything longer
// than a day is malformed.
fn read_seconds(map: &RecordMap, key: &str) -> Option<Duration> {
    let secs = map.get(key).and_then(Value::as_f64)?;
    if !secs.is_finite() || secs > MAX_DAILY_SECONDS {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let millis = (secs.max(0.0) * 1000.0).round() as i64;
    Duration::try_milliseconds(millis)
}

#[allow(clippy::cast_precision_loss)]
fn duration_to_seconds(value: Duration) -> f64 {
    value.num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn as_map(value: Value) -> RecordMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_map_defaults_everything() {
        let map = RecordMap::new();
        assert_eq!(ProgressRecord::from_persisted(&map, today()), ProgressRecord::new(today()));
        assert_eq!(ProgressRecord::defaulted_keys(&map), keys::ALL.to_vec());
    }

    #[test]
    fn reads_stored_values_and_ignores_unknown_keys() {
        let map = as_map(json!({
            "best_streak": 41,
            "worst_miss_streak": 7,
            "daily_date": "2024-03-08",
            "daily_reviews": 120,
            "daily_correct": 101,
            "daily_best_streak": 22,
            "daily_worst_miss_streak": 3,
            "daily_time_spent": 754.25,
            "theme": "dark"
        }));

        let record = ProgressRecord::from_persisted(&map, today());

        assert_eq!(record.best_streak, 41);
        assert_eq!(record.worst_miss_streak, 7);
        assert_eq!(record.daily_date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(record.daily_reviews, 120);
        assert_eq!(record.daily_correct, 101);
        assert_eq!(record.daily_best_streak, 22);
        assert_eq!(record.daily_worst_miss_streak, 3);
        assert_eq!(record.daily_time_spent, Duration::milliseconds(754_250));
        assert!(ProgressRecord::defaulted_keys(&map).is_empty());
    }

    #[test]
    fn malformed_values_fall_back_per_key() {
        let map = as_map(json!({
            "best_streak": "twelve",
            "worst_miss_streak": -2,
            "daily_date": "yesterday",
            "daily_reviews": 10,
            "daily_correct": 4.5,
            "daily_time_spent": -30.0
        }));

        let record = ProgressRecord::from_persisted(&map, today());

        assert_eq!(record.best_streak, 0);
        assert_eq!(record.worst_miss_streak, 0);
        assert_eq!(record.daily_date, today());
        assert_eq!(record.daily_reviews, 10);
        assert_eq!(record.daily_correct, 0);
        assert_eq!(record.daily_time_spent, Duration::zero());

        let defaulted = ProgressRecord::defaulted_keys(&map);
        assert!(defaulted.contains(&keys::BEST_STREAK));
        assert!(defaulted.contains(&keys::DAILY_DATE));
        assert!(!defaulted.contains(&keys::DAILY_REVIEWS));
    }

    #[test]
    fn out_of_range_daily_time_is_defaulted() {
        for secs in [1e300, 86_400.5, f64::MAX] {
            let map = as_map(json!({ "daily_time_spent": secs }));
            let record = ProgressRecord::from_persisted(&map, today());
            assert_eq!(record.daily_time_spent, Duration::zero());
            assert!(ProgressRecord::defaulted_keys(&map).contains(&keys::DAILY_TIME_SPENT));
        }

        let map = as_map(json!({ "daily_time_spent": 86_400.0 }));
        let record = ProgressRecord::from_persisted(&map, today());
        assert_eq!(record.daily_time_spent, Duration::days(1));
    }

    #[test]
    fn correct_count_never_exceeds_reviews_on_load() {
        let map = as_map(json!({ "daily_reviews": 3, "daily_correct": 9 }));
        let record = ProgressRecord::from_persisted(&map, today());
        assert_eq!(record.daily_correct, 3);
    }

    #[test]
    fn persisted_shape_is_readable_back() {
        let mut record = ProgressRecord::new(today());
        record.best_streak = 12;
        record.daily_reviews = 5;
        record.daily_correct = 4;
        record.daily_time_spent = Duration::milliseconds(61_500);

        let map = record.to_persisted();
        assert_eq!(map.get(keys::DAILY_DATE), Some(&json!("2024-03-09")));
        assert_eq!(map.get(keys::DAILY_TIME_SPENT), Some(&json!(61.5)));
        assert_eq!(ProgressRecord::from_persisted(&map, today()), record);
    }

    #[test]
    fn reset_daily_keeps_all_time_records() {
        let mut record = ProgressRecord::new(today());
        record.best_streak = 30;
        record.worst_miss_streak = 4;
        record.daily_reviews = 50;
        record.daily_correct = 45;
        record.daily_best_streak = 30;
        record.daily_worst_miss_streak = 4;
        record.daily_time_spent = Duration::minutes(20);

        let tomorrow = today().succ_opt().unwrap();
        record.reset_daily(tomorrow);

        let mut expected = ProgressRecord::new(tomorrow);
        expected.best_streak = 30;
        expected.worst_miss_streak = 4;
        assert_eq!(record, expected);
    }
}
