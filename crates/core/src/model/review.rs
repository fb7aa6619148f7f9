use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur while interpreting a review answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("invalid review grade value: {0}")]
    InvalidGrade(u8),
    #[error("invalid answer ease: {0} (expected 1-4)")]
    InvalidEase(u8),
}

//
// ─── REVIEW GRADE ─────────────────────────────────────────────────────────────
//

/// Four-level rating the host attaches to an answered card.
///
/// Only `Again` counts as a miss; every other grade extends the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReviewGrade {
    /// Failed to recall the answer.
    Again,
    /// Recalled with significant difficulty.
    Hard,
    /// Recalled correctly with appropriate effort.
    Good,
    /// Recalled instantly.
    Easy,
}

impl ReviewGrade {
    /// Converts a numeric grade (0-3) to a `ReviewGrade`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidGrade` if the value is not in the range 0-3.
    pub fn from_u8(value: u8) -> Result<Self, ReviewError> {
        match value {
            0 => Ok(Self::Again),
            1 => Ok(Self::Hard),
            2 => Ok(Self::Good),
            3 => Ok(Self::Easy),
            _ => Err(ReviewError::InvalidGrade(value)),
        }
    }

    /// Converts a host answer ease (1-4) to a `ReviewGrade`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidEase` if the value is not in the range 1-4.
    pub fn from_ease(ease: u8) -> Result<Self, ReviewError> {
        match ease {
            1..=4 => Self::from_u8(ease - 1),
            _ => Err(ReviewError::InvalidEase(ease)),
        }
    }

    /// Whether this grade counts as a correct answer.
    #[must_use]
    pub fn is_correct(self) -> bool {
        self > ReviewGrade::Again
    }
}

//
// ─── OUTCOME ──────────────────────────────────────────────────────────────────
//

/// Correctness signal fed into the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn from_grade(grade: ReviewGrade) -> Self {
        if grade.is_correct() {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

impl From<ReviewGrade> for Outcome {
    fn from(grade: ReviewGrade) -> Self {
        Self::from_grade(grade)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_grade_conversion_works() {
        assert_eq!(ReviewGrade::from_u8(0).unwrap(), ReviewGrade::Again);
        assert_eq!(ReviewGrade::from_u8(3).unwrap(), ReviewGrade::Easy);
        let err = ReviewGrade::from_u8(5).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidGrade(5)));
    }

    #[test]
    fn ease_scale_starts_at_one() {
        assert_eq!(ReviewGrade::from_ease(1).unwrap(), ReviewGrade::Again);
        assert_eq!(ReviewGrade::from_ease(2).unwrap(), ReviewGrade::Hard);
        assert_eq!(ReviewGrade::from_ease(4).unwrap(), ReviewGrade::Easy);
        assert_eq!(
            ReviewGrade::from_ease(0).unwrap_err(),
            ReviewError::InvalidEase(0)
        );
        assert_eq!(
            ReviewGrade::from_ease(5).unwrap_err(),
            ReviewError::InvalidEase(5)
        );
    }

    #[test]
    fn only_the_lowest_grade_is_a_miss() {
        assert_eq!(Outcome::from(ReviewGrade::Again), Outcome::Incorrect);
        assert_eq!(Outcome::from(ReviewGrade::Hard), Outcome::Correct);
        assert_eq!(Outcome::from(ReviewGrade::Good), Outcome::Correct);
        assert_eq!(Outcome::from(ReviewGrade::Easy), Outcome::Correct);
    }
}
