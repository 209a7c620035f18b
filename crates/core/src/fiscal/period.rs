//! Fiscal period key, status, and transition rules.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Fiscal period status controlling posting permissions.
///
/// Transitions are monotonic: open → closed → locked. The only reverse
/// step is an explicit unlock, locked → closed — a locked period can
/// never return to open, preserving audit integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts new postings.
    Open,
    /// Period is closed - no posting, but may still be locked or unlocked.
    Closed,
    /// Period is locked - no posting, unlockable only back to closed.
    Locked,
}

impl PeriodStatus {
    /// Returns true if the period accepts new postings.
    #[must_use]
    pub fn allows_posting(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// Composite `(month, year)` key identifying a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Month (1-12).
    pub month: u32,
}

impl PeriodKey {
    /// Creates a period key, validating the month.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` if `month` is not 1-12.
    pub fn new(month: u32, year: i32) -> Result<Self, FiscalError> {
        if !(1..=12).contains(&month) {
            return Err(FiscalError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing the given date.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Validates a fiscal period status transition.
///
/// Allowed: open → closed (close), closed → locked (lock),
/// locked → closed (unlock). Everything else is rejected; there is no
/// path back to open once a period has been closed.
///
/// # Errors
///
/// Returns `FiscalError::InvalidTransition` for any other pair.
pub fn validate_transition(from: PeriodStatus, to: PeriodStatus) -> Result<(), FiscalError> {
    match (from, to) {
        (PeriodStatus::Open, PeriodStatus::Closed)
        | (PeriodStatus::Closed, PeriodStatus::Locked)
        | (PeriodStatus::Locked, PeriodStatus::Closed) => Ok(()),
        _ => Err(FiscalError::InvalidTransition { from, to }),
    }
}

/// Validates that a period accepts postings.
///
/// # Errors
///
/// Returns `FiscalError::PeriodClosed` if the period is closed or locked.
pub fn validate_posting(key: PeriodKey, status: PeriodStatus) -> Result<(), FiscalError> {
    if status.allows_posting() {
        Ok(())
    } else {
        Err(FiscalError::PeriodClosed {
            month: key.month,
            year: key.year,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn status_strategy() -> impl Strategy<Value = PeriodStatus> {
        prop_oneof![
            Just(PeriodStatus::Open),
            Just(PeriodStatus::Closed),
            Just(PeriodStatus::Locked),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// No transition ever reaches Open: once closed, a period can
        /// never accept postings via a status change again.
        #[test]
        fn prop_open_is_unreachable(from in status_strategy()) {
            let result = validate_transition(from, PeriodStatus::Open);
            prop_assert!(result.is_err(), "{from} -> open must be rejected");
        }

        /// Self-transitions are always rejected.
        #[test]
        fn prop_self_transition_rejected(status in status_strategy()) {
            prop_assert!(validate_transition(status, status).is_err());
        }

        /// Posting is allowed exactly when the period is open.
        #[test]
        fn prop_posting_gate_matches_status(status in status_strategy()) {
            let key = PeriodKey { month: 6, year: 2025 };
            let result = validate_posting(key, status);
            prop_assert_eq!(result.is_ok(), status == PeriodStatus::Open);
        }
    }

    #[rstest]
    #[case::close(PeriodStatus::Open, PeriodStatus::Closed)]
    #[case::lock(PeriodStatus::Closed, PeriodStatus::Locked)]
    #[case::unlock(PeriodStatus::Locked, PeriodStatus::Closed)]
    fn test_allowed_transitions(#[case] from: PeriodStatus, #[case] to: PeriodStatus) {
        assert!(validate_transition(from, to).is_ok());
    }

    #[rstest]
    #[case::lock_without_close(PeriodStatus::Open, PeriodStatus::Locked)]
    #[case::close_noop(PeriodStatus::Closed, PeriodStatus::Closed)]
    #[case::open_noop(PeriodStatus::Open, PeriodStatus::Open)]
    fn test_rejected_transitions(#[case] from: PeriodStatus, #[case] to: PeriodStatus) {
        assert!(matches!(
            validate_transition(from, to),
            Err(FiscalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_period_key_validation() {
        assert!(PeriodKey::new(1, 2025).is_ok());
        assert!(PeriodKey::new(12, 2025).is_ok());
        assert!(matches!(
            PeriodKey::new(0, 2025),
            Err(FiscalError::InvalidMonth(0))
        ));
        assert!(matches!(
            PeriodKey::new(13, 2025),
            Err(FiscalError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_period_key_for_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let key = PeriodKey::for_date(date);
        assert_eq!(key.month, 3);
        assert_eq!(key.year, 2025);
    }

    #[test]
    fn test_posting_gate_messages() {
        let key = PeriodKey { month: 2, year: 2025 };
        let err = validate_posting(key, PeriodStatus::Locked).unwrap_err();
        assert_eq!(err.error_code(), "PERIOD_CLOSED");
        assert_eq!(
            err.to_string(),
            "Fiscal period 2/2025 is locked, no posting allowed"
        );
    }
}
