//! Balance input read from a spreadsheet row.

use serde::{Deserialize, Serialize};

/// The day quantities to migrate for one employee.
///
/// `pending` may be negative, which marks a balance correction rather than
/// days to distribute over past years. `expired` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceInput {
    /// Unused days that are still valid.
    pub pending: i64,
    /// Days forfeited after their validity window.
    #[serde(default)]
    pub expired: u32,
}

impl BalanceInput {
    /// Creates a balance input.
    pub fn new(pending: i64, expired: u32) -> Self {
        Self { pending, expired }
    }

    /// Returns true when the pending quantity is a negative correction.
    pub fn is_adjustment(&self) -> bool {
        self.pending < 0
    }

    /// Returns true when at least one of the quantities is positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_migration::models::BalanceInput;
    ///
    /// assert!(BalanceInput::new(0, 4).has_positive_days());
    /// assert!(!BalanceInput::new(0, 0).has_positive_days());
    /// assert!(!BalanceInput::new(-3, 0).has_positive_days());
    /// ```
    pub fn has_positive_days(&self) -> bool {
        self.pending > 0 || self.expired > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_pending_is_adjustment() {
        assert!(BalanceInput::new(-5, 0).is_adjustment());
        assert!(!BalanceInput::new(0, 0).is_adjustment());
    }

    #[test]
    fn test_expired_defaults_to_zero_when_absent() {
        let balance: BalanceInput = serde_json::from_str(r#"{"pending": 12}"#).unwrap();
        assert_eq!(balance, BalanceInput::new(12, 0));
    }
}
