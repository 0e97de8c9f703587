use crate::error::ValidationError;

use super::MONTHS;

const LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Position in the fiscal year: 0 is the first month, 11 the twelfth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthIndex(usize);

impl MonthIndex {
    pub fn get(self) -> usize {
        self.0
    }

    pub fn label(self) -> &'static str {
        LABELS[self.0]
    }

    pub fn labels() -> &'static [&'static str; MONTHS] {
        &LABELS
    }

    /// Parse a 1-based month number as typed on the command line.
    /// `"1.5"`, `"0"` and `"13"` are rejected.
    pub fn from_month_number(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let n: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidMonthIndex(trimmed.to_string()))?;
        Self::try_from(n - 1).map_err(|_| ValidationError::InvalidMonthIndex(trimmed.to_string()))
    }
}

impl TryFrom<i64> for MonthIndex {
    type Error = ValidationError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        match usize::try_from(n) {
            Ok(i) if i < MONTHS => Ok(Self(i)),
            _ => Err(ValidationError::InvalidMonthIndex(n.to_string())),
        }
    }
}
