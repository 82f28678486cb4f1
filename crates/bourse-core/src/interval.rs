//! Interval literals used by declared policies (`keyRotation: "30d"`).
//!
//! Grammar: `<digits><unit>` where unit is one of `s`, `m`, `h`, `d`, `w`.
//! Surrounding whitespace is ignored; anything else is rejected.

use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

const UNITS: [(char, u64); 5] = [
    ('w', 7 * 24 * 60 * 60),
    ('d', 24 * 60 * 60),
    ('h', 60 * 60),
    ('m', 60),
    ('s', 1),
];

/// A parsed interval, held as whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    secs: u64,
}

impl Interval {
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Parse an interval literal.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInterval` when the literal is empty, has no
    /// digits, uses an unknown unit, or overflows `u64` seconds.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidInterval {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let Some(unit) = trimmed.chars().last() else {
            return Err(invalid("empty interval"));
        };

        let Some(&(_, multiplier)) = UNITS.iter().find(|(symbol, _)| *symbol == unit) else {
            return Err(invalid(&format!(
                "unknown unit '{unit}' (expected one of s, m, h, d, w)"
            )));
        };

        let digits = &trimmed[..trimmed.len() - unit.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid("expected digits before the unit"));
        }

        let count: u64 = digits.parse().map_err(|_| invalid("number out of range"))?;
        let secs = count
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("interval overflows"))?;

        Ok(Self { secs })
    }

    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.secs
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.secs == 0
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Interval {
    /// Largest unit that divides the interval evenly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.secs == 0 {
            return f.write_str("0s");
        }
        let (symbol, size) = UNITS
            .iter()
            .find(|(_, size)| self.secs % size == 0)
            .copied()
            .unwrap_or(('s', 1));
        write!(f, "{}{symbol}", self.secs / size)
    }
}
