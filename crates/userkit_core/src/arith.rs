//! Small numeric helpers.
//!
//! # Invariants
//! - Helpers never panic; overflow and division by zero surface as
//!   `MathError`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Threshold above which a reading counts as hot, in degrees Celsius.
pub const HOT_THRESHOLD_CELSIUS: f64 = 20.0;

pub type MathResult<T> = Result<T, MathError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    DivisionByZero,
    Overflow,
}

impl Display for MathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "cannot divide by zero"),
            Self::Overflow => write!(f, "integer overflow"),
        }
    }
}

impl Error for MathError {}

/// Coarse label for a temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureLabel {
    Hot,
    Cold,
}

impl TemperatureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
        }
    }
}

impl Display for TemperatureLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adds two integers, reporting overflow instead of wrapping.
pub fn add(a: i64, b: i64) -> MathResult<i64> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

/// Divides `a` by `b`.
///
/// # Errors
/// - `DivisionByZero` when `b == 0`.
pub fn divide(a: i64, b: i64) -> MathResult<f64> {
    if b == 0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(a as f64 / b as f64)
}

/// Trial-division primality check. Values below 2 are never prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }

    let mut divisor: i64 = 2;
    // `divisor <= n / divisor` is `divisor * divisor <= n` without overflow.
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Strictly above `HOT_THRESHOLD_CELSIUS` is hot; everything else is cold.
///
/// Compares the raw reading, so 20.4 is hot. NaN is cold.
pub fn temperature_label(celsius: f64) -> TemperatureLabel {
    if celsius > HOT_THRESHOLD_CELSIUS {
        TemperatureLabel::Hot
    } else {
        TemperatureLabel::Cold
    }
}

#[cfg(test)]
mod tests {
    use super::{add, divide, is_prime, temperature_label, MathError, TemperatureLabel};

    #[test]
    fn add_sums_and_reports_overflow() {
        assert_eq!(add(2, 3), Ok(5), "2 + 3 should be 5");
        assert_eq!(add(i64::MAX, 1), Err(MathError::Overflow));
    }

    #[test]
    fn divide_by_zero_is_rejected() {
        let err = divide(4, 0).unwrap_err();
        assert_eq!(err, MathError::DivisionByZero);
        assert_eq!(err.to_string(), "cannot divide by zero");
        assert_eq!(divide(9, 2), Ok(4.5));
    }

    #[test]
    fn is_prime_matches_known_values() {
        for (n, expected) in [(3, true), (4, false), (7, true), (1, false), (0, false), (-7, false)] {
            assert_eq!(is_prime(n), expected, "is_prime({n})");
        }
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn is_prime_handles_large_values_without_overflow() {
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(i64::MAX));
    }

    #[test]
    fn temperature_threshold_is_exclusive() {
        assert_eq!(temperature_label(21.0), TemperatureLabel::Hot);
        assert_eq!(temperature_label(20.0), TemperatureLabel::Cold);
        assert_eq!(temperature_label(-5.0).as_str(), "cold");
    }

    #[test]
    fn temperature_label_uses_unrounded_reading() {
        assert_eq!(temperature_label(20.4), TemperatureLabel::Hot);
        assert_eq!(temperature_label(20.000_1), TemperatureLabel::Hot);
        assert_eq!(temperature_label(19.9), TemperatureLabel::Cold);
        assert_eq!(temperature_label(f64::NAN), TemperatureLabel::Cold);
    }
}
