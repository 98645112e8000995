//! Job compensation is modelled with two small validated values. `Equity` is
//! kept as exact decimal text so a stored `0.020` is never rounded through a
//! float on its way back out.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Annual salary (non-negative whole number).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Salary(i32);

impl Salary {
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation("salary must be >= 0"));
        }
        i32::try_from(amount)
            .map(Self)
            .map_err(|_| DomainError::validation("salary is out of range"))
    }

    pub fn amount(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Salary {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Salary> for i32 {
    fn from(value: Salary) -> Self {
        value.0
    }
}

impl core::fmt::Display for Salary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Fraction of the company offered with a job, in `[0, 1]`.
///
/// Accepted forms are plain decimals (`"0"`, `"0.5"`, `".25"`, `"1.000"`).
/// Signs, exponents and whitespace are rejected. The original text is kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Equity(String);

impl Equity {
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text.as_str(), ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(DomainError::validation(format!("equity '{text}' is not a decimal number")));
        }

        let int_value = int_part.trim_start_matches('0');
        let within_range = match int_value {
            "" => true,
            "1" => frac_part.bytes().all(|b| b == b'0'),
            _ => false,
        };
        if !within_range {
            return Err(DomainError::validation(format!("equity '{text}' must be between 0 and 1")));
        }

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.bytes().any(|b| (b'1'..=b'9').contains(&b))
    }
}

impl TryFrom<String> for Equity {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Equity> for String {
    fn from(value: Equity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Equity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equity_accepts_plain_decimals_in_range() {
        for ok in ["0", "0.5", ".25", "1", "1.000", "0.020", "00.3"] {
            let equity = Equity::parse(ok).unwrap();
            assert_eq!(equity.as_str(), ok);
        }
    }

    #[test]
    fn equity_rejects_out_of_range_and_malformed() {
        for bad in ["", ".", "1.01", "2", "-0.1", "+0.1", "0.1e1", " 0.1", "abc", "0.5.5"] {
            assert!(Equity::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn equity_positivity_ignores_zero_padding() {
        assert!(!Equity::parse("0").unwrap().is_positive());
        assert!(!Equity::parse("0.000").unwrap().is_positive());
        assert!(Equity::parse("0.001").unwrap().is_positive());
        assert!(Equity::parse("1").unwrap().is_positive());
    }

    #[test]
    fn equity_is_a_json_string_not_a_number() {
        let from_str: Equity = serde_json::from_value(serde_json::json!("0.1")).unwrap();
        assert_eq!(from_str.as_str(), "0.1");
        assert!(serde_json::from_value::<Equity>(serde_json::json!(0.1)).is_err());
    }

    #[test]
    fn salary_must_be_non_negative() {
        assert_eq!(Salary::new(0).unwrap().amount(), 0);
        assert!(Salary::new(-1).is_err());
        assert!(Salary::new(i64::from(i32::MAX) + 1).is_err());
    }

    proptest! {
        #[test]
        fn any_fraction_below_one_is_valid_equity(digits in "[0-9]{1,6}") {
            let text = format!("0.{digits}");
            let equity = Equity::parse(text.clone()).unwrap();
            prop_assert_eq!(equity.as_str(), text.as_str());
            prop_assert_eq!(equity.is_positive(), digits.bytes().any(|b| b != b'0'));
        }
    }
}
