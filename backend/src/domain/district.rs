//! Council district codes.
//!
//! Profiles store the district as whatever the provisioning system handed
//! over: a bare number or numeric text such as `"1"` or `"51"`. Complaint
//! records carry the canonical code, `"NYCC"` followed by the district number
//! left-padded with zeros to at least two digits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every council district code.
pub const DISTRICT_CODE_PREFIX: &str = "NYCC";

/// Minimum number of digits rendered after the prefix.
const DISTRICT_CODE_WIDTH: usize = 2;

/// District value as supplied by a profile record.
///
/// Deserialises from either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDistrict {
    /// Numeric district value.
    Number(u32),
    /// Textual district value, expected to hold only digits.
    Text(String),
}

impl From<u32> for RawDistrict {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawDistrict {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawDistrict {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RawDistrict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Errors raised while deriving a [`DistrictCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistrictValidationError {
    /// The value could not be read as a non-negative integer.
    #[error("district value {value:?} is not an integer")]
    InvalidDistrict {
        /// The rejected raw value.
        value: String,
    },
}

/// Canonical council district code such as `NYCC01`.
///
/// # Examples
/// ```
/// use complaint_backend::domain::{DistrictCode, RawDistrict};
///
/// let code = DistrictCode::format(&RawDistrict::from("7")).expect("numeric district");
/// assert_eq!(code.as_ref(), "NYCC07");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictCode(String);

impl DistrictCode {
    /// Render the canonical code for a raw district value.
    ///
    /// Values wider than two digits are kept in full; the width is a minimum.
    pub fn format(raw: &RawDistrict) -> Result<Self, DistrictValidationError> {
        let number = match raw {
            RawDistrict::Number(value) => u64::from(*value),
            RawDistrict::Text(value) => parse_digits(value)?,
        };
        Ok(Self(format!(
            "{DISTRICT_CODE_PREFIX}{number:0width$}",
            width = DISTRICT_CODE_WIDTH
        )))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn parse_digits(value: &str) -> Result<u64, DistrictValidationError> {
    let trimmed = value.trim();
    let invalid = || DistrictValidationError::InvalidDistrict {
        value: value.to_owned(),
    };
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    trimmed.parse::<u64>().map_err(|_| invalid())
}

impl AsRef<str> for DistrictCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DistrictCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DistrictCode> for String {
    fn from(value: DistrictCode) -> Self {
        value.0
    }
}

/// Format a raw district value as its canonical code string.
pub fn format_district(raw: impl Into<RawDistrict>) -> Result<String, DistrictValidationError> {
    DistrictCode::format(&raw.into()).map(String::from)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RawDistrict::Number(1), "NYCC01")]
    #[case(RawDistrict::from("1"), "NYCC01")]
    #[case(RawDistrict::Number(9), "NYCC09")]
    #[case(RawDistrict::Number(10), "NYCC10")]
    #[case(RawDistrict::from("51"), "NYCC51")]
    #[case(RawDistrict::from(" 3 "), "NYCC03")]
    #[case(RawDistrict::from("007"), "NYCC07")]
    #[case(RawDistrict::Number(0), "NYCC00")]
    #[case(RawDistrict::Number(123), "NYCC123")]
    fn formats_known_districts(#[case] raw: RawDistrict, #[case] expected: &str) {
        let code = DistrictCode::format(&raw).expect("numeric district");
        assert_eq!(code.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("one")]
    #[case("-4")]
    #[case("4.0")]
    #[case("1a")]
    #[case("99999999999999999999999")]
    fn rejects_non_integer_text(#[case] raw: &str) {
        let err = format_district(raw).expect_err("non-integer input must fail");
        assert_eq!(
            err,
            DistrictValidationError::InvalidDistrict {
                value: raw.to_owned()
            }
        );
    }

    #[rstest]
    fn raw_district_deserialises_from_number_or_string() {
        let number: RawDistrict = serde_json::from_str("4").expect("number");
        let text: RawDistrict = serde_json::from_str("\"4\"").expect("string");
        assert_eq!(number, RawDistrict::Number(4));
        assert_eq!(text, RawDistrict::Text("4".to_owned()));
    }

    #[rstest]
    fn raw_district_rejects_null() {
        let result = serde_json::from_str::<RawDistrict>("null");
        assert!(result.is_err());
    }
}
