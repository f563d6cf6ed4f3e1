//! Japanese postal code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// A Japanese postal code (NNN-NNNN).
///
/// The first two digits identify one of the 47 prefectures, the third a group
/// of adjacent cities, the next two a neighborhood and the last two a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode {
    pub prefecture_id: u8,
    pub city_id: u8,
    pub neighborhood_id: u8,
    pub street_id: u8,
}

impl PostalCode {
    /// Build a postal code from exactly seven ASCII digits.
    pub fn from_string(postal_code: &str) -> Result<Self, ExtractionError> {
        if !postal_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ExtractionError::invalid(
                "postal code",
                postal_code,
                "not a sequence of ASCII digits",
            ));
        }
        if postal_code.len() != 7 {
            return Err(ExtractionError::invalid(
                "postal code",
                postal_code,
                "not 7 digits long",
            ));
        }

        // All bytes are ASCII digits, so byte slicing is safe and parsing cannot fail.
        let field = |range: std::ops::Range<usize>| -> u8 {
            postal_code.as_bytes()[range]
                .iter()
                .fold(0, |acc, b| acc * 10 + (b - b'0'))
        };

        Ok(Self {
            prefecture_id: field(0..2),
            city_id: field(2..3),
            neighborhood_id: field(3..5),
            street_id: field(5..7),
        })
    }

    /// The seven digits without separator.
    pub fn digits(&self) -> String {
        format!(
            "{:02}{}{:02}{:02}",
            self.prefecture_id, self.city_id, self.neighborhood_id, self.street_id
        )
    }
}

impl FromStr for PostalCode {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits();
        write!(f, "{}-{}", &digits[..3], &digits[3..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let code = PostalCode::from_string("1010047").unwrap();
        assert_eq!(code.prefecture_id, 10);
        assert_eq!(code.city_id, 1);
        assert_eq!(code.neighborhood_id, 0);
        assert_eq!(code.street_id, 47);
    }

    #[test]
    fn test_invalid_postal_codes() {
        for invalid in ["", "12345678", "123456", "文字列", "123-4567", "１２３４５６７"] {
            assert!(PostalCode::from_string(invalid).is_err(), "{invalid:?} should fail");
        }
    }

    #[test]
    fn test_display_keeps_leading_zeros() {
        let code: PostalCode = "0122321".parse().unwrap();
        assert_eq!(code.to_string(), "012-2321");
        assert_eq!(code.digits(), "0122321");
    }
}
