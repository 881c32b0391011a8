//! Airport types.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Error returned when parsing an invalid IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code {input:?}: {reason}")]
pub struct InvalidIataCode {
    input: String,
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA location codes are always 3 uppercase ASCII letters. This type
/// guarantees that any `IataCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::IataCode;
///
/// let fra = IataCode::parse("FRA").unwrap();
/// assert_eq!(fra.as_str(), "FRA");
///
/// // Strict parsing rejects lowercase, lenient parsing accepts user input
/// assert!(IataCode::parse("fra").is_err());
/// assert_eq!(IataCode::parse_lenient(" fra ").unwrap(), fra);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode([u8; 3]);

impl IataCode {
    /// Parse an IATA code as sent by a provider: exactly 3 uppercase letters.
    pub fn parse(s: &str) -> Result<Self, InvalidIataCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidIataCode {
                input: s.to_string(),
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidIataCode {
                input: s.to_string(),
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(IataCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse user input, tolerating surrounding whitespace and lowercase.
    pub fn parse_lenient(s: &str) -> Result<Self, InvalidIataCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IataCode({})", self.as_str())
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IataCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A point on the earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An airport as it appears on a resolved flight leg.
///
/// The airport's timezone is deliberately absent: it is only needed while
/// reconciling timestamps and lives on [`crate::reference::AirportRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub iata: IataCode,
    pub name: String,
    pub municipality: String,
    pub location: Location,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = IataCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn lenient_accepts_lowercase(s in "[a-z]{3}") {
            let code = IataCode::parse_lenient(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,8}") {
            prop_assert!(IataCode::parse(&s).is_err());
        }
    }
}
