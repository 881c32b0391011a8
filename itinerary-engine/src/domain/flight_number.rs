//! Flight designator (carrier code + flight number) type.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when a flight number cannot be split into carrier and number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight number {input:?}: {reason}")]
pub struct InvalidFlightNumber {
    input: String,
    reason: &'static str,
}

/// A validated flight designator such as `LH 717`.
///
/// The first two characters are the IATA carrier code (letters or digits,
/// e.g. "LH", "U2", "4U"), the remainder is a 1-4 digit flight number.
/// Whitespace between the two parts and lowercase input are tolerated, so
/// "LH717", "lh 717" and "LH0717" all parse to the same designator.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::FlightNumber;
///
/// let fnum = FlightNumber::parse("LH717").unwrap();
/// assert_eq!(fnum.carrier(), "LH");
/// assert_eq!(fnum.number(), 717);
/// assert_eq!(fnum.to_string(), "LH 717");
///
/// assert!(FlightNumber::parse("LH").is_err());
/// assert!(FlightNumber::parse("LH71A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightNumber {
    carrier: [u8; 2],
    number: u16,
}

impl FlightNumber {
    /// Parse a user-supplied flight number.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightNumber> {
        let invalid = |reason| InvalidFlightNumber {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();

        if bytes.len() < 3 {
            return Err(invalid("too short"));
        }

        let carrier = [
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ];
        if !carrier.iter().all(u8::is_ascii_alphanumeric) {
            return Err(invalid("carrier code must be 2 letters or digits"));
        }
        if carrier.iter().all(u8::is_ascii_digit) {
            return Err(invalid("carrier code must contain a letter"));
        }

        let tail = trimmed[2..].trim_start();
        if tail.is_empty() || tail.len() > 4 {
            return Err(invalid("flight number must have 1-4 digits"));
        }
        if !tail.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("flight number must be numeric"));
        }

        let number: u16 = tail
            .parse()
            .map_err(|_| invalid("flight number must be numeric"))?;
        if number == 0 {
            return Err(invalid("flight number must not be zero"));
        }

        Ok(Self { carrier, number })
    }

    /// Create a designator from provider-supplied parts.
    pub fn from_parts(carrier: &str, number: u16) -> Result<Self, InvalidFlightNumber> {
        Self::parse(&format!("{carrier}{number}"))
    }

    /// The two-character carrier code, uppercase.
    pub fn carrier(&self) -> &str {
        // Only ASCII alphanumerics are ever stored
        std::str::from_utf8(&self.carrier).unwrap_or_default()
    }

    /// The numeric part, without leading zeros.
    pub fn number(&self) -> u16 {
        self.number
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({} {})", self.carrier(), self.number)
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.carrier(), self.number)
    }
}

impl Serialize for FlightNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
