//! Airport code type.

use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not a valid IATA airport code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAirport {
    /// The input is not exactly three characters long.
    #[error("airport code must be exactly three letters, got {found} characters")]
    Length { found: usize },

    /// The input contains something other than uppercase ASCII letters.
    #[error("airport code must be three uppercase ASCII letters A-Z")]
    Charset,
}

/// A 3-letter IATA airport code, such as `BOS` or `JFK`.
///
/// Stored inline as three bytes, so the type is `Copy` and cheap to use as
/// a hash or ordering key throughout the search. Any `Airport` value is
/// valid by construction; ICAO codes (`KBOS`), lowercase input and padded
/// strings are rejected at the parse boundary.
///
/// Ordering is alphabetical, matching the order of the code strings. The
/// planner relies on this when it sorts destination sets into canonical
/// keys.
///
/// # Examples
///
/// ```
/// use flight_planner::domain::Airport;
///
/// let bos: Airport = "BOS".parse().unwrap();
/// assert_eq!(bos.as_str(), "BOS");
/// assert!("KBOS".parse::<Airport>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Airport([u8; 3]);

impl Airport {
    /// Parse an IATA code: exactly three uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidAirport> {
        let code: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidAirport::Length {
                found: s.chars().count(),
            })?;
        if !code.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirport::Charset);
        }
        Ok(Airport(code))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        // Parsing admits only ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl FromStr for Airport {
    type Err = InvalidAirport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Airport::parse(s)
    }
}

impl fmt::Debug for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Airport").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
