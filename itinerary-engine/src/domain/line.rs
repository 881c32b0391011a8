//! Train line designators.

use std::fmt;

/// A train line designator as a user typed it, e.g. "ICE 707".
///
/// Providers and users disagree on spacing and capitalisation ("ICE707",
/// "ice 707", "S 1"), so comparison happens on a normalized key with all
/// whitespace removed and letters lowercased.
///
/// # Examples
///
/// ```
/// use itinerary_engine::domain::LineName;
///
/// let line = LineName::new("ice 707");
/// assert!(line.matches("ICE707"));
/// assert!(line.matches(" ICE  707 "));
/// assert!(!line.matches("ICE 708"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LineName {
    display: String,
    key: String,
}

impl LineName {
    pub fn new(name: &str) -> Self {
        Self {
            display: name.trim().to_string(),
            key: normalize(name),
        }
    }

    /// Whether a provider line name denotes this line.
    pub fn matches(&self, provider_name: &str) -> bool {
        normalize(provider_name) == self.key
    }

    /// True when the name has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.key.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Debug for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineName({:?})", self.display)
    }
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
