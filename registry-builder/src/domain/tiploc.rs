//! Timetable location code type.

use std::fmt;

/// Error returned when parsing an invalid TIPLOC.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid TIPLOC: {reason}")]
pub struct InvalidTiploc {
    reason: &'static str,
}

/// A TIPLOC (timing point location) code from the timetable feed.
///
/// TIPLOCs name physical stopping points; they are up to 7 characters
/// and, unlike CRS codes, may contain digits (e.g. "VICTRIC", "HYWRDSH",
/// "KENSOL1"). Not every TIPLOC corresponds to a public station.
/// Parsing trims surrounding whitespace and normalizes to uppercase.
///
/// # Examples
///
/// ```
/// use registry_builder::domain::Tiploc;
///
/// let t = Tiploc::parse("TONBRDG").unwrap();
/// assert_eq!(t.as_str(), "TONBRDG");
///
/// // Fixed-width extraction leaves padding behind
/// assert_eq!(Tiploc::parse(" TONBRDG ").unwrap(), t);
///
/// // Empty and over-long codes are rejected
/// assert!(Tiploc::parse("   ").is_err());
/// assert!(Tiploc::parse("TOOLONGNAME").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tiploc(String);

impl Tiploc {
    /// Parse a TIPLOC from a string.
    ///
    /// The trimmed input must be 1 to 7 ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, InvalidTiploc> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidTiploc {
                reason: "cannot be empty",
            });
        }
        if trimmed.len() > 7 {
            return Err(InvalidTiploc {
                reason: "must be at most 7 characters",
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidTiploc {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(Tiploc(trimmed.to_ascii_uppercase()))
    }

    /// Returns the TIPLOC as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Tiploc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tiploc({})", self.0)
    }
}

impl fmt::Display for Tiploc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_tiplocs() {
        assert!(Tiploc::parse("TONBRDG").is_ok());
        assert!(Tiploc::parse("KNGX").is_ok());
        assert!(Tiploc::parse("VICTRIC").is_ok());
        assert!(Tiploc::parse("KENSOL1").is_ok()); // digits are allowed
        assert!(Tiploc::parse("A").is_ok());
    }

    #[test]
    fn trims_fixed_width_padding() {
        assert_eq!(
            Tiploc::parse("TONBRDG ").unwrap(),
            Tiploc::parse("TONBRDG").unwrap()
        );
        assert_eq!(Tiploc::parse("  KNGX ").unwrap().as_str(), "KNGX");
    }

    #[test]
    fn normalizes_case() {
        assert_eq!(Tiploc::parse("tonbrdg").unwrap().as_str(), "TONBRDG");
    }

    #[test]
    fn reject_empty_and_whitespace() {
        assert!(Tiploc::parse("").is_err());
        assert!(Tiploc::parse("   ").is_err());
    }

    #[test]
    fn reject_too_long() {
        assert!(Tiploc::parse("ABCDEFGH").is_err());
        assert!(Tiploc::parse("TONBRIDGE").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        assert!(Tiploc::parse("TON-BDG").is_err());
        assert!(Tiploc::parse("TON BDG").is_err());
        assert!(Tiploc::parse("TÖNBDG").is_err());
    }

    #[test]
    fn display() {
        let t = Tiploc::parse("TONBRDG").unwrap();
        assert_eq!(format!("{}", t), "TONBRDG");
        assert_eq!(format!("{:?}", t), "Tiploc(TONBRDG)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Tiploc::parse("TONBRDG").unwrap());
        assert!(set.contains(&Tiploc::parse("tonbrdg ").unwrap()));
        assert!(!set.contains(&Tiploc::parse("KNGX").unwrap()));
    }
}
