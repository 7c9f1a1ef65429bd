//! Train operator (ATOC) code type and the operator name table.

use std::fmt;

/// Error returned when parsing an invalid ATOC code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ATOC code: {reason}")]
pub struct InvalidAtocCode {
    reason: &'static str,
}

/// A valid 2-letter ATOC (Association of Train Operating Companies) operator code.
///
/// ATOC codes identify train operating companies (e.g., "SE" for
/// Southeastern, "GW" for Great Western Railway). They are 2 ASCII
/// letters, stored uppercase; parsing normalizes case because the
/// schedule feed is not consistent about it.
///
/// # Examples
///
/// ```
/// use registry_builder::domain::AtocCode;
///
/// let se = AtocCode::parse("SE").unwrap();
/// assert_eq!(se.as_str(), "SE");
///
/// // Lowercase input is normalized
/// assert_eq!(AtocCode::parse("se").unwrap(), se);
///
/// // Wrong length is rejected
/// assert!(AtocCode::parse("S").is_err());
/// assert!(AtocCode::parse("SER").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtocCode([u8; 2]);

impl AtocCode {
    /// Parse an ATOC code from a string, normalizing to uppercase.
    ///
    /// The input must be exactly 2 ASCII letters (either case).
    pub fn parse(s: &str) -> Result<Self, InvalidAtocCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidAtocCode {
                reason: "must be exactly 2 characters",
            });
        }

        let mut code = [0u8; 2];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(InvalidAtocCode {
                    reason: "must be ASCII letters A-Z",
                });
            }
            code[i] = b.to_ascii_uppercase();
        }

        Ok(AtocCode(code))
    }

    /// Returns the ATOC code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for AtocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtocCode({})", self.as_str())
    }
}

impl fmt::Display for AtocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator display names, keyed by ATOC code. Sorted by code so lookup
/// can binary-search.
const OPERATOR_NAMES: &[(&str, &str)] = &[
    ("AW", "Transport for Wales"),
    ("CC", "c2c"),
    ("CH", "Chiltern Railways"),
    ("CS", "Caledonian Sleeper"),
    ("EM", "East Midlands Railway"),
    ("GC", "Grand Central"),
    ("GN", "Great Northern"),
    ("GR", "LNER"),
    ("GW", "Great Western Railway"),
    ("GX", "Gatwick Express"),
    ("HT", "Hull Trains"),
    ("HX", "Heathrow Express"),
    ("IL", "Island Line"),
    ("LE", "Greater Anglia"),
    ("LM", "West Midlands Trains"),
    ("LO", "London Overground"),
    ("ME", "Merseyrail"),
    ("NT", "Northern"),
    ("SE", "Southeastern"),
    ("SN", "Southern"),
    ("SR", "ScotRail"),
    ("SW", "South Western Railway"),
    ("TL", "Thameslink"),
    ("TP", "TransPennine Express"),
    ("VT", "Avanti West Coast"),
    ("XC", "CrossCountry"),
    ("XR", "Elizabeth line"),
];

/// Look up the display name for an operator code.
///
/// Returns `None` for codes not in the table; callers that need a
/// display string fall back to the raw code rather than dropping it.
pub fn operator_name(code: AtocCode) -> Option<&'static str> {
    OPERATOR_NAMES
        .binary_search_by_key(&code.as_str(), |&(c, _)| c)
        .ok()
        .map(|i| OPERATOR_NAMES[i].1)
}
