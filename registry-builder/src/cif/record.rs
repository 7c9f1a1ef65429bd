//! Fixed-width record extraction.
//!
//! Both timetable files are line-oriented with fields at fixed byte
//! offsets that depend on the two-character record type. The offsets are
//! declared once, as [`Column`] constants grouped per file, and read by
//! one generic extraction routine. A line that is too short for a column
//! yields an empty field; extraction never fails.

use std::borrow::Cow;

/// A half-open byte range within a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    start: usize,
    end: usize,
}

impl Column {
    /// Define a column spanning bytes `start..end`.
    pub const fn new(start: usize, end: usize) -> Self {
        assert!(start < end);
        Self { start, end }
    }
}

/// Column layout for the station master file (RSPS5046 "A" records).
pub mod msn {
    use super::Column;

    /// Station display name.
    pub const NAME: Column = Column::new(5, 31);
    /// TIPLOC of the station.
    pub const TIPLOC: Column = Column::new(36, 43);
    /// Public CRS code.
    pub const CRS: Column = Column::new(49, 52);
}

/// Column layout for the schedule file (CIF BS/BX/LO/LI/LT records).
pub mod mca {
    use super::Column;

    /// ATOC code, on "BX" (extra schedule details) records.
    pub const OPERATOR: Column = Column::new(11, 13);
    /// TIPLOC, on "LO"/"LI"/"LT" (location) records.
    pub const TIPLOC: Column = Column::new(2, 9);
}

/// One line of a fixed-width file.
///
/// Field access degrades per column: a missing or truncated column reads
/// as `""` and the rest of the line stays usable.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    line: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line }
    }

    /// The record type discriminator: the first two characters, with
    /// trailing padding removed (the station master file uses a single
    /// letter plus a space). Lines shorter than two characters have no
    /// type and return `""`.
    pub fn record_type(&self) -> &'a str {
        self.line.get(0..2).map(str::trim_end).unwrap_or("")
    }

    /// Extract a field, trimmed of padding.
    ///
    /// Returns `""` when the line does not cover the whole column, or
    /// when a replacement character from lossy decoding lands on the
    /// column boundary.
    pub fn field(&self, col: Column) -> &'a str {
        self.line.get(col.start..col.end).map(str::trim).unwrap_or("")
    }
}

/// Iterate over the lines of a raw byte stream, decoding each line
/// individually with U+FFFD substitution for undecodable bytes. A single
/// corrupt line therefore cannot abort the rest of the stream.
pub fn lossy_lines(bytes: &[u8]) -> impl Iterator<Item = Cow<'_, str>> {
    bytes.split(|&b| b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        String::from_utf8_lossy(line)
    })
}
