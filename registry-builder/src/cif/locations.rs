//! TIPLOC → CRS location map, built from the station master file.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Crs, Tiploc};

use super::record::{Record, lossy_lines, msn};

/// Read-only lookup from timetable location codes to public station codes.
///
/// Built once from the station master "A" (active station) records and
/// then only read during the schedule scan. Locations that carry no CRS
/// code reference non-public or foreign locations and never enter the
/// map, so failing to resolve one later is expected, not an error.
#[derive(Debug, Default)]
pub struct LocationMap {
    by_tiploc: HashMap<Tiploc, Crs>,
    duplicates: u64,
}

impl LocationMap {
    /// Build the map from the raw station master file.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut map = Self::default();
        for line in lossy_lines(bytes) {
            map.push_line(&line);
        }
        debug!(
            locations = map.len(),
            duplicates = map.duplicates,
            "built location map"
        );
        map
    }

    /// Feed one station master line into the map.
    ///
    /// Only "A" records contribute. A record whose TIPLOC or CRS column
    /// is empty or malformed is skipped; when the same TIPLOC appears
    /// twice, the later record wins and the collision is counted.
    pub fn push_line(&mut self, line: &str) {
        let record = Record::new(line);
        if record.record_type() != "A" {
            return;
        }

        let Ok(tiploc) = Tiploc::parse(record.field(msn::TIPLOC)) else {
            return;
        };
        let Ok(crs) = Crs::parse(record.field(msn::CRS)) else {
            return;
        };

        if self.by_tiploc.insert(tiploc, crs).is_some() {
            self.duplicates += 1;
        }
    }

    /// Resolve a location code to its public station code.
    pub fn resolve(&self, tiploc: &Tiploc) -> Option<Crs> {
        self.by_tiploc.get(tiploc).copied()
    }

    /// Number of mapped locations.
    pub fn len(&self) -> usize {
        self.by_tiploc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tiploc.is_empty()
    }

    /// How many location codes appeared more than once in the feed.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }
}

impl FromIterator<(Tiploc, Crs)> for LocationMap {
    fn from_iter<I: IntoIterator<Item = (Tiploc, Crs)>>(iter: I) -> Self {
        Self {
            by_tiploc: iter.into_iter().collect(),
            duplicates: 0,
        }
    }
}
