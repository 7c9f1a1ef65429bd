//! Timetable archive member selection.

use std::io::{Cursor, Read};

use tracing::{debug, warn};

use super::error::TimetableError;

/// The timetable members the build needs, pulled out of the downloaded
/// archive by filename suffix.
///
/// The portal does not guarantee member names beyond their extensions,
/// so matching is by case-insensitive suffix: `.msn` for the station
/// master file and `.mca` for the schedule file. A missing member is
/// reported by the caller as a partial data gap, not an error.
#[derive(Debug, Default)]
pub struct TimetableArchive {
    pub station_master: Option<Vec<u8>>,
    pub schedule: Option<Vec<u8>>,
}

impl TimetableArchive {
    /// Open a downloaded archive and extract the members of interest.
    ///
    /// The first member matching each suffix wins.
    pub fn open(bytes: Vec<u8>) -> Result<Self, TimetableError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut archive = Self::default();

        for index in 0..zip.len() {
            let mut member = zip.by_index(index)?;
            let name = member.name().to_ascii_lowercase();

            let slot = if name.ends_with(".msn") {
                &mut archive.station_master
            } else if name.ends_with(".mca") {
                &mut archive.schedule
            } else {
                continue;
            };
            if slot.is_some() {
                continue;
            }

            debug!(member = member.name(), "extracting timetable member");
            let mut contents = Vec::with_capacity(member.size() as usize);
            member.read_to_end(&mut contents)?;
            *slot = Some(contents);
        }

        if archive.station_master.is_none() {
            warn!("timetable archive has no .msn member; no locations will resolve");
        }
        if archive.schedule.is_none() {
            warn!("timetable archive has no .mca member; no operators will be observed");
        }

        Ok(archive)
    }
}
