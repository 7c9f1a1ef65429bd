//! One-shot batch pipeline: fetch both feeds, scan, reconcile.

use tracing::{info, warn};

use crate::cif::{CallingOperators, LocationMap, TimetableArchive, TimetableClient, TimetableScanner};
use crate::kb::{KbClient, KbError, parse_stations};
use crate::registry::{Registry, reconcile};

/// Diagnostic summary of one build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// True when the timetable side contributed nothing and the registry
    /// carries owning-operator data only.
    pub degraded: bool,
    /// Stations in the final registry.
    pub stations: usize,
    /// Stations with at least one operator observed in the timetable.
    pub stations_with_observed_operators: usize,
    /// Knowledgebase elements dropped for missing/invalid CRS.
    pub kb_dropped_missing_crs: u64,
    /// Knowledgebase elements that repeated an earlier CRS.
    pub kb_duplicates: u64,
    /// Platform counts that failed to parse.
    pub kb_bad_platform_counts: u64,
    /// Location codes listed more than once in the station master file.
    pub location_duplicates: u64,
    /// Schedule calling points whose TIPLOC resolved to no public code.
    pub unresolved_locations: u64,
}

/// Run the full batch build.
///
/// Failing to obtain the knowledgebase feed is the only fatal condition.
/// The timetable side degrades: no reachable endpoint, an unreadable
/// archive, or missing members all shrink its contribution, down to an
/// empty one.
pub async fn build_registry(
    kb: &KbClient,
    timetable: &TimetableClient,
) -> Result<(Registry, BuildReport), KbError> {
    let mut report = BuildReport::default();

    let xml = kb.fetch_stations_xml().await?;
    let kb_stations = parse_stations(&xml)?;
    info!(
        stations = kb_stations.stations.len(),
        dropped = kb_stations.dropped_missing_crs,
        "fetched knowledgebase stations"
    );
    report.kb_dropped_missing_crs = kb_stations.dropped_missing_crs;
    report.kb_duplicates = kb_stations.duplicates;
    report.kb_bad_platform_counts = kb_stations.bad_platform_counts;

    let calls = match timetable.fetch_archive().await {
        Some(bytes) => scan_archive(bytes, &mut report),
        None => {
            report.degraded = true;
            CallingOperators::default()
        }
    };
    if report.degraded {
        warn!("timetable feed unavailable: building with owning-operator data only");
    }

    let registry = reconcile(&kb_stations, &calls);
    report.stations = registry.len();
    report.stations_with_observed_operators = calls.stations();

    Ok((registry, report))
}

/// Pull the station master and schedule members out of the archive and
/// scan them. An unreadable archive degrades to an empty result.
fn scan_archive(bytes: Vec<u8>, report: &mut BuildReport) -> CallingOperators {
    let archive = match TimetableArchive::open(bytes) {
        Ok(archive) => archive,
        Err(e) => {
            warn!(error = %e, "could not open timetable archive");
            report.degraded = true;
            return CallingOperators::default();
        }
    };

    let locations = match archive.station_master.as_deref() {
        Some(bytes) => LocationMap::from_bytes(bytes),
        None => LocationMap::default(),
    };
    report.location_duplicates = locations.duplicates();

    match archive.schedule.as_deref() {
        Some(bytes) => {
            let calls = TimetableScanner::scan(&locations, bytes);
            report.unresolved_locations = calls.unresolved_locations();
            calls
        }
        None => CallingOperators::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const KB_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<StationList xmlns="http://nationalrail.co.uk/xml/station">
  <Station>
    <Name>Tonbridge</Name>
    <CrsCode>TON</CrsCode>
    <StationOperator>SE</StationOperator>
    <NumOfPlatforms>4</NumOfPlatforms>
    <StationType>through</StationType>
    <NationalRailRegion>South East</NationalRailRegion>
  </Station>
  <Station>
    <Name>Paddock Wood</Name>
    <CrsCode>PDW</CrsCode>
    <StationOperator>SE</StationOperator>
  </Station>
</StationList>"#;

    fn msn_line(name: &str, tiploc: &str, crs: &str) -> String {
        let mut line = vec![b' '; 82];
        line[0] = b'A';
        line[5..5 + name.len()].copy_from_slice(name.as_bytes());
        line[36..36 + tiploc.len()].copy_from_slice(tiploc.as_bytes());
        line[49..49 + crs.len()].copy_from_slice(crs.as_bytes());
        String::from_utf8(line).unwrap()
    }

    fn timetable_zip() -> Vec<u8> {
        let msn = msn_line("TONBRIDGE", "TONBRDG", "TON");
        let mca = [
            "HD TPS.UDFROC1.PD240512",
            "BSNC12345",
            "BXXXY12345 SN",
            "LOTONBRDG 1000",
            "LTNOWHERE 1100",
        ]
        .join("\n");

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("RJTTF293.MSN", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(msn.as_bytes()).unwrap();
        writer
            .start_file("RJTTF293.MCA", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(mca.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn full_pipeline_reconciles_tonbridge() {
        let kb = parse_stations(KB_XML).unwrap();
        let mut report = BuildReport::default();
        let calls = scan_archive(timetable_zip(), &mut report);
        let registry = reconcile(&kb, &calls);

        let ton = &registry["TON"];
        assert_eq!(ton.crs, "TON");
        assert_eq!(ton.name.as_deref(), Some("Tonbridge"));
        assert_eq!(ton.owning_operator.as_deref(), Some("Southeastern"));
        assert_eq!(ton.platforms, Some(4));
        assert_eq!(ton.toc_codes, vec!["SE", "SN"]);
        assert_eq!(ton.operators, vec!["Southeastern", "Southern"]);

        // PDW saw no schedule traffic; it keeps its owning operator
        assert_eq!(registry["PDW"].toc_codes, vec!["SE"]);
        assert!(!report.degraded);
    }

    #[test]
    fn unreadable_archive_degrades() {
        let kb = parse_stations(KB_XML).unwrap();
        let mut report = BuildReport::default();
        let calls = scan_archive(b"definitely not a zip".to_vec(), &mut report);

        assert!(report.degraded);
        assert!(calls.is_empty());

        let registry = reconcile(&kb, &calls);
        assert_eq!(registry["TON"].toc_codes, vec!["SE"]);
    }

    #[test]
    fn archive_without_members_contributes_nothing() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("README.TXT", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"no timetable here").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let mut report = BuildReport::default();
        let calls = scan_archive(bytes, &mut report);
        assert!(calls.is_empty());
    }

    #[test]
    fn degraded_registry_serializes_identically_across_runs() {
        let kb = parse_stations(KB_XML).unwrap();
        let first =
            serde_json::to_string_pretty(&reconcile(&kb, &CallingOperators::default())).unwrap();
        let second =
            serde_json::to_string_pretty(&reconcile(&kb, &CallingOperators::default())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn report_counts_flow_through() {
        let kb = parse_stations(KB_XML).unwrap();
        let mut report = BuildReport::default();
        let calls = scan_archive(timetable_zip(), &mut report);

        // The LT record's location was not in the MSN file
        assert_eq!(report.unresolved_locations, 1);
        assert_eq!(report.location_duplicates, 0);

        let registry = reconcile(&kb, &calls);
        assert_eq!(registry.len(), kb.stations.len());
    }
}
