//! Schedule scan: which operators call at which stations.
//!
//! The schedule file spreads one schedule across several record types: a
//! "BS" record opens it, a "BX" record names the operator, and
//! "LO"/"LI"/"LT" records list the calling points. The operator in force
//! for the current schedule is cross-record state, modelled as an
//! explicit enum threaded through the scan so each transition can be
//! exercised record-by-record.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{AtocCode, Crs, Tiploc};

use super::locations::LocationMap;
use super::record::{Record, lossy_lines, mca};

/// Scanner state between schedule records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No schedule seen yet.
    Idle,
    /// Inside a schedule whose operator is not yet known.
    ScheduleOpen,
    /// Inside a schedule with a known operator.
    OperatorKnown(AtocCode),
}

/// Operators observed calling at each public station code.
///
/// The per-station sets are unordered as far as the feed is concerned;
/// the reconciliation step imposes the final ordering.
#[derive(Debug, Default)]
pub struct CallingOperators {
    by_crs: HashMap<Crs, BTreeSet<AtocCode>>,
    unresolved_locations: u64,
}

impl CallingOperators {
    /// The operators seen calling at a station, if any.
    pub fn get(&self, crs: &Crs) -> Option<&BTreeSet<AtocCode>> {
        self.by_crs.get(crs)
    }

    /// Number of stations with at least one observed operator.
    pub fn stations(&self) -> usize {
        self.by_crs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_crs.is_empty()
    }

    /// Location records whose TIPLOC did not resolve to a public code.
    pub fn unresolved_locations(&self) -> u64 {
        self.unresolved_locations
    }
}

/// State machine over schedule records, accumulating [`CallingOperators`].
#[derive(Debug)]
pub struct TimetableScanner<'a> {
    locations: &'a LocationMap,
    state: ScanState,
    calls: CallingOperators,
}

impl<'a> TimetableScanner<'a> {
    pub fn new(locations: &'a LocationMap) -> Self {
        Self {
            locations,
            state: ScanState::Idle,
            calls: CallingOperators::default(),
        }
    }

    /// Scan a whole schedule file.
    pub fn scan(locations: &LocationMap, bytes: &[u8]) -> CallingOperators {
        let mut scanner = TimetableScanner::new(locations);
        for line in lossy_lines(bytes) {
            scanner.push_line(&line);
        }
        let calls = scanner.finish();
        debug!(
            stations = calls.stations(),
            unresolved = calls.unresolved_locations,
            "scanned schedule file"
        );
        calls
    }

    /// Feed one schedule line to the state machine.
    pub fn push_line(&mut self, line: &str) {
        let record = Record::new(line);
        match record.record_type() {
            // A new schedule begins: whatever operator was in force must
            // not leak into it.
            "BS" => self.state = ScanState::ScheduleOpen,

            "BX" => {
                if self.state == ScanState::ScheduleOpen
                    && let Ok(operator) = AtocCode::parse(record.field(mca::OPERATOR))
                {
                    self.state = ScanState::OperatorKnown(operator);
                }
            }

            "LO" | "LI" | "LT" => {
                // Without an operator there is nothing to attribute; a
                // schedule that never had a BX record contributes nothing.
                let ScanState::OperatorKnown(operator) = self.state else {
                    return;
                };
                let Ok(tiploc) = Tiploc::parse(record.field(mca::TIPLOC)) else {
                    return;
                };
                match self.locations.resolve(&tiploc) {
                    Some(crs) => {
                        self.calls.by_crs.entry(crs).or_default().insert(operator);
                    }
                    None => self.calls.unresolved_locations += 1,
                }
            }

            _ => {}
        }
    }

    /// Current state, for record-by-record tests.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Consume the scanner and return what it accumulated.
    pub fn finish(self) -> CallingOperators {
        self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ton_map() -> LocationMap {
        [
            (
                Tiploc::parse("TONBRDG").unwrap(),
                Crs::parse("TON").unwrap(),
            ),
            (
                Tiploc::parse("PDOCKYD").unwrap(),
                Crs::parse("PDW").unwrap(),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn bs() -> &'static str {
        "BSNC123452405120512310000001"
    }

    fn bx(operator: &str) -> String {
        format!("BXXXY12345{:>3}0000000", operator)
    }

    fn lo(tiploc: &str) -> String {
        format!("LO{tiploc:<7}1000 10004  TB")
    }

    fn li(tiploc: &str) -> String {
        format!("LI{tiploc:<7}1010 10114  T")
    }

    #[test]
    fn operator_attributed_to_resolved_locations() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("SN"));
        scanner.push_line(&lo("TONBRDG"));
        let calls = scanner.finish();

        let ton = calls.get(&Crs::parse("TON").unwrap()).unwrap();
        assert!(ton.contains(&AtocCode::parse("SN").unwrap()));
        assert_eq!(ton.len(), 1);
    }

    #[test]
    fn bs_opens_schedule_without_operator() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        assert_eq!(scanner.state(), ScanState::Idle);
        scanner.push_line(bs());
        assert_eq!(scanner.state(), ScanState::ScheduleOpen);
    }

    #[test]
    fn bx_supplies_operator() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("SE"));
        assert_eq!(
            scanner.state(),
            ScanState::OperatorKnown(AtocCode::parse("SE").unwrap())
        );
    }

    #[test]
    fn locations_before_bx_contribute_nothing() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&lo("TONBRDG"));
        scanner.push_line(&li("PDOCKYD"));
        assert_eq!(scanner.state(), ScanState::ScheduleOpen);

        let calls = scanner.finish();
        assert!(calls.is_empty());
    }

    #[test]
    fn bx_before_any_bs_is_ignored() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(&bx("SE"));
        assert_eq!(scanner.state(), ScanState::Idle);

        scanner.push_line(&lo("TONBRDG"));
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn new_bs_clears_previous_operator() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("SE"));
        scanner.push_line(&lo("TONBRDG"));

        // Second schedule has no BX; its locations must not inherit SE
        scanner.push_line(bs());
        assert_eq!(scanner.state(), ScanState::ScheduleOpen);
        scanner.push_line(&li("PDOCKYD"));

        let calls = scanner.finish();
        assert!(calls.get(&Crs::parse("TON").unwrap()).is_some());
        assert!(calls.get(&Crs::parse("PDW").unwrap()).is_none());
    }

    #[test]
    fn unparseable_operator_keeps_schedule_open() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("  "));
        assert_eq!(scanner.state(), ScanState::ScheduleOpen);

        // A later BX may still supply the operator for this schedule
        scanner.push_line(&bx("SN"));
        assert_eq!(
            scanner.state(),
            ScanState::OperatorKnown(AtocCode::parse("SN").unwrap())
        );
    }

    #[test]
    fn unresolved_locations_are_counted_not_errors() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("SE"));
        scanner.push_line(&lo("NOWHERE"));
        scanner.push_line(&li("TONBRDG"));

        let calls = scanner.finish();
        assert_eq!(calls.unresolved_locations(), 1);
        assert!(calls.get(&Crs::parse("TON").unwrap()).is_some());
    }

    #[test]
    fn multiple_operators_accumulate_per_station() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        for operator in ["SN", "SE", "SN"] {
            scanner.push_line(bs());
            scanner.push_line(&bx(operator));
            scanner.push_line(&lo("TONBRDG"));
        }

        let calls = scanner.finish();
        let ton = calls.get(&Crs::parse("TON").unwrap()).unwrap();
        assert_eq!(ton.len(), 2);
        assert!(ton.contains(&AtocCode::parse("SE").unwrap()));
        assert!(ton.contains(&AtocCode::parse("SN").unwrap()));
    }

    #[test]
    fn unknown_record_types_do_not_change_state() {
        let map = ton_map();
        let mut scanner = TimetableScanner::new(&map);

        scanner.push_line(bs());
        scanner.push_line(&bx("SE"));
        scanner.push_line("CR change en route record");
        scanner.push_line("HD header");
        assert_eq!(
            scanner.state(),
            ScanState::OperatorKnown(AtocCode::parse("SE").unwrap())
        );
    }

    #[test]
    fn full_file_scan() {
        let map = ton_map();
        let data = [
            "HD TPS.UDFROC1.PD2405120512241".to_string(),
            bs().to_string(),
            bx("SN"),
            lo("TONBRDG"),
            li("PDOCKYD"),
            "ZZ".to_string(),
        ]
        .join("\n");

        let calls = TimetableScanner::scan(&map, data.as_bytes());
        assert_eq!(calls.stations(), 2);
    }
}
