//! Reconciliation of knowledgebase stations with observed operators.

use std::collections::BTreeMap;

use crate::cif::CallingOperators;
use crate::domain::{AtocCode, operator_name};
use crate::kb::KbStations;

use super::entry::StationEntry;

/// The final registry, keyed by CRS code. `BTreeMap` keeps the JSON
/// object keys sorted, so identical inputs serialize byte-identically.
pub type Registry = BTreeMap<String, StationEntry>;

/// Merge the observed calling operators into the knowledgebase stations.
///
/// The owning operator is always first in `toc_codes`; the accumulated
/// codes follow in their set order with anything already present
/// skipped. A station nobody was observed calling at keeps whatever the
/// knowledgebase gave it; an empty list is a data gap, not an error.
pub fn reconcile(kb: &KbStations, calls: &CallingOperators) -> Registry {
    kb.stations
        .iter()
        .map(|(crs, station)| {
            let mut toc_codes: Vec<AtocCode> = Vec::new();
            if let Some(owning) = station.owning_operator {
                toc_codes.push(owning);
            }
            if let Some(observed) = calls.get(crs) {
                for &code in observed {
                    if !toc_codes.contains(&code) {
                        toc_codes.push(code);
                    }
                }
            }

            let operators = toc_codes
                .iter()
                .map(|&code| display_name(code))
                .collect();

            let entry = StationEntry {
                crs: crs.to_string(),
                name: station.name.clone(),
                owning_operator: station
                    .owning_operator
                    .and_then(operator_name)
                    .map(str::to_string),
                platforms: station.platforms,
                station_type: station.station_type.clone(),
                region: station.region.clone(),
                toc_codes: toc_codes.iter().map(|c| c.as_str().to_string()).collect(),
                operators,
            };

            (crs.to_string(), entry)
        })
        .collect()
}

/// Display name for an operator, falling back to the raw code for
/// operators missing from the name table.
fn display_name(code: AtocCode) -> String {
    operator_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.as_str().to_string())
}
