//! Serialized registry entry.

use serde::Serialize;

/// One station in the output registry file.
///
/// Field names match the published JSON shape; absent data serializes as
/// `null` rather than being omitted, so consumers see a stable schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationEntry {
    pub crs: String,
    pub name: Option<String>,
    pub owning_operator: Option<String>,
    pub platforms: Option<u32>,
    pub station_type: Option<String>,
    pub region: Option<String>,
    pub toc_codes: Vec<String>,
    pub operators: Vec<String>,
}
