//! Knowledgebase stations XML parser.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::debug;

use crate::domain::{AtocCode, Crs};

use super::error::KbError;

/// Namespace of the Knowledgebase stations schema.
const STATION_NS: Namespace<'static> = Namespace(b"http://nationalrail.co.uk/xml/station");

/// One station as described by the knowledgebase feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KbStation {
    pub name: Option<String>,
    pub owning_operator: Option<AtocCode>,
    pub platforms: Option<u32>,
    pub station_type: Option<String>,
    pub region: Option<String>,
}

/// Parse outcome: stations keyed by CRS, plus per-record skip counts.
///
/// The counts exist for diagnostics only; no per-element problem is an
/// error. Duplicate CRS codes resolve last-seen-wins, which the feed's
/// one-element-per-code guarantee should make unobservable; the count
/// is there to notice when it is not.
#[derive(Debug, Default)]
pub struct KbStations {
    pub stations: BTreeMap<Crs, KbStation>,
    pub dropped_missing_crs: u64,
    pub duplicates: u64,
    pub bad_platform_counts: u64,
}

/// Which station field the text we are inside belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Crs,
    Name,
    Operator,
    Platforms,
    StationType,
    NationalRailRegion,
    Region,
}

fn field_for(local: &[u8]) -> Option<Field> {
    match local {
        b"CrsCode" => Some(Field::Crs),
        b"Name" => Some(Field::Name),
        b"StationOperator" => Some(Field::Operator),
        b"NumOfPlatforms" => Some(Field::Platforms),
        b"StationType" => Some(Field::StationType),
        b"NationalRailRegion" => Some(Field::NationalRailRegion),
        b"Region" => Some(Field::Region),
        _ => None,
    }
}

/// Raw text collected for one `<Station>` element.
#[derive(Debug, Default)]
struct RawStation {
    crs: Option<String>,
    name: Option<String>,
    operator: Option<String>,
    platforms: Option<String>,
    station_type: Option<String>,
    national_rail_region: Option<String>,
    region: Option<String>,
}

impl RawStation {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Crs => &mut self.crs,
            Field::Name => &mut self.name,
            Field::Operator => &mut self.operator,
            Field::Platforms => &mut self.platforms,
            Field::StationType => &mut self.station_type,
            Field::NationalRailRegion => &mut self.national_rail_region,
            Field::Region => &mut self.region,
        }
    }
}

/// Parse the stations document into a CRS-keyed map.
///
/// Per-element problems (missing code, junk platform count) skip the
/// element or field and bump a count; only a document that is not
/// well-formed XML is an error.
pub fn parse_stations(xml: &str) -> Result<KbStations, KbError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = KbStations::default();
    let mut current: Option<RawStation> = None;
    // Nesting depth below the current <Station> element. Only direct
    // children (depth 1) carry station fields; deeper structure such as
    // addresses reuses tag names like <Name>.
    let mut depth = 0usize;
    let mut capture: Option<Field> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((resolve, Event::Start(e))) => {
                let in_feed_ns = matches!(resolve, ResolveResult::Bound(ns) if ns == STATION_NS);
                if current.is_none() {
                    if in_feed_ns && e.local_name().as_ref() == b"Station" {
                        current = Some(RawStation::default());
                        depth = 0;
                        capture = None;
                    }
                } else {
                    depth += 1;
                    capture = if depth == 1 && in_feed_ns {
                        field_for(e.local_name().as_ref())
                    } else {
                        None
                    };
                }
            }

            Ok((_, Event::Text(t))) => {
                if let (Some(raw), Some(field)) = (current.as_mut(), capture)
                    && let Ok(text) = t.xml_content()
                {
                    raw.slot(field).get_or_insert_with(String::new).push_str(&text);
                }
            }

            Ok((_, Event::CData(t))) => {
                if let (Some(raw), Some(field)) = (current.as_mut(), capture) {
                    raw.slot(field)
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&t));
                }
            }

            Ok((_, Event::End(_))) => {
                if let Some(raw) = current.take() {
                    if depth == 0 {
                        out.finish_station(raw);
                    } else {
                        current = Some(raw);
                        depth -= 1;
                        capture = None;
                    }
                }
            }

            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(KbError::Xml {
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        stations = out.stations.len(),
        dropped = out.dropped_missing_crs,
        duplicates = out.duplicates,
        "parsed knowledgebase stations"
    );
    Ok(out)
}

impl KbStations {
    fn finish_station(&mut self, raw: RawStation) {
        let RawStation {
            crs,
            name,
            operator,
            platforms,
            station_type,
            national_rail_region,
            region,
        } = raw;

        let Some(crs) = crs.as_deref().and_then(|s| Crs::parse(s.trim()).ok()) else {
            self.dropped_missing_crs += 1;
            return;
        };

        let platforms = match platforms.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => match s.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    self.bad_platform_counts += 1;
                    None
                }
            },
        };

        let station = KbStation {
            name: nonempty(name),
            owning_operator: operator
                .as_deref()
                .and_then(|s| AtocCode::parse(s.trim()).ok()),
            platforms,
            station_type: nonempty(station_type),
            region: nonempty(national_rail_region).or_else(|| nonempty(region)),
        };

        if self.stations.insert(crs, station).is_some() {
            self.duplicates += 1;
        }
    }
}

fn nonempty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
