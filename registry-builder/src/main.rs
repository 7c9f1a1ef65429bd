use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use registry_builder::build::build_registry;
use registry_builder::cif::{TimetableClient, TimetableConfig};
use registry_builder::kb::{KbClient, KbConfig};
use registry_builder::registry::{DEFAULT_OUTPUT_PATH, write_registry};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The portal authentication handshake lives outside this tool; it
    // hands over a ready token.
    let Ok(token) = std::env::var("NR_AUTH_TOKEN") else {
        error!("NR_AUTH_TOKEN not set; cannot fetch feeds");
        return ExitCode::FAILURE;
    };

    let kb_client = match KbClient::new(KbConfig::new(&token)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create knowledgebase client");
            return ExitCode::FAILURE;
        }
    };
    let timetable_client = match TimetableClient::new(TimetableConfig::new(&token)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create timetable client");
            return ExitCode::FAILURE;
        }
    };

    let (registry, report) = match build_registry(&kb_client, &timetable_client).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "could not obtain the knowledgebase feed; nothing to build");
            return ExitCode::FAILURE;
        }
    };

    if report.degraded {
        warn!("DEGRADED BUILD: operator lists contain owning operators only");
    }
    info!(
        stations = report.stations,
        with_observed_operators = report.stations_with_observed_operators,
        kb_dropped = report.kb_dropped_missing_crs,
        kb_duplicates = report.kb_duplicates,
        bad_platform_counts = report.kb_bad_platform_counts,
        location_duplicates = report.location_duplicates,
        unresolved_locations = report.unresolved_locations,
        "build complete"
    );

    let path = Path::new(DEFAULT_OUTPUT_PATH);
    if let Err(e) = write_registry(&registry, path) {
        error!(error = %e, "failed to write registry");
        return ExitCode::FAILURE;
    }
    info!(path = %path.display(), stations = registry.len(), "wrote station registry");

    ExitCode::SUCCESS
}
