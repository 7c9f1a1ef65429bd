//! Registry JSON writer.

use std::path::{Path, PathBuf};

use super::merge::Registry;

/// Default output path for the registry file.
pub const DEFAULT_OUTPUT_PATH: &str = "uk_stations.json";

/// Errors from writing the registry file.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Registry could not be serialized
    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem write failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serialize the whole registry and write it in one shot, replacing any
/// previous file at `path`.
///
/// Serialization completes before the file is opened, so a serialization
/// failure never leaves a truncated registry behind. Parent directories
/// are created if needed.
pub fn write_registry(registry: &Registry, path: &Path) -> Result<(), WriteError> {
    let json = serde_json::to_string_pretty(registry)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, json).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
