use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No creature with id '{0}' in the encounter")]
    NotFound(String),

    #[error("The file '{}' must have a .json, .yaml or .yml extension.", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to (de)serialize encounter as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to (de)serialize encounter as YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
