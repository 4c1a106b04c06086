//! Input file loading for the runway CLI.
//!
//! Inputs are [`RunwayBeamInput`] documents in JSON or TOML, picked by file
//! extension. Missing optional sections fall back to their defaults.

use std::path::{Path, PathBuf};

use runway_core::{CalcError, RunwayBeamInput};
use thiserror::Error;

/// CLI-level failures
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Unsupported input format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Malformed input text, before any file path is known
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Serialization format for inputs and templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            other => Err(CliError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Load an input file, format chosen by extension
pub fn load_input(path: &Path) -> Result<RunwayBeamInput> {
    let format = Format::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_input(&contents, format).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded input from {:?}", path);
    Ok(input)
}

/// Parse input text in the given format
pub fn parse_input(contents: &str, format: Format) -> std::result::Result<RunwayBeamInput, ParseError> {
    let input: RunwayBeamInput = match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Toml => toml::from_str(contents)?,
    };
    Ok(input)
}

/// Render an input document, used by `runway template`
pub fn render_input(input: &RunwayBeamInput, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(input).map_err(|e| CliError::Render(e.to_string())),
        Format::Toml => toml::to_string_pretty(input).map_err(|e| CliError::Render(e.to_string())),
    }
}
