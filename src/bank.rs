use std::fs;
use std::path::Path;

use crate::question::{BankError, GameData};

#[derive(Debug, thiserror::Error)]
pub enum BankLoadError {
    #[error("failed to read question bank at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse question bank at {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
    #[error("question bank is malformed: {0}")]
    Invalid(#[from] BankError),
}

impl PartialEq for BankLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ReadError { path: left, .. }, Self::ReadError { path: right, .. }) => {
                left == right
            }
            (Self::ParseError { path: left, .. }, Self::ParseError { path: right, .. }) => {
                left == right
            }
            (Self::Invalid(left), Self::Invalid(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for BankLoadError {}

/// Label used in errors for banks that did not come from a file.
const INLINE_SOURCE: &str = "<inline>";

/// Parses and validates a question bank from JSON text.
pub fn parse_bank(json: &str) -> Result<GameData, BankLoadError> {
    parse_with_source(json.as_bytes(), INLINE_SOURCE)
}

/// Reads, parses and validates a question bank file.
///
/// # Errors
/// * [`BankLoadError::ReadError`] if the file cannot be read.
/// * [`BankLoadError::ParseError`] if the content is not a bank in JSON form.
/// * [`BankLoadError::Invalid`] if the bank does not fill a 3×3 board.
pub fn load_bank(path: impl AsRef<Path>) -> Result<GameData, BankLoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| BankLoadError::ReadError {
        path: path.display().to_string(),
        source,
    })?;

    parse_with_source(&data, &path.display().to_string())
}

fn parse_with_source(data: &[u8], source_label: &str) -> Result<GameData, BankLoadError> {
    let parsed: GameData =
        serde_json::from_slice(data).map_err(|source| BankLoadError::ParseError {
            path: source_label.to_string(),
            source,
        })?;

    parsed.validate()?;
    Ok(parsed)
}
