//! Error types surfaced to the view.
//!
//! Every error is terminal for the current selection only; the app stays usable.

use thiserror::Error;

/// Malformed or missing required fields in the point sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("point {index} (#{point_number}) has a missing or unknown winner")]
    UnknownWinner { index: usize, point_number: u32 },

    #[error("point {index}: set {found} follows set {previous}")]
    SetOrder {
        index: usize,
        previous: u32,
        found: u32,
    },

    #[error("point {index}: game {found} follows game {previous} in set {set_number}")]
    GameOrder {
        index: usize,
        set_number: u32,
        previous: u32,
        found: u32,
    },

    #[error("row {row}: invalid {column} value '{value}'")]
    Malformed {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// The match selector matched no rows in the dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("match not found: {selector}")]
pub struct NotFoundError {
    pub selector: String,
}

impl NotFoundError {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

/// Top-level error for a single load/analyse request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("dataset unavailable: {0}")]
    Dataset(String),
}

impl AppError {
    /// Short title for the inline error box.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Data(_) => "Data error",
            AppError::NotFound(_) => "Match not found",
            AppError::InvalidSelection(_) => "Invalid selection",
            AppError::Dataset(_) => "Dataset unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_converts_into_app_error() {
        let err: AppError = DataError::SetOrder {
            index: 4,
            previous: 2,
            found: 1,
        }
        .into();
        assert_eq!(err.title(), "Data error");
        assert_eq!(err.to_string(), "point 4: set 1 follows set 2");
    }

    #[test]
    fn not_found_message_names_selector() {
        let err: AppError = NotFoundError::new("Wimbledon 2019: A vs B").into();
        assert_eq!(err.to_string(), "match not found: Wimbledon 2019: A vs B");
    }
}
