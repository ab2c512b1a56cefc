use crate::model::StudentId;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure a store, loader or renderer operation can report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a student with id {0} already exists")]
    DuplicateId(StudentId),

    #[error("no student found matching {0}")]
    NotFound(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("student name cannot be empty")]
    EmptyName,

    #[error("student name cannot contain line breaks or control characters: {0:?}")]
    InvalidName(String),

    #[error("no student records")]
    EmptyStore,

    #[error("cannot read records from {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot save records to {}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} malformed records in the data file would be lost by saving")]
    SkippedRecords(usize),

    #[error("cannot export records as CSV")]
    Export(#[from] csv::Error),
}

impl Error {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Error::OutOfRange {
            field,
            value: value.into(),
            min,
            max,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True when the data file does not exist, as opposed to existing but
    /// being unreadable.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Error::SourceUnavailable { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
