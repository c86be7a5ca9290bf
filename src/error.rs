use thiserror::Error;

/// Bad form input. Nothing is mutated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number, got {input:?}")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        value: String,
    },

    #[error("unknown workout type {0:?} (expected running or cycling)")]
    UnknownKind(String),
}

impl ValidationError {
    /// Name of the offending form field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. }
            | Self::NonFinite { field }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. } => *field,
            Self::UnknownKind(_) => "type",
        }
    }
}

/// A persisted snapshot (or one record in it) could not be turned back
/// into typed workouts.
#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("malformed snapshot at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {id}: unknown workout kind {kind:?}")]
    UnknownKind { id: String, kind: String },

    #[error("record {id}: missing field {field}")]
    MissingField { id: String, field: &'static str },

    #[error("record {id}: invalid date {date:?}")]
    InvalidDate { id: String, date: String },

    #[error("record {id}: invalid {field}: {reason}")]
    InvalidValue {
        id: String,
        field: &'static str,
        reason: String,
    },
}

/// Lookup miss. Callers resolving a marker click treat this as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no workout with id {id}")]
pub struct NotFound {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("encoding snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced by [`crate::collection::WorkoutLog`] operations.
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Store(#[from] StoreError),
}
