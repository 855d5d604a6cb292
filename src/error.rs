use crate::exit_code;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarksError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("config already exists: {0}")]
    ConfigExists(String),

    #[error("invalid document key: {0}")]
    InvalidDocumentKey(String),

    #[error("document {key} already exists in {collection}")]
    DocumentExists { collection: String, key: String },

    #[error("failed to read collection {collection}: {message}")]
    StoreRead { collection: String, message: String },

    #[error("failed to write {collection}/{key}: {message}")]
    StoreWrite {
        collection: String,
        key: String,
        message: String,
    },

    #[error("unknown house: {0}")]
    UnknownHouse(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("category is required")]
    MissingCategory,

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("missing marks for {house} - {criterion}")]
    MissingMark { house: String, criterion: String },

    #[error("mark for {house} - {criterion} must be a whole number between 1 and {max}, got {value}")]
    MarkOutOfRange {
        house: String,
        criterion: String,
        value: String,
        max: u32,
    },

    #[error("{0} judges have already registered; submissions are closed")]
    JudgeLimitReached(u32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MarksError {
    /// Rejections of user input exit with `REJECTED`; everything else is a runtime failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigExists(_)
            | Self::DocumentExists { .. }
            | Self::UnknownHouse(_)
            | Self::UnknownCategory(_)
            | Self::MissingCategory
            | Self::InvalidSubmission(_)
            | Self::MissingMark { .. }
            | Self::MarkOutOfRange { .. }
            | Self::JudgeLimitReached(_) => exit_code::REJECTED,
            _ => exit_code::RUNTIME_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, MarksError>;
