use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("failed to parse event payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing required field {path}")]
    MissingRequiredField { path: String },
}
