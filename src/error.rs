//! Typed errors for schema handling, transport and accessors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("missing reference: {kind} id '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("duplicate {kind} id '{id}' in {owner}")]
    DuplicateId {
        kind: &'static str,
        owner: String,
        id: String,
    },
    #[error("schema load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum QoreError {
    /// Non-2xx response or network failure. `status` is `None` when no response arrived.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
    #[error("field not found: {field_id}")]
    FieldNotFound { field_id: String },
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("\"{name}\" is not a valid template, please check if it is a qore project or choose from the following available templates: {}", available.join(", "))]
    InvalidTemplate { name: String, available: Vec<String> },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("decode: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl QoreError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        QoreError::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            QoreError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QoreError {
    fn from(e: serde_json::Error) -> Self {
        QoreError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QoreError>;
