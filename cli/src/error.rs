//! Errors surfaced by the `qore` command.

use qore_sdk::QoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Sdk(#[from] QoreError),
    /// A value that has neither a flag, an environment variable nor a saved default.
    #[error("missing --{flag} (or set {env})")]
    Missing { flag: &'static str, env: &'static str },
    #[error("config file: {0}")]
    Config(String),
    #[error("{} already exists", .0.display())]
    Exists(std::path::PathBuf),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// Process exit code: 2 for usage problems, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Missing { .. } | CliError::Sdk(QoreError::InvalidTemplate { .. }) => 2,
            _ => 1,
        }
    }
}
