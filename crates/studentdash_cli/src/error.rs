use rustyline::error::ReadlineError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use studentdash_core::{DbError, FetchError, RecordServiceError};

/// Top-level CLI failure, printed as `Error: ...` before exiting 1.
#[derive(Debug)]
pub enum CliError {
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseRecords {
        path: PathBuf,
        source: serde_json::Error,
    },
    Db(DbError),
    Service(RecordServiceError),
    Source(FetchError),
    Prompt(ReadlineError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::ParseRecords { path, source } => {
                write!(f, "`{}` is not a JSON array of records: {source}", path.display())
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Prompt(err) => write!(f, "prompt failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseRecords { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Prompt(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RecordServiceError> for CliError {
    fn from(value: RecordServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<FetchError> for CliError {
    fn from(value: FetchError) -> Self {
        Self::Source(value)
    }
}

impl From<ReadlineError> for CliError {
    fn from(value: ReadlineError) -> Self {
        Self::Prompt(value)
    }
}
