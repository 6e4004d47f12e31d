use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use trim_engine::TrimError;

/// Failures that end a CLI run.
#[derive(Debug)]
pub enum CliError {
    MissingDuration,
    ScriptIo {
        path: PathBuf,
        source: std::io::Error,
    },
    ScriptParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    ThumbnailWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    Output(std::io::Error),
    Engine(TrimError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDuration => {
                write!(f, "either --video or --duration-ms is required")
            }
            Self::ScriptIo { path, source } => {
                write!(f, "failed to read script {} ({source})", path.display())
            }
            Self::ScriptParse { path, source } => {
                write!(f, "invalid script {} ({source})", path.display())
            }
            Self::ThumbnailWrite { path, source } => {
                write!(f, "failed to write thumbnail {} ({source})", path.display())
            }
            Self::Output(source) => write!(f, "failed to write output ({source})"),
            Self::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ScriptIo { source, .. } => Some(source),
            Self::ScriptParse { source, .. } => Some(source),
            Self::ThumbnailWrite { source, .. } => Some(source),
            Self::Output(source) => Some(source),
            Self::Engine(err) => Some(err),
            Self::MissingDuration => None,
        }
    }
}

impl From<TrimError> for CliError {
    fn from(value: TrimError) -> Self {
        Self::Engine(value)
    }
}
