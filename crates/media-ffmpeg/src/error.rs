use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MediaFfmpegError>;

/// Failures from the `ffprobe` duration probe and the `ffmpeg` JPEG grab.
#[derive(Debug)]
pub enum MediaFfmpegError {
    InvalidTimestampSeconds(f64),
    InvalidThumbnailRequest {
        reason: &'static str,
    },
    /// The container reported no duration (`N/A` or empty).
    MissingDuration(PathBuf),
    /// The duration field was present but not a non-negative number.
    InvalidDuration(String),
    /// `ffprobe` or `ffmpeg` could not be started.
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },
    ToolFailed {
        tool: &'static str,
        target: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    NonUtf8Output(std::string::FromUtf8Error),
    /// `ffmpeg` exited cleanly but its output does not start with a JPEG marker.
    NotJpeg {
        len: usize,
    },
}

impl Display for MediaFfmpegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestampSeconds(value) => {
                write!(f, "thumbnail timestamp must be finite and >= 0, got {value}")
            }
            Self::InvalidThumbnailRequest { reason } => {
                write!(f, "invalid thumbnail request: {reason}")
            }
            Self::MissingDuration(path) => {
                write!(f, "no duration reported for {}", path.display())
            }
            Self::InvalidDuration(raw) => write!(f, "unreadable duration {raw:?}"),
            Self::Spawn { tool, source } => write!(f, "could not start {tool}: {source}"),
            Self::ToolFailed {
                tool,
                target,
                status,
                stderr,
            } => {
                write!(f, "{tool} failed on {target} ({status}): {}", stderr.trim())
            }
            Self::NonUtf8Output(err) => write!(f, "ffprobe output is not utf8: {err}"),
            Self::NotJpeg { len } => {
                write!(f, "ffmpeg returned {len} bytes without a jpeg header")
            }
        }
    }
}

impl std::error::Error for MediaFfmpegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::NonUtf8Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for MediaFfmpegError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::NonUtf8Output(value)
    }
}
