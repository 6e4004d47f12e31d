use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

/// Result type used by the trim engine crate.
pub type Result<T> = std::result::Result<T, TrimError>;

/// Errors produced while building or driving a trim session.
#[derive(Debug)]
pub enum TrimError {
    InvalidGeometry {
        viewer_width_px: f64,
        cell_height_px: f64,
    },
    PlaybackDesync {
        operation: &'static str,
        reason: String,
    },
    ThumbnailUnavailable {
        index: usize,
        reason: String,
    },
    InvalidConfig {
        reason: String,
    },
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    ConfigSerialization {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Media(media_ffmpeg::MediaFfmpegError),
}

impl Display for TrimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGeometry {
                viewer_width_px,
                cell_height_px,
            } => write!(
                f,
                "invalid timeline geometry: viewer width {viewer_width_px}px, cell height {cell_height_px}px"
            ),
            Self::PlaybackDesync { operation, reason } => {
                write!(f, "playback {operation} failed: {reason}")
            }
            Self::ThumbnailUnavailable { index, reason } => {
                write!(f, "thumbnail {index} unavailable: {reason}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid trim config: {reason}"),
            Self::ConfigIo { path, source } => {
                write!(f, "failed to read trim config {} ({source})", path.display())
            }
            Self::ConfigSerialization { path, source } => match path {
                Some(path) => write!(
                    f,
                    "trim config deserialization failed at {} ({source})",
                    path.display()
                ),
                None => write!(f, "trim config deserialization failed ({source})"),
            },
            Self::Media(err) => write!(f, "media backend error: {err}"),
        }
    }
}

impl std::error::Error for TrimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigIo { source, .. } => Some(source),
            Self::ConfigSerialization { source, .. } => Some(source),
            Self::Media(err) => Some(err),
            _ => None,
        }
    }
}

impl From<media_ffmpeg::MediaFfmpegError> for TrimError {
    fn from(value: media_ffmpeg::MediaFfmpegError) -> Self {
        Self::Media(value)
    }
}

/// Coarse error classification reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimErrorKind {
    InvalidGeometry,
    PlaybackDesync,
    Thumbnail,
    Config,
    Media,
}

impl From<&TrimError> for TrimErrorKind {
    fn from(value: &TrimError) -> Self {
        match value {
            TrimError::InvalidGeometry { .. } => Self::InvalidGeometry,
            TrimError::PlaybackDesync { .. } => Self::PlaybackDesync,
            TrimError::ThumbnailUnavailable { .. } => Self::Thumbnail,
            TrimError::InvalidConfig { .. }
            | TrimError::ConfigIo { .. }
            | TrimError::ConfigSerialization { .. } => Self::Config,
            TrimError::Media(_) => Self::Media,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TrimError, TrimErrorKind};

    #[test]
    fn invalid_geometry_message_names_both_inputs() {
        let error = TrimError::InvalidGeometry {
            viewer_width_px: 300.0,
            cell_height_px: 0.0,
        };

        let message = error.to_string();
        assert!(message.contains("300"));
        assert!(message.contains("cell height 0"));
        assert_eq!(TrimErrorKind::from(&error), TrimErrorKind::InvalidGeometry);
    }

    #[test]
    fn config_errors_share_one_kind() {
        let error = TrimError::InvalidConfig {
            reason: "thumbnail_quality must be within 1..=100".to_string(),
        };
        assert_eq!(TrimErrorKind::from(&error), TrimErrorKind::Config);
    }
}
