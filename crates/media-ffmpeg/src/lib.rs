mod error;
mod probe;
mod thumbnail;

pub use error::{MediaFfmpegError, Result};
pub use probe::probe_duration_ms;
pub use thumbnail::{extract_jpeg_thumbnail, mjpeg_qscale};
