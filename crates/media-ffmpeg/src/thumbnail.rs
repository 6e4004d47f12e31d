use std::path::Path;
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Encodes one JPEG frame near `at_seconds`, scaled to `max_height_px`.
///
/// Width follows the source aspect ratio. `quality` uses the familiar
/// `1..=100` scale, higher meaning better.
///
/// # Example
/// ```no_run
/// use media_ffmpeg::extract_jpeg_thumbnail;
///
/// let jpeg = extract_jpeg_thumbnail("sample.mp4", 0.5, 50, 75)
///     .expect("thumbnail should encode");
/// assert!(!jpeg.is_empty());
/// ```
pub fn extract_jpeg_thumbnail(
    path: impl AsRef<Path>,
    at_seconds: f64,
    max_height_px: u32,
    quality: u8,
) -> Result<Vec<u8>> {
    if !at_seconds.is_finite() || at_seconds < 0.0 {
        return Err(MediaFfmpegError::InvalidTimestampSeconds(at_seconds));
    }
    if max_height_px == 0 {
        return Err(MediaFfmpegError::InvalidThumbnailRequest {
            reason: "max height must be positive",
        });
    }
    if !(1..=100).contains(&quality) {
        return Err(MediaFfmpegError::InvalidThumbnailRequest {
            reason: "quality must be within 1..=100",
        });
    }

    let path = path.as_ref();
    let filter = format!("scale=-2:{max_height_px}");
    let output = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-v")
        .arg("error")
        .arg("-ss")
        .arg(format!("{at_seconds:.3}"))
        .arg("-i")
        .arg(path)
        .arg("-vf")
        .arg(&filter)
        .arg("-frames:v")
        .arg("1")
        .arg("-q:v")
        .arg(mjpeg_qscale(quality).to_string())
        .arg("-f")
        .arg("image2pipe")
        .arg("-vcodec")
        .arg("mjpeg")
        .arg("-")
        .output()
        .map_err(|source| MediaFfmpegError::Spawn {
            tool: "ffmpeg",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::ToolFailed {
            tool: "ffmpeg",
            target: format!("{} at {at_seconds:.3}s", path.display()),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    if !output.stdout.starts_with(&JPEG_SOI) {
        return Err(MediaFfmpegError::NotJpeg {
            len: output.stdout.len(),
        });
    }

    Ok(output.stdout)
}

/// Maps `1..=100` quality onto the MJPEG `-q:v` scale (31 worst, 2 best).
///
/// # Example
/// ```
/// use media_ffmpeg::mjpeg_qscale;
///
/// assert_eq!(mjpeg_qscale(100), 2);
/// assert_eq!(mjpeg_qscale(1), 31);
/// ```
pub fn mjpeg_qscale(quality: u8) -> u8 {
    let quality = u32::from(quality.clamp(1, 100));
    let scaled = (quality - 1) * 29 / 99;
    (31 - scaled) as u8
}
