use std::path::Path;
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};

/// Reads the container duration of a media file in whole milliseconds.
///
/// # Example
/// ```no_run
/// use media_ffmpeg::probe_duration_ms;
///
/// let duration_ms = probe_duration_ms("sample.mp4").expect("probe should succeed");
/// assert!(duration_ms > 0);
/// ```
pub fn probe_duration_ms(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=nokey=1:noprint_wrappers=1",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Spawn {
            tool: "ffprobe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::ToolFailed {
            tool: "ffprobe",
            target: path.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    parse_duration_ms(&stdout)?.ok_or_else(|| MediaFfmpegError::MissingDuration(path.to_path_buf()))
}

fn parse_duration_ms(stdout: &str) -> Result<Option<u64>> {
    let value = stdout.trim();
    if value.is_empty() || value == "N/A" {
        return Ok(None);
    }

    let seconds = value
        .parse::<f64>()
        .map_err(|_| MediaFfmpegError::InvalidDuration(value.to_string()))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(MediaFfmpegError::InvalidDuration(value.to_string()));
    }

    Ok(Some((seconds * 1_000.0).round() as u64))
}
