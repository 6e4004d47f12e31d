use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, TrimError};
use crate::mapper::TimelineGeometry;

/// One thumbnail the strip needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub index: usize,
    pub video_path: PathBuf,
    pub at_ms: u64,
    pub max_height_px: u32,
    pub quality: u8,
}

/// Encoded thumbnail image. The core never looks inside `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub at_ms: u64,
    pub bytes: Arc<[u8]>,
}

/// Evenly spaced sample points covering the video, one per strip cell.
///
/// # Example
/// ```
/// use trim_engine::{ThumbnailPlan, compute_geometry};
///
/// let geometry = compute_geometry(200.0, 50.0).expect("valid geometry");
/// let plan = ThumbnailPlan::new("clip.mp4", 8_000, &geometry, 75);
/// assert_eq!(plan.timestamps_ms(), vec![0, 2_000, 4_000, 6_000]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailPlan {
    pub video_path: PathBuf,
    pub duration_ms: u64,
    pub max_height_px: u32,
    pub thumbnail_count: u32,
    pub quality: u8,
}

impl ThumbnailPlan {
    pub fn new(
        video_path: impl Into<PathBuf>,
        duration_ms: u64,
        geometry: &TimelineGeometry,
        quality: u8,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            duration_ms,
            max_height_px: geometry.cell_height_px.round().max(1.0) as u32,
            thumbnail_count: geometry.thumbnail_count,
            quality,
        }
    }

    pub fn timestamps_ms(&self) -> Vec<u64> {
        let count = u64::from(self.thumbnail_count);
        (0..count)
            .map(|index| index * self.duration_ms / count)
            .collect()
    }

    pub fn requests(&self) -> Vec<ThumbnailRequest> {
        self.timestamps_ms()
            .into_iter()
            .enumerate()
            .map(|(index, at_ms)| ThumbnailRequest {
                index,
                video_path: self.video_path.clone(),
                at_ms,
                max_height_px: self.max_height_px,
                quality: self.quality,
            })
            .collect()
    }
}

/// Thumbnail generation needed to fill the strip.
pub trait ThumbnailSource {
    fn thumbnail(&self, request: &ThumbnailRequest) -> Result<Thumbnail>;
}

/// Produces the strip thumbnails in timeline order.
///
/// Stops at the first failure so the caller never paints a strip with gaps.
pub fn generate_strip<S>(source: &S, plan: &ThumbnailPlan) -> Result<Vec<Thumbnail>>
where
    S: ThumbnailSource + ?Sized,
{
    let requests = plan.requests();
    let mut strip = Vec::with_capacity(requests.len());
    for request in &requests {
        let thumbnail = source.thumbnail(request)?;
        debug!(
            index = request.index,
            at_ms = request.at_ms,
            bytes = thumbnail.bytes.len(),
            "thumbnail ready"
        );
        strip.push(thumbnail);
    }
    Ok(strip)
}

/// FFmpeg CLI-backed thumbnail source used by production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegThumbnailSource;

impl ThumbnailSource for FfmpegThumbnailSource {
    fn thumbnail(&self, request: &ThumbnailRequest) -> Result<Thumbnail> {
        let jpeg = media_ffmpeg::extract_jpeg_thumbnail(
            &request.video_path,
            request.at_ms as f64 / 1_000.0,
            request.max_height_px,
            request.quality,
        )
        .map_err(|error| TrimError::ThumbnailUnavailable {
            index: request.index,
            reason: error.to_string(),
        })?;

        Ok(Thumbnail {
            index: request.index,
            at_ms: request.at_ms,
            bytes: jpeg.into(),
        })
    }
}

/// Reads the video length through `ffprobe`.
pub fn probe_video_duration_ms(path: impl AsRef<Path>) -> Result<u64> {
    Ok(media_ffmpeg::probe_duration_ms(path)?)
}
