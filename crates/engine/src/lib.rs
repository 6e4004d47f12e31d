//! UI-agnostic core for trimming a video with two handles over a thumbnail strip.

pub mod config;
pub mod error;
pub mod gesture;
pub mod label;
pub mod mapper;
pub mod observer;
pub mod playback;
pub mod session;
pub mod thumbnails;

pub use config::TrimConfig;
pub use error::{Result, TrimError, TrimErrorKind};
pub use gesture::{DragOutcome, DragRejection, DragSession, Handle};
pub use label::format_duration_label;
pub use mapper::{
    TimelineGeometry, TimelineMapper, compute_geometry, fraction_to_ms, ms_to_px, px_to_fraction,
};
pub use observer::{NoopObserver, TrimEvent, TrimObserver};
pub use playback::{PlaybackControl, PlaybackStatus};
pub use session::{PlayheadState, TrimSession, TrimSnapshot};
pub use thumbnails::{
    FfmpegThumbnailSource, Thumbnail, ThumbnailPlan, ThumbnailRequest, ThumbnailSource,
    generate_strip, probe_video_duration_ms,
};
