//! Conversions between time, selection fraction and strip pixels.
//!
//! Everything here is pure: no function touches shared state, so the
//! mapper can be used from any thread.

use serde::Serialize;

use crate::error::{Result, TrimError};

/// Layout of the thumbnail strip inside the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineGeometry {
    pub viewer_width_px: f64,
    pub cell_height_px: f64,
    pub thumbnail_count: u32,
    pub strip_width_px: f64,
}

/// Fits square thumbnail cells of `cell_height_px` into `viewer_width_px`.
///
/// Fails with [`TrimError::InvalidGeometry`] when the cell height is not a
/// positive finite number or the viewer width is negative or not finite.
///
/// # Example
/// ```
/// use trim_engine::compute_geometry;
///
/// let geometry = compute_geometry(320.0, 50.0).expect("valid geometry");
/// assert_eq!(geometry.thumbnail_count, 6);
/// assert_eq!(geometry.strip_width_px, 300.0);
/// ```
pub fn compute_geometry(viewer_width_px: f64, cell_height_px: f64) -> Result<TimelineGeometry> {
    let cell_ok = cell_height_px.is_finite() && cell_height_px > 0.0;
    let viewer_ok = viewer_width_px.is_finite() && viewer_width_px >= 0.0;
    if !cell_ok || !viewer_ok {
        return Err(TrimError::InvalidGeometry {
            viewer_width_px,
            cell_height_px,
        });
    }

    let thumbnail_count = (viewer_width_px / cell_height_px).floor().max(0.0) as u32;
    Ok(TimelineGeometry {
        viewer_width_px,
        cell_height_px,
        thumbnail_count,
        strip_width_px: f64::from(thumbnail_count) * cell_height_px,
    })
}

/// Converts a selection fraction into milliseconds, clamped to `[0, duration_ms]`.
pub fn fraction_to_ms(fraction: f64, duration_ms: u64) -> u64 {
    if fraction.is_nan() {
        return 0;
    }

    let duration = duration_ms as f64;
    (fraction * duration).round().clamp(0.0, duration) as u64
}

/// Converts a strip offset into a fraction of the strip.
///
/// A strip without width maps every offset to `0.0`.
pub fn px_to_fraction(px: f64, strip_width_px: f64) -> f64 {
    if !strip_width_px.is_finite() || strip_width_px <= 0.0 {
        return 0.0;
    }
    px / strip_width_px
}

/// Converts milliseconds into a strip offset. A zero duration maps to `0.0`.
pub fn ms_to_px(ms: u64, duration_ms: u64, strip_width_px: f64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (ms as f64 / duration_ms as f64) * strip_width_px
}

/// Conversion constants for one geometry and one video timebase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineMapper {
    geometry: TimelineGeometry,
    duration_ms: u64,
}

impl TimelineMapper {
    pub fn new(geometry: TimelineGeometry, duration_ms: u64) -> Self {
        Self {
            geometry,
            duration_ms,
        }
    }

    pub fn geometry(&self) -> TimelineGeometry {
        self.geometry
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn strip_width_px(&self) -> f64 {
        self.geometry.strip_width_px
    }

    /// Maps a strip offset to the matching video time.
    pub fn px_to_ms(&self, px: f64) -> u64 {
        fraction_to_ms(
            px_to_fraction(px, self.geometry.strip_width_px),
            self.duration_ms,
        )
    }

    /// Maps a video time to its strip offset.
    pub fn ms_to_px(&self, ms: u64) -> f64 {
        ms_to_px(ms, self.duration_ms, self.geometry.strip_width_px)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        TimelineMapper, compute_geometry, fraction_to_ms, ms_to_px, px_to_fraction,
    };
    use crate::error::TrimError;

    #[test]
    fn geometry_floors_thumbnail_count() {
        let geometry = compute_geometry(359.0, 50.0).expect("valid geometry");

        assert_eq!(geometry.thumbnail_count, 7);
        assert_relative_eq!(geometry.strip_width_px, 350.0);
        assert!(geometry.strip_width_px <= geometry.viewer_width_px);
    }

    #[test]
    fn geometry_keeps_strip_within_viewer_for_many_inputs() {
        for viewer in [1.0, 49.9, 50.0, 123.4, 360.0, 1_919.5] {
            for cell in [0.5, 7.0, 33.3, 50.0, 200.0] {
                let geometry = compute_geometry(viewer, cell).expect("valid geometry");
                assert_eq!(geometry.thumbnail_count, (viewer / cell).floor() as u32);
                assert!(geometry.strip_width_px <= viewer);
            }
        }
    }

    #[test]
    fn narrow_viewer_yields_empty_strip() {
        let geometry = compute_geometry(30.0, 50.0).expect("valid geometry");

        assert_eq!(geometry.thumbnail_count, 0);
        assert_eq!(geometry.strip_width_px, 0.0);
    }

    #[test]
    fn non_positive_cell_height_is_rejected() {
        for cell in [0.0, -1.0, f64::NAN] {
            let error = compute_geometry(300.0, cell).expect_err("cell height must be rejected");
            assert!(matches!(error, TrimError::InvalidGeometry { .. }));
        }
    }

    #[test]
    fn negative_viewer_width_is_rejected() {
        for viewer in [-100.0, -0.5, f64::NEG_INFINITY] {
            let error = compute_geometry(viewer, 50.0).expect_err("viewer width must be rejected");
            assert!(matches!(error, TrimError::InvalidGeometry { .. }));
        }
        let empty = compute_geometry(0.0, 50.0).expect("zero width is an empty strip");
        assert_eq!(empty.strip_width_px, 0.0);
    }

    #[test]
    fn fraction_to_ms_clamps_to_duration() {
        assert_eq!(fraction_to_ms(0.5, 60_000), 30_000);
        assert_eq!(fraction_to_ms(-0.2, 60_000), 0);
        assert_eq!(fraction_to_ms(1.7, 60_000), 60_000);
        assert_eq!(fraction_to_ms(f64::NAN, 60_000), 0);
    }

    #[test]
    fn empty_strip_maps_to_zero_fraction() {
        assert_eq!(px_to_fraction(120.0, 0.0), 0.0);
    }

    #[test]
    fn zero_duration_maps_to_left_edge() {
        assert_eq!(ms_to_px(5_000, 0, 300.0), 0.0);
    }

    #[test]
    fn fraction_survives_a_trip_through_time_and_pixels() {
        let duration_ms = 60_000;
        for strip in [1.0, 300.0, 1_234.5] {
            for step in 0..=20 {
                let fraction = f64::from(step) / 20.0;
                let ms = fraction_to_ms(fraction, duration_ms);
                let back = px_to_fraction(ms_to_px(ms, duration_ms, strip), strip);
                assert_relative_eq!(back, fraction, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn mapper_converts_pixels_to_time() {
        let geometry = compute_geometry(300.0, 50.0).expect("valid geometry");
        let mapper = TimelineMapper::new(geometry, 60_000);

        assert_eq!(mapper.px_to_ms(270.0), 54_000);
        assert_relative_eq!(mapper.ms_to_px(15_000), 75.0);
    }
}
