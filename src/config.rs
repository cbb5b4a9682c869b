//! Tuning constants and runtime configuration.
//!
//! Every magic number the viewer depends on lives in [`ViewConfig`]. Defaults match the
//! interactive viewer; `from_env` lets a host or the CLI adjust the knobs that matter for
//! very large grids without recompiling.

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{MazeViewError, MazeViewResult};

/// Lower bound of the zoom scale.
pub const MIN_SCALE: f64 = 1.0;
/// Upper bound of the zoom scale.
pub const MAX_SCALE: f64 = 20.0;
/// Scale multiplier for a zoom-out step (positive wheel delta).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;
/// Scale multiplier for a zoom-in step (negative wheel delta).
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Margin subtracted from the container box before sizing cells.
pub const CONTAINER_PADDING_PX: f64 = 128.0;
/// Extra back-buffer margin on every side so panned content is still captured.
pub const OVERSCAN_PADDING_PX: f64 = 800.0;
/// Nominal number of animation frames for a whole solve playback.
pub const TARGET_FRAME_COUNT: usize = 600;
/// Minimum time between animation steps; keeps playback at or below display refresh.
pub const MIN_FRAME_INTERVAL_MS: f64 = 16.0;
/// Weight at and above which a wall is drawn solid black.
pub const SOLID_WALL_THRESHOLD: u32 = 255;
/// Cell size used by the full-extent export pass.
pub const EXPORT_CELL_PX: f64 = 10.0;
/// Largest surface side, in device pixels, a render backend is asked to allocate.
pub const MAX_SURFACE_PX: u32 = u16::MAX as u32;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_out_factor: f64,
    pub zoom_in_factor: f64,
    pub container_padding_px: f64,
    pub overscan_padding_px: f64,
    /// Rows/cols kept around the visible window when culling walls.
    pub cull_overscan_cells: usize,
    pub target_frame_count: usize,
    pub min_frame_interval_ms: f64,
    pub solid_wall_threshold: u32,
    pub export_cell_px: f64,
    pub colors: Palette,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba8Premul,
    pub start: Rgba8Premul,
    pub end: Rgba8Premul,
    pub visited: Rgba8Premul,
    pub path: Rgba8Premul,
    /// Path stroke width as a fraction of the cell size.
    pub path_width_factor: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8Premul::opaque(255, 255, 255),
            start: Rgba8Premul::opaque(0x90, 0xee, 0x90),
            end: Rgba8Premul::opaque(0xff, 0x63, 0x47),
            visited: Rgba8Premul::from_straight_rgba(167, 139, 250, 102),
            path: Rgba8Premul::opaque(0xef, 0x44, 0x44),
            path_width_factor: 0.4,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            zoom_in_factor: ZOOM_IN_FACTOR,
            container_padding_px: CONTAINER_PADDING_PX,
            overscan_padding_px: OVERSCAN_PADDING_PX,
            cull_overscan_cells: 2,
            target_frame_count: TARGET_FRAME_COUNT,
            min_frame_interval_ms: MIN_FRAME_INTERVAL_MS,
            solid_wall_threshold: SOLID_WALL_THRESHOLD,
            export_cell_px: EXPORT_CELL_PX,
            colors: Palette::default(),
        }
    }
}

impl ViewConfig {
    /// Defaults overlaid with `MAZEVIEW_*` environment variables. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(n) = env_parse::<usize>("MAZEVIEW_TARGET_FRAMES").filter(|&n| n > 0) {
            cfg.target_frame_count = n;
        }
        if let Some(ms) =
            env_parse::<f64>("MAZEVIEW_FRAME_INTERVAL_MS").filter(|v| v.is_finite() && *v >= 0.0)
        {
            cfg.min_frame_interval_ms = ms;
        }
        if let Some(t) = env_parse::<u32>("MAZEVIEW_SOLID_THRESHOLD").filter(|&t| t > 0) {
            cfg.solid_wall_threshold = t;
        }
        if let Some(px) =
            env_parse::<f64>("MAZEVIEW_OVERSCAN_PX").filter(|v| v.is_finite() && *v >= 0.0)
        {
            cfg.overscan_padding_px = px;
        }
        cfg
    }

    pub fn validate(&self) -> MazeViewResult<()> {
        for (name, value) in [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("zoom_out_factor", self.zoom_out_factor),
            ("zoom_in_factor", self.zoom_in_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MazeViewError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.min_scale > self.max_scale {
            return Err(MazeViewError::validation("min_scale must be <= max_scale"));
        }
        for (name, value) in [
            ("container_padding_px", self.container_padding_px),
            ("overscan_padding_px", self.overscan_padding_px),
            ("min_frame_interval_ms", self.min_frame_interval_ms),
            ("path_width_factor", self.colors.path_width_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MazeViewError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.export_cell_px.is_finite() || self.export_cell_px < 1.0 {
            return Err(MazeViewError::validation(
                "export_cell_px must be finite and >= 1",
            ));
        }
        // One cell plus the closing wall pixel has to fit on an export surface.
        if self.export_cell_px > f64::from(MAX_SURFACE_PX - 1) {
            return Err(MazeViewError::validation(format!(
                "export_cell_px must be <= {}",
                MAX_SURFACE_PX - 1
            )));
        }
        if self.target_frame_count == 0 {
            return Err(MazeViewError::validation("target_frame_count must be > 0"));
        }
        if self.solid_wall_threshold == 0 {
            return Err(MazeViewError::validation(
                "solid_wall_threshold must be > 0",
            ));
        }
        Ok(())
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
