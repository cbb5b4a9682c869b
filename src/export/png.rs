//! Full-extent export: renders the whole maze at a fixed cell size, independent of the current
//! pan and zoom, and encodes it as PNG.
//!
//! Every failure here is surfaced as [`MazeViewError::Export`], the one error class the host is
//! expected to show to the user.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::animation::scheduler::RevealView;
use crate::config::ViewConfig;
use crate::foundation::error::{MazeViewError, MazeViewResult};
use crate::grid::model::{Endpoints, Grid};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::compile::compile_export;

/// Preview size used for generated-maze thumbnails.
pub const THUMBNAIL_SIZE: (u32, u32) = (400, 225);

/// What to include in an export.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportOptions<'a> {
    /// Endpoint overrides; the grid's own endpoints otherwise.
    pub endpoints: Option<Endpoints>,
    /// Reveal state to bake in. [`RevealView::none`] exports the bare maze.
    pub reveal: RevealView<'a>,
    /// Cell size in pixels. `None` uses the configured export cell size.
    pub cell_px: Option<f64>,
}

/// Render the full-extent pass. The result is straight-alpha RGBA.
#[tracing::instrument(skip_all, fields(rows = grid.rows, cols = grid.cols))]
pub fn render_export(
    backend: &mut dyn RenderBackend,
    grid: &Grid,
    opts: &ExportOptions<'_>,
    cfg: &ViewConfig,
) -> MazeViewResult<FrameRGBA> {
    let cell_px = opts.cell_px.unwrap_or(cfg.export_cell_px);
    let frame = compile_export(grid, opts.endpoints, opts.reveal, cell_px, cfg)
        .and_then(|plan| backend.render_plan(&plan))
        .map_err(|e| {
            tracing::warn!(error = %e, "export render failed");
            into_export(e)
        })?;
    Ok(frame.to_straight())
}

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> MazeViewResult<Vec<u8>> {
    let straight = frame.to_straight();
    let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
        .ok_or_else(|| MazeViewError::export("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| MazeViewError::export(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Write a frame to `path` as PNG, creating parent directories.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> MazeViewResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            MazeViewError::export(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    let straight = frame.to_straight();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "export write failed");
        MazeViewError::export(format!("write png '{}': {e}", path.display()))
    })
}

/// Suggested download name: `maze_{rows}x{cols}_{unix_millis}.png`.
pub fn export_filename(grid: &Grid, unix_millis: u128) -> String {
    format!("maze_{}x{}_{unix_millis}.png", grid.rows, grid.cols)
}

/// Render, name and save an export into `dir`. Returns the written path.
pub fn export_to_dir(
    backend: &mut dyn RenderBackend,
    grid: &Grid,
    opts: &ExportOptions<'_>,
    cfg: &ViewConfig,
    dir: &Path,
) -> MazeViewResult<PathBuf> {
    let frame = render_export(backend, grid, opts, cfg)?;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(export_filename(grid, millis));
    save_png(&frame, &path)?;
    Ok(path)
}

/// Scale `frame` to cover `width x height`, cropping the overflow evenly on both sides.
pub fn thumbnail(frame: &FrameRGBA, width: u32, height: u32) -> MazeViewResult<FrameRGBA> {
    if width == 0 || height == 0 || frame.width == 0 || frame.height == 0 {
        return Err(MazeViewError::export("thumbnail needs a non-empty source and target"));
    }
    let straight = frame.to_straight();
    let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
        .ok_or_else(|| MazeViewError::export("frame buffer does not match its dimensions"))?;

    let scale = f64::max(
        f64::from(width) / f64::from(frame.width),
        f64::from(height) / f64::from(frame.height),
    );
    let scaled_w = ((f64::from(frame.width) * scale).round() as u32).max(width);
    let scaled_h = ((f64::from(frame.height) * scale).round() as u32).max(height);
    let scaled = image::imageops::resize(
        &img,
        scaled_w,
        scaled_h,
        image::imageops::FilterType::Triangle,
    );
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    let cropped = image::imageops::crop_imm(&scaled, x, y, width, height).to_image();

    Ok(FrameRGBA {
        width,
        height,
        data: cropped.into_raw(),
        premultiplied: false,
    })
}

fn into_export(e: MazeViewError) -> MazeViewError {
    match e {
        MazeViewError::Export(_) => e,
        other => MazeViewError::export(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
