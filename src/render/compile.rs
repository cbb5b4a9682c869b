//! Grid renderer: compiles grid, transform and reveal state into a [`RenderPlan`].
//!
//! Compilation is pure. The plan always starts from a cleared surface, so executing the same
//! plan twice yields identical pixels and redundant redraws cost time but never correctness.

use std::ops::Range;

use kurbo::Line;

use crate::animation::scheduler::RevealView;
use crate::config::{MAX_SURFACE_PX, ViewConfig};
use crate::foundation::core::{Affine, BezPath, Coord, Point, Rect, Size};
use crate::foundation::error::{MazeViewError, MazeViewResult};
use crate::grid::model::{Endpoints, Grid, Wall};
use crate::grid::shade::WallShading;
use crate::render::plan::{
    DrawOp, LineEnds, RenderPlan, StrokeStyle, SurfaceDesc, WallBatches, push_rect,
};
use crate::view::transform::ViewTransform;

/// Everything one viewport frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub grid: &'a Grid,
    /// Interactive start/end overrides; the grid's own endpoints otherwise.
    pub endpoints: Option<Endpoints>,
    pub transform: ViewTransform,
    pub cell_size: f64,
    /// Visible container size in logical pixels.
    pub viewport: Size,
    pub reveal: RevealView<'a>,
}

/// Rows and columns the wall scan visits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellWindow {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl CellWindow {
    pub fn full(grid: &Grid) -> Self {
        Self {
            rows: 0..grid.rows,
            cols: 0..grid.cols,
        }
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.rows.contains(&at.row) && self.cols.contains(&at.col)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

/// Wall stroke width in content units.
pub fn wall_width(cell_size: f64) -> f64 {
    if cell_size > 5.0 { 1.0 } else { 0.5 }
}

/// Cells intersecting `content` (a rect in content units) plus `margin` cells on every side.
pub fn visible_cells(
    content: Rect,
    cell_size: f64,
    rows: usize,
    cols: usize,
    margin: usize,
) -> CellWindow {
    let span = |lo: f64, hi: f64, n: usize| -> Range<usize> {
        let n_f = n as f64;
        let first = ((lo / cell_size).floor() - margin as f64).clamp(0.0, n_f) as usize;
        let last = ((hi / cell_size).ceil() + margin as f64).clamp(0.0, n_f) as usize;
        first..last.max(first)
    };
    CellWindow {
        rows: span(content.y0, content.y1, rows),
        cols: span(content.x0, content.x1, cols),
    }
}

/// Compile one viewport frame.
///
/// Returns `Ok(None)` while the container or cell size is not measured yet; the caller skips
/// the draw and waits for the next resize. Malformed grids and out-of-range endpoint
/// overrides are rejected.
#[tracing::instrument(skip(inputs, cfg), fields(rows = inputs.grid.rows, cols = inputs.grid.cols))]
pub fn compile_frame(
    inputs: &FrameInputs<'_>,
    cfg: &ViewConfig,
) -> MazeViewResult<Option<RenderPlan>> {
    let FrameInputs {
        grid,
        endpoints,
        transform,
        cell_size,
        viewport,
        reveal,
    } = *inputs;

    if viewport.is_empty() || !cell_size.is_finite() || cell_size <= 0.0 {
        tracing::debug!(cell_size, "container not measured, skipping draw");
        return Ok(None);
    }
    if let Err(e) = grid.validate() {
        tracing::warn!(error = %e, "rejecting grid");
        return Err(e);
    }
    if !transform.scale.is_finite()
        || !transform.translate_x.is_finite()
        || !transform.translate_y.is_finite()
        || transform.scale <= 0.0
    {
        return Err(MazeViewError::validation(format!(
            "degenerate view transform {transform:?}"
        )));
    }
    let endpoints = grid.endpoints_with(endpoints)?;

    let pad = cfg.overscan_padding_px.max(0.0);
    let surface = SurfaceDesc {
        width: (viewport.width + 2.0 * pad).ceil() as u32,
        height: (viewport.height + 2.0 * pad).ceil() as u32,
    };

    // The back-buffer covers the viewport plus `pad` on every side.
    let visible = transform.screen_rect_to_content(Rect::new(
        -pad,
        -pad,
        viewport.width + pad,
        viewport.height + pad,
    ));
    let window = visible_cells(
        visible,
        cell_size,
        grid.rows,
        grid.cols,
        cfg.cull_overscan_cells,
    );

    let ops = grid_ops(grid, endpoints, cell_size, &window, reveal, cfg);
    Ok(Some(RenderPlan {
        surface,
        clear: cfg.colors.background,
        transform: Affine::translate((pad, pad)) * transform.to_affine(),
        ops,
    }))
}

/// Compile the full-extent pass used by export: fixed cell size, no pan/zoom, no padding.
///
/// The surface is `cols * cell + 1` by `rows * cell + 1` so the closing right and bottom
/// walls land inside it.
#[tracing::instrument(skip(grid, reveal, cfg), fields(rows = grid.rows, cols = grid.cols))]
pub fn compile_export(
    grid: &Grid,
    endpoints: Option<Endpoints>,
    reveal: RevealView<'_>,
    cell_size: f64,
    cfg: &ViewConfig,
) -> MazeViewResult<RenderPlan> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(MazeViewError::validation(format!(
            "export cell size must be positive, got {cell_size}"
        )));
    }
    grid.validate()?;
    let endpoints = grid.endpoints_with(endpoints)?;
    let (w, h) = grid.extent(cell_size);
    let surface = SurfaceDesc {
        width: export_side("width", w)?,
        height: export_side("height", h)?,
    };

    let ops = grid_ops(
        grid,
        endpoints,
        cell_size,
        &CellWindow::full(grid),
        reveal,
        cfg,
    );
    Ok(RenderPlan {
        surface,
        clear: cfg.colors.background,
        // Half-pixel offset keeps 1px walls on whole device pixels.
        transform: Affine::translate((0.5, 0.5)),
        ops,
    })
}

/// Export surface side for a content extent: one extra pixel for the closing wall.
fn export_side(axis: &str, extent: f64) -> MazeViewResult<u32> {
    let px = extent.ceil() + 1.0;
    if px > f64::from(MAX_SURFACE_PX) {
        return Err(MazeViewError::validation(format!(
            "export {axis} of {px} px exceeds the {MAX_SURFACE_PX} px surface limit"
        )));
    }
    Ok(px as u32)
}

fn grid_ops(
    grid: &Grid,
    endpoints: Endpoints,
    cell_size: f64,
    window: &CellWindow,
    reveal: RevealView<'_>,
    cfg: &ViewConfig,
) -> Vec<DrawOp> {
    let colors = &cfg.colors;
    let cell_rect = |at: Coord| {
        let x = at.col as f64 * cell_size;
        let y = at.row as f64 * cell_size;
        Rect::new(x, y, x + cell_size, y + cell_size)
    };
    let mut ops = Vec::new();

    // Markers. Start wins when both endpoints coincide.
    ops.push(DrawOp::FillRect {
        rect: cell_rect(endpoints.start),
        color: colors.start,
    });
    if endpoints.end != endpoints.start {
        ops.push(DrawOp::FillRect {
            rect: cell_rect(endpoints.end),
            color: colors.end,
        });
    }

    // Exploration: one compound fill.
    let mut explored = BezPath::new();
    for &at in reveal.revealed_visited() {
        if window.contains(at) {
            push_rect(&mut explored, cell_rect(at));
        }
    }
    if !explored.elements().is_empty() {
        ops.push(DrawOp::FillPath {
            path: explored,
            color: colors.visited,
        });
    }

    if let Some(route) = route_path(reveal, cell_size) {
        ops.push(DrawOp::StrokePath {
            path: route,
            color: colors.path,
            style: StrokeStyle {
                width: cell_size * colors.path_width_factor,
                ends: LineEnds::Round,
            },
        });
    }

    let shading = WallShading::new(cfg.solid_wall_threshold);
    let batches = wall_batches(grid, cell_size, window, shading);
    if batches.is_empty() {
        tracing::debug!("no walls in view");
    }
    ops.extend(batches.into_ops(wall_width(cell_size)));
    ops
}

fn route_path(reveal: RevealView<'_>, cell_size: f64) -> Option<BezPath> {
    if !reveal.exploration_done() {
        return None;
    }
    let points = reveal.revealed_path();
    let center = |at: &Coord| {
        Point::new(
            (at.col as f64 + 0.5) * cell_size,
            (at.row as f64 + 0.5) * cell_size,
        )
    };
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(center(first));
    if rest.is_empty() {
        // Zero-length segment so round caps still mark a lone point.
        path.line_to(center(first));
    }
    for at in rest {
        path.line_to(center(at));
    }
    Some(path)
}

/// Scan the window and batch every present wall segment by shade.
pub fn wall_batches(
    grid: &Grid,
    cell_size: f64,
    window: &CellWindow,
    shading: WallShading,
) -> WallBatches {
    let mut batches = WallBatches::new();
    for row in window.rows.clone() {
        let Some(cells) = grid.grid.get(row) else {
            continue;
        };
        let y = row as f64 * cell_size;
        for col in window.cols.clone() {
            let Some(cell) = cells.get(col) else {
                continue;
            };
            let x = col as f64 * cell_size;
            for (wall, weight) in cell.present_walls() {
                let (x2, y2) = (x + cell_size, y + cell_size);
                let segment = match wall {
                    Wall::North => Line::new((x, y), (x2, y)),
                    Wall::East => Line::new((x2, y), (x2, y2)),
                    Wall::South => Line::new((x, y2), (x2, y2)),
                    Wall::West => Line::new((x, y), (x, y2)),
                };
                batches.push(shading.shade(weight), segment);
            }
        }
    }
    batches
}

#[cfg(test)]
#[path = "../../tests/unit/render/compile.rs"]
mod tests;
