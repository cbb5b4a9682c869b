use std::collections::BTreeMap;

use kurbo::{Line, Shape};

use crate::foundation::core::{Affine, BezPath, Rect, Rgba8Premul};
use crate::grid::shade::WallShade;

#[derive(Clone, Debug)]
/// Backend-agnostic draw commands for one frame.
///
/// A plan is a pure function of its inputs: executing it against a surface cleared to
/// `clear` always produces the same pixels, so redundant redraws are harmless.
pub struct RenderPlan {
    pub surface: SurfaceDesc,
    pub clear: Rgba8Premul,
    /// Content (cell-space pixels at scale 1) to surface pixels.
    pub transform: Affine,
    pub ops: Vec<DrawOp>,
}

impl RenderPlan {
    /// Number of fill/stroke calls a backend will issue for this plan.
    pub fn draw_calls(&self) -> usize {
        self.ops.len()
    }

    pub fn stroke_ops(&self) -> impl Iterator<Item = (&BezPath, Rgba8Premul, StrokeStyle)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokePath { path, color, style } => Some((path, *color, *style)),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Surface declaration in device pixels.
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEnds {
    /// Butt caps, miter joins.
    Square,
    /// Round caps and joins.
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Width in content units; scales with zoom.
    pub width: f64,
    pub ends: LineEnds,
}

#[derive(Clone, Debug)]
/// Draw operation emitted by the frame compiler.
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba8Premul,
    },
    /// One fill call for an arbitrary compound path.
    FillPath {
        path: BezPath,
        color: Rgba8Premul,
    },
    StrokePath {
        path: BezPath,
        color: Rgba8Premul,
        style: StrokeStyle,
    },
}

/// Wall segments grouped by quantized shade, built once per frame.
///
/// Each shade becomes exactly one stroke, so the number of wall draw calls is bounded by the
/// number of distinct shades in view, never by the number of segments.
#[derive(Clone, Debug, Default)]
pub struct WallBatches {
    batches: BTreeMap<WallShade, Vec<Line>>,
}

impl WallBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shade: WallShade, segment: Line) {
        self.batches.entry(shade).or_default().push(segment);
    }

    pub fn shade_count(&self) -> usize {
        self.batches.len()
    }

    pub fn segment_count(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }

    pub fn segments(&self, shade: WallShade) -> &[Line] {
        self.batches.get(&shade).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// One stroke per shade, lightest first so darker walls win where segments overlap.
    pub fn into_ops(self, width: f64) -> impl Iterator<Item = DrawOp> {
        self.batches.into_iter().rev().map(move |(shade, lines)| {
            let mut path = BezPath::new();
            for line in &lines {
                path.move_to(line.p0);
                path.line_to(line.p1);
            }
            DrawOp::StrokePath {
                path,
                color: shade.color(),
                style: StrokeStyle {
                    width,
                    ends: LineEnds::Square,
                },
            }
        })
    }
}

/// Append an axis-aligned rectangle as a closed subpath.
pub fn push_rect(path: &mut BezPath, rect: Rect) {
    path.extend(rect.path_elements(0.1));
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
