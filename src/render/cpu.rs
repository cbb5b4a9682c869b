use vello_cpu::kurbo::{Cap, Join, Stroke};

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul};
use crate::foundation::error::{MazeViewError, MazeViewResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::plan::{DrawOp, LineEnds, RenderPlan, StrokeStyle, SurfaceDesc};

/// CPU rasterizer. The pixmap and render context are kept between frames and only
/// reallocated when the surface size changes.
pub struct CpuBackend {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    fn ensure_surface(&mut self, desc: SurfaceDesc) -> MazeViewResult<&mut CpuSurface> {
        let width: u16 = desc
            .width
            .try_into()
            .map_err(|_| MazeViewError::render("surface width exceeds u16"))?;
        let height: u16 = desc
            .height
            .try_into()
            .map_err(|_| MazeViewError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(MazeViewError::render("surface must be at least 1x1"));
        }

        let surface = match self.surface.take() {
            Some(s) if s.width == width && s.height == height => s,
            _ => CpuSurface {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
                ctx: vello_cpu::RenderContext::new(width, height),
            },
        };
        Ok(self.surface.insert(surface))
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(
        skip(self, plan),
        fields(w = plan.surface.width, h = plan.surface.height, ops = plan.ops.len())
    )]
    fn render_plan(&mut self, plan: &RenderPlan) -> MazeViewResult<FrameRGBA> {
        let clear = match self.settings.clear_rgba {
            Some([r, g, b, a]) => Rgba8Premul::from_straight_rgba(r, g, b, a),
            None => plan.clear,
        };
        let surface = self.ensure_surface(plan.surface)?;
        clear_pixmap(&mut surface.pixmap, clear.to_array());

        let ctx = &mut surface.ctx;
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint(clear));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(surface.width),
            f64::from(surface.height),
        ));

        ctx.set_transform(affine_to_cpu(plan.transform));
        for op in &plan.ops {
            draw_op(ctx, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(paint(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
        }
        DrawOp::FillPath { path, color } => {
            ctx.set_paint(paint(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath { path, color, style } => {
            ctx.set_paint(paint(*color));
            ctx.set_stroke(stroke_to_cpu(*style));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
    }
}

fn paint(color: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_straight_rgba();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn stroke_to_cpu(style: StrokeStyle) -> Stroke {
    let (cap, join) = match style.ends {
        LineEnds::Square => (Cap::Butt, Join::Miter),
        LineEnds::Round => (Cap::Round, Join::Round),
    };
    Stroke::new(style.width).with_caps(cap).with_join(join)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
