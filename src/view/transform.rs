use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Pan/zoom state of the viewport.
///
/// `translate_x` / `translate_y` are in CSS pixels; `scale` is a factor kept in
/// `[min_scale, max_scale]` by the controller. Translation is unconstrained.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn translation(self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Translate then scale: `screen = content * scale + translate`.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.scale)
    }

    pub fn content_to_screen(self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    pub fn screen_to_content(self, p: Point) -> Point {
        Point::new(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    /// Content-space rectangle covered by a screen-space rectangle.
    pub fn screen_rect_to_content(self, r: Rect) -> Rect {
        let p0 = self.screen_to_content(Point::new(r.x0, r.y0));
        let p1 = self.screen_to_content(Point::new(r.x1, r.y1));
        Rect::from_points(p0, p1)
    }

    /// Same scale, translation shifted by `offset`.
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            translate_x: self.translate_x + offset.x,
            translate_y: self.translate_y + offset.y,
            ..self
        }
    }

    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.scale - other.scale).abs() <= eps
            && (self.translate_x - other.translate_x).abs() <= eps
            && (self.translate_y - other.translate_y).abs() <= eps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/transform.rs"]
mod tests;
