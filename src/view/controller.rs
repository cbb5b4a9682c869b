//! Viewport controller: turns pointer, wheel and resize input into [`ViewTransform`] updates.
//!
//! Dragging is split in two. While the pointer moves only a transient offset changes (the
//! host applies it as a cheap CSS-level translation of the already drawn back-buffer); the
//! authoritative transform is updated once, on release, so the grid is redrawn once per drag
//! rather than once per pointer event.
//!
//! Window-level listeners needed during a drag are modelled as explicit subscriptions owned by
//! the controller. The host mirrors [`ViewportController::subscriptions`] onto real event
//! listeners and must drop them all after [`ViewportController::dispose`].

use std::collections::BTreeSet;

use crate::config::ViewConfig;
use crate::foundation::core::{Point, Size, Vec2};
use crate::view::transform::ViewTransform;

/// Input listener the host must keep attached while the controller wants it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// Container-scoped, lives as long as the controller.
    Wheel,
    /// Container-scoped, lives as long as the controller.
    Resize,
    /// Window-scoped, only during a drag.
    PointerMove,
    /// Window-scoped, only during a drag.
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    origin: Point,
    offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ZoomLimits {
    min_scale: f64,
    max_scale: f64,
    out_factor: f64,
    in_factor: f64,
}

#[derive(Debug)]
pub struct ViewportController {
    limits: ZoomLimits,
    transform: ViewTransform,
    container: Size,
    rows: usize,
    cols: usize,
    drag: Option<DragState>,
    subscriptions: BTreeSet<ListenerKind>,
    disposed: bool,
}

impl ViewportController {
    /// Create a controller and subscribe its container-scoped listeners.
    pub fn new(cfg: &ViewConfig) -> Self {
        Self {
            limits: ZoomLimits {
                min_scale: cfg.min_scale,
                max_scale: cfg.max_scale,
                out_factor: cfg.zoom_out_factor,
                in_factor: cfg.zoom_in_factor,
            },
            transform: ViewTransform::default(),
            container: Size::ZERO,
            rows: 0,
            cols: 0,
            drag: None,
            subscriptions: BTreeSet::from([ListenerKind::Wheel, ListenerKind::Resize]),
            disposed: false,
        }
    }

    /// Authoritative transform. Unchanged for the whole duration of a drag.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Transform as currently seen on screen: authoritative transform plus drag offset.
    pub fn visual_transform(&self) -> ViewTransform {
        self.transform.translated(self.drag_offset())
    }

    pub fn drag_offset(&self) -> Vec2 {
        self.drag.map_or(Vec2::ZERO, |d| d.offset)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    pub fn set_grid_dims(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = ListenerKind> + '_ {
        self.subscriptions.iter().copied()
    }

    pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    /// Scale 1, grid bounding box centered in the container. Also abandons any drag.
    ///
    /// Returns `false` (and leaves the transform alone) while the container or cell size is
    /// not measured yet.
    pub fn center(&mut self, cell_size: f64) -> bool {
        if self.disposed || self.container.is_empty() || !cell_size.is_finite() || cell_size <= 0.0
        {
            return false;
        }
        let grid_w = self.cols as f64 * cell_size;
        let grid_h = self.rows as f64 * cell_size;
        self.transform = ViewTransform {
            scale: 1.0_f64.clamp(self.limits.min_scale, self.limits.max_scale),
            translate_x: (self.container.width - grid_w) / 2.0,
            translate_y: (self.container.height - grid_h) / 2.0,
        };
        self.cancel_drag();
        true
    }

    /// Wheel-style zoom step. `delta > 0` zooms out, `delta < 0` zooms in, zero is ignored.
    ///
    /// Returns whether the transform changed (it does not once the scale is pinned at a bound).
    pub fn zoom(&mut self, delta: f64, pivot: Option<Point>) -> bool {
        if delta > 0.0 {
            self.zoom_by(self.limits.out_factor, pivot)
        } else if delta < 0.0 {
            self.zoom_by(self.limits.in_factor, pivot)
        } else {
            false
        }
    }

    /// Multiply the scale by `factor`, clamped to the scale bounds. Ignored during a drag,
    /// which keeps the transform fixed until the drag is released.
    ///
    /// With a pivot the content under it stays fixed:
    /// `t' = pivot - (pivot - t) * (s' / s)`.
    pub fn zoom_by(&mut self, factor: f64, pivot: Option<Point>) -> bool {
        if self.disposed || self.drag.is_some() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let old = self.transform;
        let new_scale = (old.scale * factor).clamp(self.limits.min_scale, self.limits.max_scale);
        if new_scale == old.scale {
            return false;
        }
        let ratio = new_scale / old.scale;
        self.transform = match pivot {
            Some(p) => ViewTransform {
                scale: new_scale,
                translate_x: p.x - (p.x - old.translate_x) * ratio,
                translate_y: p.y - (p.y - old.translate_y) * ratio,
            },
            None => ViewTransform {
                scale: new_scale,
                ..old
            },
        };
        true
    }

    /// Start a drag and subscribe the window-level move/up listeners.
    pub fn begin_drag(&mut self, at: Point) {
        if self.disposed {
            return;
        }
        self.drag = Some(DragState {
            origin: at,
            offset: Vec2::ZERO,
        });
        self.subscriptions.insert(ListenerKind::PointerMove);
        self.subscriptions.insert(ListenerKind::PointerUp);
    }

    /// Update the transient offset. Returns it, or `None` when no drag is active.
    pub fn update_drag(&mut self, at: Point) -> Option<Vec2> {
        let drag = self.drag.as_mut()?;
        drag.offset = at - drag.origin;
        Some(drag.offset)
    }

    /// Commit the drag offset into the transform and drop the drag listeners.
    ///
    /// Returns whether a drag was active.
    pub fn end_drag(&mut self, at: Point) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let offset = at - drag.origin;
        self.transform = self.transform.translated(offset);
        self.drop_drag_listeners();
        tracing::debug!(dx = offset.x, dy = offset.y, "drag committed");
        true
    }

    /// Abandon a drag without committing its offset.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            self.drop_drag_listeners();
        }
    }

    /// Unsubscribe everything. The controller ignores further input afterwards.
    pub fn dispose(&mut self) -> Vec<ListenerKind> {
        self.drag = None;
        self.disposed = true;
        std::mem::take(&mut self.subscriptions)
            .into_iter()
            .collect()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn drop_drag_listeners(&mut self) {
        self.subscriptions.remove(&ListenerKind::PointerMove);
        self.subscriptions.remove(&ListenerKind::PointerUp);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/controller.rs"]
mod tests;
