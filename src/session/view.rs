//! `MazeView`: wires a grid, the viewport controller, the cell-size resolver and the animation
//! scheduler to one drawing surface.
//!
//! The host forwards input through [`MazeView::handle`] and performs the returned
//! [`ViewAction`]s. State changes only mark the view dirty; the host calls
//! [`MazeView::render_if_dirty`] once per display frame, so any number of changes within one
//! frame cost a single render.

use std::time::Duration;

use crate::animation::clock::Clock;
use crate::animation::scheduler::{
    AnimationScheduler, AnimationSequence, FrameOutcome, FrameTicket, Phase, RevealView,
};
use crate::config::ViewConfig;
use crate::export::png::{ExportOptions, render_export};
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::MazeViewResult;
use crate::grid::model::{Endpoints, Grid};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::compile::{FrameInputs, compile_frame};
use crate::render::plan::RenderPlan;
use crate::view::cell_size::CellSizeResolver;
use crate::view::controller::{ListenerKind, ViewportController};
use crate::view::transform::ViewTransform;

/// Input forwarded by the host. Positions are container-relative logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },
    /// `delta_y > 0` zooms out. `at` is the pivot; `None` zooms about the origin.
    Wheel { delta_y: f64, at: Option<Point> },
    /// New container content box.
    Resize { size: Size },
}

/// Side effects the host must carry out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewAction {
    /// Call [`MazeView::render_if_dirty`] on the next frame.
    RenderNeeded,
    /// Translate the presented surface by this offset without redrawing.
    SetCssOffset(Vec2),
    Subscribe(ListenerKind),
    Unsubscribe(ListenerKind),
}

pub struct MazeView {
    cfg: ViewConfig,
    grid: Grid,
    endpoints: Option<Endpoints>,
    resolver: CellSizeResolver,
    controller: ViewportController,
    scheduler: AnimationScheduler,
    ticket: FrameTicket,
    /// Something changed since the last successful render.
    dirty: bool,
    /// A `RenderNeeded` was handed out and no render attempt has happened since.
    render_requested: bool,
}

impl MazeView {
    pub fn new(grid: Grid, cfg: ViewConfig) -> MazeViewResult<Self> {
        cfg.validate()?;
        grid.validate()?;
        let mut resolver = CellSizeResolver::new(cfg.container_padding_px);
        resolver.set_grid_dims(grid.rows, grid.cols);
        let mut controller = ViewportController::new(&cfg);
        controller.set_grid_dims(grid.rows, grid.cols);
        let scheduler = AnimationScheduler::new(&cfg);
        let ticket = scheduler.ticket();
        Ok(Self {
            cfg,
            grid,
            endpoints: None,
            resolver,
            controller,
            scheduler,
            ticket,
            dirty: true,
            render_requested: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &ViewConfig {
        &self.cfg
    }

    pub fn cell_size(&self) -> f64 {
        self.resolver.cell_size()
    }

    pub fn transform(&self) -> ViewTransform {
        self.controller.transform()
    }

    pub fn drag_offset(&self) -> Vec2 {
        self.controller.drag_offset()
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints.unwrap_or_else(|| self.grid.endpoints())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_disposed(&self) -> bool {
        self.controller.is_disposed()
    }

    pub fn listeners(&self) -> Vec<ListenerKind> {
        self.controller.subscriptions().collect()
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn reveal(&self) -> RevealView<'_> {
        self.scheduler.reveal()
    }

    /// Whether the host should keep delivering frame callbacks.
    pub fn animation_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Replace the grid and re-center. Drops endpoint overrides and any running animation.
    pub fn set_grid(&mut self, grid: Grid) -> MazeViewResult<Vec<ViewAction>> {
        if let Err(e) = grid.validate() {
            tracing::warn!(error = %e, "rejecting grid");
            return Err(e);
        }
        self.controller.set_grid_dims(grid.rows, grid.cols);
        self.resolver.set_grid_dims(grid.rows, grid.cols);
        self.grid = grid;
        self.endpoints = None;
        self.scheduler.reset();
        self.ticket = self.scheduler.ticket();
        // A new maze always starts centered, even with unchanged dimensions.
        self.controller.center(self.resolver.cell_size());
        let mut actions = Vec::new();
        self.invalidate(&mut actions);
        Ok(actions)
    }

    /// Override start/end for rendering. Coordinates must lie inside the grid.
    pub fn set_endpoints(
        &mut self,
        endpoints: Option<Endpoints>,
    ) -> MazeViewResult<Vec<ViewAction>> {
        self.grid.endpoints_with(endpoints)?;
        self.endpoints = endpoints;
        let mut actions = Vec::new();
        self.invalidate(&mut actions);
        Ok(actions)
    }

    /// Start playing a new sequence, replacing the current one.
    pub fn assign_sequence(&mut self, sequence: AnimationSequence) -> MazeViewResult<FrameTicket> {
        self.grid.check_coords("visited", &sequence.visited)?;
        self.grid.check_coords("path", &sequence.path)?;
        self.ticket = self.scheduler.assign(sequence);
        self.dirty = true;
        Ok(self.ticket)
    }

    pub fn reset_animation(&mut self) {
        self.scheduler.reset();
        self.ticket = self.scheduler.ticket();
        self.dirty = true;
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    /// Reveal the rest of the current sequence at once. No-op while paused.
    pub fn finish_animation(&mut self) {
        if self.scheduler.finish() > 0 {
            self.dirty = true;
        }
    }

    pub fn set_on_complete(&mut self, f: impl FnMut() + 'static) {
        self.scheduler.set_on_complete(f);
    }

    /// Frame callback. Paced by the configured minimum frame interval.
    pub fn on_frame(&mut self, now: Duration) -> FrameOutcome {
        if self.is_disposed() {
            return FrameOutcome::Ignored;
        }
        let outcome = self.scheduler.on_frame(self.ticket, now);
        if outcome.needs_redraw() {
            self.dirty = true;
        }
        outcome
    }

    pub fn on_frame_from(&mut self, clock: &dyn Clock) -> FrameOutcome {
        self.on_frame(clock.now())
    }

    /// Translate one host input event into controller operations.
    pub fn handle(&mut self, event: InputEvent) -> Vec<ViewAction> {
        let mut actions = Vec::new();
        if self.is_disposed() {
            return actions;
        }
        match event {
            InputEvent::Resize { size } => {
                self.controller.set_container(size);
                if let Some(cs) = self.resolver.observe(size) {
                    self.controller.center(cs);
                }
                self.invalidate(&mut actions);
            }
            InputEvent::PointerDown { at } => {
                if !self.controller.is_dragging() {
                    self.controller.begin_drag(at);
                    actions.push(ViewAction::Subscribe(ListenerKind::PointerMove));
                    actions.push(ViewAction::Subscribe(ListenerKind::PointerUp));
                }
            }
            InputEvent::PointerMove { at } => {
                if let Some(offset) = self.controller.update_drag(at) {
                    actions.push(ViewAction::SetCssOffset(offset));
                }
            }
            InputEvent::PointerUp { at } => {
                if self.controller.end_drag(at) {
                    actions.push(ViewAction::SetCssOffset(Vec2::ZERO));
                    actions.push(ViewAction::Unsubscribe(ListenerKind::PointerMove));
                    actions.push(ViewAction::Unsubscribe(ListenerKind::PointerUp));
                    self.invalidate(&mut actions);
                }
            }
            InputEvent::Wheel { delta_y, at } => {
                if self.controller.zoom(delta_y, at) {
                    self.invalidate(&mut actions);
                }
            }
        }
        actions
    }

    /// Re-center at scale 1. No-op until the container is measured.
    pub fn center(&mut self) -> Vec<ViewAction> {
        let mut actions = Vec::new();
        if self.controller.center(self.resolver.cell_size()) {
            self.invalidate(&mut actions);
        }
        actions
    }

    /// Compile the current frame. `None` while the container is unmeasured.
    pub fn compile(&self) -> MazeViewResult<Option<RenderPlan>> {
        compile_frame(
            &FrameInputs {
                grid: &self.grid,
                endpoints: self.endpoints,
                transform: self.controller.transform(),
                cell_size: self.resolver.cell_size(),
                viewport: self.controller.container(),
                reveal: self.scheduler.reveal(),
            },
            &self.cfg,
        )
    }

    /// Render if anything changed since the last render.
    ///
    /// Returns `None` when nothing changed or the container is not measured yet; in the latter
    /// case the view stays dirty and renders after the next resize.
    pub fn render_if_dirty(
        &mut self,
        backend: &mut dyn RenderBackend,
    ) -> MazeViewResult<Option<FrameRGBA>> {
        self.render_requested = false;
        if !self.dirty || self.is_disposed() {
            return Ok(None);
        }
        let Some(plan) = self.compile()? else {
            return Ok(None);
        };
        let frame = backend.render_plan(&plan)?;
        self.dirty = false;
        Ok(Some(frame))
    }

    /// Full-extent export of the maze, optionally with the current reveal state.
    pub fn export(
        &self,
        backend: &mut dyn RenderBackend,
        include_reveal: bool,
    ) -> MazeViewResult<FrameRGBA> {
        let opts = ExportOptions {
            endpoints: self.endpoints,
            reveal: if include_reveal {
                self.scheduler.reveal()
            } else {
                RevealView::none()
            },
            cell_px: None,
        };
        render_export(backend, &self.grid, &opts, &self.cfg)
    }

    /// Detach from the host: stop the animation and drop every listener.
    pub fn dispose(&mut self) -> Vec<ViewAction> {
        self.scheduler.reset();
        self.scheduler.clear_on_complete();
        self.ticket = self.scheduler.ticket();
        self.controller
            .dispose()
            .into_iter()
            .map(ViewAction::Unsubscribe)
            .collect()
    }

    fn invalidate(&mut self, actions: &mut Vec<ViewAction>) {
        self.dirty = true;
        if self.render_requested {
            tracing::debug!("redraw already pending, coalesced");
            return;
        }
        self.render_requested = true;
        actions.push(ViewAction::RenderNeeded);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/view.rs"]
mod tests;
