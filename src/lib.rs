//! mazeview renders large maze grids with pan/zoom and plays back pathfinding results.
//!
//! The crate is the viewing core of a maze tool:
//!
//! - a viewport controller turning pointer, wheel and resize input into a [`ViewTransform`]
//! - a renderer compiling grid, transform and reveal state into a batched [`RenderPlan`], run
//!   on the CPU by [`CpuBackend`]
//! - a frame-paced [`AnimationScheduler`] revealing an exploration sequence and then the route
//!
//! [`MazeView`] ties them together for a host that owns the window and event loop.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod export;
pub mod foundation;
pub mod grid;
pub mod render;
pub mod session;
pub mod view;

pub use crate::foundation::core::{
    Affine, BezPath, Coord, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{MazeViewError, MazeViewResult};

pub use crate::animation::{
    AnimationScheduler, AnimationSequence, Clock, FrameOutcome, FramePacer, ManualClock, Phase,
    RevealCursors, RevealView, SystemClock,
};
pub use crate::config::{Palette, ViewConfig};
pub use crate::export::{ExportOptions, encode_png, export_filename, render_export, save_png};
pub use crate::grid::{Cell, Endpoints, Grid, Wall, WallShade, WallShading};
pub use crate::render::{
    CpuBackend, DrawOp, FrameInputs, FrameRGBA, RenderBackend, RenderPlan, RenderSettings,
    compile_export, compile_frame,
};
pub use crate::session::{InputEvent, MazeView, SessionKey, SessionStore, ViewAction};
pub use crate::view::{CellSizeResolver, ListenerKind, ViewTransform, ViewportController};
