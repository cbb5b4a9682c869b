pub mod backend;
pub mod compile;
pub mod cpu;
pub mod plan;

pub use backend::{FrameRGBA, RenderBackend, RenderSettings};
pub use compile::{CellWindow, FrameInputs, compile_export, compile_frame, visible_cells};
pub use cpu::CpuBackend;
pub use plan::{DrawOp, LineEnds, RenderPlan, StrokeStyle, SurfaceDesc, WallBatches};
