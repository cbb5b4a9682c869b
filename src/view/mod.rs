pub mod cell_size;
pub mod controller;
pub mod transform;

pub use cell_size::{CellSizeResolver, resolve_cell_size};
pub use controller::{ListenerKind, ViewportController};
pub use transform::ViewTransform;
