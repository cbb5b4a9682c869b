pub mod model;
pub mod shade;

pub use model::{Cell, Endpoints, Grid, Wall};
pub use shade::{WallShade, WallShading};
