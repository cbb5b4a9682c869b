pub mod store;
pub mod view;

pub use store::{
    GenPrefs, GridDims, JsonDirStore, MemoryStore, SessionKey, SessionStore, SolvePrefs,
    load_generated, load_solve_session, load_typed, save_generated, save_solve_session,
    save_typed,
};
pub use view::{InputEvent, MazeView, ViewAction};
