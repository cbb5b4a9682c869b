pub mod clock;
pub mod scheduler;

pub use clock::{Clock, FramePacer, ManualClock, SystemClock};
pub use scheduler::{
    AnimationScheduler, AnimationSequence, FrameOutcome, FrameTicket, Phase, RevealCursors,
    RevealView,
};
