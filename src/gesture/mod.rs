pub mod classify;
pub mod geometry;
pub mod machine;

pub use classify::{classify, GestureLabel, HandFrame};
pub use geometry::{Landmark, PalmCenter};
pub use machine::{
    FrameOutcome, GestureConfig, GestureEvent, GestureState, GestureStatus, SelectionContext,
    MAX_SELECTIONS,
};
