pub mod frame_loop;
pub mod position_animator;

pub use frame_loop::{AnimationLoop, FrameRequest};
pub use position_animator::{advance, resolve_coordinate, PositionAnimator};
