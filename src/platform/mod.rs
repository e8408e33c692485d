//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (normalized directional intent)
//! - Time (millisecond clock for frame timestamps)

pub mod input;
pub mod time;

pub use input::{InputState, KeyAction};
pub use time::{Clock, ManualClock, SystemClock};
