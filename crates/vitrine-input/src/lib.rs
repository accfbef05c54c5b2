//! Pointer input for Vitrine
//!
//! Turns a raw pointer stream into the gestures the gallery engine reacts
//! to: pans (translation plus release velocity), pinches and taps (single or
//! double).

mod gesture_constants;
mod pan;
mod pinch;
mod pointer;
mod tap;
mod velocity_tracker;

pub use gesture_constants::*;
pub use pan::*;
pub use pinch::*;
pub use pointer::*;
pub use tap::*;
pub use velocity_tracker::*;
