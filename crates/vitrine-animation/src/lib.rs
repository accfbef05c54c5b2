//! Animation system for Vitrine
//!
//! Provides a headless frame clock plus time-based and spring-based
//! animations. Nothing here knows about galleries; the engine composes these
//! pieces into its transitions.

mod animation;
mod frame_clock;

pub use animation::*;
pub use frame_clock::*;
