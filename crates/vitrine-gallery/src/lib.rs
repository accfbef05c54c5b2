//! Gallery engine for Vitrine
//!
//! A headless, single-threaded model of a full-screen media gallery. The
//! host supplies items, thumbnail frames, pointer input and frame
//! timestamps; the engine answers with where every page, the chrome and the
//! background overlay should be drawn.
//!
//! Start with [`GallerySession::builder`].

mod arbiter;
mod config;
mod controller;
mod decorations;
mod displacement;
mod gallery;
mod image_controller;
mod item;
mod observer;
mod origin;
mod overlay;
mod paging;
mod scroll;
mod swipe_dismiss;
mod transition;
mod video_controller;

pub use arbiter::*;
pub use config::*;
pub use controller::*;
pub use decorations::*;
pub use displacement::*;
pub use gallery::*;
pub use image_controller::*;
pub use item::*;
pub use observer::*;
pub use origin::*;
pub use overlay::*;
pub use paging::*;
pub use scroll::*;
pub use swipe_dismiss::*;
pub use transition::*;
pub use video_controller::*;

pub mod prelude {
    pub use crate::config::{
        DecorationVisibilityMode, GalleryConfig, GalleryOption, PagingMode, RotationMode,
        SwipeToDismissMode,
    };
    pub use crate::decorations::DecorationGroup;
    pub use crate::gallery::{GalleryBuilder, GalleryError, GallerySession, SessionPhase};
    pub use crate::item::{
        ContentHandle, ContentKind, FetchCallback, FetchError, GalleryItem, ItemsDelegate,
        ItemsProvider,
    };
    pub use crate::observer::{DismissReason, GalleryObserver};
    pub use crate::origin::{ContentMode, DisplaceableOrigin, DisplacedViewsProvider};
    pub use vitrine_animation::FrameClock;
    pub use vitrine_geometry::{Orientation, Point, Rect, Size, Vector2};
    pub use vitrine_input::PointerEvent;
}
