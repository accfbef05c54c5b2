//! Thumbnails that content is displaced from and back to.
//!
//! The host owns the thumbnail views. The engine sees value snapshots and an
//! identifier it can hand back to toggle visibility.

use std::rc::Rc;

use vitrine_geometry::Rect;

pub type OriginId = u64;

/// How a view scales its content into its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    ScaleAspectFit,
    ScaleAspectFill,
    ScaleToFill,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaceableOrigin {
    pub id: OriginId,
    /// Frame in the gallery's coordinate space.
    pub frame: Rect,
    pub content_mode: ContentMode,
}

impl DisplaceableOrigin {
    pub fn new(id: OriginId, frame: Rect) -> Self {
        Self {
            id,
            frame,
            content_mode: ContentMode::ScaleAspectFill,
        }
    }

    pub fn with_content_mode(mut self, content_mode: ContentMode) -> Self {
        self.content_mode = content_mode;
        self
    }
}

pub trait DisplacedViewsProvider {
    /// The on-screen thumbnail for `index`, if there is one.
    fn displacement_origin(&self, index: usize) -> Option<DisplaceableOrigin>;

    fn set_origin_hidden(&self, id: OriginId, hidden: bool);
}

/// Provider for galleries opened without thumbnails. Every transition fades.
pub struct NoOrigins;

impl DisplacedViewsProvider for NoOrigins {
    fn displacement_origin(&self, _index: usize) -> Option<DisplaceableOrigin> {
        None
    }

    fn set_origin_hidden(&self, _id: OriginId, _hidden: bool) {}
}

/// Keeps a thumbnail hidden while alive and shows it again on drop.
pub struct HiddenOrigin {
    provider: Rc<dyn DisplacedViewsProvider>,
    id: OriginId,
}

impl HiddenOrigin {
    pub fn hide(provider: Rc<dyn DisplacedViewsProvider>, id: OriginId) -> Self {
        provider.set_origin_hidden(id, true);
        Self { provider, id }
    }

    pub fn id(&self) -> OriginId {
        self.id
    }
}

impl Drop for HiddenOrigin {
    fn drop(&mut self) {
        self.provider.set_origin_hidden(self.id, false);
    }
}
