//! In-memory collaborators for driving a gallery session in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use vitrine_gallery::{
    ContentHandle, ContentKind, DismissReason, DisplaceableOrigin, DisplacedViewsProvider,
    FetchError, GalleryItem, GalleryObserver, ItemsDelegate, ItemsProvider, OriginId,
};
use vitrine_geometry::{Rect, Size};

/// Size every fake item reports unless told otherwise.
pub const DEFAULT_CONTENT_SIZE: Size = Size::new(800.0, 600.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FakeItem {
    pub kind: ContentKind,
    pub size: Size,
    /// Fetches fail with [`FetchError::NotFound`] when set.
    pub broken: bool,
}

impl FakeItem {
    pub fn image() -> Self {
        Self {
            kind: ContentKind::Image,
            size: DEFAULT_CONTENT_SIZE,
            broken: false,
        }
    }

    pub fn video() -> Self {
        Self {
            kind: ContentKind::Video,
            ..Self::image()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::image()
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

/// A mutable collection that answers fetches synchronously and records
/// every fetch and deletion.
#[derive(Default)]
pub struct FakeItems {
    items: RefCell<Vec<FakeItem>>,
    fetches: Rc<RefCell<Vec<usize>>>,
    removed: RefCell<Vec<usize>>,
}

impl FakeItems {
    pub fn new(items: Vec<FakeItem>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Self::default()
        }
    }

    pub fn images(count: usize) -> Self {
        Self::new(vec![FakeItem::image(); count])
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Indices fetched so far, in order.
    pub fn fetches(&self) -> Vec<usize> {
        self.fetches.borrow().clone()
    }

    pub fn fetch_count(&self, index: usize) -> usize {
        self.fetches.borrow().iter().filter(|i| **i == index).count()
    }

    pub fn removed(&self) -> Vec<usize> {
        self.removed.borrow().clone()
    }
}

impl ItemsProvider for FakeItems {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item(&self, index: usize) -> GalleryItem {
        let item = self.items.borrow()[index];
        let fetches = self.fetches.clone();
        GalleryItem::new(item.kind, move |done| {
            fetches.borrow_mut().push(index);
            if item.broken {
                done(Err(FetchError::NotFound));
            } else {
                done(Ok(ContentHandle::new(index as u64, item.size)));
            }
        })
    }
}

impl ItemsDelegate for FakeItems {
    fn remove_item(&self, index: usize) {
        let mut items = self.items.borrow_mut();
        if index < items.len() {
            items.remove(index);
            self.removed.borrow_mut().push(index);
        }
    }
}

/// Thumbnails laid out by index. Items without a frame have no origin.
#[derive(Default)]
pub struct FakeOrigins {
    frames: RefCell<HashMap<usize, Rect>>,
    hidden: RefCell<Vec<OriginId>>,
    hide_calls: Cell<usize>,
}

impl FakeOrigins {
    pub fn new() -> Self {
        Self::default()
    }

    /// A vertical strip of 80x80 thumbnails starting at (100, 100).
    pub fn strip(count: usize) -> Self {
        let origins = Self::new();
        for index in 0..count {
            origins.set_frame(
                index,
                Rect::new(100.0, 100.0 + index as f32 * 90.0, 80.0, 80.0),
            );
        }
        origins
    }

    pub fn set_frame(&self, index: usize, frame: Rect) {
        self.frames.borrow_mut().insert(index, frame);
    }

    pub fn remove_frame(&self, index: usize) {
        self.frames.borrow_mut().remove(&index);
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.borrow().contains(&(index as OriginId))
    }

    /// Number of times any thumbnail was hidden.
    pub fn hide_calls(&self) -> usize {
        self.hide_calls.get()
    }
}

impl DisplacedViewsProvider for FakeOrigins {
    fn displacement_origin(&self, index: usize) -> Option<DisplaceableOrigin> {
        self.frames
            .borrow()
            .get(&index)
            .map(|frame| DisplaceableOrigin::new(index as OriginId, *frame))
    }

    fn set_origin_hidden(&self, id: OriginId, hidden: bool) {
        let mut hidden_ids = self.hidden.borrow_mut();
        if hidden {
            self.hide_calls.set(self.hide_calls.get() + 1);
            if !hidden_ids.contains(&id) {
                hidden_ids.push(id);
            }
        } else {
            hidden_ids.retain(|other| *other != id);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    Settled(usize),
    PageShown(usize),
    DismissProgress(f32),
    DismissCommitted,
    PresentationComplete,
    DismissalComplete(DismissReason),
}

/// Observer that keeps every notification.
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<SessionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: SessionEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn pages_shown(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::PageShown(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn settled(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::Settled(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn dismiss_progress(&self) -> Vec<f32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SessionEvent::DismissProgress(progress) => Some(*progress),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: SessionEvent) {
        log::trace!("observed {event:?}");
        self.events.borrow_mut().push(event);
    }
}

impl GalleryObserver for RecordingObserver {
    fn on_settled_at_index(&self, index: usize) {
        self.push(SessionEvent::Settled(index));
    }

    fn on_page_shown(&self, index: usize) {
        self.push(SessionEvent::PageShown(index));
    }

    fn on_dismiss_progress(&self, progress: f32) {
        self.push(SessionEvent::DismissProgress(progress));
    }

    fn on_dismiss_committed(&self) {
        self.push(SessionEvent::DismissCommitted);
    }

    fn on_presentation_complete(&self) {
        self.push(SessionEvent::PresentationComplete);
    }

    fn on_dismissal_complete(&self, reason: DismissReason) {
        self.push(SessionEvent::DismissalComplete(reason));
    }
}
