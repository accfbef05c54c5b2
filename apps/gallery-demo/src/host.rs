//! A stand-in host: an in-memory photo library, a thumbnail grid and a
//! virtual display that feeds the session frames and pointer samples.

use std::cell::RefCell;

use vitrine_gallery::{
    ContentHandle, ContentKind, DismissReason, DisplaceableOrigin, DisplacedViewsProvider,
    GalleryItem, GalleryObserver, GallerySession, ItemsDelegate, ItemsProvider, OriginId,
};
use vitrine_geometry::{Point, Rect, Size};
use vitrine_input::PointerEvent;

pub const FRAME_MS: i64 = 16;
const MAX_SETTLE_FRAMES: usize = 2_000;

const GRID_COLUMNS: usize = 3;
const TILE: f32 = 120.0;
const TILE_GAP: f32 = 4.0;

#[derive(Clone, Debug)]
struct Photo {
    name: String,
    size: Size,
    kind: ContentKind,
}

/// Photos and the occasional clip, with alternating orientations.
pub struct Library {
    photos: RefCell<Vec<Photo>>,
}

impl Library {
    pub fn generate(count: usize) -> Self {
        let photos = (0..count)
            .map(|index| {
                let kind = if index % 4 == 3 {
                    ContentKind::Video
                } else {
                    ContentKind::Image
                };
                let size = if index % 2 == 0 {
                    Size::new(4032.0, 3024.0)
                } else {
                    Size::new(3024.0, 4032.0)
                };
                Photo {
                    name: format!("IMG_{:04}", 1000 + index),
                    size,
                    kind,
                }
            })
            .collect();
        Self {
            photos: RefCell::new(photos),
        }
    }

    pub fn name(&self, index: usize) -> Option<String> {
        self.photos.borrow().get(index).map(|photo| photo.name.clone())
    }
}

impl ItemsProvider for Library {
    fn item_count(&self) -> usize {
        self.photos.borrow().len()
    }

    fn item(&self, index: usize) -> GalleryItem {
        let photo = self.photos.borrow()[index].clone();
        let content = ContentHandle::new(index as u64, photo.size);
        GalleryItem::new(photo.kind, move |done| {
            log::trace!("decoding {}", photo.name);
            done(Ok(content));
        })
    }
}

impl ItemsDelegate for Library {
    fn remove_item(&self, index: usize) {
        let mut photos = self.photos.borrow_mut();
        if index < photos.len() {
            let photo = photos.remove(index);
            log::info!("library: deleted {}", photo.name);
        }
    }
}

/// The grid the gallery opens from. Only the first screenful of tiles is
/// on screen.
pub struct ThumbnailGrid {
    visible_rows: usize,
}

impl ThumbnailGrid {
    pub fn new(viewport: Rect) -> Self {
        Self {
            visible_rows: (viewport.height / (TILE + TILE_GAP)) as usize,
        }
    }
}

impl DisplacedViewsProvider for ThumbnailGrid {
    fn displacement_origin(&self, index: usize) -> Option<DisplaceableOrigin> {
        let row = index / GRID_COLUMNS;
        if row >= self.visible_rows {
            return None;
        }
        let column = index % GRID_COLUMNS;
        let step = TILE + TILE_GAP;
        Some(DisplaceableOrigin::new(
            index as OriginId,
            Rect::new(column as f32 * step, row as f32 * step, TILE, TILE),
        ))
    }

    fn set_origin_hidden(&self, id: OriginId, hidden: bool) {
        log::debug!("grid: thumbnail {id} {}", if hidden { "hidden" } else { "shown" });
    }
}

pub struct LoggingObserver;

impl GalleryObserver for LoggingObserver {
    fn on_settled_at_index(&self, index: usize) {
        log::info!("settled at {index}");
    }

    fn on_page_shown(&self, index: usize) {
        log::debug!("showing page {index}");
    }

    fn on_dismiss_progress(&self, progress: f32) {
        log::trace!("dismiss progress {progress:.2}");
    }

    fn on_dismiss_committed(&self) {
        log::info!("dismiss committed");
    }

    fn on_presentation_complete(&self) {
        log::info!("presentation complete");
    }

    fn on_dismissal_complete(&self, reason: DismissReason) {
        log::info!("dismissal complete ({reason:?})");
    }
}

/// Virtual display driving one session.
pub struct Display {
    pub session: GallerySession,
    now_ms: i64,
    frames: usize,
}

impl Display {
    pub fn new(session: GallerySession) -> Self {
        Self {
            session,
            now_ms: 0,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn tick(&mut self, millis: i64) {
        self.now_ms += millis;
        self.frames += 1;
        self.session.frame(self.now_ms as u64 * 1_000_000);
    }

    /// Renders frames until nothing animates. Returns false if the session
    /// never went idle.
    pub fn settle(&mut self) -> bool {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.session.clock().has_frame_callbacks() {
                return true;
            }
            self.tick(FRAME_MS);
        }
        false
    }

    pub fn drag(&mut self, from: Point, to: Point, steps: u32) {
        self.session
            .handle_pointer(&PointerEvent::down(from.x, from.y, self.now_ms));
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.tick(FRAME_MS);
            self.session.handle_pointer(&PointerEvent::moved(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
                self.now_ms,
            ));
        }
        self.session
            .handle_pointer(&PointerEvent::up(to.x, to.y, self.now_ms));
    }

    pub fn tap(&mut self, at: Point) {
        self.session
            .handle_pointer(&PointerEvent::down(at.x, at.y, self.now_ms));
        self.tick(FRAME_MS);
        self.session
            .handle_pointer(&PointerEvent::up(at.x, at.y, self.now_ms));
    }

    pub fn double_tap(&mut self, at: Point) {
        self.tap(at);
        self.tick(FRAME_MS * 3);
        self.tap(at);
    }
}
