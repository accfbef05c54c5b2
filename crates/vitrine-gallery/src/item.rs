//! Items and the collaborators that supply them.

use std::fmt;
use std::rc::Rc;

use vitrine_geometry::Size;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Image,
    Video,
    Custom,
}

pub type ContentId = u64;

/// Opaque reference to decoded content. The engine only reads its size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentHandle {
    pub id: ContentId,
    pub size: Size,
}

impl ContentHandle {
    pub fn new(id: ContentId, size: Size) -> Self {
        Self { id, size }
    }
}

/// Why an item's content could not be produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The source has nothing for this item.
    NotFound,
    /// The content exists but could not be decoded.
    Decode(String),
    /// The host gave up on the request.
    Cancelled,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "content not found"),
            FetchError::Decode(message) => write!(f, "content could not be decoded: {message}"),
            FetchError::Cancelled => write!(f, "content request was cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult = Result<ContentHandle, FetchError>;

/// Receives the outcome of a fetch; may be called synchronously or later.
pub type FetchCallback = Box<dyn FnOnce(FetchResult)>;

type Fetcher = Rc<dyn Fn(FetchCallback)>;

/// A media item as handed out by an [`ItemsProvider`].
#[derive(Clone)]
pub struct GalleryItem {
    kind: ContentKind,
    fetcher: Fetcher,
}

impl GalleryItem {
    pub fn new(kind: ContentKind, fetcher: impl Fn(FetchCallback) + 'static) -> Self {
        Self {
            kind,
            fetcher: Rc::new(fetcher),
        }
    }

    pub fn image(fetcher: impl Fn(FetchCallback) + 'static) -> Self {
        Self::new(ContentKind::Image, fetcher)
    }

    pub fn video(fetcher: impl Fn(FetchCallback) + 'static) -> Self {
        Self::new(ContentKind::Video, fetcher)
    }

    pub fn custom(fetcher: impl Fn(FetchCallback) + 'static) -> Self {
        Self::new(ContentKind::Custom, fetcher)
    }

    /// An item whose content is already decoded.
    pub fn ready(kind: ContentKind, content: ContentHandle) -> Self {
        Self::new(kind, move |done: FetchCallback| done(Ok(content)))
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn fetch(&self, done: FetchCallback) {
        (self.fetcher)(done)
    }
}

impl fmt::Debug for GalleryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryItem")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

pub trait ItemsProvider {
    fn item_count(&self) -> usize;

    /// Only called with `index < item_count()`.
    fn item(&self, index: usize) -> GalleryItem;
}

/// Notified when the user deletes an item from inside the gallery.
///
/// The provider must report the new count once this returns.
pub trait ItemsDelegate {
    fn remove_item(&self, index: usize);
}
