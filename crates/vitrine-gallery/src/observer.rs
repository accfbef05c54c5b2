/// Why a session closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    /// `close()` was called, or the last item was deleted.
    Programmatic,
    /// The user pressed the close button.
    CloseButton,
    /// The user flung or dragged the content away.
    SwipeToDismiss,
}

/// Session notifications. Every method defaults to a no-op.
pub trait GalleryObserver {
    /// A page transition or a cancelled dismiss finished at `index`.
    fn on_settled_at_index(&self, _index: usize) {}

    /// `index` became the current page, including intermediate hops.
    fn on_page_shown(&self, _index: usize) {}

    /// Live swipe-to-dismiss progress in `[0, 1]`.
    fn on_dismiss_progress(&self, _progress: f32) {}

    /// A swipe was released past the threshold; the session will close.
    fn on_dismiss_committed(&self) {}

    fn on_presentation_complete(&self) {}

    fn on_dismissal_complete(&self, _reason: DismissReason) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl GalleryObserver for NoopObserver {}
