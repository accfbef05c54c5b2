//! Gallery session: the top-level object a host drives.
//!
//! A session owns the pager, the controllers for the current page and its
//! neighbours, the chrome and the overlay. The host feeds it pointer events
//! and frame timestamps and reads back what to draw.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use vitrine_animation::{Animatable, AnimationSpec, AnimationType, Easing, FrameClock};
use vitrine_geometry::{rotation_adjusted_bounds, AffineTransform, Orientation, Rect, Size};
use vitrine_input::{
    PanPhase, PanRecognizer, PanUpdate, PinchRecognizer, PinchUpdate, PointerEvent, Tap,
    TapKind, TapRecognizer,
};

use crate::arbiter::GestureArbiter;
use crate::config::{GalleryConfig, RotationMode};
use crate::controller::{ItemController, ItemControllerDelegate, ItemEnvironment, ItemView};
use crate::decorations::{DecorationController, DecorationGroup};
use crate::image_controller::ImageItemController;
use crate::item::{ContentKind, ItemsDelegate, ItemsProvider};
use crate::observer::{DismissReason, GalleryObserver, NoopObserver};
use crate::origin::{DisplacedViewsProvider, NoOrigins};
use crate::overlay::{current_window_level, Overlay, OverlayLease, WindowLevel};
use crate::paging::{PagingContext, PagingCoordinator, PagingEvent, RemovalOutcome};
use crate::swipe_dismiss::{Axis, SwipeState, TransitionState};
use crate::video_controller::VideoItemController;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryError {
    /// The items provider reported no items.
    EmptyGallery,
    StartIndexOutOfRange { index: usize, count: usize },
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::EmptyGallery => write!(f, "gallery has no items"),
            GalleryError::StartIndexOutOfRange { index, count } => {
                write!(f, "start index {index} is out of range for {count} items")
            }
        }
    }
}

impl std::error::Error for GalleryError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Presenting,
    Presented,
    Closing,
    Closed,
}

/// Which component owns the current pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PanRoute {
    Dismiss,
    ZoomPan,
    Paging,
    Ignored,
}

#[derive(Default)]
struct GestureRouting {
    pan: PanRecognizer,
    pinch: PinchRecognizer,
    taps: TapRecognizer,
    arbiter: GestureArbiter,
    route: Option<PanRoute>,
}

type ControllerCache = FxHashMap<usize, Rc<dyn ItemController>>;

struct SessionInner {
    weak_self: Weak<SessionInner>,
    items: Rc<dyn ItemsProvider>,
    origins: Rc<dyn DisplacedViewsProvider>,
    delegate: Option<Rc<dyn ItemsDelegate>>,
    observer: Rc<dyn GalleryObserver>,
    config: Rc<GalleryConfig>,
    clock: FrameClock,
    start_index: usize,

    viewport: Cell<Rect>,
    device_orientation: Cell<Orientation>,
    phase: Cell<SessionPhase>,
    shown_index: Cell<Option<usize>>,

    pager: PagingCoordinator,
    decorations: DecorationController,
    overlay: Overlay,
    lease: RefCell<Option<OverlayLease>>,
    rotation: Animatable<AffineTransform>,
    rotating: Cell<bool>,

    controllers: RefCell<ControllerCache>,
    gestures: RefCell<GestureRouting>,
}

impl SessionInner {
    fn current_index(&self) -> usize {
        self.pager.current_index()
    }

    fn environment(&self) -> ItemEnvironment {
        ItemEnvironment {
            config: self.config.clone(),
            clock: self.clock.clone(),
            origins: self.origins.clone(),
            bounds: self.viewport.get(),
            device_orientation: self.device_orientation.get(),
        }
    }

    fn cached(&self, index: usize) -> Option<Rc<dyn ItemController>> {
        self.controllers.borrow().get(&index).cloned()
    }

    fn current_controller(&self) -> Option<Rc<dyn ItemController>> {
        self.cached(self.current_index())
    }

    fn make_controller(&self, index: usize) -> Rc<dyn ItemController> {
        let item = self.items.item(index);
        let environment = self.environment();
        let controller: Rc<dyn ItemController> = match item.kind() {
            ContentKind::Video => {
                let is_initial =
                    index == self.start_index && self.phase.get() == SessionPhase::Idle;
                Rc::new(VideoItemController::new(index, item, environment, is_initial))
            }
            ContentKind::Image | ContentKind::Custom => {
                Rc::new(ImageItemController::new(index, item, environment))
            }
        };
        let delegate: Weak<dyn ItemControllerDelegate> = self.weak_self.clone();
        controller.base().set_delegate(delegate);
        log::trace!("materialized controller for item {index}");
        controller
    }

    /// Materializes the current page and its neighbours and drops the rest.
    fn refresh_window(&self) {
        let context = self.pager.context();
        let window: SmallVec<[usize; 3]> = context.window().collect();

        let evicted: Vec<Rc<dyn ItemController>> = {
            let mut controllers = self.controllers.borrow_mut();
            let stale: SmallVec<[usize; 4]> = controllers
                .keys()
                .copied()
                .filter(|index| !window.contains(index))
                .collect();
            stale
                .into_iter()
                .filter_map(|index| controllers.remove(&index))
                .collect()
        };
        drop(evicted);

        for index in window {
            if self.cached(index).is_some() {
                continue;
            }
            let controller = self.make_controller(index);
            self.controllers
                .borrow_mut()
                .insert(index, controller.clone());
            controller.fetch_content();
        }

        let controllers: SmallVec<[Rc<dyn ItemController>; 3]> =
            self.controllers.borrow().values().cloned().collect();
        for controller in controllers {
            controller.base().set_paging_context(PagingContext {
                current_index: controller.index(),
                ..context
            });
        }
    }

    fn clear_controllers(&self) {
        let evicted = std::mem::take(&mut *self.controllers.borrow_mut());
        drop(evicted);
        self.shown_index.set(None);
    }

    fn handle_paging_event(&self, event: PagingEvent) {
        match event {
            PagingEvent::CurrentChanged(index) => self.did_show_page(index),
            PagingEvent::Settled(index) => {
                log::debug!("settled at {index}");
                self.observer.on_settled_at_index(index);
            }
        }
    }

    fn did_show_page(&self, index: usize) {
        let previous = self.shown_index.replace(Some(index));
        if previous == Some(index) {
            self.refresh_window();
            return;
        }
        if let Some(controller) = previous.and_then(|previous| self.cached(previous)) {
            controller.did_disappear();
        }
        self.refresh_window();
        let controller = self.cached(index);
        let is_video = controller
            .as_ref()
            .is_some_and(|controller| controller.kind() == ContentKind::Video);
        self.decorations.set_scrubber_active(is_video);
        if self.phase.get() == SessionPhase::Presented {
            if let Some(controller) = controller {
                controller.did_appear();
            }
        }
        self.observer.on_page_shown(index);
    }

    fn handle_tap(&self, tap: Tap) {
        match tap.kind {
            TapKind::Single => {
                if self.config.toggle_decorations_on_single_tap {
                    self.decorations.toggle();
                }
            }
            TapKind::Double => {
                if let Some(controller) = self.current_controller() {
                    controller.base().double_tap(tap.position);
                }
            }
        }
    }

    fn handle_pinch(&self, update: PinchUpdate) {
        if let Some(controller) = self.current_controller() {
            controller.base().pinch(&update);
        }
    }

    fn route_pan(&self, update: &PanUpdate) -> PanRoute {
        let Some(controller) = self.current_controller() else {
            return PanRoute::Ignored;
        };
        let base = controller.base();
        if self.pager.is_transitioning() || self.gestures.borrow().pinch.is_pinching() {
            return PanRoute::Ignored;
        }
        if base.is_zoomed() {
            return PanRoute::ZoomPan;
        }
        let context = self.pager.context();
        let claimed = self.gestures.borrow_mut().arbiter.arbitrate(
            update.velocity,
            &context,
            self.config.swipe_to_dismiss_mode,
        );
        if claimed && base.begin_swipe(update.velocity).is_some() {
            return PanRoute::Dismiss;
        }
        if Axis::of(update.velocity) == Axis::Horizontal && self.pager.begin_drag() {
            return PanRoute::Paging;
        }
        PanRoute::Ignored
    }

    fn handle_pan(&self, update: PanUpdate) {
        let route = match update.phase {
            PanPhase::Began => {
                let route = self.route_pan(&update);
                log::trace!("pan routed to {route:?}");
                self.gestures.borrow_mut().route = Some(route);
                route
            }
            _ => match self.gestures.borrow().route {
                Some(route) => route,
                None => return,
            },
        };
        let controller = self.current_controller();
        let base = controller.as_ref().map(|controller| controller.base());

        match (update.phase, route) {
            (PanPhase::Began | PanPhase::Changed, PanRoute::Dismiss) => {
                if let Some(base) = base {
                    base.update_swipe(update.translation);
                }
            }
            (PanPhase::Began | PanPhase::Changed, PanRoute::ZoomPan) => {
                if let Some(base) = base {
                    base.pan_zoomed(update.translation);
                }
            }
            (PanPhase::Began | PanPhase::Changed, PanRoute::Paging) => {
                self.pager.drag_by(update.translation.x);
            }
            (PanPhase::Ended, PanRoute::Dismiss) => {
                if let Some(base) = base {
                    base.end_swipe(update.velocity);
                }
            }
            (PanPhase::Cancelled, PanRoute::Dismiss) => {
                if let Some(base) = base {
                    base.cancel_swipe();
                }
            }
            (PanPhase::Ended | PanPhase::Cancelled, PanRoute::ZoomPan) => {
                if let Some(base) = base {
                    base.end_zoom_pan();
                }
            }
            (PanPhase::Ended, PanRoute::Paging) => self.pager.end_drag(update.velocity.x),
            (PanPhase::Cancelled, PanRoute::Paging) => self.pager.cancel_drag(),
            _ => {}
        }

        if matches!(update.phase, PanPhase::Ended | PanPhase::Cancelled) {
            let mut gestures = self.gestures.borrow_mut();
            gestures.route = None;
            gestures.arbiter.reset();
        }
    }

    fn is_transitioning(&self) -> bool {
        self.pager.is_transitioning()
            || self
                .current_controller()
                .is_some_and(|controller| controller.base().is_animating())
    }

    /// A transition runs or a swipe on the current page has not resolved.
    fn is_busy(&self) -> bool {
        self.is_transitioning()
            || self
                .current_controller()
                .is_some_and(|controller| controller.base().swipe_state() != SwipeState::Idle)
    }

    fn close_with(&self, reason: DismissReason) -> bool {
        if self.phase.get() != SessionPhase::Presented || self.is_busy() {
            return false;
        }
        let Some(controller) = self.current_controller() else {
            return false;
        };
        log::info!("closing gallery ({reason:?})");
        self.phase.set(SessionPhase::Closing);
        let duration = self.config.decoration_fade_duration;
        controller.close_decorations(duration);
        let weak = self.weak_self.clone();
        self.decorations.close(duration, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let closing = inner.weak_self.clone();
            let dismissed = controller.dismiss_item(
                Box::new(|| {}),
                Box::new(move || {
                    if let Some(inner) = closing.upgrade() {
                        inner.close_gallery(reason);
                    }
                }),
            );
            if !dismissed {
                inner.close_gallery(reason);
            }
        });
        true
    }

    /// Tears the session down. Runs once.
    fn close_gallery(&self, reason: DismissReason) {
        if self.phase.replace(SessionPhase::Closed) == SessionPhase::Closed {
            return;
        }
        let lease = self.lease.borrow_mut().take();
        drop(lease);
        self.overlay.remove();
        self.clear_controllers();
        log::info!("gallery closed ({reason:?})");
        self.observer.on_dismissal_complete(reason);
    }
}

impl ItemControllerDelegate for SessionInner {
    fn did_swipe_to_dismiss(&self, index: usize, progress: f32) {
        if index != self.current_index() {
            return;
        }
        self.decorations.update_continuous(progress);
        self.overlay.set_dismiss_progress(progress);
        self.observer.on_dismiss_progress(progress);
    }

    fn swipe_committed(&self, index: usize) {
        log::debug!("swipe to dismiss committed on {index}");
        self.phase.set(SessionPhase::Closing);
        self.observer.on_dismiss_committed();
    }

    fn did_finish_swipe_to_dismiss(&self, _index: usize) {
        self.close_gallery(DismissReason::SwipeToDismiss);
    }

    fn did_cancel_swipe_to_dismiss(&self, _index: usize) {
        self.pager.settle_in_place();
    }

    fn dismiss_alongside(&self, _index: usize) {
        self.overlay.dismiss();
        self.decorations
            .close(self.config.decoration_fade_duration, || {});
    }
}

/// Collects a session's collaborators. Only the items provider is required.
pub struct GalleryBuilder {
    items: Rc<dyn ItemsProvider>,
    origins: Rc<dyn DisplacedViewsProvider>,
    delegate: Option<Rc<dyn ItemsDelegate>>,
    observer: Rc<dyn GalleryObserver>,
    config: GalleryConfig,
    clock: Option<FrameClock>,
    viewport: Rect,
    start_index: usize,
}

impl GalleryBuilder {
    pub fn origins(mut self, origins: Rc<dyn DisplacedViewsProvider>) -> Self {
        self.origins = origins;
        self
    }

    pub fn delegate(mut self, delegate: Rc<dyn ItemsDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn observer(mut self, observer: Rc<dyn GalleryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(mut self, config: GalleryConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares a clock with the host. A fresh one is created otherwise.
    pub fn clock(mut self, clock: FrameClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    pub fn build(self) -> Result<GallerySession, GalleryError> {
        let count = self.items.item_count();
        if count == 0 {
            return Err(GalleryError::EmptyGallery);
        }
        if self.start_index >= count {
            return Err(GalleryError::StartIndexOutOfRange {
                index: self.start_index,
                count,
            });
        }
        let clock = self.clock.unwrap_or_default();
        let config = Rc::new(self.config);
        let pager = PagingCoordinator::with_timing(
            PagingContext::new(self.start_index, count, config.paging_mode),
            clock.clone(),
            config.paging_duration,
            config.swipe_threshold_velocity,
        );
        pager.set_page_width(self.viewport.width);

        let inner = Rc::new_cyclic(|weak_self| SessionInner {
            weak_self: weak_self.clone(),
            items: self.items,
            origins: self.origins,
            delegate: self.delegate,
            observer: self.observer,
            decorations: DecorationController::new(&config, clock.clone()),
            overlay: Overlay::new(&config, clock.clone()),
            rotation: Animatable::new(AffineTransform::IDENTITY, clock.clone()),
            config,
            clock,
            start_index: self.start_index,
            viewport: Cell::new(self.viewport),
            device_orientation: Cell::new(Orientation::Portrait),
            phase: Cell::new(SessionPhase::Idle),
            shown_index: Cell::new(None),
            pager,
            lease: RefCell::new(None),
            rotating: Cell::new(false),
            controllers: RefCell::new(ControllerCache::default()),
            gestures: RefCell::new(GestureRouting::default()),
        });

        let weak = Rc::downgrade(&inner);
        inner.pager.set_listener(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_paging_event(event);
            }
        });
        log::debug!(
            "gallery built with {} items, starting at {}",
            count,
            inner.start_index
        );
        Ok(GallerySession { inner })
    }
}

/// A full-screen gallery over a host-provided collection.
pub struct GallerySession {
    inner: Rc<SessionInner>,
}

impl GallerySession {
    pub fn builder(items: Rc<dyn ItemsProvider>) -> GalleryBuilder {
        GalleryBuilder {
            items,
            origins: Rc::new(NoOrigins),
            delegate: None,
            observer: Rc::new(NoopObserver),
            config: GalleryConfig::default(),
            clock: None,
            viewport: Rect::ZERO,
            start_index: 0,
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.inner.clock
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.inner.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.phase.get()
    }

    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    pub fn item_count(&self) -> usize {
        self.inner.pager.context().item_count
    }

    /// True while a page transition or an item transition runs.
    pub fn is_animating(&self) -> bool {
        self.inner.is_transitioning()
    }

    /// Opens the gallery: raises the window, flies the start item out of
    /// its thumbnail and fades the chrome in.
    pub fn present(&self) -> bool {
        let inner = &self.inner;
        if inner.phase.get() != SessionPhase::Idle {
            return false;
        }
        let index = inner.current_index();
        inner.shown_index.set(Some(index));
        inner.refresh_window();
        let Some(controller) = inner.cached(index) else {
            return false;
        };
        let level = if inner.config.status_bar_hidden {
            WindowLevel::AboveStatusBar
        } else {
            WindowLevel::Normal
        };
        *inner.lease.borrow_mut() = Some(OverlayLease::acquire(level));
        inner.phase.set(SessionPhase::Presenting);
        log::info!("presenting gallery at {index}");

        let alongside = {
            let overlay = inner.overlay.clone();
            let decorations = inner.decorations.clone();
            move || {
                overlay.present();
                decorations.reveal_on_present();
            }
        };
        let weak = Rc::downgrade(inner);
        let presented = controller.present_item(
            Box::new(alongside),
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if inner.phase.get() != SessionPhase::Presenting {
                    return;
                }
                inner.phase.set(SessionPhase::Presented);
                inner.observer.on_presentation_complete();
                if let Some(controller) = inner.current_controller() {
                    controller.did_appear();
                }
            }),
        );
        if presented {
            let is_video = controller.kind() == ContentKind::Video;
            inner.decorations.set_scrubber_active(is_video);
        }
        presented
    }

    /// Feeds one pointer sample. Input is ignored unless the gallery is
    /// fully presented.
    pub fn handle_pointer(&self, event: &PointerEvent) {
        let inner = &self.inner;
        let (tap, pinch, pan) = {
            let mut gestures = inner.gestures.borrow_mut();
            (
                gestures.taps.on_pointer_event(event),
                gestures.pinch.on_pointer_event(event),
                gestures.pan.on_pointer_event(event),
            )
        };
        if inner.phase.get() != SessionPhase::Presented {
            if let Some(PanUpdate {
                phase: PanPhase::Ended | PanPhase::Cancelled,
                ..
            }) = pan
            {
                let mut gestures = inner.gestures.borrow_mut();
                gestures.route = None;
                gestures.arbiter.reset();
            }
            return;
        }
        if let Some(tap) = tap {
            inner.handle_tap(tap);
        }
        if let Some(pinch) = pinch {
            inner.handle_pinch(pinch);
        }
        if let Some(pan) = pan {
            inner.handle_pan(pan);
        }
    }

    /// Advances animations to `frame_time_nanos` and releases single taps
    /// whose double-tap window has passed. Pointer timestamps must use the
    /// same time base, in milliseconds.
    pub fn frame(&self, frame_time_nanos: u64) {
        let inner = &self.inner;
        inner.clock.drain_frame_callbacks(frame_time_nanos);
        let now_ms = (frame_time_nanos / 1_000_000) as i64;
        let tap = inner.gestures.borrow_mut().taps.poll(now_ms);
        if let Some(tap) = tap {
            if inner.phase.get() == SessionPhase::Presented {
                inner.handle_tap(tap);
            }
        }
    }

    pub fn go_to(&self, index: usize) -> bool {
        if self.inner.phase.get() != SessionPhase::Presented || self.inner.is_busy() {
            return false;
        }
        self.inner.pager.go_to(index)
    }

    /// Closes without user interaction.
    pub fn close(&self) -> bool {
        self.inner.close_with(DismissReason::Programmatic)
    }

    /// Closes in response to the close button.
    pub fn close_interactively(&self) -> bool {
        self.inner.close_with(DismissReason::CloseButton)
    }

    /// Deletes the current item through the items delegate. Closes the
    /// gallery when nothing is left.
    pub fn delete_current(&self) -> bool {
        let inner = &self.inner;
        if inner.phase.get() != SessionPhase::Presented || inner.is_busy() {
            return false;
        }
        let Some(delegate) = inner.delegate.clone() else {
            log::warn!("delete requested without an items delegate");
            return false;
        };
        let index = inner.current_index();
        delegate.remove_item(index);
        let count = inner.items.item_count();
        log::debug!("deleted item {index}, {count} left");
        inner.clear_controllers();

        match inner.pager.remove_page(index, count) {
            RemovalOutcome::MovedTo(_) => inner.refresh_window(),
            RemovalOutcome::Close => {
                inner.phase.set(SessionPhase::Closing);
                inner.overlay.dismiss();
                let weak = inner.weak_self.clone();
                inner
                    .decorations
                    .close(inner.config.decoration_fade_duration, move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.close_gallery(DismissReason::Programmatic);
                        }
                    });
            }
        }
        true
    }

    /// Re-fetches the content of a materialized item.
    pub fn reload(&self, index: usize) -> bool {
        if !self.inner.pager.reload(index) {
            return false;
        }
        match self.inner.cached(index) {
            Some(controller) => {
                controller.fetch_content();
                true
            }
            None => false,
        }
    }

    pub fn set_viewport(&self, viewport: Rect) {
        let inner = &self.inner;
        inner.viewport.set(viewport);
        inner.pager.set_page_width(viewport.width);
        let controllers: SmallVec<[Rc<dyn ItemController>; 3]> =
            inner.controllers.borrow().values().cloned().collect();
        for controller in controllers {
            controller.base().set_bounds(viewport);
        }
    }

    /// Counter-rotates the content of a portrait-locked host. Returns false
    /// when the change is ignored.
    pub fn set_device_orientation(&self, orientation: Orientation) -> bool {
        let inner = &self.inner;
        if inner.config.rotation_mode != RotationMode::AlwaysPortrait
            || orientation.is_flat()
            || orientation == inner.device_orientation.get()
            || inner.rotating.get()
            || inner.is_busy()
        {
            return false;
        }
        inner.device_orientation.set(orientation);
        let controllers: SmallVec<[Rc<dyn ItemController>; 3]> =
            inner.controllers.borrow().values().cloned().collect();
        for controller in controllers {
            controller.base().set_device_orientation(orientation);
        }
        let (transform, _) = rotation_adjusted_bounds(
            Orientation::Portrait,
            orientation,
            inner.viewport.get().size(),
        );
        log::debug!("rotating content for {orientation:?}");
        inner.rotating.set(true);
        let weak = Rc::downgrade(inner);
        inner.rotation.animate_to(
            transform,
            AnimationType::Tween(AnimationSpec::from_seconds(
                inner.config.rotation_duration,
                Easing::Linear,
            )),
            move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.rotating.set(false);
                }
            },
        );
        true
    }

    /// Transform and bounds of the rotated content container.
    pub fn rotation(&self) -> (AffineTransform, Rect) {
        let inner = &self.inner;
        let (_, bounds) = rotation_adjusted_bounds(
            Orientation::Portrait,
            inner.device_orientation.get(),
            inner.viewport.get().size(),
        );
        (inner.rotation.value(), bounds)
    }

    /// A video finished playing; moves on to the next item.
    pub fn video_did_finish(&self, index: usize) -> bool {
        if index != self.current_index() {
            return false;
        }
        self.go_to(index + 1)
    }

    pub fn play_video(&self) -> bool {
        match self.inner.current_controller() {
            Some(controller) => match controller.as_video() {
                Some(video) => {
                    video.play();
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn is_video_playing(&self) -> bool {
        self.inner
            .current_controller()
            .and_then(|controller| controller.as_video().map(VideoItemController::is_playing))
            .unwrap_or(false)
    }

    pub fn item_view(&self, index: usize) -> Option<ItemView> {
        self.inner
            .cached(index)
            .map(|controller| controller.base().view())
    }

    pub fn current_item_view(&self) -> Option<ItemView> {
        self.item_view(self.current_index())
    }

    pub fn transition_state(&self) -> Option<TransitionState> {
        self.inner
            .current_controller()
            .map(|controller| controller.base().transition_state())
    }

    /// Indices with a live controller, sorted.
    pub fn materialized_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.inner.controllers.borrow().keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn decorations(&self) -> &DecorationController {
        &self.inner.decorations
    }

    pub fn decoration_alpha(&self, group: DecorationGroup) -> f32 {
        self.inner.decorations.alpha(group)
    }

    pub fn overlay_alpha(&self) -> f32 {
        self.inner.overlay.alpha()
    }

    /// Horizontal scroll of the current page and the page sliding in.
    pub fn paging_offset(&self) -> (f32, Option<usize>) {
        (self.inner.pager.offset(), self.inner.pager.incoming_index())
    }

    pub fn window_level(&self) -> WindowLevel {
        current_window_level()
    }

    pub fn viewport_size(&self) -> Size {
        self.inner.viewport.get().size()
    }
}

impl Drop for GallerySession {
    fn drop(&mut self) {
        let lease = self.inner.lease.borrow_mut().take();
        if lease.is_some() {
            log::debug!("gallery dropped while open, releasing window level");
        }
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
