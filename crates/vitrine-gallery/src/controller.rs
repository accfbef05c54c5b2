//! Per-item controller.
//!
//! An [`ItemBaseController`] owns everything one page shows: the loaded
//! content, zoom state, the displacement flight used by present and dismiss,
//! and the swipe-to-dismiss machine. Kind-specific controllers wrap it and
//! implement [`ItemController`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use vitrine_animation::{
    Animatable, AnimationEnd, AnimationSpec, AnimationType, FrameClock, SpringSpec,
};
use vitrine_geometry::{
    aspect_fit, rotation_adjusted_bounds, AffineTransform, Orientation, Point, Rect, Size,
    Vector2,
};
use vitrine_input::{PinchPhase, PinchUpdate};

use crate::config::{GalleryConfig, RotationMode};
use crate::displacement::{
    dismiss_animation, fade_animation, plan_dismiss, plan_present, present_animation,
    visible_origin, DisplacementPlan,
};
use crate::item::{ContentHandle, ContentKind, GalleryItem};
use crate::origin::{ContentMode, DisplacedViewsProvider, HiddenOrigin};
use crate::paging::PagingContext;
use crate::scroll::{
    double_tap_target, maximum_zoom_scale, pan_offset, pinch_zoom, ScrollState,
    MINIMUM_ZOOM_SCALE,
};
use crate::swipe_dismiss::{Axis, Resolution, SwipeGeometry, SwipeState, SwipeToDismiss, TransitionState};
use crate::transition::{AnimatingGuard, Join};
use crate::video_controller::VideoItemController;

/// Reference size for videos: full HD in the content's orientation.
const VIDEO_LANDSCAPE: Size = Size::new(1920.0, 1080.0);

/// Damping of the double-tap zoom: no bounce.
const ZOOM_DAMPING: f32 = 1.0;

/// Duration of the spring back after a cancelled swipe.
const SWIPE_CANCEL_SECONDS: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// What the host should draw for an item this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemView {
    pub frame: Rect,
    pub alpha: f32,
    pub hidden: bool,
    pub rotation: AffineTransform,
    pub clips_to_bounds: bool,
    pub content_mode: ContentMode,
    pub load_state: LoadState,
    pub zoom_scale: f32,
}

/// Callbacks from an item controller to its gallery.
pub trait ItemControllerDelegate {
    fn did_swipe_to_dismiss(&self, index: usize, progress: f32);

    /// A release resolved to a dismissal.
    fn swipe_committed(&self, index: usize);

    /// The committed dismissal finished animating.
    fn did_finish_swipe_to_dismiss(&self, index: usize);

    fn did_cancel_swipe_to_dismiss(&self, index: usize);

    /// Runs at the start of a dismissal so gallery chrome fades with it.
    fn dismiss_alongside(&self, index: usize);
}

pub type Completion = Box<dyn FnOnce()>;

pub trait ItemController {
    fn base(&self) -> &ItemBaseController;

    fn index(&self) -> usize {
        self.base().index()
    }

    fn kind(&self) -> ContentKind {
        self.base().kind()
    }

    fn fetch_content(&self) {
        self.base().fetch_content()
    }

    fn present_item(&self, alongside: Completion, completion: Completion) -> bool {
        self.base().present_item(alongside, completion)
    }

    fn dismiss_item(&self, alongside: Completion, completion: Completion) -> bool {
        self.base().dismiss_item(alongside, completion)
    }

    /// Fades item-level chrome ahead of a close.
    fn close_decorations(&self, _duration_seconds: f32) {}

    /// The item became the current page.
    fn did_appear(&self) {}

    /// The item stopped being the current page.
    fn did_disappear(&self) {}

    fn as_video(&self) -> Option<&VideoItemController> {
        None
    }
}

/// Everything an item controller needs from its session.
#[derive(Clone)]
pub struct ItemEnvironment {
    pub config: Rc<GalleryConfig>,
    pub clock: FrameClock,
    pub origins: Rc<dyn DisplacedViewsProvider>,
    pub bounds: Rect,
    pub device_orientation: Orientation,
}

struct BaseInner {
    index: usize,
    item: GalleryItem,
    config: Rc<GalleryConfig>,
    origins: Rc<dyn DisplacedViewsProvider>,
    delegate: RefCell<Option<Weak<dyn ItemControllerDelegate>>>,
    bounds: Cell<Rect>,
    device_orientation: Cell<Orientation>,
    paging: Cell<Option<PagingContext>>,

    content: Cell<Option<ContentHandle>>,
    load_state: Cell<LoadState>,
    fetch_generation: Cell<u64>,

    guard: AnimatingGuard,
    hidden: Cell<bool>,
    displacing: Cell<bool>,
    hidden_origin: RefCell<Option<HiddenOrigin>>,
    clips_to_bounds: Cell<bool>,
    content_mode: Cell<ContentMode>,
    displacement: Animatable<Rect>,
    alpha: Animatable<f32>,
    rotation: Animatable<AffineTransform>,

    zoom: Animatable<f32>,
    content_offset: Animatable<Point>,
    gesture_start: Cell<Option<ScrollState>>,

    swipe: RefCell<SwipeToDismiss>,
    swipe_offset: Animatable<Vector2>,
}

impl BaseInner {
    fn delegate(&self) -> Option<Rc<dyn ItemControllerDelegate>> {
        self.delegate.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Natural size of the content before fitting.
    fn content_size(&self) -> Size {
        let content = self.content.get();
        match self.item.kind() {
            ContentKind::Video => match content {
                Some(content) if !content.size.is_landscape() => VIDEO_LANDSCAPE.transposed(),
                _ => VIDEO_LANDSCAPE,
            },
            _ => match content {
                Some(content) if !content.size.is_degenerate() => content.size,
                _ => self
                    .origins
                    .displacement_origin(self.index)
                    .map(|origin| origin.frame.size())
                    .unwrap_or(Size::ZERO),
            },
        }
    }

    fn fitted_size(&self) -> Size {
        aspect_fit(self.content_size(), self.bounds.get().size())
    }

    fn rotated_bounds(&self) -> (AffineTransform, Size) {
        let bounds = self.bounds.get().size();
        match self.config.rotation_mode {
            RotationMode::AlwaysPortrait => {
                let (transform, rect) = rotation_adjusted_bounds(
                    Orientation::Portrait,
                    self.device_orientation.get(),
                    bounds,
                );
                (transform, rect.size())
            }
            RotationMode::Automatic => (AffineTransform::IDENTITY, bounds),
        }
    }

    fn scroll_state(&self) -> ScrollState {
        let bounds = self.bounds.get().size();
        ScrollState {
            zoom_scale: self.zoom.value(),
            minimum_zoom_scale: MINIMUM_ZOOM_SCALE,
            maximum_zoom_scale: maximum_zoom_scale(
                bounds,
                self.fitted_size(),
                self.config.maximum_zoom_scale,
            ),
            content_offset: self.content_offset.value(),
        }
    }

    fn swipe_geometry(&self) -> SwipeGeometry {
        SwipeGeometry::new(self.bounds.get().size(), self.fitted_size())
    }

    fn frame(&self) -> Rect {
        if self.displacing.get() {
            return self.displacement.value();
        }
        let bounds = self.bounds.get();
        let offset = self.swipe_offset.value();
        self.scroll_state()
            .item_frame(bounds.size(), self.fitted_size())
            .translate(bounds.x - offset.x, bounds.y - offset.y)
    }

    fn reset_zoom(&self) {
        self.zoom.snap_to(MINIMUM_ZOOM_SCALE);
        self.content_offset.snap_to(Point::ZERO);
        self.gesture_start.set(None);
    }

    fn reset_swipe(&self) {
        self.swipe.borrow_mut().finish();
        self.swipe_offset.snap_to(Vector2::ZERO);
    }

    /// Reports the offset an animation or drag produced while an axis is
    /// locked.
    fn report_swipe_offset(&self, offset: Vector2) {
        let progress = {
            let mut swipe = self.swipe.borrow_mut();
            let Some(axis) = swipe.state().axis() else {
                return;
            };
            swipe.set_offset(axis.component(offset), self.swipe_geometry())
        };
        if let Some(delegate) = self.delegate() {
            delegate.did_swipe_to_dismiss(self.index, progress);
        }
    }

    /// Shows the thumbnail again and drops the flight state.
    fn land(&self) {
        self.hidden_origin.borrow_mut().take();
        self.clips_to_bounds.set(false);
    }
}

#[derive(Clone)]
pub struct ItemBaseController {
    inner: Rc<BaseInner>,
}

impl ItemBaseController {
    pub fn new(index: usize, item: GalleryItem, environment: ItemEnvironment) -> Self {
        let clock = environment.clock;
        let inner = Rc::new(BaseInner {
            index,
            item,
            config: environment.config,
            origins: environment.origins,
            delegate: RefCell::new(None),
            bounds: Cell::new(environment.bounds),
            device_orientation: Cell::new(environment.device_orientation),
            paging: Cell::new(None),
            content: Cell::new(None),
            load_state: Cell::new(LoadState::Loading),
            fetch_generation: Cell::new(0),
            guard: AnimatingGuard::new(),
            hidden: Cell::new(false),
            displacing: Cell::new(false),
            hidden_origin: RefCell::new(None),
            clips_to_bounds: Cell::new(false),
            content_mode: Cell::new(ContentMode::ScaleAspectFit),
            displacement: Animatable::new(Rect::ZERO, clock.clone()),
            alpha: Animatable::new(1.0, clock.clone()),
            rotation: Animatable::new(AffineTransform::IDENTITY, clock.clone()),
            zoom: Animatable::new(MINIMUM_ZOOM_SCALE, clock.clone()),
            content_offset: Animatable::new(Point::ZERO, clock.clone()),
            gesture_start: Cell::new(None),
            swipe: RefCell::new(SwipeToDismiss::new()),
            swipe_offset: Animatable::new(Vector2::ZERO, clock),
        });
        let weak = Rc::downgrade(&inner);
        inner.swipe_offset.set_on_update(move |offset| {
            if let Some(inner) = weak.upgrade() {
                inner.report_swipe_offset(*offset);
            }
        });
        Self { inner }
    }

    pub fn set_delegate(&self, delegate: Weak<dyn ItemControllerDelegate>) {
        *self.inner.delegate.borrow_mut() = Some(delegate);
    }

    pub fn index(&self) -> usize {
        self.inner.index
    }

    pub fn kind(&self) -> ContentKind {
        self.inner.item.kind()
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.inner.config
    }

    pub fn content(&self) -> Option<ContentHandle> {
        self.inner.content.get()
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.load_state.get()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.guard.is_animating()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.bounds.set(bounds);
    }

    pub fn set_device_orientation(&self, orientation: Orientation) {
        self.inner.device_orientation.set(orientation);
    }

    /// Paging position the swipe machine measures against.
    pub fn set_paging_context(&self, context: PagingContext) {
        self.inner.paging.set(Some(context));
    }

    /// Hides the item until it is presented, as the first page is while
    /// its thumbnail flies in.
    pub fn set_hidden(&self, hidden: bool) {
        self.inner.hidden.set(hidden);
    }

    pub fn fitted_size(&self) -> Size {
        self.inner.fitted_size()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.inner.scroll_state()
    }

    pub fn swipe_state(&self) -> SwipeState {
        self.inner.swipe.borrow().state()
    }

    pub fn transition_state(&self) -> TransitionState {
        let swipe = self.inner.swipe.borrow();
        TransitionState {
            orientation_lock: swipe.state().axis(),
            progress: swipe.progress(),
            origin_frame: swipe.origin_frame(),
            is_animating: self.inner.guard.is_animating(),
        }
    }

    pub fn view(&self) -> ItemView {
        let inner = &self.inner;
        ItemView {
            frame: inner.frame(),
            alpha: inner.alpha.value(),
            hidden: inner.hidden.get(),
            rotation: inner.rotation.value(),
            clips_to_bounds: inner.clips_to_bounds.get(),
            content_mode: inner.content_mode.get(),
            load_state: inner.load_state.get(),
            zoom_scale: inner.zoom.value(),
        }
    }

    /// Requests the item's content. Results from superseded requests are
    /// dropped.
    pub fn fetch_content(&self) {
        let inner = &self.inner;
        let generation = inner.fetch_generation.get() + 1;
        inner.fetch_generation.set(generation);
        inner.load_state.set(LoadState::Loading);
        let weak = Rc::downgrade(inner);
        inner.item.fetch(Box::new(move |result| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.fetch_generation.get() != generation {
                log::trace!("dropping stale content for item {}", inner.index);
                return;
            }
            match result {
                Ok(content) => {
                    inner.content.set(Some(content));
                    inner.load_state.set(LoadState::Loaded);
                }
                Err(error) => {
                    log::warn!("item {} failed to load: {error}", inner.index);
                    inner.load_state.set(LoadState::Failed);
                }
            }
        }));
    }

    /// Brings the item on screen, flying it out of its thumbnail when one is
    /// visible and fading it in otherwise. Returns false while another
    /// transition runs.
    pub fn present_item(
        &self,
        alongside: impl FnOnce(),
        completion: impl FnOnce() + 'static,
    ) -> bool {
        let inner = &self.inner;
        let Some(token) = inner.guard.try_begin() else {
            log::debug!("item {} busy, present ignored", inner.index);
            return false;
        };
        let viewport = inner.bounds.get();
        let origin = visible_origin(
            inner.origins.as_ref(),
            inner.index,
            viewport,
            inner.config.inset_margin,
        );
        let (device_transform, rotated_bounds) = inner.rotated_bounds();
        let plan = plan_present(origin, inner.content_size(), viewport, rotated_bounds);
        log::debug!("presenting item {} with {:?}", inner.index, plan);
        alongside();

        let weak = Rc::downgrade(inner);
        match plan {
            DisplacementPlan::Flight { origin, from, to } => {
                if !inner.config.keep_original_in_place {
                    *inner.hidden_origin.borrow_mut() =
                        Some(HiddenOrigin::hide(inner.origins.clone(), origin.id));
                }
                inner.hidden.set(false);
                inner.alpha.snap_to(1.0);
                inner.displacing.set(true);
                inner.clips_to_bounds.set(true);
                inner.content_mode.set(origin.content_mode);
                inner.displacement.snap_to(from);

                let rotates = !device_transform.is_identity();
                let join = Join::new(1 + usize::from(rotates), move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.displacing.set(false);
                        inner.content_mode.set(ContentMode::ScaleAspectFit);
                        inner.land();
                    }
                    drop(token);
                    completion();
                });
                let animation = present_animation(&inner.config);
                if rotates {
                    inner.rotation.snap_to(device_transform);
                    let join = join.clone();
                    inner.rotation.animate_to(AffineTransform::IDENTITY, animation, move |_| {
                        join.arrive()
                    });
                }
                inner
                    .displacement
                    .animate_to(to, animation, move |_| join.arrive());
            }
            DisplacementPlan::Fade => {
                inner.hidden.set(false);
                inner.alpha.snap_to(0.0);
                inner
                    .alpha
                    .animate_to(1.0, fade_animation(&inner.config), move |_| {
                        drop(token);
                        completion();
                    });
            }
        }
        true
    }

    /// Takes the item off screen, flying it back into its thumbnail when one
    /// is visible and fading it out otherwise. Returns false while another
    /// transition runs.
    pub fn dismiss_item(
        &self,
        alongside: impl FnOnce(),
        completion: impl FnOnce() + 'static,
    ) -> bool {
        let inner = &self.inner;
        let Some(token) = inner.guard.try_begin() else {
            log::debug!("item {} busy, dismiss ignored", inner.index);
            return false;
        };
        let current = inner.frame();
        inner.reset_zoom();
        inner.reset_swipe();
        let origin = visible_origin(
            inner.origins.as_ref(),
            inner.index,
            inner.bounds.get(),
            inner.config.inset_margin,
        );
        let plan = plan_dismiss(origin, current);
        log::debug!("dismissing item {} with {:?}", inner.index, plan);
        alongside();
        if let Some(delegate) = inner.delegate() {
            delegate.dismiss_alongside(inner.index);
        }

        let weak = Rc::downgrade(inner);
        match plan {
            DisplacementPlan::Flight { origin, from, to } => {
                if !inner.config.keep_original_in_place {
                    *inner.hidden_origin.borrow_mut() =
                        Some(HiddenOrigin::hide(inner.origins.clone(), origin.id));
                }
                inner.displacing.set(true);
                inner.clips_to_bounds.set(true);
                inner.content_mode.set(origin.content_mode);
                inner.displacement.snap_to(from);

                let (device_transform, _) = inner.rotated_bounds();
                let rotates = !device_transform.is_identity();
                let join = Join::new(1 + usize::from(rotates), move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.hidden.set(true);
                        inner.land();
                    }
                    drop(token);
                    completion();
                });
                let animation = dismiss_animation(&inner.config);
                if rotates {
                    let join = join.clone();
                    inner
                        .rotation
                        .animate_to(device_transform, animation, move |_| join.arrive());
                }
                inner
                    .displacement
                    .animate_to(to, animation, move |_| join.arrive());
            }
            DisplacementPlan::Fade => {
                inner
                    .alpha
                    .animate_to(0.0, fade_animation(&inner.config), move |_| {
                        drop(token);
                        completion();
                    });
            }
        }
        true
    }

    /// Zooms to fill around `position` (viewport coordinates), or back out.
    pub fn double_tap(&self, position: Point) -> bool {
        let inner = &self.inner;
        if inner.guard.is_animating() || !inner.swipe.borrow().is_idle() {
            return false;
        }
        let bounds = inner.bounds.get();
        let fitted = inner.fitted_size();
        let state = inner.scroll_state();
        let frame = state.item_frame(bounds.size(), fitted);
        let touch = Point::new(
            (position.x - bounds.x - frame.x) / state.zoom_scale,
            (position.y - bounds.y - frame.y) / state.zoom_scale,
        );
        let target = double_tap_target(&state, bounds.size(), fitted, touch);
        log::debug!("double tap zooms item {} to {}", inner.index, target.zoom_scale);
        let animation = AnimationType::Spring(SpringSpec::with_duration(
            inner.config.double_tap_zoom_duration,
            ZOOM_DAMPING,
        ));
        inner.zoom.animate_to(target.zoom_scale, animation, |_| {});
        inner
            .content_offset
            .animate_to(target.content_offset, animation, |_| {});
        true
    }

    pub fn pinch(&self, update: &PinchUpdate) {
        let inner = &self.inner;
        if inner.guard.is_animating() || !inner.swipe.borrow().is_idle() {
            return;
        }
        match update.phase {
            PinchPhase::Began => {
                inner.zoom.stop();
                inner.content_offset.stop();
                inner.gesture_start.set(Some(inner.scroll_state()));
            }
            PinchPhase::Changed => {
                let Some(start) = inner.gesture_start.get() else {
                    return;
                };
                let bounds = inner.bounds.get();
                let focal = Point::new(
                    update.focal_point.x - bounds.x,
                    update.focal_point.y - bounds.y,
                );
                let state = pinch_zoom(&start, update.scale, focal, bounds.size(), inner.fitted_size());
                inner.zoom.snap_to(state.zoom_scale);
                inner.content_offset.snap_to(state.content_offset);
            }
            PinchPhase::Ended => inner.gesture_start.set(None),
        }
    }

    pub fn is_zoomed(&self) -> bool {
        !self.inner.scroll_state().is_at_minimum()
    }

    /// Scrolls zoomed content; `translation` is measured from the pan start.
    pub fn pan_zoomed(&self, translation: Vector2) {
        let inner = &self.inner;
        let start = match inner.gesture_start.get() {
            Some(start) => start,
            None => {
                let start = inner.scroll_state();
                inner.gesture_start.set(Some(start));
                start
            }
        };
        let bounds = inner.bounds.get().size();
        let offset = pan_offset(&start, translation, bounds, inner.fitted_size());
        inner.content_offset.snap_to(offset);
    }

    pub fn end_zoom_pan(&self) {
        self.inner.gesture_start.set(None);
    }

    /// Swipe-to-dismiss needs the item at rest at minimum zoom.
    pub fn can_begin_swipe(&self) -> bool {
        let inner = &self.inner;
        inner.scroll_state().is_at_minimum()
            && !inner.guard.is_animating()
            && inner.swipe.borrow().is_idle()
    }

    pub fn begin_swipe(&self, velocity: Vector2) -> Option<Axis> {
        if !self.can_begin_swipe() {
            return None;
        }
        let inner = &self.inner;
        let origin_frame = inner
            .origins
            .displacement_origin(inner.index)
            .map(|origin| origin.frame);
        let axis = inner.swipe.borrow_mut().begin(velocity, origin_frame)?;
        log::debug!("item {} swipe locked {:?}", inner.index, axis);
        Some(axis)
    }

    /// Follows the pan. Returns the new progress.
    pub fn update_swipe(&self, translation: Vector2) -> Option<f32> {
        let inner = &self.inner;
        let context = self.paging_context();
        let (axis, offset) = {
            let mut swipe = inner.swipe.borrow_mut();
            swipe.update(translation, &context, inner.swipe_geometry())?;
            (swipe.state().axis()?, swipe.offset())
        };
        inner.swipe_offset.snap_to(axis.vector(offset));
        Some(inner.swipe.borrow().progress())
    }

    /// Resolves a released swipe and starts the matching animation.
    pub fn end_swipe(&self, velocity: Vector2) -> Option<Resolution> {
        let inner = &self.inner;
        let context = self.paging_context();
        let (resolution, offset) = {
            let mut swipe = inner.swipe.borrow_mut();
            let resolution = swipe.release(
                velocity,
                &context,
                inner.swipe_geometry(),
                inner.config.swipe_threshold_velocity,
            )?;
            (resolution, swipe.offset())
        };
        log::debug!("item {} swipe released: {:?}", inner.index, resolution);
        let index = inner.index;
        match resolution {
            Resolution::Fling {
                axis,
                target,
                velocity,
            } => {
                let token = inner.guard.try_begin();
                if let Some(delegate) = inner.delegate() {
                    delegate.swipe_committed(index);
                }
                let weak = Rc::downgrade(inner);
                inner.swipe_offset.animate_to(
                    axis.vector(target),
                    AnimationType::Tween(AnimationSpec::escape(target - offset, velocity)),
                    move |end| {
                        drop(token);
                        if end != AnimationEnd::Finished {
                            return;
                        }
                        if let Some(delegate) = weak.upgrade().and_then(|inner| inner.delegate()) {
                            delegate.did_finish_swipe_to_dismiss(index);
                        }
                    },
                );
            }
            Resolution::DisplacementDismiss => {
                let delegate = inner.delegate();
                if let Some(delegate) = &delegate {
                    delegate.swipe_committed(index);
                }
                let weak = delegate.as_ref().map(Rc::downgrade);
                self.dismiss_item(
                    || {},
                    move || {
                        if let Some(delegate) = weak.and_then(|weak| weak.upgrade()) {
                            delegate.did_finish_swipe_to_dismiss(index);
                        }
                    },
                );
            }
            Resolution::Cancel => {
                let token = inner.guard.try_begin();
                let weak = Rc::downgrade(inner);
                inner.swipe_offset.animate_to(
                    Vector2::ZERO,
                    AnimationType::Spring(SpringSpec::with_duration(
                        SWIPE_CANCEL_SECONDS,
                        inner.config.spring_bounce,
                    )),
                    move |end| {
                        drop(token);
                        if end != AnimationEnd::Finished {
                            return;
                        }
                        let Some(inner) = weak.upgrade() else {
                            return;
                        };
                        inner.swipe.borrow_mut().finish();
                        if let Some(delegate) = inner.delegate() {
                            delegate.did_cancel_swipe_to_dismiss(index);
                        }
                    },
                );
            }
        }
        Some(resolution)
    }

    /// The pointer was taken away mid-swipe; springs back.
    pub fn cancel_swipe(&self) -> Option<Resolution> {
        self.end_swipe(Vector2::ZERO)
    }

    /// A controller outside any pager behaves like a single-item gallery.
    fn paging_context(&self) -> PagingContext {
        self.inner
            .paging
            .get()
            .unwrap_or_else(|| PagingContext::new(0, 1, self.inner.config.paging_mode))
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
