//! Robot testing for gallery sessions
//!
//! A [`GalleryRobot`] owns a session wired to in-memory collaborators and a
//! virtual clock. Tests drive it the way a user would:
//! - present and wait for the flight to land
//! - drag, fling, tap and pinch
//! - advance time frame by frame or until nothing animates
//!
//! # Example
//!
//! ```
//! use vitrine_testing::{FakeItems, GalleryRobot};
//!
//! let mut robot = GalleryRobot::builder(FakeItems::images(5))
//!     .start_index(2)
//!     .build()
//!     .expect("valid gallery");
//! robot.present_and_settle();
//! robot.swipe_left();
//! robot.run_until_idle();
//! assert_eq!(robot.session().current_index(), 3);
//! ```

use std::rc::Rc;

use vitrine_gallery::{GalleryConfig, GalleryError, GallerySession, SessionPhase};
use vitrine_geometry::{Point, Rect};
use vitrine_input::{PointerEvent, PointerId};

use crate::fakes::{FakeItems, FakeOrigins, RecordingObserver};

/// Simulated display refresh interval.
pub const FRAME_INTERVAL_MS: i64 = 16;

/// Viewport used unless a test picks another one.
pub const DEFAULT_VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);

/// Upper bound on frames [`GalleryRobot::run_until_idle`] will pump.
const MAX_IDLE_FRAMES: usize = 2_000;

const PRIMARY_POINTER: PointerId = 0;
const SECONDARY_POINTER: PointerId = 1;

pub struct GalleryRobotBuilder {
    items: FakeItems,
    origins: Option<FakeOrigins>,
    config: GalleryConfig,
    viewport: Rect,
    start_index: usize,
}

impl GalleryRobotBuilder {
    pub fn origins(mut self, origins: FakeOrigins) -> Self {
        self.origins = Some(origins);
        self
    }

    pub fn config(mut self, config: GalleryConfig) -> Self {
        self.config = config;
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

    pub fn build(self) -> Result<GalleryRobot, GalleryError> {
        let items = Rc::new(self.items);
        let origins = Rc::new(self.origins.unwrap_or_default());
        let observer = Rc::new(RecordingObserver::new());
        let session = GallerySession::builder(items.clone())
            .delegate(items.clone())
            .origins(origins.clone())
            .observer(observer.clone())
            .config(self.config)
            .viewport(self.viewport)
            .start_index(self.start_index)
            .build()?;
        Ok(GalleryRobot {
            session,
            items,
            origins,
            observer,
            now_ms: 0,
        })
    }
}

/// Drives one gallery session with synthetic input and time.
pub struct GalleryRobot {
    session: GallerySession,
    items: Rc<FakeItems>,
    origins: Rc<FakeOrigins>,
    observer: Rc<RecordingObserver>,
    now_ms: i64,
}

impl GalleryRobot {
    pub fn builder(items: FakeItems) -> GalleryRobotBuilder {
        GalleryRobotBuilder {
            items,
            origins: None,
            config: GalleryConfig::default(),
            viewport: DEFAULT_VIEWPORT,
            start_index: 0,
        }
    }

    pub fn session(&self) -> &GallerySession {
        &self.session
    }

    pub fn items(&self) -> &FakeItems {
        &self.items
    }

    pub fn origins(&self) -> &FakeOrigins {
        &self.origins
    }

    pub fn observer(&self) -> &RecordingObserver {
        &self.observer
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Moves the clock forward and renders one frame at the new time.
    pub fn advance_time(&mut self, millis: i64) {
        self.now_ms += millis;
        self.session.frame(self.now_ms as u64 * 1_000_000);
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_time(FRAME_INTERVAL_MS);
        }
    }

    /// Pumps frames until no animation is scheduled. Returns the number of
    /// frames rendered.
    ///
    /// Panics if the session never goes idle.
    pub fn run_until_idle(&mut self) -> usize {
        for frame in 0..MAX_IDLE_FRAMES {
            if !self.session.clock().has_frame_callbacks() {
                return frame;
            }
            self.advance_time(FRAME_INTERVAL_MS);
        }
        panic!("gallery still animating after {MAX_IDLE_FRAMES} frames");
    }

    /// Presents and waits for the presentation to complete.
    pub fn present_and_settle(&mut self) {
        assert!(self.session.present(), "present was refused");
        self.run_until_idle();
        assert_eq!(self.session.phase(), SessionPhase::Presented);
    }

    pub fn press(&mut self, position: Point) {
        self.pointer(PointerEvent::down(position.x, position.y, self.now_ms));
    }

    /// Moves the primary pointer one frame later.
    pub fn move_to(&mut self, position: Point) {
        self.advance_time(FRAME_INTERVAL_MS);
        self.pointer(PointerEvent::moved(position.x, position.y, self.now_ms));
    }

    pub fn release(&mut self, position: Point) {
        self.pointer(PointerEvent::up(position.x, position.y, self.now_ms));
    }

    /// The platform took the pointer away.
    pub fn cancel(&mut self, position: Point) {
        self.pointer(PointerEvent::cancel(position.x, position.y, self.now_ms));
    }

    /// Drags in `steps` moves one frame apart without lifting the pointer.
    /// Returns the final position.
    pub fn drag_without_release(&mut self, from: Point, to: Point, steps: u32) -> Point {
        self.press(from);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.move_to(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
        to
    }

    /// Drags and releases at the last sampled position, so the release
    /// velocity is the drag speed: distance / (steps * 16 ms).
    pub fn drag(&mut self, from: Point, to: Point, steps: u32) {
        let end = self.drag_without_release(from, to, steps);
        self.release(end);
    }

    /// Drags slowly and holds still before lifting, so the release carries
    /// no velocity.
    pub fn drag_and_hold(&mut self, from: Point, to: Point, steps: u32) {
        let end = self.drag_without_release(from, to, steps);
        self.advance_time(FRAME_INTERVAL_MS * 4);
        self.release(end);
    }

    /// A fast horizontal swipe across most of the viewport, right to left.
    pub fn swipe_left(&mut self) {
        let center = self.viewport_center();
        self.drag(
            Point::new(center.x + 150.0, center.y),
            Point::new(center.x - 150.0, center.y),
            10,
        );
    }

    pub fn swipe_right(&mut self) {
        let center = self.viewport_center();
        self.drag(
            Point::new(center.x - 150.0, center.y),
            Point::new(center.x + 150.0, center.y),
            10,
        );
    }

    /// A fast vertical fling of `distance` (negative is upward).
    pub fn fling_vertically(&mut self, distance: f32) {
        let center = self.viewport_center();
        self.drag(center, Point::new(center.x, center.y + distance), 8);
    }

    pub fn tap(&mut self, position: Point) {
        self.press(position);
        self.advance_time(FRAME_INTERVAL_MS);
        self.release(position);
    }

    /// Taps and waits out the double-tap window so the tap is delivered.
    pub fn single_tap(&mut self, position: Point) {
        self.tap(position);
        self.advance_time(400);
    }

    pub fn double_tap(&mut self, position: Point) {
        self.tap(position);
        self.advance_time(FRAME_INTERVAL_MS * 3);
        self.tap(position);
    }

    /// Spreads two pointers around `center` from `start_span` apart to
    /// `end_span` apart.
    pub fn pinch(&mut self, center: Point, start_span: f32, end_span: f32, steps: u32) {
        let half = start_span / 2.0;
        self.pointer(PointerEvent::down(center.x - half, center.y, self.now_ms));
        self.pointer(
            PointerEvent::down(center.x + half, center.y, self.now_ms).with_id(SECONDARY_POINTER),
        );
        let steps = steps.max(1);
        let mut half = half;
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            half = (start_span + (end_span - start_span) * t) / 2.0;
            self.advance_time(FRAME_INTERVAL_MS);
            self.pointer(
                PointerEvent::moved(center.x + half, center.y, self.now_ms)
                    .with_id(SECONDARY_POINTER),
            );
            self.pointer(PointerEvent::moved(center.x - half, center.y, self.now_ms));
        }
        self.pointer(
            PointerEvent::up(center.x + half, center.y, self.now_ms).with_id(SECONDARY_POINTER),
        );
        self.pointer(PointerEvent::up(center.x - half, center.y, self.now_ms));
    }

    fn viewport_center(&self) -> Point {
        let size = self.session.viewport_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }

    fn pointer(&mut self, event: PointerEvent) {
        debug_assert!(event.id == PRIMARY_POINTER || event.id == SECONDARY_POINTER);
        self.session.handle_pointer(&event);
    }
}
