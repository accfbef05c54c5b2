use super::*;
use crate::config::PagingMode;
use crate::item::{ContentHandle, GalleryItem};
use crate::origin::{DisplaceableOrigin, OriginId};
use vitrine_geometry::{Point, Vector2};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);
const FRAME_MS: i64 = 16;

struct Items {
    count: Cell<usize>,
    video_at: Option<usize>,
    removed: RefCell<Vec<usize>>,
    requested: RefCell<Vec<usize>>,
}

impl Items {
    fn new(count: usize) -> Rc<Self> {
        Rc::new(Self {
            count: Cell::new(count),
            video_at: None,
            removed: RefCell::new(Vec::new()),
            requested: RefCell::new(Vec::new()),
        })
    }
}

impl ItemsProvider for Items {
    fn item_count(&self) -> usize {
        self.count.get()
    }

    fn item(&self, index: usize) -> GalleryItem {
        assert!(
            index < self.count.get(),
            "item({index}) requested with {} items",
            self.count.get()
        );
        self.requested.borrow_mut().push(index);
        let kind = if self.video_at == Some(index) {
            ContentKind::Video
        } else {
            ContentKind::Image
        };
        GalleryItem::ready(kind, ContentHandle::new(index as u64, Size::new(800.0, 600.0)))
    }
}

impl ItemsDelegate for Items {
    fn remove_item(&self, index: usize) {
        self.removed.borrow_mut().push(index);
        self.count.set(self.count.get() - 1);
    }
}

struct Thumbnails;

impl DisplacedViewsProvider for Thumbnails {
    fn displacement_origin(&self, index: usize) -> Option<DisplaceableOrigin> {
        let row = index as f32 * 90.0;
        Some(DisplaceableOrigin::new(
            index as OriginId,
            Rect::new(100.0, 100.0 + row, 80.0, 80.0),
        ))
    }

    fn set_origin_hidden(&self, _id: OriginId, _hidden: bool) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Note {
    Settled(usize),
    Shown(usize),
    Progress(f32),
    Committed,
    Presented,
    Dismissed(DismissReason),
}

#[derive(Default)]
struct Log {
    notes: RefCell<Vec<Note>>,
}

impl Log {
    fn count(&self, note: Note) -> usize {
        self.notes.borrow().iter().filter(|n| **n == note).count()
    }

    fn shown(&self) -> Vec<usize> {
        self.notes
            .borrow()
            .iter()
            .filter_map(|note| match note {
                Note::Shown(index) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl GalleryObserver for Log {
    fn on_settled_at_index(&self, index: usize) {
        self.notes.borrow_mut().push(Note::Settled(index));
    }

    fn on_page_shown(&self, index: usize) {
        self.notes.borrow_mut().push(Note::Shown(index));
    }

    fn on_dismiss_progress(&self, progress: f32) {
        self.notes.borrow_mut().push(Note::Progress(progress));
    }

    fn on_dismiss_committed(&self) {
        self.notes.borrow_mut().push(Note::Committed);
    }

    fn on_presentation_complete(&self) {
        self.notes.borrow_mut().push(Note::Presented);
    }

    fn on_dismissal_complete(&self, reason: DismissReason) {
        self.notes.borrow_mut().push(Note::Dismissed(reason));
    }
}

struct Harness {
    session: GallerySession,
    items: Rc<Items>,
    log: Rc<Log>,
    now_ms: Cell<i64>,
}

impl Harness {
    fn new(items: Rc<Items>, start: usize, config: GalleryConfig) -> Self {
        Self::with_origins(items, start, config, Rc::new(NoOrigins))
    }

    fn with_origins(
        items: Rc<Items>,
        start: usize,
        config: GalleryConfig,
        origins: Rc<dyn DisplacedViewsProvider>,
    ) -> Self {
        let log = Rc::new(Log::default());
        let session = GallerySession::builder(items.clone())
            .delegate(items.clone())
            .observer(log.clone())
            .origins(origins)
            .config(config)
            .viewport(VIEWPORT)
            .start_index(start)
            .build()
            .expect("valid session");
        Self {
            session,
            items,
            log,
            now_ms: Cell::new(1_000),
        }
    }

    fn presented(count: usize, start: usize) -> Self {
        let harness = Self::new(Items::new(count), start, GalleryConfig::default());
        assert!(harness.session.present());
        harness.pump();
        assert_eq!(harness.session.phase(), SessionPhase::Presented);
        harness
    }

    fn advance(&self, ms: i64) {
        let now = self.now_ms.get() + ms;
        self.now_ms.set(now);
        self.session.frame(now as u64 * 1_000_000);
    }

    fn pump(&self) {
        for _ in 0..1_000 {
            if !self.session.clock().has_frame_callbacks() {
                return;
            }
            self.advance(FRAME_MS);
        }
        panic!("session never went idle");
    }

    fn drag(&self, from: Point, delta: Vector2, steps: u32) {
        let now = self.now_ms.get();
        self.session.handle_pointer(&PointerEvent::down(from.x, from.y, now));
        let mut position = from;
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            position = Point::new(from.x + delta.x * t, from.y + delta.y * t);
            self.advance(FRAME_MS);
            self.session
                .handle_pointer(&PointerEvent::moved(position.x, position.y, self.now_ms.get()));
        }
        self.session
            .handle_pointer(&PointerEvent::up(position.x, position.y, self.now_ms.get()));
    }

    fn tap(&self, x: f32, y: f32) {
        let now = self.now_ms.get();
        self.session.handle_pointer(&PointerEvent::down(x, y, now));
        self.advance(FRAME_MS);
        self.session
            .handle_pointer(&PointerEvent::up(x, y, self.now_ms.get()));
    }
}

#[test]
fn building_rejects_empty_galleries_and_bad_start_indices() {
    let empty = GallerySession::builder(Items::new(0)).build();
    assert_eq!(empty.err(), Some(GalleryError::EmptyGallery));

    let out_of_range = GallerySession::builder(Items::new(3)).start_index(3).build();
    assert_eq!(
        out_of_range.err(),
        Some(GalleryError::StartIndexOutOfRange { index: 3, count: 3 })
    );
    assert_eq!(
        GalleryError::StartIndexOutOfRange { index: 3, count: 3 }.to_string(),
        "start index 3 is out of range for 3 items"
    );
}

#[test]
fn present_materializes_the_window_and_completes_once() {
    let harness = Harness::new(Items::new(5), 2, GalleryConfig::default());
    assert_eq!(harness.session.phase(), SessionPhase::Idle);
    assert_eq!(harness.session.window_level(), WindowLevel::Normal);

    assert!(harness.session.present());
    assert!(!harness.session.present());
    assert_eq!(harness.session.phase(), SessionPhase::Presenting);
    assert_eq!(harness.session.materialized_indices(), vec![1, 2, 3]);
    assert_eq!(harness.session.window_level(), WindowLevel::AboveStatusBar);

    harness.pump();
    assert_eq!(harness.session.phase(), SessionPhase::Presented);
    assert_eq!(harness.log.count(Note::Presented), 1);
    assert!(!harness.session.is_animating());
    assert!((harness.session.overlay_alpha() - 1.0).abs() < 1e-4);
    assert!((harness.session.decoration_alpha(DecorationGroup::Header) - 1.0).abs() < 1e-3);
    let view = harness.session.current_item_view().expect("current page");
    assert!((view.alpha - 1.0).abs() < 1e-4);
    assert_eq!(view.frame, Rect::new(0.0, 250.0, 400.0, 300.0));
}

#[test]
fn status_bar_visible_keeps_the_normal_window_level() {
    let config = GalleryConfig::default().with_status_bar_hidden(false);
    let harness = Harness::new(Items::new(2), 0, config);
    assert!(harness.session.present());
    assert_eq!(harness.session.window_level(), WindowLevel::Normal);
}

#[test]
fn input_is_ignored_until_presented() {
    let harness = Harness::new(Items::new(5), 2, GalleryConfig::default());
    harness.session.present();
    harness.drag(Point::new(300.0, 400.0), Vector2::new(-300.0, 0.0), 10);
    assert_eq!(harness.session.paging_offset(), (0.0, None));
    harness.pump();
    assert_eq!(harness.session.current_index(), 2);
}

#[test]
fn horizontal_drag_pages_and_slides_the_window() {
    let harness = Harness::presented(5, 2);
    harness.drag(Point::new(350.0, 400.0), Vector2::new(-300.0, 0.0), 10);
    assert!(harness.session.is_animating());
    harness.pump();

    assert_eq!(harness.session.current_index(), 3);
    assert_eq!(harness.session.materialized_indices(), vec![2, 3, 4]);
    assert_eq!(harness.log.count(Note::Settled(3)), 1);
    assert_eq!(harness.log.shown(), vec![3]);
    assert!(!harness.session.is_animating());
}

#[test]
fn go_to_hops_through_the_neighbour() {
    let harness = Harness::presented(5, 2);
    assert!(harness.session.go_to(4));
    assert!(!harness.session.go_to(0));
    harness.pump();

    assert_eq!(harness.session.current_index(), 4);
    assert_eq!(harness.log.shown(), vec![3, 4]);
    assert_eq!(harness.log.count(Note::Settled(4)), 1);
    assert_eq!(harness.session.materialized_indices(), vec![3, 4]);
    assert!(!harness.session.go_to(4));
    assert!(!harness.session.go_to(9));
}

#[test]
fn paging_waits_for_an_unresolved_swipe() {
    let harness = Harness::presented(3, 1);
    let start = Point::new(200.0, 400.0);
    harness
        .session
        .handle_pointer(&PointerEvent::down(start.x, start.y, harness.now_ms.get()));
    for step in 1..=10 {
        harness.advance(FRAME_MS);
        harness.session.handle_pointer(&PointerEvent::moved(
            start.x,
            start.y + step as f32 * 10.0,
            harness.now_ms.get(),
        ));
    }
    assert!(!harness.session.go_to(2));
    assert!(!harness.session.delete_current());
    assert!(!harness.session.close());

    harness.advance(100);
    harness.session.handle_pointer(&PointerEvent::moved(
        start.x,
        start.y + 100.0,
        harness.now_ms.get(),
    ));
    harness
        .session
        .handle_pointer(&PointerEvent::up(start.x, start.y + 100.0, harness.now_ms.get()));
    harness.pump();

    assert_eq!(harness.session.current_index(), 1);
    assert_eq!(harness.log.count(Note::Settled(1)), 1);
    let view = harness.session.current_item_view().expect("current page");
    assert_eq!(view.frame, Rect::new(0.0, 250.0, 400.0, 300.0));
    assert!(harness.session.go_to(2));
    harness.pump();
    assert_eq!(harness.session.current_index(), 2);
}

#[test]
fn close_is_rejected_while_a_cancelled_swipe_springs_back() {
    let harness = Harness::presented(3, 1);
    let start = Point::new(200.0, 400.0);
    harness
        .session
        .handle_pointer(&PointerEvent::down(start.x, start.y, harness.now_ms.get()));
    for step in 1..=10 {
        harness.advance(FRAME_MS);
        harness.session.handle_pointer(&PointerEvent::moved(
            start.x,
            start.y + step as f32 * 10.0,
            harness.now_ms.get(),
        ));
    }
    harness.advance(100);
    harness.session.handle_pointer(&PointerEvent::moved(
        start.x,
        start.y + 100.0,
        harness.now_ms.get(),
    ));
    harness
        .session
        .handle_pointer(&PointerEvent::up(start.x, start.y + 100.0, harness.now_ms.get()));

    assert!(harness.session.is_animating());
    assert!(!harness.session.close());
    harness.pump();
    assert_eq!(harness.log.count(Note::Settled(1)), 1);
    assert_eq!(harness.session.phase(), SessionPhase::Presented);

    assert!(harness.session.close());
    harness.pump();
    assert_eq!(harness.session.phase(), SessionPhase::Closed);
}

#[test]
fn upward_fling_closes_with_swipe_reason() {
    let harness = Harness::presented(3, 1);
    harness.drag(Point::new(200.0, 600.0), Vector2::new(0.0, -300.0), 10);
    assert_eq!(harness.log.count(Note::Committed), 1);
    assert_eq!(harness.session.phase(), SessionPhase::Closing);
    harness.pump();

    assert_eq!(harness.session.phase(), SessionPhase::Closed);
    assert_eq!(
        harness.log.count(Note::Dismissed(DismissReason::SwipeToDismiss)),
        1
    );
    assert!(harness.session.materialized_indices().is_empty());
    assert_eq!(harness.session.window_level(), WindowLevel::Normal);
    assert_eq!(harness.session.overlay_alpha(), 0.0);
}

#[test]
fn slow_vertical_drag_springs_back_and_settles() {
    let harness = Harness::presented(3, 1);
    harness.drag(Point::new(200.0, 400.0), Vector2::new(0.0, -40.0), 20);
    let reported = harness
        .log
        .notes
        .borrow()
        .iter()
        .filter(|note| matches!(note, Note::Progress(p) if *p > 0.0 && *p < 0.5))
        .count();
    assert!(reported > 0);
    let mid_decorations = harness.session.decoration_alpha(DecorationGroup::Header);
    assert!(mid_decorations < 1.0);
    harness.pump();

    assert_eq!(harness.session.phase(), SessionPhase::Presented);
    assert_eq!(harness.log.count(Note::Committed), 0);
    assert_eq!(harness.log.count(Note::Settled(1)), 1);
    assert!((harness.session.decoration_alpha(DecorationGroup::Header) - 1.0).abs() < 1e-4);
    assert!((harness.session.overlay_alpha() - 1.0).abs() < 1e-4);
}

#[test]
fn close_fades_the_chrome_then_dismisses() {
    let harness = Harness::presented(3, 0);
    assert!(harness.session.close());
    assert!(!harness.session.close());
    assert_eq!(harness.session.phase(), SessionPhase::Closing);
    harness.pump();

    assert_eq!(harness.session.phase(), SessionPhase::Closed);
    assert_eq!(
        harness.log.count(Note::Dismissed(DismissReason::Programmatic)),
        1
    );
    assert_eq!(harness.session.decoration_alpha(DecorationGroup::CloseButton), 0.0);
}

#[test]
fn close_button_reports_its_reason() {
    let harness = Harness::presented(3, 0);
    assert!(harness.session.close_interactively());
    harness.pump();
    assert_eq!(
        harness.log.count(Note::Dismissed(DismissReason::CloseButton)),
        1
    );
}

#[test]
fn close_is_refused_before_presentation_completes() {
    let harness = Harness::new(Items::new(3), 0, GalleryConfig::default());
    assert!(!harness.session.close());
    harness.session.present();
    assert!(!harness.session.close());
}

#[test]
fn deleting_moves_to_the_next_item() {
    let harness = Harness::presented(3, 1);
    assert!(harness.session.delete_current());
    harness.pump();

    assert_eq!(*harness.items.removed.borrow(), vec![1]);
    assert_eq!(harness.session.item_count(), 2);
    assert_eq!(harness.session.current_index(), 1);
    assert_eq!(harness.session.materialized_indices(), vec![0, 1]);
    assert_eq!(harness.session.phase(), SessionPhase::Presented);
}

#[test]
fn deleting_the_last_page_steps_back() {
    let harness = Harness::presented(3, 2);
    assert!(harness.session.delete_current());
    harness.pump();
    assert_eq!(harness.session.current_index(), 1);
    assert_eq!(harness.log.count(Note::Settled(1)), 1);
}

#[test]
fn deleting_the_last_page_only_requests_remaining_items() {
    let harness = Harness::presented(3, 2);
    harness.items.requested.borrow_mut().clear();
    assert!(harness.session.delete_current());
    harness.pump();

    let requested = harness.items.requested.borrow().clone();
    assert!(!requested.is_empty());
    assert!(requested.iter().all(|index| *index < 2), "{requested:?}");
    assert_eq!(harness.session.materialized_indices(), vec![0, 1]);
}

#[test]
fn deleting_the_only_item_closes() {
    let harness = Harness::presented(1, 0);
    assert!(harness.session.delete_current());
    harness.pump();
    assert_eq!(harness.session.phase(), SessionPhase::Closed);
    assert_eq!(
        harness.log.count(Note::Dismissed(DismissReason::Programmatic)),
        1
    );
}

#[test]
fn single_tap_toggles_the_chrome_after_the_double_tap_window() {
    let harness = Harness::presented(3, 0);
    harness.tap(200.0, 400.0);
    assert!(!harness.session.decorations().is_hidden());
    harness.advance(400);
    assert!(harness.session.decorations().is_hidden());
    harness.pump();
    assert_eq!(harness.session.decoration_alpha(DecorationGroup::Footer), 0.0);
}

#[test]
fn double_tap_zooms_the_current_page() {
    let harness = Harness::presented(3, 0);
    harness.tap(200.0, 400.0);
    harness.advance(50);
    harness.tap(200.0, 400.0);
    harness.pump();
    let view = harness.session.current_item_view().expect("current page");
    assert!(view.zoom_scale > 1.0);
    assert!(!harness.session.decorations().is_hidden());
}

#[test]
fn zoomed_pages_pan_instead_of_paging() {
    let harness = Harness::presented(3, 1);
    harness.tap(200.0, 400.0);
    harness.advance(50);
    harness.tap(200.0, 400.0);
    harness.pump();
    harness.drag(Point::new(300.0, 400.0), Vector2::new(-100.0, 0.0), 10);
    harness.pump();
    assert_eq!(harness.session.current_index(), 1);
    assert_eq!(harness.session.paging_offset(), (0.0, None));
}

#[test]
fn portrait_locked_sessions_counter_rotate() {
    let config = GalleryConfig::default().with_rotation_mode(RotationMode::AlwaysPortrait);
    let harness = Harness::new(Items::new(3), 0, config);
    harness.session.present();
    harness.pump();

    assert!(!harness.session.set_device_orientation(Orientation::FaceUp));
    assert!(harness
        .session
        .set_device_orientation(Orientation::LandscapeLeft));
    assert!(!harness
        .session
        .set_device_orientation(Orientation::LandscapeRight));
    harness.pump();

    let (transform, bounds) = harness.session.rotation();
    assert!((transform.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    assert_eq!(bounds.size(), Size::new(800.0, 400.0));
}

#[test]
fn automatic_rotation_ignores_device_orientation() {
    let harness = Harness::presented(3, 0);
    assert!(!harness
        .session
        .set_device_orientation(Orientation::LandscapeLeft));
    assert!(harness.session.rotation().0.is_identity());
}

#[test]
fn thumbnails_fly_out_on_present() {
    let harness = Harness::with_origins(
        Items::new(3),
        1,
        GalleryConfig::default(),
        Rc::new(Thumbnails),
    );
    harness.session.present();
    harness.advance(FRAME_MS);
    let view = harness.session.current_item_view().expect("current page");
    assert!(view.clips_to_bounds);
    harness.pump();
    let view = harness.session.current_item_view().expect("current page");
    assert!(!view.clips_to_bounds);
    assert_eq!(view.frame, Rect::new(0.0, 250.0, 400.0, 300.0));
}

#[test]
fn videos_activate_the_scrubber_and_finish_into_the_next_page() {
    let items = Rc::new(Items {
        count: Cell::new(3),
        video_at: Some(0),
        removed: RefCell::new(Vec::new()),
        requested: RefCell::new(Vec::new()),
    });
    let config = GalleryConfig::default().with_video_autoplay(true);
    let harness = Harness::new(items, 0, config);
    harness.session.present();
    harness.pump();

    assert!(harness.session.is_video_playing());
    assert!(harness.session.decoration_alpha(DecorationGroup::Scrubber) > 0.99);
    assert!(!harness.session.video_did_finish(2));
    assert!(harness.session.video_did_finish(0));
    harness.pump();
    assert_eq!(harness.session.current_index(), 1);
    assert!(!harness.session.play_video());
    assert_eq!(harness.session.decoration_alpha(DecorationGroup::Scrubber), 0.0);
}

#[test]
fn carousel_sessions_page_past_the_end() {
    let config = GalleryConfig::default().with_paging_mode(PagingMode::Carousel);
    let harness = Harness::new(Items::new(3), 2, config);
    harness.session.present();
    harness.pump();
    assert_eq!(harness.session.materialized_indices(), vec![0, 1, 2]);
    harness.drag(Point::new(350.0, 400.0), Vector2::new(-300.0, 0.0), 10);
    harness.pump();
    assert_eq!(harness.session.current_index(), 0);
}
