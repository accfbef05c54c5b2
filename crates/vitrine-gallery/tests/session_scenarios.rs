//! End-to-end gallery sessions driven through the robot harness.

use vitrine_gallery::{
    DecorationGroup, DismissReason, GalleryConfig, LoadState, PagingMode, SessionPhase,
    SwipeToDismissMode, WindowLevel,
};
use vitrine_geometry::{Point, Rect};
use vitrine_testing::prelude::*;
use vitrine_testing::robot_assertions::{
    assert_approx_eq, assert_non_decreasing, assert_rect_approx_eq, assert_unit_interval,
};

const CENTERED: Rect = Rect::new(0.0, 250.0, 400.0, 300.0);

fn robot(count: usize, start: usize) -> GalleryRobot {
    GalleryRobot::builder(FakeItems::images(count))
        .start_index(start)
        .build()
        .expect("valid gallery")
}

#[test]
fn go_to_far_page_hops_once_and_settles_once() {
    let mut robot = robot(5, 2);
    robot.present_and_settle();

    assert!(robot.session().go_to(4));
    robot.run_until_idle();

    assert_eq!(robot.session().current_index(), 4);
    assert_eq!(robot.observer().pages_shown(), vec![3, 4]);
    assert_eq!(robot.observer().settled(), vec![4]);
}

#[test]
fn go_to_rejects_out_of_range_and_current_indices() {
    let mut robot = robot(5, 2);
    robot.present_and_settle();

    assert!(!robot.session().go_to(2));
    assert!(!robot.session().go_to(5));
    assert!(!robot.session().go_to(usize::MAX));
    robot.run_until_idle();
    assert!(robot.observer().settled().is_empty());
    assert_eq!(robot.session().current_index(), 2);
}

#[test]
fn sequential_transitions_leave_the_session_idle() {
    let mut robot = robot(5, 0);
    assert!(!robot.session().is_animating());
    robot.present_and_settle();

    for target in 1..=3 {
        assert!(!robot.session().is_animating());
        assert!(robot.session().go_to(target));
        assert!(robot.session().is_animating());
        assert!(!robot.session().go_to(target + 1));
        robot.run_until_idle();
    }

    assert!(!robot.session().is_animating());
    assert_eq!(robot.observer().settled(), vec![1, 2, 3]);
    assert_eq!(robot.observer().count(SessionEvent::PresentationComplete), 1);
}

#[test]
fn pull_away_from_the_first_item_commits_above_the_threshold() {
    let mut robot = robot(3, 0);
    robot.present_and_settle();

    // 96 points in ten 16 ms frames: 600 points per second.
    robot.drag(Point::new(100.0, 400.0), Point::new(196.0, 400.0), 10);
    assert_eq!(robot.observer().count(SessionEvent::DismissCommitted), 1);
    robot.run_until_idle();

    assert_eq!(robot.session().phase(), SessionPhase::Closed);
    assert_eq!(
        robot
            .observer()
            .count(SessionEvent::DismissalComplete(DismissReason::SwipeToDismiss)),
        1
    );
    assert!(robot.observer().settled().is_empty());
}

#[test]
fn pull_away_from_the_first_item_cancels_below_the_threshold() {
    let mut robot = robot(3, 0);
    robot.present_and_settle();

    // 64 points in ten frames: 400 points per second.
    robot.drag(Point::new(100.0, 400.0), Point::new(164.0, 400.0), 10);
    let view = robot.session().current_item_view().expect("current page");
    assert!(view.frame.x > 0.0);
    robot.run_until_idle();

    assert_eq!(robot.session().phase(), SessionPhase::Presented);
    assert_eq!(robot.observer().count(SessionEvent::DismissCommitted), 0);
    assert_eq!(robot.observer().settled(), vec![0]);
    let view = robot.session().current_item_view().expect("current page");
    assert_rect_approx_eq(view.frame, CENTERED, 1e-3, "returned frame");
    assert_eq!(robot.session().current_index(), 0);
}

#[test]
fn horizontal_dismiss_can_be_disabled() {
    let mut robot = GalleryRobot::builder(FakeItems::images(3))
        .config(GalleryConfig::default().with_swipe_to_dismiss_mode(SwipeToDismissMode::VERTICAL))
        .build()
        .expect("valid gallery");
    robot.present_and_settle();

    robot.drag(Point::new(100.0, 400.0), Point::new(196.0, 400.0), 10);
    robot.run_until_idle();
    assert_eq!(robot.session().phase(), SessionPhase::Presented);
    assert_eq!(robot.observer().count(SessionEvent::DismissCommitted), 0);
    assert_eq!(robot.session().current_index(), 0);
}

#[test]
fn fling_progress_rises_monotonically_to_one() {
    let mut robot = robot(3, 1);
    robot.present_and_settle();

    robot.fling_vertically(-240.0);
    robot.run_until_idle();

    let progress = robot.observer().dismiss_progress();
    assert!(progress.len() > 3);
    assert_unit_interval(&progress, "dismiss progress");
    assert_non_decreasing(&progress, "dismiss progress");
    assert_approx_eq(*progress.last().unwrap(), 1.0, 1e-4, "final progress");
    assert_eq!(robot.session().overlay_alpha(), 0.0);
}

#[test]
fn presentation_without_an_origin_fades_and_completes_once() {
    let mut robot = robot(3, 1);
    assert!(robot.session().present());
    robot.advance_frames(1);
    let view = robot.session().current_item_view().expect("current page");
    assert_eq!(view.frame, CENTERED);
    assert!(view.alpha < 1.0);
    assert!(!view.clips_to_bounds);

    robot.run_until_idle();
    assert_eq!(robot.observer().count(SessionEvent::PresentationComplete), 1);
    assert_approx_eq(
        robot.session().current_item_view().expect("current page").alpha,
        1.0,
        1e-4,
        "faded in",
    );
}

#[test]
fn offscreen_origins_fall_back_to_a_fade() {
    let origins = FakeOrigins::new();
    origins.set_frame(1, Rect::new(-300.0, 100.0, 80.0, 80.0));
    let mut robot = GalleryRobot::builder(FakeItems::images(3))
        .origins(origins)
        .start_index(1)
        .build()
        .expect("valid gallery");
    robot.present_and_settle();

    assert_eq!(robot.origins().hide_calls(), 0);
    assert_eq!(robot.observer().count(SessionEvent::PresentationComplete), 1);
}

#[test]
fn flights_hide_the_thumbnail_until_they_land() {
    let mut robot = GalleryRobot::builder(FakeItems::images(3))
        .origins(FakeOrigins::strip(3))
        .start_index(1)
        .build()
        .expect("valid gallery");
    assert!(robot.session().present());
    robot.advance_frames(2);
    assert!(robot.origins().is_hidden(1));
    robot.run_until_idle();
    assert!(!robot.origins().is_hidden(1));

    assert!(robot.session().close());
    robot.run_until_idle();
    assert_eq!(robot.session().phase(), SessionPhase::Closed);
    assert!(!robot.origins().is_hidden(1));
    assert_eq!(robot.origins().hide_calls(), 2);
}

#[test]
fn keeping_the_original_in_place_never_hides_it() {
    let mut robot = GalleryRobot::builder(FakeItems::images(3))
        .origins(FakeOrigins::strip(3))
        .config(GalleryConfig::default().with_keep_original_in_place(true))
        .build()
        .expect("valid gallery");
    robot.present_and_settle();
    assert_eq!(robot.origins().hide_calls(), 0);
}

#[test]
fn downward_fling_flies_back_to_the_thumbnail() {
    let mut robot = GalleryRobot::builder(FakeItems::images(3))
        .origins(FakeOrigins::strip(3))
        .start_index(2)
        .build()
        .expect("valid gallery");
    robot.present_and_settle();

    robot.fling_vertically(200.0);
    assert_eq!(robot.session().phase(), SessionPhase::Closing);
    robot.advance_frames(1);
    assert!(robot.origins().is_hidden(2));
    robot.run_until_idle();

    assert_eq!(
        robot
            .observer()
            .count(SessionEvent::DismissalComplete(DismissReason::SwipeToDismiss)),
        1
    );
    assert!(!robot.origins().is_hidden(2));
    assert_eq!(robot.session().window_level(), WindowLevel::Normal);
}

#[test]
fn close_button_dismisses_after_the_chrome_fades() {
    let mut robot = robot(3, 0);
    robot.present_and_settle();
    assert!(robot.session().close_interactively());
    robot.advance_frames(2);
    assert!(robot.session().decoration_alpha(DecorationGroup::CloseButton) < 1.0);
    robot.run_until_idle();
    assert_eq!(
        robot.observer().events().last(),
        Some(&SessionEvent::DismissalComplete(DismissReason::CloseButton))
    );
}

#[test]
fn deleting_items_pages_then_closes_when_empty() {
    let mut robot = robot(2, 0);
    robot.present_and_settle();

    assert!(robot.session().delete_current());
    robot.run_until_idle();
    assert_eq!(robot.items().removed(), vec![0]);
    assert_eq!(robot.session().item_count(), 1);
    assert_eq!(robot.session().current_index(), 0);
    assert_eq!(robot.session().phase(), SessionPhase::Presented);

    assert!(robot.session().delete_current());
    robot.run_until_idle();
    assert_eq!(robot.session().phase(), SessionPhase::Closed);
    assert_eq!(
        robot
            .observer()
            .count(SessionEvent::DismissalComplete(DismissReason::Programmatic)),
        1
    );
}

#[test]
fn reload_refetches_materialized_items_only() {
    let mut robot = robot(6, 0);
    robot.present_and_settle();
    assert_eq!(robot.items().fetch_count(0), 1);

    assert!(robot.session().reload(0));
    assert_eq!(robot.items().fetch_count(0), 2);
    assert!(!robot.session().reload(4));
    assert!(!robot.session().reload(42));
    assert_eq!(robot.items().fetch_count(4), 0);
}

#[test]
fn failed_fetches_leave_the_item_loading_nothing() {
    let items = FakeItems::new(vec![FakeItem::image(), FakeItem::broken()]);
    let mut robot = GalleryRobot::builder(items)
        .build()
        .expect("valid gallery");
    robot.present_and_settle();

    let view = robot.session().item_view(1).expect("neighbour page");
    assert_eq!(view.load_state, LoadState::Failed);
    robot.swipe_left();
    robot.run_until_idle();
    assert_eq!(robot.session().current_index(), 1);
}

#[test]
fn pinch_zoom_takes_over_pans() {
    let mut robot = robot(3, 1);
    robot.present_and_settle();

    robot.pinch(Point::new(200.0, 400.0), 100.0, 250.0, 10);
    robot.run_until_idle();
    let zoomed = robot.session().current_item_view().expect("current page");
    assert!(zoomed.zoom_scale > 2.0);

    robot.swipe_left();
    robot.run_until_idle();
    assert_eq!(robot.session().current_index(), 1);
    assert!(robot.observer().settled().is_empty());

    robot.double_tap(Point::new(200.0, 400.0));
    robot.run_until_idle();
    let restored = robot.session().current_item_view().expect("current page");
    assert_approx_eq(restored.zoom_scale, 1.0, 1e-4, "zoom after double tap");
}

#[test]
fn single_tap_hides_and_restores_the_chrome() {
    let mut robot = robot(3, 0);
    robot.present_and_settle();

    robot.single_tap(Point::new(200.0, 400.0));
    robot.run_until_idle();
    assert_eq!(robot.session().decoration_alpha(DecorationGroup::Header), 0.0);

    robot.single_tap(Point::new(200.0, 400.0));
    robot.run_until_idle();
    assert_approx_eq(
        robot.session().decoration_alpha(DecorationGroup::Header),
        1.0,
        1e-4,
        "header restored",
    );
}

#[test]
fn carousel_wraps_and_never_dismisses_horizontally() {
    let mut robot = GalleryRobot::builder(FakeItems::images(4))
        .config(GalleryConfig::default().with_paging_mode(PagingMode::Carousel))
        .build()
        .expect("valid gallery");
    robot.present_and_settle();

    robot.swipe_right();
    robot.run_until_idle();
    assert_eq!(robot.session().current_index(), 3);
    assert_eq!(robot.session().phase(), SessionPhase::Presented);
}

#[test]
fn slow_drags_settle_back_on_the_same_page() {
    let mut robot = robot(3, 1);
    robot.present_and_settle();

    robot.drag_and_hold(Point::new(300.0, 400.0), Point::new(220.0, 400.0), 10);
    robot.run_until_idle();
    assert_eq!(robot.session().current_index(), 1);
    assert_eq!(robot.session().paging_offset(), (0.0, None));
}
