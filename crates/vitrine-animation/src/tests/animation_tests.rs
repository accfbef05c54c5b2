use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(clock: &FrameClock, frame_time: &mut u64, frames: usize) {
    for _ in 0..frames {
        if !clock.has_frame_callbacks() {
            break;
        }
        *frame_time += FRAME_NANOS;
        clock.drain_frame_callbacks(*frame_time);
    }
}

#[test]
fn tween_interpolates_over_time_and_ends_at_target() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let samples = Rc::new(RefCell::new(Vec::new()));
    {
        let samples = samples.clone();
        animatable.set_on_update(move |value| samples.borrow_mut().push(*value));
    }
    let ended = Rc::new(Cell::new(None));
    {
        let ended = ended.clone();
        animatable.animate_to(
            1.0,
            AnimationType::Tween(AnimationSpec::linear(200)),
            move |end| ended.set(Some(end)),
        );
    }
    assert!(animatable.is_running());

    let mut frame_time = 0;
    pump(&clock, &mut frame_time, 64);

    let samples = samples.borrow();
    assert!(samples.iter().any(|v| *v > 0.0 && *v < 1.0));
    assert_eq!(*samples.last().expect("samples recorded"), 1.0);
    assert_eq!(ended.get(), Some(AnimationEnd::Finished));
    assert!(!animatable.is_running());
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn end_listener_fires_exactly_once() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let count = Rc::new(Cell::new(0));
    {
        let count = count.clone();
        animatable.animate_to(
            10.0,
            AnimationType::Tween(AnimationSpec::linear(50)),
            move |_| count.set(count.get() + 1),
        );
    }
    let mut frame_time = 0;
    pump(&clock, &mut frame_time, 64);
    clock.drain_frame_callbacks(frame_time + FRAME_NANOS);
    assert_eq!(count.get(), 1);
}

#[test]
fn retargeting_interrupts_previous_animation() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let first = Rc::new(Cell::new(None));
    let second = Rc::new(Cell::new(None));
    {
        let first = first.clone();
        animatable.animate_to(
            1.0,
            AnimationType::Tween(AnimationSpec::linear(300)),
            move |end| first.set(Some(end)),
        );
    }
    let mut frame_time = 0;
    pump(&clock, &mut frame_time, 3);
    {
        let second = second.clone();
        animatable.animate_to(
            -1.0,
            AnimationType::Tween(AnimationSpec::linear(100)),
            move |end| second.set(Some(end)),
        );
    }
    assert_eq!(first.get(), Some(AnimationEnd::Interrupted));
    pump(&clock, &mut frame_time, 64);
    assert_eq!(second.get(), Some(AnimationEnd::Finished));
    assert_eq!(animatable.value(), -1.0);
}

#[test]
fn snap_to_reports_value_and_interrupts() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let seen = Rc::new(Cell::new(0.0));
    {
        let seen = seen.clone();
        animatable.set_on_update(move |value| seen.set(*value));
    }
    let ended = Rc::new(Cell::new(None));
    {
        let ended = ended.clone();
        animatable.animate_to(
            1.0,
            AnimationType::default(),
            move |end| ended.set(Some(end)),
        );
    }
    animatable.snap_to(5.0);
    assert_eq!(seen.get(), 5.0);
    assert_eq!(ended.get(), Some(AnimationEnd::Interrupted));
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn spring_settles_on_target() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let ended = Rc::new(Cell::new(None));
    {
        let ended = ended.clone();
        animatable.animate_to(
            100.0,
            AnimationType::Spring(SpringSpec::default()),
            move |end| ended.set(Some(end)),
        );
    }
    let mut frame_time = 0;
    pump(&clock, &mut frame_time, 600);
    assert_eq!(ended.get(), Some(AnimationEnd::Finished));
    assert_eq!(animatable.value(), 100.0);
}

#[test]
fn duration_bounded_spring_ends_on_time() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let ended = Rc::new(Cell::new(false));
    {
        let ended = ended.clone();
        animatable.animate_to(
            1.0,
            AnimationType::Spring(SpringSpec::with_duration(0.25, 0.3)),
            move |_| ended.set(true),
        );
    }
    let mut frame_time = 0;
    // 0.25 s is 15 frames at 60 Hz; one extra frame primes the integrator.
    pump(&clock, &mut frame_time, 17);
    assert!(ended.get());
    assert_eq!(animatable.value(), 1.0);
}

#[test]
fn rect_lerp_moves_center_linearly() {
    let from = Rect::new(0.0, 0.0, 10.0, 10.0);
    let to = Rect::new(100.0, 100.0, 30.0, 30.0);
    let mid = from.lerp(&to, 0.5);
    assert_eq!(mid.center(), Point::new(60.0, 60.0));
    assert_eq!(mid.size(), Size::new(20.0, 20.0));
}

#[test]
fn escape_duration_follows_distance_over_velocity() {
    let spec = AnimationSpec::escape(300.0, 600.0);
    assert_eq!(spec.duration_millis, 500);
    assert_eq!(spec.easing, Easing::Linear);

    let spec = AnimationSpec::escape(300.0, -1500.0);
    assert_eq!(spec.duration_millis, 200);

    let spec = AnimationSpec::escape(300.0, 0.0);
    assert_eq!(spec.duration_millis, AnimationSpec::default().duration_millis);

    let spec = AnimationSpec::escape(1.0e9, 1.0);
    assert_eq!(spec.duration_millis, MAX_ESCAPE_MILLIS);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
    ] {
        assert!(easing.transform(0.0).abs() < 0.01, "{:?}", easing);
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "{:?}", easing);
    }
}

#[test]
fn spring_with_duration_keeps_damping() {
    let spec = SpringSpec::with_duration(0.55, 0.95);
    assert_eq!(spec.damping_ratio, 0.95);
    assert_eq!(spec.duration_millis, Some(550));
    assert!(spec.stiffness > 0.0);
}
