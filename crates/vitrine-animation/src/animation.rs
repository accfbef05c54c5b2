//! Frame-driven animations with easing curves and spring physics.
//!
//! An [`Animatable`] interpolates from its current value to a target as the
//! [`FrameClock`] is drained. Every animation reports its end exactly once
//! through the callback handed to [`Animatable::animate_to`].

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_geometry::{AffineTransform, Point, Rect, Size, Vector2};

use crate::{FrameCallbackRegistration, FrameClock};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

impl Lerp for Vector2 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Vector2::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

impl Lerp for Size {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Size::new(
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

/// Interpolates center and size so a flight keeps its center on a straight
/// line even when the size changes.
impl Lerp for Rect {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Rect::from_center_size(
            self.center().lerp(&target.center(), fraction),
            self.size().lerp(&target.size(), fraction),
        )
    }
}

/// Rotation-only interpolation along the shorter arc.
impl Lerp for AffineTransform {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        use std::f32::consts::PI;
        let from = self.angle();
        let mut delta = target.angle() - from;
        if delta > PI {
            delta -= 2.0 * PI;
        } else if delta < -PI {
            delta += 2.0 * PI;
        }
        AffineTransform::rotation(from + delta * fraction)
    }
}

/// Easing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowIn,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let curve = match self {
            Easing::Linear => return fraction,
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
        };
        curve.y_for_x(fraction)
    }
}

/// Unit bezier from (0, 0) to (1, 1), in polynomial form per axis.
struct CubicBezier {
    x: [f32; 3],
    y: [f32; 3],
}

impl CubicBezier {
    const EPSILON: f32 = 1e-6;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Self::coefficients(x1, x2),
            y: Self::coefficients(y1, y2),
        }
    }

    fn coefficients(p1: f32, p2: f32) -> [f32; 3] {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        [1.0 - c - b, b, c]
    }

    fn eval([a, b, c]: [f32; 3], t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn derivative([a, b, c]: [f32; 3], t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    fn y_for_x(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::eval(self.y, self.solve_t(x))
    }

    /// Newton steps, falling back to bisection where the curve is flat.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let error = Self::eval(self.x, t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = Self::derivative(self.x, t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..24 {
            let error = Self::eval(self.x, t) - x;
            if error.abs() < Self::EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = (low + high) * 0.5;
        }
        t
    }
}

/// Upper bound for escape flings, so a barely-moving release still ends.
pub const MAX_ESCAPE_MILLIS: u64 = 2_000;

/// Time-based animation: duration, easing and an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Tween whose duration is given in seconds, as configuration stores it.
    pub fn from_seconds(seconds: f32, easing: Easing) -> Self {
        Self::tween(seconds_to_millis(seconds), easing)
    }

    /// Linear motion over `distance` that keeps moving at `velocity`
    /// (units per second), as a flung view continues after release.
    pub fn escape(distance: f32, velocity: f32) -> Self {
        let speed = velocity.abs();
        let duration_millis = if speed > f32::EPSILON && distance.is_finite() {
            ((distance.abs() / speed) * 1000.0).round() as u64
        } else {
            Self::default().duration_millis
        };
        Self::linear(duration_millis.clamp(1, MAX_ESCAPE_MILLIS))
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Velocity, in fractions of the travel per second, below which the
    /// spring may rest.
    pub velocity_threshold: f32,
    /// Distance, in fractions of the travel, below which the spring may rest.
    pub position_threshold: f32,
    /// Hard stop: the spring snaps to its target once this much time passed.
    pub duration_millis: Option<u64>,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
            duration_millis: None,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// A spring tuned to settle within `seconds`, ending exactly then.
    ///
    /// `damping_ratio` follows the usual convention (1.0 = no bounce).
    pub fn with_duration(seconds: f32, damping_ratio: f32) -> Self {
        let millis = seconds_to_millis(seconds).max(1);
        let period = millis as f32 / 1000.0;
        let angular = 2.0 * std::f32::consts::PI / period;
        Self {
            damping_ratio: damping_ratio.max(0.05),
            stiffness: angular * angular,
            duration_millis: Some(millis),
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

fn seconds_to_millis(seconds: f32) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The value reached its target.
    Finished,
    /// A newer `animate_to`, `snap_to` or `stop` took over.
    Interrupted,
}

type UpdateListener<T> = Rc<dyn Fn(&T)>;
type EndListener = Box<dyn FnOnce(AnimationEnd)>;

/// Integration step for springs, in seconds.
const SPRING_TIMESTEP: f32 = 0.004;

/// Generic animatable value holder.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    value: T,
    from: T,
    target: T,
    /// Progress from `from` to `target`; springs may overshoot past 1.0.
    fraction: f32,
    /// Spring velocity in fractions per second.
    velocity: f32,
    animation_type: AnimationType,
    started_at: Option<u64>,
    previous_frame: Option<u64>,
    running: bool,
    pending_frame: Option<FrameCallbackRegistration>,
    on_update: Option<UpdateListener<T>>,
    on_end: Option<EndListener>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            value: initial.clone(),
            from: initial.clone(),
            target: initial,
            fraction: 1.0,
            velocity: 0.0,
            animation_type: AnimationType::default(),
            started_at: None,
            previous_frame: None,
            running: false,
            pending_frame: None,
            on_update: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Called with every new value, including snaps.
    pub fn set_on_update(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_update = Some(Rc::new(listener));
    }

    pub fn value(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    /// Animates from the current value to `target`.
    ///
    /// A running animation is interrupted first and its end listener receives
    /// [`AnimationEnd::Interrupted`].
    pub fn animate_to(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_pending_frame();
            let interrupted = inner.on_end.take();
            inner.from = inner.value.clone();
            inner.target = target;
            inner.fraction = 0.0;
            inner.velocity = 0.0;
            inner.animation_type = animation;
            inner.started_at = None;
            inner.previous_frame = None;
            inner.running = true;
            inner.on_end = Some(Box::new(on_end));
            interrupted
        };
        if let Some(listener) = interrupted {
            listener(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jump to `target` without animating.
    pub fn snap_to(&self, target: T) {
        let (interrupted, update) = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_pending_frame();
            inner.value = target.clone();
            inner.from = target.clone();
            inner.target = target;
            inner.fraction = 1.0;
            inner.velocity = 0.0;
            inner.started_at = None;
            inner.previous_frame = None;
            inner.running = false;
            (inner.on_end.take(), inner.on_update.clone())
        };
        if let Some(update) = update {
            update(&self.value());
        }
        if let Some(listener) = interrupted {
            listener(AnimationEnd::Interrupted);
        }
    }

    /// Halt at the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_pending_frame();
            inner.running = false;
            inner.target = inner.value.clone();
            inner.from = inner.value.clone();
            inner.on_end.take()
        };
        if let Some(listener) = interrupted {
            listener(AnimationEnd::Interrupted);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.pending_frame.is_some() || !inner.running {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let pending_frame = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().pending_frame = Some(pending_frame);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (value, update, finished) = {
            let mut inner = this.borrow_mut();
            inner.pending_frame = None;
            if !inner.running {
                return;
            }
            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                AnimationType::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };
            inner.value = if finished {
                inner.target.clone()
            } else {
                inner.from.lerp(&inner.target, inner.fraction)
            };
            let finished = finished.then(|| {
                inner.running = false;
                inner.from = inner.target.clone();
                inner.fraction = 1.0;
                inner.velocity = 0.0;
                inner.on_end.take()
            });
            (inner.value.clone(), inner.on_update.clone(), finished)
        };

        if let Some(update) = update {
            update(&value);
        }
        match finished {
            Some(listener) => {
                if let Some(listener) = listener {
                    listener(AnimationEnd::Finished);
                }
            }
            None => Self::schedule_frame(this),
        }
    }
}

impl<T: Lerp + Clone + 'static> AnimatableInner<T> {
    fn cancel_pending_frame(&mut self) {
        if let Some(pending) = self.pending_frame.take() {
            pending.cancel();
        }
    }

    /// Advances a tween; returns true once it has reached the target.
    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.started_at.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis * 1_000_000;
        if elapsed_nanos < delay_nanos {
            self.fraction = 0.0;
            return false;
        }
        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear = ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        self.fraction = spec.easing.transform(linear);
        linear >= 1.0
    }

    /// Integrates a damped harmonic oscillator in fraction space from the
    /// previous frame to this one.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.started_at.get_or_insert(frame_time_nanos);
        let previous = self.previous_frame.replace(frame_time_nanos);
        let Some(previous) = previous else {
            return spec.duration_millis == Some(0);
        };
        let dt = frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0;

        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut integrated = 0.0f32;
        while integrated < dt {
            let step = SPRING_TIMESTEP.min(dt - integrated);
            let displacement = self.fraction - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.fraction = (self.fraction + self.velocity * step).clamp(-1.0, 2.0);
            integrated += step;
        }

        let elapsed_millis = frame_time_nanos.saturating_sub(start_time) / 1_000_000;
        if let Some(limit) = spec.duration_millis {
            if elapsed_millis >= limit {
                return true;
            }
        }
        self.velocity.abs() < spec.velocity_threshold
            && (self.fraction - 1.0).abs() < spec.position_threshold
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
