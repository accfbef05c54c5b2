//! Release velocity estimation for pans.
//!
//! Uses the impulse strategy: the kinetic energy imparted by consecutive
//! samples is accumulated and converted back into a velocity, which is less
//! sensitive to jitter in the final few samples than a plain slope.

use std::collections::VecDeque;

use smallvec::SmallVec;
use vitrine_geometry::{Point, Vector2};

const MAX_SAMPLES: usize = 20;

/// Only samples within this window before the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

type Window = SmallVec<[(f32, Point); MAX_SAMPLES]>;

/// Pointer velocity from timestamped positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(i64, Point)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back((time_ms, position));
    }

    /// Velocity in units per second with each axis clamped to
    /// `±max_velocity`. Zero with fewer than two recent samples.
    pub fn calculate_velocity(&self, max_velocity: f32) -> Vector2 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return Vector2::ZERO;
        }
        let window = self.recent_window();
        if window.len() < 2 {
            return Vector2::ZERO;
        }
        let clamp = |velocity: f32| {
            if velocity.is_finite() {
                velocity.clamp(-max_velocity, max_velocity)
            } else {
                0.0
            }
        };
        Vector2::new(
            clamp(impulse_per_ms(&window, |p| p.x) * 1000.0),
            clamp(impulse_per_ms(&window, |p| p.y) * 1000.0),
        )
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Samples still relevant to the newest one, oldest first, with times
    /// relative to the newest sample.
    fn recent_window(&self) -> Window {
        let mut window = Window::new();
        let Some(&(newest, _)) = self.samples.back() else {
            return window;
        };
        let mut later = newest;
        for &(time_ms, position) in self.samples.iter().rev() {
            if newest - time_ms > HORIZON_MS || later - time_ms > ASSUME_STOPPED_MS {
                break;
            }
            window.push(((time_ms - newest) as f32, position));
            later = time_ms;
        }
        window.reverse();
        window
    }
}

/// Impulse velocity along one axis, in units per millisecond.
fn impulse_per_ms(window: &Window, axis: impl Fn(Point) -> f32) -> f32 {
    let mut energy = 0.0f32;
    for (segment, pair) in window.windows(2).enumerate() {
        let (t0, p0) = pair[0];
        let (t1, p1) = pair[1];
        if t1 == t0 {
            continue;
        }
        let velocity = (axis(p1) - axis(p0)) / (t1 - t0);
        energy += (velocity - energy_to_velocity(energy)) * velocity.abs();
        if segment == 0 {
            energy *= 0.5;
        }
    }
    energy_to_velocity(energy)
}

/// Unit mass: E = v²/2, keeping the sign.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
