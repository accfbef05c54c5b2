//! Dimming overlay and window level.
//!
//! While a session is on screen its window may be raised above the status
//! bar. The level is process-wide state shared by every open session: each
//! session holds an [`OverlayLease`], and the level drops back to normal when
//! the last lease is released.

use std::cell::Cell;

use vitrine_animation::{Animatable, AnimationSpec, AnimationType, Easing, FrameClock};

use crate::config::GalleryConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WindowLevel {
    #[default]
    Normal,
    AboveStatusBar,
}

thread_local! {
    /// Window level requested by the open sessions on this thread.
    static WINDOW_LEVEL: WindowLevelState = const { WindowLevelState::new() };
}

struct WindowLevelState {
    level: Cell<WindowLevel>,
    leases: Cell<usize>,
}

impl WindowLevelState {
    const fn new() -> Self {
        Self {
            level: Cell::new(WindowLevel::Normal),
            leases: Cell::new(0),
        }
    }
}

/// The level hosts should currently apply to the gallery window.
pub fn current_window_level() -> WindowLevel {
    WINDOW_LEVEL.with(|state| state.level.get())
}

/// Holds the window at a level for as long as it lives.
#[derive(Debug)]
pub struct OverlayLease {
    _private: (),
}

impl OverlayLease {
    pub fn acquire(level: WindowLevel) -> Self {
        WINDOW_LEVEL.with(|state| {
            state.leases.set(state.leases.get() + 1);
            if level == WindowLevel::AboveStatusBar {
                state.level.set(level);
            }
        });
        log::debug!("window level now {:?}", current_window_level());
        Self { _private: () }
    }
}

impl Drop for OverlayLease {
    fn drop(&mut self) {
        WINDOW_LEVEL.with(|state| {
            let remaining = state.leases.get().saturating_sub(1);
            state.leases.set(remaining);
            if remaining == 0 {
                state.level.set(WindowLevel::Normal);
            }
        });
    }
}

/// The backdrop behind the content. Its alpha follows presentation and
/// live dismiss progress.
#[derive(Clone)]
pub struct Overlay {
    alpha: Animatable<f32>,
    target_opacity: f32,
    present_seconds: f32,
    dismiss_seconds: f32,
}

impl Overlay {
    pub fn new(config: &GalleryConfig, clock: FrameClock) -> Self {
        Self {
            alpha: Animatable::new(0.0, clock),
            target_opacity: config.overlay_target_opacity.clamp(0.0, 1.0),
            present_seconds: config.overlay_present_duration,
            dismiss_seconds: config.overlay_dismiss_duration,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.value()
    }

    pub fn present(&self) {
        self.alpha.animate_to(
            self.target_opacity,
            AnimationType::Tween(AnimationSpec::from_seconds(
                self.present_seconds,
                Easing::Linear,
            )),
            |_| {},
        );
    }

    pub fn dismiss(&self) {
        self.alpha.animate_to(
            0.0,
            AnimationType::Tween(AnimationSpec::from_seconds(
                self.dismiss_seconds,
                Easing::Linear,
            )),
            |_| {},
        );
    }

    /// Tracks a live swipe. Ignored while presentation is still fading in.
    pub fn set_dismiss_progress(&self, progress: f32) {
        if self.alpha.is_running() && self.alpha.target() == self.target_opacity {
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        self.alpha.snap_to(self.target_opacity * (1.0 - progress));
    }

    pub fn remove(&self) {
        self.alpha.snap_to(0.0);
    }
}
