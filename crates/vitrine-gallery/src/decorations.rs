//! Chrome visibility: header, footer, buttons and the video scrubber.
//!
//! Two channels drive the alphas. Discrete toggles animate every group with
//! a spring; the continuous channel assigns alphas directly from swipe
//! progress. Continuous updates are refused while a toggle is in flight or
//! while the chrome is hidden.

use std::cell::Cell;
use std::rc::Rc;

use vitrine_animation::{
    Animatable, AnimationSpec, AnimationType, Easing, FrameClock, SpringSpec,
};

use crate::config::{DecorationVisibilityMode, GalleryConfig};
use crate::transition::Join;

const TOGGLE_DAMPING: f32 = 0.95;
const SCRUBBER_FADE_SECONDS: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationGroup {
    Header,
    Footer,
    CloseButton,
    ThumbnailsButton,
    DeleteButton,
    Scrubber,
}

impl DecorationGroup {
    pub const ALL: [DecorationGroup; 6] = [
        DecorationGroup::Header,
        DecorationGroup::Footer,
        DecorationGroup::CloseButton,
        DecorationGroup::ThumbnailsButton,
        DecorationGroup::DeleteButton,
        DecorationGroup::Scrubber,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationVisibility {
    pub hidden: bool,
    pub continuous_alpha: f32,
}

struct DecorationsInner {
    alphas: [Animatable<f32>; 6],
    hidden: Cell<bool>,
    toggle_in_flight: Cell<bool>,
    toggle_generation: Cell<u64>,
    closing: Cell<bool>,
    scrubber_active: Cell<bool>,
    header_mode: DecorationVisibilityMode,
    footer_mode: DecorationVisibilityMode,
    fade_seconds: f32,
    fade_acceleration: f32,
}

impl DecorationsInner {
    fn participates(&self, group: DecorationGroup) -> bool {
        match group {
            DecorationGroup::Header => self.header_mode == DecorationVisibilityMode::Visible,
            DecorationGroup::Footer => self.footer_mode == DecorationVisibilityMode::Visible,
            DecorationGroup::Scrubber => self.scrubber_active.get(),
            _ => true,
        }
    }

    fn animatable(&self, group: DecorationGroup) -> &Animatable<f32> {
        &self.alphas[group.slot()]
    }
}

#[derive(Clone)]
pub struct DecorationController {
    inner: Rc<DecorationsInner>,
}

impl DecorationController {
    /// Chrome starts fully transparent; presentation fades it in.
    pub fn new(config: &GalleryConfig, clock: FrameClock) -> Self {
        let alphas = DecorationGroup::ALL.map(|_| Animatable::new(0.0, clock.clone()));
        Self {
            inner: Rc::new(DecorationsInner {
                alphas,
                hidden: Cell::new(config.hide_decorations_on_launch),
                toggle_in_flight: Cell::new(false),
                toggle_generation: Cell::new(0),
                closing: Cell::new(false),
                scrubber_active: Cell::new(false),
                header_mode: config.header_visibility,
                footer_mode: config.footer_visibility,
                fade_seconds: config.decoration_fade_duration,
                fade_acceleration: config.dismiss_fade_acceleration,
            }),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.inner.hidden.get()
    }

    pub fn is_toggle_in_flight(&self) -> bool {
        self.inner.toggle_in_flight.get()
    }

    pub fn alpha(&self, group: DecorationGroup) -> f32 {
        self.inner.animatable(group).value()
    }

    pub fn visibility(&self, group: DecorationGroup) -> DecorationVisibility {
        DecorationVisibility {
            hidden: self.inner.hidden.get() || !self.inner.participates(group),
            continuous_alpha: self.alpha(group),
        }
    }

    /// Fades the chrome in for presentation unless it starts hidden.
    pub fn reveal_on_present(&self) {
        if !self.inner.hidden.get() {
            self.animate_visibility(true);
        }
    }

    /// Flips visibility with an animated spring.
    pub fn toggle(&self) {
        if self.inner.closing.get() {
            return;
        }
        let hidden = !self.inner.hidden.get();
        self.inner.hidden.set(hidden);
        log::debug!("decorations {}", if hidden { "hidden" } else { "shown" });
        self.animate_visibility(!hidden);
    }

    pub fn set_hidden(&self, hidden: bool) {
        if self.inner.hidden.get() != hidden {
            self.toggle();
        }
    }

    /// Applies live dismiss progress. Returns false when the update was
    /// refused.
    pub fn update_continuous(&self, progress: f32) -> bool {
        let inner = &self.inner;
        if inner.hidden.get() || inner.toggle_in_flight.get() || inner.closing.get() {
            return false;
        }
        let alpha = (1.0 - progress * inner.fade_acceleration).clamp(0.0, 1.0);
        for group in DecorationGroup::ALL {
            if inner.participates(group) {
                inner.animatable(group).snap_to(alpha);
            }
        }
        true
    }

    /// The scrubber only participates while a video is current.
    pub fn set_scrubber_active(&self, active: bool) {
        let inner = &self.inner;
        if inner.scrubber_active.replace(active) == active {
            return;
        }
        let visible = active && !inner.hidden.get() && !inner.closing.get();
        let target = if visible { 1.0 } else { 0.0 };
        inner.animatable(DecorationGroup::Scrubber).animate_to(
            target,
            AnimationType::Tween(AnimationSpec::from_seconds(
                SCRUBBER_FADE_SECONDS,
                Easing::EaseInOut,
            )),
            |_| {},
        );
    }

    /// Fades every group out ahead of a close, then runs `completion` once.
    pub fn close(&self, duration_seconds: f32, completion: impl FnOnce() + 'static) {
        let inner = &self.inner;
        inner.closing.set(true);
        inner.toggle_in_flight.set(false);
        inner
            .toggle_generation
            .set(inner.toggle_generation.get() + 1);
        let join = Join::new(DecorationGroup::ALL.len(), completion);
        for group in DecorationGroup::ALL {
            let join = join.clone();
            inner.animatable(group).animate_to(
                0.0,
                AnimationType::Tween(AnimationSpec::from_seconds(
                    duration_seconds,
                    Easing::EaseInOut,
                )),
                move |_| join.arrive(),
            );
        }
    }

    fn animate_visibility(&self, visible: bool) {
        let inner = &self.inner;
        let generation = inner.toggle_generation.get() + 1;
        inner.toggle_generation.set(generation);
        inner.toggle_in_flight.set(true);

        let weak = Rc::downgrade(inner);
        let join = Join::new(DecorationGroup::ALL.len(), move || {
            if let Some(inner) = weak.upgrade() {
                if inner.toggle_generation.get() == generation {
                    inner.toggle_in_flight.set(false);
                }
            }
        });
        let spring = AnimationType::Spring(SpringSpec::with_duration(
            inner.fade_seconds,
            TOGGLE_DAMPING,
        ));
        for group in DecorationGroup::ALL {
            let target = if visible && inner.participates(group) {
                1.0
            } else {
                0.0
            };
            let join = join.clone();
            inner
                .animatable(group)
                .animate_to(target, spring, move |_| join.arrive());
        }
    }
}

#[cfg(test)]
#[path = "tests/decorations_tests.rs"]
mod tests;
