//! Video items: the base controller plus an embedded play button and
//! playback state.
//!
//! Decoding and rendering frames is the host's job; the engine only tracks
//! whether playback should run and how visible the play button is.

use std::cell::Cell;
use std::rc::Rc;

use vitrine_animation::{Animatable, AnimationSpec, AnimationType, Easing};

use crate::controller::{Completion, ItemBaseController, ItemController, ItemEnvironment};
use crate::item::GalleryItem;

const PLAY_BUTTON_SHOW_SECONDS: f32 = 0.15;
const PLAY_BUTTON_HIDE_SECONDS: f32 = 0.25;

struct PlaybackState {
    playing: Cell<bool>,
    autoplay_started: Cell<bool>,
    play_button_alpha: Animatable<f32>,
}

pub struct VideoItemController {
    base: ItemBaseController,
    playback: Rc<PlaybackState>,
    autoplay: bool,
}

impl VideoItemController {
    /// The controller a session opens on starts with its play button
    /// transparent; it fades in once presentation completes.
    pub fn new(
        index: usize,
        item: GalleryItem,
        environment: ItemEnvironment,
        is_initial: bool,
    ) -> Self {
        let autoplay = environment.config.video_autoplay;
        let clock = environment.clock.clone();
        let initial_alpha = if is_initial { 0.0 } else { 1.0 };
        Self {
            base: ItemBaseController::new(index, item, environment),
            playback: Rc::new(PlaybackState {
                playing: Cell::new(false),
                autoplay_started: Cell::new(false),
                play_button_alpha: Animatable::new(initial_alpha, clock),
            }),
            autoplay,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.playing.get()
    }

    pub fn play_button_alpha(&self) -> f32 {
        self.playback.play_button_alpha.value()
    }

    pub fn play(&self) {
        if self.playback.playing.replace(true) {
            return;
        }
        log::debug!("video {} playing", self.base.index());
        self.fade_play_button(0.0, PLAY_BUTTON_HIDE_SECONDS, Easing::Linear);
    }

    pub fn pause(&self) {
        if self.playback.playing.replace(false) {
            log::debug!("video {} paused", self.base.index());
        }
    }

    pub fn toggle_play_pause(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    fn fade_play_button(&self, target: f32, seconds: f32, easing: Easing) {
        self.playback.play_button_alpha.animate_to(
            target,
            AnimationType::Tween(AnimationSpec::from_seconds(seconds, easing)),
            |_| {},
        );
    }
}

impl ItemController for VideoItemController {
    fn base(&self) -> &ItemBaseController {
        &self.base
    }

    fn present_item(&self, alongside: Completion, completion: Completion) -> bool {
        let playback = Rc::downgrade(&self.playback);
        self.base.present_item(alongside, move || {
            if let Some(playback) = playback.upgrade() {
                if !playback.playing.get() {
                    playback.play_button_alpha.animate_to(
                        1.0,
                        AnimationType::Tween(AnimationSpec::from_seconds(
                            PLAY_BUTTON_SHOW_SECONDS,
                            Easing::Linear,
                        )),
                        |_| {},
                    );
                }
            }
            completion();
        })
    }

    fn close_decorations(&self, duration_seconds: f32) {
        self.fade_play_button(0.0, duration_seconds, Easing::EaseInOut);
    }

    fn did_appear(&self) {
        if !self.autoplay || self.playback.autoplay_started.replace(true) {
            return;
        }
        self.playback.play_button_alpha.snap_to(0.0);
        self.playback.playing.set(true);
    }

    fn did_disappear(&self) {
        self.pause();
    }

    fn as_video(&self) -> Option<&VideoItemController> {
        Some(self)
    }
}
