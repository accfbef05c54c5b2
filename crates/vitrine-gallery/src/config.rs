//! Gallery configuration.
//!
//! [`GalleryConfig`] is a plain struct with defaults tuned for phones. Hosts
//! either chain `with_*` builders or fold a list of [`GalleryOption`] values
//! into it, whichever reads better at the call site.

use std::ops::BitOr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PagingMode {
    /// Paging stops at the first and last item.
    #[default]
    Standard,
    /// Paging wraps around from the last item to the first and back.
    Carousel,
}

/// Axes along which swipe-to-dismiss is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwipeToDismissMode(u8);

impl SwipeToDismissMode {
    pub const NEVER: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1 << 0);
    pub const VERTICAL: Self = Self(1 << 1);
    pub const ALWAYS: Self = Self(Self::HORIZONTAL.0 | Self::VERTICAL.0);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_never(self) -> bool {
        self.0 == 0
    }
}

impl Default for SwipeToDismissMode {
    fn default() -> Self {
        Self::ALWAYS
    }
}

impl BitOr for SwipeToDismissMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether a header or footer is shown at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecorationVisibilityMode {
    #[default]
    Visible,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// The host rotates its whole interface; the gallery only relayouts.
    #[default]
    Automatic,
    /// The host is locked to portrait and the gallery counter-rotates itself.
    AlwaysPortrait,
}

/// Durations are in seconds, velocities in points per second.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub swipe_threshold_velocity: f32,
    pub displacement_duration: f32,
    pub reverse_displacement_duration: f32,
    /// Damping ratio of the displacement springs; 1.0 means no bounce.
    pub spring_bounce: f32,
    pub paging_mode: PagingMode,
    pub paging_duration: f32,
    pub swipe_to_dismiss_mode: SwipeToDismissMode,
    pub keep_original_in_place: bool,
    pub inset_margin: f32,
    pub item_fade_duration: f32,
    pub double_tap_zoom_duration: f32,
    pub maximum_zoom_scale: f32,
    pub decoration_fade_duration: f32,
    /// How much faster than the content the chrome fades during a swipe.
    pub dismiss_fade_acceleration: f32,
    pub hide_decorations_on_launch: bool,
    pub toggle_decorations_on_single_tap: bool,
    pub header_visibility: DecorationVisibilityMode,
    pub footer_visibility: DecorationVisibilityMode,
    pub rotation_mode: RotationMode,
    pub rotation_duration: f32,
    pub overlay_target_opacity: f32,
    pub overlay_present_duration: f32,
    pub overlay_dismiss_duration: f32,
    pub status_bar_hidden: bool,
    pub video_autoplay: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_velocity: 500.0,
            displacement_duration: 0.55,
            reverse_displacement_duration: 0.25,
            spring_bounce: 0.95,
            paging_mode: PagingMode::Standard,
            paging_duration: 0.3,
            swipe_to_dismiss_mode: SwipeToDismissMode::ALWAYS,
            keep_original_in_place: false,
            inset_margin: 50.0,
            item_fade_duration: 0.3,
            double_tap_zoom_duration: 0.15,
            maximum_zoom_scale: 8.0,
            decoration_fade_duration: 0.15,
            dismiss_fade_acceleration: 6.0,
            hide_decorations_on_launch: false,
            toggle_decorations_on_single_tap: true,
            header_visibility: DecorationVisibilityMode::Visible,
            footer_visibility: DecorationVisibilityMode::Visible,
            rotation_mode: RotationMode::Automatic,
            rotation_duration: 0.15,
            overlay_target_opacity: 1.0,
            overlay_present_duration: 0.25,
            overlay_dismiss_duration: 0.45,
            status_bar_hidden: true,
            video_autoplay: false,
        }
    }
}

impl GalleryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `options` over the defaults; later options win.
    pub fn from_options(options: &[GalleryOption]) -> Self {
        let mut config = Self::default();
        for option in options {
            config.apply(*option);
        }
        config
    }

    pub fn apply(&mut self, option: GalleryOption) {
        match option {
            GalleryOption::SwipeThresholdVelocity(v) => self.swipe_threshold_velocity = v,
            GalleryOption::DisplacementDuration(d) => self.displacement_duration = d,
            GalleryOption::ReverseDisplacementDuration(d) => self.reverse_displacement_duration = d,
            GalleryOption::SpringBounce(b) => self.spring_bounce = b,
            GalleryOption::PagingMode(mode) => self.paging_mode = mode,
            GalleryOption::PagingDuration(d) => self.paging_duration = d,
            GalleryOption::SwipeToDismissMode(mode) => self.swipe_to_dismiss_mode = mode,
            GalleryOption::KeepOriginalInPlace(keep) => self.keep_original_in_place = keep,
            GalleryOption::InsetMargin(margin) => self.inset_margin = margin,
            GalleryOption::ItemFadeDuration(d) => self.item_fade_duration = d,
            GalleryOption::DoubleTapZoomDuration(d) => self.double_tap_zoom_duration = d,
            GalleryOption::MaximumZoomScale(scale) => self.maximum_zoom_scale = scale,
            GalleryOption::DecorationFadeDuration(d) => self.decoration_fade_duration = d,
            GalleryOption::DismissFadeAcceleration(f) => self.dismiss_fade_acceleration = f,
            GalleryOption::HideDecorationsOnLaunch(hide) => {
                self.hide_decorations_on_launch = hide
            }
            GalleryOption::ToggleDecorationsOnSingleTap(toggle) => {
                self.toggle_decorations_on_single_tap = toggle
            }
            GalleryOption::HeaderVisibility(mode) => self.header_visibility = mode,
            GalleryOption::FooterVisibility(mode) => self.footer_visibility = mode,
            GalleryOption::RotationMode(mode) => self.rotation_mode = mode,
            GalleryOption::RotationDuration(d) => self.rotation_duration = d,
            GalleryOption::OverlayTargetOpacity(o) => self.overlay_target_opacity = o,
            GalleryOption::OverlayPresentDuration(d) => self.overlay_present_duration = d,
            GalleryOption::OverlayDismissDuration(d) => self.overlay_dismiss_duration = d,
            GalleryOption::StatusBarHidden(hidden) => self.status_bar_hidden = hidden,
            GalleryOption::VideoAutoplay(autoplay) => self.video_autoplay = autoplay,
        }
    }

    pub fn with_swipe_threshold_velocity(mut self, velocity: f32) -> Self {
        self.swipe_threshold_velocity = velocity;
        self
    }

    pub fn with_displacement_duration(mut self, seconds: f32) -> Self {
        self.displacement_duration = seconds;
        self
    }

    pub fn with_reverse_displacement_duration(mut self, seconds: f32) -> Self {
        self.reverse_displacement_duration = seconds;
        self
    }

    pub fn with_spring_bounce(mut self, bounce: f32) -> Self {
        self.spring_bounce = bounce.clamp(0.0, 1.0);
        self
    }

    pub fn with_paging_mode(mut self, mode: PagingMode) -> Self {
        self.paging_mode = mode;
        self
    }

    pub fn with_swipe_to_dismiss_mode(mut self, mode: SwipeToDismissMode) -> Self {
        self.swipe_to_dismiss_mode = mode;
        self
    }

    pub fn with_keep_original_in_place(mut self, keep: bool) -> Self {
        self.keep_original_in_place = keep;
        self
    }

    pub fn with_inset_margin(mut self, margin: f32) -> Self {
        self.inset_margin = margin;
        self
    }

    pub fn with_item_fade_duration(mut self, seconds: f32) -> Self {
        self.item_fade_duration = seconds;
        self
    }

    pub fn with_maximum_zoom_scale(mut self, scale: f32) -> Self {
        self.maximum_zoom_scale = scale;
        self
    }

    pub fn with_hide_decorations_on_launch(mut self, hide: bool) -> Self {
        self.hide_decorations_on_launch = hide;
        self
    }

    pub fn with_header_visibility(mut self, mode: DecorationVisibilityMode) -> Self {
        self.header_visibility = mode;
        self
    }

    pub fn with_footer_visibility(mut self, mode: DecorationVisibilityMode) -> Self {
        self.footer_visibility = mode;
        self
    }

    pub fn with_rotation_mode(mut self, mode: RotationMode) -> Self {
        self.rotation_mode = mode;
        self
    }

    pub fn with_status_bar_hidden(mut self, hidden: bool) -> Self {
        self.status_bar_hidden = hidden;
        self
    }

    pub fn with_video_autoplay(mut self, autoplay: bool) -> Self {
        self.video_autoplay = autoplay;
        self
    }
}

/// One named configuration entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GalleryOption {
    SwipeThresholdVelocity(f32),
    DisplacementDuration(f32),
    ReverseDisplacementDuration(f32),
    SpringBounce(f32),
    PagingMode(PagingMode),
    PagingDuration(f32),
    SwipeToDismissMode(SwipeToDismissMode),
    KeepOriginalInPlace(bool),
    InsetMargin(f32),
    ItemFadeDuration(f32),
    DoubleTapZoomDuration(f32),
    MaximumZoomScale(f32),
    DecorationFadeDuration(f32),
    DismissFadeAcceleration(f32),
    HideDecorationsOnLaunch(bool),
    ToggleDecorationsOnSingleTap(bool),
    HeaderVisibility(DecorationVisibilityMode),
    FooterVisibility(DecorationVisibilityMode),
    RotationMode(RotationMode),
    RotationDuration(f32),
    OverlayTargetOpacity(f32),
    OverlayPresentDuration(f32),
    OverlayDismissDuration(f32),
    StatusBarHidden(bool),
    VideoAutoplay(bool),
}
