//! Single and double tap recognition.
//!
//! A single tap is held back until the double-tap window closes, so a double
//! tap never also produces a single tap. Hosts call [`TapRecognizer::poll`]
//! once per frame to release held single taps.

use vitrine_geometry::Point;

use crate::{
    PointerEvent, PointerEventKind, PointerId, DOUBLE_TAP_SLOP, DOUBLE_TAP_TIMEOUT_MS,
    DRAG_THRESHOLD, TAP_TIMEOUT_MS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    pub kind: TapKind,
    pub position: Point,
    pub time_ms: i64,
}

#[derive(Clone, Copy)]
struct Press {
    id: PointerId,
    position: Point,
    time_ms: i64,
    extra_pointer: bool,
}

#[derive(Default)]
pub struct TapRecognizer {
    press: Option<Press>,
    pending_single: Option<Tap>,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending_tap(&self) -> bool {
        self.pending_single.is_some()
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<Tap> {
        match event.kind {
            PointerEventKind::Down => {
                if let Some(press) = self.press.as_mut() {
                    press.extra_pointer = true;
                    return None;
                }
                self.press = Some(Press {
                    id: event.id,
                    position: event.position,
                    time_ms: event.time_ms,
                    extra_pointer: false,
                });
                self.poll(event.time_ms)
            }
            PointerEventKind::Move => {
                let press = self.press?;
                if press.id == event.id
                    && (event.position - press.position).length() > DRAG_THRESHOLD
                {
                    self.press = None;
                    self.pending_single = None;
                }
                None
            }
            PointerEventKind::Cancel => {
                if self.press.map(|press| press.id) == Some(event.id) {
                    self.press = None;
                }
                None
            }
            PointerEventKind::Up => {
                let press = self.press.filter(|press| press.id == event.id)?;
                self.press = None;
                if press.extra_pointer || event.time_ms - press.time_ms > TAP_TIMEOUT_MS {
                    self.pending_single = None;
                    return None;
                }
                let tap = Tap {
                    kind: TapKind::Single,
                    position: press.position,
                    time_ms: event.time_ms,
                };
                match self.pending_single.take() {
                    Some(first)
                        if tap.time_ms - first.time_ms <= DOUBLE_TAP_TIMEOUT_MS
                            && (tap.position - first.position).length() <= DOUBLE_TAP_SLOP =>
                    {
                        Some(Tap {
                            kind: TapKind::Double,
                            ..tap
                        })
                    }
                    stale => {
                        self.pending_single = Some(tap);
                        stale
                    }
                }
            }
        }
    }

    /// Releases a held single tap once no second tap can follow it.
    pub fn poll(&mut self, now_ms: i64) -> Option<Tap> {
        let pending = self.pending_single?;
        if now_ms - pending.time_ms > DOUBLE_TAP_TIMEOUT_MS {
            self.pending_single = None;
            return Some(pending);
        }
        None
    }

    pub fn reset(&mut self) {
        self.press = None;
        self.pending_single = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_at(recognizer: &mut TapRecognizer, x: f32, y: f32, time_ms: i64) -> Option<Tap> {
        recognizer.on_pointer_event(&PointerEvent::down(x, y, time_ms));
        recognizer.on_pointer_event(&PointerEvent::up(x, y, time_ms + 40))
    }

    #[test]
    fn single_tap_is_released_after_double_tap_window() {
        let mut taps = TapRecognizer::new();
        assert_eq!(tap_at(&mut taps, 10.0, 10.0, 0), None);
        assert!(taps.has_pending_tap());
        assert_eq!(taps.poll(200), None);

        let tap = taps.poll(400).expect("single tap released");
        assert_eq!(tap.kind, TapKind::Single);
        assert_eq!(tap.position, Point::new(10.0, 10.0));
        assert!(!taps.has_pending_tap());
    }

    #[test]
    fn two_quick_taps_form_a_double_tap() {
        let mut taps = TapRecognizer::new();
        tap_at(&mut taps, 10.0, 10.0, 0);
        let tap = tap_at(&mut taps, 14.0, 12.0, 150).expect("double tap");
        assert_eq!(tap.kind, TapKind::Double);
        assert_eq!(taps.poll(1_000), None);
    }

    #[test]
    fn distant_second_tap_flushes_the_first() {
        let mut taps = TapRecognizer::new();
        tap_at(&mut taps, 10.0, 10.0, 0);
        let tap = tap_at(&mut taps, 300.0, 300.0, 100).expect("first tap flushed");
        assert_eq!(tap.kind, TapKind::Single);
        assert_eq!(tap.position, Point::new(10.0, 10.0));
        assert!(taps.has_pending_tap());
    }

    #[test]
    fn drag_is_not_a_tap() {
        let mut taps = TapRecognizer::new();
        taps.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        taps.on_pointer_event(&PointerEvent::moved(40.0, 0.0, 10));
        assert_eq!(taps.on_pointer_event(&PointerEvent::up(40.0, 0.0, 20)), None);
        assert!(!taps.has_pending_tap());
    }

    #[test]
    fn long_press_is_not_a_tap() {
        let mut taps = TapRecognizer::new();
        taps.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        assert_eq!(
            taps.on_pointer_event(&PointerEvent::up(0.0, 0.0, TAP_TIMEOUT_MS + 1)),
            None
        );
        assert!(!taps.has_pending_tap());
    }
}
