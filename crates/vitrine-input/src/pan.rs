//! Single-pointer pan recognition.

use vitrine_geometry::{Point, Vector2};

use crate::{
    PointerEvent, PointerEventKind, PointerId, VelocityTracker, DRAG_THRESHOLD,
    MAX_FLING_VELOCITY,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One step of a recognized pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanUpdate {
    pub phase: PanPhase,
    /// Offset from the press position.
    pub translation: Vector2,
    /// Pointer velocity in units per second.
    pub velocity: Vector2,
    pub location: Point,
}

/// Turns the primary pointer's stream into pan phases.
///
/// Movement below the touch slop produces nothing, so a short press can
/// still be recognized as a tap.
pub struct PanRecognizer {
    pointer: Option<PointerId>,
    start: Point,
    last: Point,
    slop: f32,
    slop_passed: bool,
    tracker: VelocityTracker,
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self::with_slop(DRAG_THRESHOLD)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self {
            pointer: None,
            start: Point::ZERO,
            last: Point::ZERO,
            slop,
            slop_passed: false,
            tracker: VelocityTracker::new(),
        }
    }

    /// True between `Began` and the matching `Ended`/`Cancelled`.
    pub fn is_panning(&self) -> bool {
        self.slop_passed
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<PanUpdate> {
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() {
                    return None;
                }
                self.pointer = Some(event.id);
                self.start = event.position;
                self.last = event.position;
                self.slop_passed = false;
                self.tracker.reset();
                self.tracker.add_position(event.time_ms, event.position);
                None
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.last = event.position;
                self.tracker.add_position(event.time_ms, event.position);
                let translation = event.position - self.start;
                if !self.slop_passed {
                    if translation.length() <= self.slop {
                        return None;
                    }
                    self.slop_passed = true;
                    log::trace!("pan began at {:?}", self.start);
                    return Some(self.update(PanPhase::Began));
                }
                Some(self.update(PanPhase::Changed))
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return None;
                }
                self.last = event.position;
                if event.kind == PointerEventKind::Up {
                    self.tracker.add_position(event.time_ms, event.position);
                }
                let was_panning = self.slop_passed;
                let phase = if event.kind == PointerEventKind::Up {
                    PanPhase::Ended
                } else {
                    PanPhase::Cancelled
                };
                let update = was_panning.then(|| self.update(phase));
                self.reset();
                update
            }
        }
    }

    /// Abandons the current pan; the next `Down` starts fresh.
    pub fn reset(&mut self) {
        self.pointer = None;
        self.slop_passed = false;
        self.tracker.reset();
    }

    fn update(&self, phase: PanPhase) -> PanUpdate {
        PanUpdate {
            phase,
            translation: self.last - self.start,
            velocity: self.tracker.calculate_velocity(MAX_FLING_VELOCITY),
            location: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_within_slop_is_not_a_pan() {
        let mut pan = PanRecognizer::new();
        assert_eq!(pan.on_pointer_event(&PointerEvent::down(100.0, 100.0, 0)), None);
        assert_eq!(pan.on_pointer_event(&PointerEvent::moved(103.0, 102.0, 10)), None);
        assert_eq!(pan.on_pointer_event(&PointerEvent::up(103.0, 102.0, 20)), None);
        assert!(!pan.is_panning());
    }

    #[test]
    fn pan_reports_translation_from_press_position() {
        let mut pan = PanRecognizer::new();
        pan.on_pointer_event(&PointerEvent::down(100.0, 100.0, 0));
        let began = pan
            .on_pointer_event(&PointerEvent::moved(100.0, 120.0, 10))
            .expect("pan begins past slop");
        assert_eq!(began.phase, PanPhase::Began);
        assert_eq!(began.translation, Vector2::new(0.0, 20.0));

        let changed = pan
            .on_pointer_event(&PointerEvent::moved(90.0, 140.0, 20))
            .expect("pan continues");
        assert_eq!(changed.phase, PanPhase::Changed);
        assert_eq!(changed.translation, Vector2::new(-10.0, 40.0));

        let ended = pan
            .on_pointer_event(&PointerEvent::up(90.0, 160.0, 30))
            .expect("pan ends");
        assert_eq!(ended.phase, PanPhase::Ended);
        assert!(ended.velocity.y > 0.0);
        assert!(!pan.is_panning());
    }

    #[test]
    fn cancel_ends_with_cancelled_phase() {
        let mut pan = PanRecognizer::new();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        pan.on_pointer_event(&PointerEvent::moved(30.0, 0.0, 10));
        let update = pan
            .on_pointer_event(&PointerEvent::cancel(30.0, 0.0, 20))
            .expect("cancel reported");
        assert_eq!(update.phase, PanPhase::Cancelled);
    }

    #[test]
    fn secondary_pointers_are_ignored() {
        let mut pan = PanRecognizer::new();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::down(50.0, 50.0, 5).with_id(1)),
            None
        );
        assert_eq!(
            pan.on_pointer_event(&PointerEvent::moved(200.0, 50.0, 10).with_id(1)),
            None
        );
        assert!(!pan.is_panning());
    }

    #[test]
    fn release_velocity_is_capped() {
        let mut pan = PanRecognizer::new();
        pan.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        pan.on_pointer_event(&PointerEvent::moved(0.0, 500.0, 1));
        let ended = pan
            .on_pointer_event(&PointerEvent::up(0.0, 1000.0, 2))
            .expect("pan ends");
        assert_eq!(ended.velocity.y, MAX_FLING_VELOCITY);
    }
}
