//! Two-pointer pinch recognition.

use smallvec::SmallVec;
use vitrine_geometry::Point;

use crate::{PointerEvent, PointerEventKind, PointerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchPhase {
    Began,
    Changed,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    pub phase: PinchPhase,
    /// Current pointer distance over the distance when the pinch began.
    pub scale: f32,
    /// Midpoint between the two pointers.
    pub focal_point: Point,
}

/// Tracks the first two pointers that go down.
#[derive(Default)]
pub struct PinchRecognizer {
    pointers: SmallVec<[(PointerId, Point); 2]>,
    initial_distance: f32,
}

impl PinchRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinching(&self) -> bool {
        self.pointers.len() == 2
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<PinchUpdate> {
        match event.kind {
            PointerEventKind::Down => {
                if self.pointers.len() >= 2 || self.position_of(event.id).is_some() {
                    return None;
                }
                self.pointers.push((event.id, event.position));
                if !self.is_pinching() {
                    return None;
                }
                self.initial_distance = self.distance();
                log::trace!("pinch began with span {:.1}", self.initial_distance);
                Some(self.update(PinchPhase::Began))
            }
            PointerEventKind::Move => {
                let slot = self.pointers.iter_mut().find(|(id, _)| *id == event.id)?;
                slot.1 = event.position;
                self.is_pinching().then(|| self.update(PinchPhase::Changed))
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.position_of(event.id)?;
                let was_pinching = self.is_pinching();
                let update = was_pinching.then(|| self.update(PinchPhase::Ended));
                self.pointers.retain(|(id, _)| *id != event.id);
                if was_pinching {
                    // The remaining pointer cannot start a new pinch on its own.
                    self.pointers.clear();
                }
                update
            }
        }
    }

    fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|(pointer, _)| *pointer == id)
            .map(|(_, position)| *position)
    }

    fn distance(&self) -> f32 {
        match self.pointers.as_slice() {
            [(_, a), (_, b)] => (*b - *a).length(),
            _ => 0.0,
        }
    }

    fn focal_point(&self) -> Point {
        match self.pointers.as_slice() {
            [(_, a), (_, b)] => Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5),
            [(_, a)] => *a,
            _ => Point::ZERO,
        }
    }

    fn update(&self, phase: PinchPhase) -> PinchUpdate {
        let scale = if self.initial_distance > f32::EPSILON {
            self.distance() / self.initial_distance
        } else {
            1.0
        };
        PinchUpdate {
            phase,
            scale,
            focal_point: self.focal_point(),
        }
    }
}
