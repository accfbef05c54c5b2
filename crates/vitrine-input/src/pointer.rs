use vitrine_geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Event timestamp in milliseconds, from any monotonic origin.
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), time_ms)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }
}
