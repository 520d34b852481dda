use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Kind of a pointer event within one touch sequence.
///
/// `Down` starts a sequence and `Up`/`Cancel` end it. `PointerDown` and
/// `PointerUp` add or remove a secondary contact while the sequence is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    PointerDown,
    Move,
    PointerUp,
    Up,
    Cancel,
}

impl PointerEventKind {
    /// True for events that end the whole sequence.
    pub fn ends_sequence(self) -> bool {
        matches!(self, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// Pointer event with consumption tracking.
///
/// A pull controller consumes the events of a recognized pull so the content
/// underneath does not also scroll.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Shared via Rc<Cell> so consumption can be tracked across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::Down, Point::new(0.0, y))
    }

    pub fn moved(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::Move, Point::new(0.0, y))
    }

    pub fn pointer_down(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::PointerDown, Point::new(0.0, y))
    }

    pub fn pointer_up(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::PointerUp, Point::new(0.0, y))
    }

    pub fn up(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::Up, Point::new(0.0, y))
    }

    pub fn cancel(id: PointerId, y: f32) -> Self {
        Self::new(id, PointerEventKind::Cancel, Point::new(0.0, y))
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
