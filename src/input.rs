use crate::geometry::Point;
use crate::snake::Direction;

/// Picks the dominant axis of a drag from `start` to `end`.
///
/// Vertical wins only when strictly longer than horizontal, and vice versa.
/// Exact diagonals and taps are ambiguous and give `None`, so the snake keeps
/// whatever direction it had.
pub fn swipe_direction(start: Point, end: Point) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dy.abs() > dx.abs() {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    } else if dy.abs() < dx.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        None
    }
}

/// Remembers where a drag began until it is released.
#[derive(Default, Debug)]
pub struct Gesture {
    start: Option<Point>,
}

impl Gesture {
    pub fn new() -> Self {
        Gesture::default()
    }

    /// Only the first press of a drag counts; repeats are ignored until release.
    pub fn press(&mut self, at: Point) {
        if self.start.is_none() {
            self.start = Some(at);
        }
    }

    pub fn release(&mut self, at: Point) -> Option<Direction> {
        self.start.take().and_then(|start| swipe_direction(start, at))
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }
}
