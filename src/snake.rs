use crate::geometry::Point;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Offset of one step in this direction. Screen convention: y grows downwards.
    pub fn offset(self, cell_size: i32) -> (i32, i32) {
        match self {
            Up => (0, -cell_size),
            Down => (0, cell_size),
            Left => (-cell_size, 0),
            Right => (cell_size, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

pub struct MoveResult {
    pub new_head: Point,
    pub old_head: Point,
    pub old_tail: Point,
}

/// Body segments from head (index 0) to tail. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Point>,
}

impl Snake {
    pub fn new(head: Point) -> Self {
        Snake { body: vec![head] }
    }

    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves the head one cell and drags every other segment into the spot
    /// the segment ahead of it just left.
    pub fn move_step(&mut self, direction: Direction, cell_size: i32) -> MoveResult {
        let old_head = self.head();
        let old_tail = self.body[self.body.len() - 1];
        let (dx, dy) = direction.offset(cell_size);
        let new_head = Point::new(old_head.x + dx, old_head.y + dy);

        self.body[0] = new_head;

        let mut prev = old_head;
        for segment in self.body.iter_mut().skip(1) {
            prev = std::mem::replace(segment, prev);
        }

        MoveResult { new_head, old_head, old_tail }
    }

    /// Appends a copy of the current head. The new segment only separates from
    /// the head once the rest of the body has followed it through.
    pub fn grow(&mut self) {
        let head = self.head();
        self.body.push(head);
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Point>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body }
    }
}
