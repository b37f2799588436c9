use std::{error::Error, fmt};

use rand::Rng;

/// A position on the field, in field units (multiples of the cell size once placed).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Non-positive sizes, or fewer than two cells along an axis.
    InvalidGeometry {
        field_width: i32,
        field_height: i32,
        cell_size: i32,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { field_width, field_height, cell_size } => write!(
                f,
                "invalid geometry: a {}x{} field with cell size {} needs at least 2 cells per axis",
                field_width, field_height, cell_size
            ),
        }
    }
}

impl Error for GeometryError {}

/// Maps the continuous field onto a grid of `cell_size` steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    field_width: i32,
    field_height: i32,
    cell_size: i32,
}

impl GridGeometry {
    pub fn new(field_width: i32, field_height: i32, cell_size: i32) -> Result<Self, GeometryError> {
        let invalid = GeometryError::InvalidGeometry { field_width, field_height, cell_size };

        if field_width <= 0 || field_height <= 0 || cell_size <= 0 {
            return Err(invalid);
        }

        if field_width / cell_size < 2 || field_height / cell_size < 2 {
            return Err(invalid);
        }

        Ok(GridGeometry { field_width, field_height, cell_size })
    }

    pub fn field_width(&self) -> i32 {
        self.field_width
    }

    pub fn field_height(&self) -> i32 {
        self.field_height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Whole cells along the horizontal axis.
    pub fn rows(&self) -> i32 {
        self.field_width / self.cell_size
    }

    /// Whole cells along the vertical axis.
    pub fn columns(&self) -> i32 {
        self.field_height / self.cell_size
    }

    /// A random cell strictly inside the field, never on row or column 0.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = rng.gen_range(1..self.rows()) * self.cell_size;
        let y = rng.gen_range(1..self.columns()) * self.cell_size;
        Point::new(x, y)
    }

    /// Edges are inclusive: a head sitting exactly on `field_width` is still in.
    pub fn contains(&self, point: Point) -> bool {
        (0..=self.field_width).contains(&point.x) && (0..=self.field_height).contains(&point.y)
    }
}

/// One-shot form of [`GridGeometry::random_cell`] that validates the field first.
pub fn random_cell<R: Rng + ?Sized>(
    rng: &mut R,
    field_width: i32,
    field_height: i32,
    cell_size: i32,
) -> Result<Point, GeometryError> {
    GridGeometry::new(field_width, field_height, cell_size).map(|geometry| geometry.random_cell(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rows_and_columns_round_down() {
        let geometry = GridGeometry::new(105, 99, 10).unwrap();
        assert_eq!(geometry.rows(), 10);
        assert_eq!(geometry.columns(), 9);
    }

    #[test]
    fn rejects_degenerate_fields() {
        assert!(GridGeometry::new(0, 100, 10).is_err());
        assert!(GridGeometry::new(100, -5, 10).is_err());
        assert!(GridGeometry::new(100, 100, 0).is_err());
        assert!(GridGeometry::new(19, 100, 10).is_err());
        assert!(GridGeometry::new(100, 10, 10).is_err());
    }

    #[test]
    fn two_cells_per_axis_is_enough() {
        let geometry = GridGeometry::new(20, 20, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            assert_eq!(geometry.random_cell(&mut rng), Point::new(10, 10));
        }
    }

    #[test]
    fn contains_includes_edges() {
        let geometry = GridGeometry::new(100, 50, 10).unwrap();
        assert!(geometry.contains(Point::new(0, 0)));
        assert!(geometry.contains(Point::new(100, 50)));
        assert!(!geometry.contains(Point::new(-10, 20)));
        assert!(!geometry.contains(Point::new(110, 20)));
        assert!(!geometry.contains(Point::new(20, -10)));
        assert!(!geometry.contains(Point::new(20, 60)));
    }

    #[test]
    fn error_message_names_the_field() {
        let err = random_cell(&mut StdRng::seed_from_u64(0), 15, 100, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid geometry: a 15x100 field with cell size 10 needs at least 2 cells per axis"
        );
    }
}
