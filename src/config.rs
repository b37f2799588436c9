use std::time::Duration;

use crate::geometry::{GeometryError, GridGeometry};

/// Side length of one cell, in field units. Every step moves the head by this much.
pub const CELL_SIZE: i32 = 10;

pub const TICK_INTERVAL_MS: u64 = 100;

pub const DEFAULT_FIELD_WIDTH: i32 = 300;
pub const DEFAULT_FIELD_HEIGHT: i32 = 200;

/// Fixed parameters of a game. Nothing here changes once an engine is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub cell_size: i32,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            cell_size: CELL_SIZE,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

impl GameConfig {
    /// A field spanning `columns` by `rows` cells of the default size.
    pub fn for_grid(columns: i32, rows: i32) -> Self {
        GameConfig {
            field_width: columns * CELL_SIZE,
            field_height: rows * CELL_SIZE,
            ..GameConfig::default()
        }
    }

    pub fn geometry(&self) -> Result<GridGeometry, GeometryError> {
        GridGeometry::new(self.field_width, self.field_height, self.cell_size)
    }
}
