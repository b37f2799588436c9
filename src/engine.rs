//! The game state machine: one snake, one piece of food, Running until the
//! head leaves the field, then Over until [`GameEngine::reset`].

use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::GameConfig;
use crate::geometry::{GeometryError, GridGeometry, Point};
use crate::snake::{Direction, Snake};

/// Direction a fresh game starts with until the first swipe arrives.
pub const INITIAL_DIRECTION: Direction = Direction::Down;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Halted,
    Moved,
    /// The head landed on the food and the snake grew.
    Ate,
    /// The head was outside the field when the tick started. This is the last
    /// tick that moves anything.
    Crashed,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub body: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub is_over: bool,
    pub score: usize,
}

struct GameState {
    snake: Snake,
    food: Point,
    direction: Direction,
    is_over: bool,
}

impl GameState {
    fn fresh<R: Rng + ?Sized>(geometry: &GridGeometry, rng: &mut R) -> Self {
        let head = geometry.random_cell(rng);
        let food = geometry.random_cell(rng);

        GameState {
            snake: Snake::new(head),
            food,
            direction: INITIAL_DIRECTION,
            is_over: false,
        }
    }
}

pub struct GameEngine<R: Rng = StdRng> {
    geometry: GridGeometry,
    rng: R,
    state: GameState,
}

impl GameEngine<StdRng> {
    pub fn new(config: &GameConfig) -> Result<Self, GeometryError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Result<Self, GeometryError> {
        let geometry = config.geometry()?;
        let state = GameState::fresh(&geometry, &mut rng);

        debug!("new game: head at {}, food at {}", state.snake.head(), state.food);

        Ok(GameEngine { geometry, rng, state })
    }

    /// Queues a direction for the next tick. Reversing into the body is allowed.
    pub fn set_direction(&mut self, requested: Direction) {
        trace!("direction requested: {:?}", requested);
        self.state.direction = requested;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_over {
            return TickOutcome::Halted;
        }

        let state = &mut self.state;

        // Bounds are checked on the pre-move head. The crashing tick still moves.
        let crashed = !self.geometry.contains(state.snake.head());
        if crashed {
            info!(
                "game over: head left the field at {}, score {}",
                state.snake.head(),
                state.snake.len() - 1
            );
            state.is_over = true;
        }

        let step = state.snake.move_step(state.direction, self.geometry.cell_size());
        trace!("head {} -> {}", step.old_head, step.new_head);

        if step.new_head == state.food {
            state.snake.grow();
            state.food = self.geometry.random_cell(&mut self.rng);
            debug!("ate at {}, length {}, next food at {}", step.new_head, state.snake.len(), state.food);

            if !crashed {
                return TickOutcome::Ate;
            }
        }

        if crashed {
            TickOutcome::Crashed
        } else {
            TickOutcome::Moved
        }
    }

    /// Food eaten so far.
    pub fn score(&self) -> usize {
        self.state.snake.len() - 1
    }

    pub fn reset(&mut self) {
        self.state = GameState::fresh(&self.geometry, &mut self.rng);
        debug!("reset: head at {}, food at {}", self.state.snake.head(), self.state.food);
    }

    pub fn body(&self) -> &[Point] {
        self.state.snake.body()
    }

    pub fn head(&self) -> Point {
        self.state.snake.head()
    }

    pub fn food(&self) -> Point {
        self.state.food
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.body().to_vec(),
            food: self.food(),
            direction: self.direction(),
            is_over: self.is_over(),
            score: self.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn engine_100() -> GameEngine<StdRng> {
        let config = GameConfig { field_width: 100, field_height: 100, ..GameConfig::default() };
        GameEngine::with_rng(&config, StdRng::seed_from_u64(7)).unwrap()
    }

    fn place(engine: &mut GameEngine<StdRng>, body: Vec<Point>, food: Point, direction: Direction) {
        engine.state.snake = Snake::from_body(body);
        engine.state.food = food;
        engine.state.direction = direction;
    }

    #[test]
    fn eating_grows_and_respawns_food() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(50, 50)], p(50, 60), Down);

        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(engine.head(), p(50, 60));
        assert_eq!(engine.body(), &[p(50, 60), p(50, 60)]);
        assert_eq!(engine.score(), 1);

        let food = engine.food();
        assert!((10..=90).contains(&food.x) && food.x % 10 == 0, "food x {}", food.x);
        assert!((10..=90).contains(&food.y) && food.y % 10 == 0, "food y {}", food.y);
    }

    #[test]
    fn set_direction_applies_on_next_tick_only() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(50, 50)], p(10, 10), Down);

        engine.set_direction(Left);
        assert_eq!(engine.head(), p(50, 50));

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.head(), p(40, 50));
    }

    #[test]
    fn reversal_is_not_blocked() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(50, 50), p(50, 40)], p(10, 10), Down);

        engine.set_direction(Up);
        engine.tick();
        assert_eq!(engine.body(), &[p(50, 40), p(50, 50)]);
        assert!(!engine.is_over());
    }

    #[test]
    fn crosses_right_edge_then_stops() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(5, 50)], p(10, 10), Right);

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.head(), p(15, 50));

        let mut ticks = 1;
        while engine.tick() != TickOutcome::Crashed {
            ticks += 1;
            assert!(ticks < 20, "never crashed");
        }

        // Pre-move head was 105, the first x past the 100 edge.
        assert_eq!(ticks, 10);
        assert_eq!(engine.head(), p(115, 50));
        assert!(engine.is_over());
    }

    #[test]
    fn vertical_edges_end_the_game_too() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(50, 0)], p(10, 10), Up);

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.head(), p(50, -10));
        assert_eq!(engine.tick(), TickOutcome::Crashed);
        assert!(engine.is_over());

        let mut engine = engine_100();
        place(&mut engine, vec![p(50, 100)], p(10, 10), Down);
        engine.tick();
        assert_eq!(engine.tick(), TickOutcome::Crashed);
    }

    #[test]
    fn over_is_terminal() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(-10, 50), p(0, 50)], p(10, 10), Left);
        engine.tick();
        assert!(engine.is_over());

        let frozen = engine.snapshot();
        engine.set_direction(Right);
        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Halted);
        }

        let after = engine.snapshot();
        assert_eq!(after.body, frozen.body);
        assert_eq!(after.food, frozen.food);
        assert_eq!(after.score, frozen.score);
        assert!(after.is_over);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(20, 20), p(20, 30), p(20, 40)], p(70, 70), Up);

        let snap = engine.snapshot();
        assert_eq!(snap.body, vec![p(20, 20), p(20, 30), p(20, 40)]);
        assert_eq!(snap.food, p(70, 70));
        assert_eq!(snap.direction, Up);
        assert!(!snap.is_over);
        assert_eq!(snap.score, 2);
    }

    #[test]
    fn reset_starts_over() {
        let mut engine = engine_100();
        place(&mut engine, vec![p(90, 90), p(80, 90)], p(10, 10), Right);
        for _ in 0..3 {
            engine.tick();
        }
        assert!(engine.is_over());

        engine.reset();
        assert!(!engine.is_over());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.body().len(), 1);
        assert_eq!(engine.direction(), INITIAL_DIRECTION);
        assert!(engine.geometry().contains(engine.head()));
    }
}
