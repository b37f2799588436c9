use std::{cmp::max, thread::sleep, time::Duration};

use anyhow::Result;
use log::{debug, info};

use crate::{Coords, TermInt};
use crate::term::TermManager;

use swipe_snake::{Direction::{*, self}, GameConfig, GameEngine, Point, Snapshot, TickOutcome};
use swipe_snake::input::Gesture;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Whether the player wants another round after a game ends.
enum Flow {
    Again,
    Quit,
}

pub struct SnakeGame {
    paused: bool,
    term: TermManager,
    config: GameConfig,
    engine: GameEngine,
    gesture: Gesture,
    drawn: Vec<Coords>,
}

impl SnakeGame {
    /// Sizes the field to the terminal. One terminal cell per grid cell, inside
    /// a one-character border; the border itself is where a crashed head shows.
    pub fn new() -> Result<Self> {
        let term = TermManager::new()?;
        let (w, h) = term.get_terminal_size();
        let config = GameConfig::for_grid(w as i32 - 3, h as i32 - 3);
        let engine = GameEngine::new(&config)?;

        info!("field {}x{} ({}x{} terminal)", config.field_width, config.field_height, w, h);

        Ok(SnakeGame { paused: false, term, config, engine, gesture: Gesture::new(), drawn: vec![] })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        self.show_intro()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    /// Plays rounds until the player quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if let Flow::Quit = self.play()? {
                return Ok(());
            }
            self.engine.reset();
        }
    }

    fn show_intro(&mut self) -> Result<()> {
        let lines = &[
            "Swipe with the mouse, or use arrow keys / WASD",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        self.term.read_input_blocking()?;
        self.term.hide_message()?;
        Ok(())
    }

    fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.draw_borders()?;
        self.drawn.clear();
        self.paused = false;

        let ticks_per_step = max(self.config.tick_interval.as_millis() as u64 / POLL_INTERVAL_MS, 1);
        let mut ticks_until_step = ticks_per_step;

        self.draw(&self.engine.snapshot())?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for ev in self.term.read_input_queue()? {
                if is_ctrl_c(&ev) {
                    return Ok(Flow::Quit);
                }

                if let Some(dir) = self.direction_from(&ev) {
                    if !self.paused {
                        self.engine.set_direction(dir);
                    }
                } else if let Event::Key(KeyEvent { code: KeyCode::Esc, .. }) = ev {
                    self.toggle_pause()?;
                }
            }

            if self.paused { continue; }

            ticks_until_step -= 1;
            if ticks_until_step > 0 { continue; }
            ticks_until_step = ticks_per_step;

            let outcome = self.engine.tick();
            let snapshot = self.engine.snapshot();
            self.draw(&snapshot)?;

            if outcome == TickOutcome::Ate {
                debug!("score {}", snapshot.score);
            }

            if snapshot.is_over {
                return self.game_over(&snapshot);
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn direction_from(&mut self, ev: &Event) -> Option<Direction> {
        match ev {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('w') | KeyCode::Up => Some(Up),
                KeyCode::Char('a') | KeyCode::Left => Some(Left),
                KeyCode::Char('s') | KeyCode::Down => Some(Down),
                KeyCode::Char('d') | KeyCode::Right => Some(Right),
                _ => None,
            },
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let at = Point::new(*column as i32, *row as i32);
                match kind {
                    MouseEventKind::Down(_) => {
                        self.gesture.press(at);
                        None
                    }
                    MouseEventKind::Up(_) => self.gesture.release(at),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn game_over(&mut self, snapshot: &Snapshot) -> Result<Flow> {
        let dead: Vec<Coords> = snapshot.body.iter().filter_map(|p| self.to_screen(*p)).collect();
        for pos in dead {
            self.term.print_at(pos, DEAD_SNAKE_CHAR)?;
        }

        let score = format!("Your score: {}", snapshot.score);
        self.term.show_message(&[
            "Game Over",
            &*score,
            "",
            "Press any key to try again,",
            "or CTRL+C to quit."
        ])?;

        loop {
            let ev = self.term.read_input_blocking()?;
            if is_ctrl_c(&ev) {
                return Ok(Flow::Quit);
            }
            // Mouse movement alone should not restart
            if matches!(ev, Event::Key(_) | Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), .. })) {
                info!("new game requested");
                return Ok(Flow::Again);
            }
        }
    }

    /// Erases last frame's snake and draws this one. Food first so a head
    /// sitting on it stays visible.
    fn draw(&mut self, snapshot: &Snapshot) -> Result<()> {
        for pos in std::mem::take(&mut self.drawn) {
            self.term.print_at(pos, ' ')?;
        }

        if let Some(food) = self.to_screen(snapshot.food) {
            self.term.print_at(food, FOOD_CHAR)?;
        }

        for (i, point) in snapshot.body.iter().enumerate().rev() {
            if let Some(pos) = self.to_screen(*point) {
                let ch = if i == 0 {snapshot.direction.head_char()} else {SNAKE_BODY_CHAR};
                self.term.print_at(pos, ch)?;
                self.drawn.push(pos);
            }
        }

        self.term.flush()?;
        Ok(())
    }

    /// Terminal cell for a field point, or `None` once it has left the screen.
    fn to_screen(&self, point: Point) -> Option<Coords> {
        let cell = self.config.cell_size;
        let (w, h) = self.term.get_terminal_size();
        let col = point.x.div_euclid(cell) + 1;
        let row = point.y.div_euclid(cell) + 1;

        if (0..w as i32).contains(&col) && (0..h as i32).contains(&row) {
            Some((col as TermInt, row as TermInt))
        } else {
            None
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn is_ctrl_c(ev: &Event) -> bool {
    matches!(ev, Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. }))
}
