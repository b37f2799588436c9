mod game;
mod term;

use anyhow::Result;
use log::info;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut game = game::SnakeGame::new()?;

    // Restore the terminal whatever happens inside, then report.
    let res = game.initialize().and_then(|_| game.run());
    game.shutdown()?;

    if res.is_ok() {
        info!("bye");
    }
    res
}
