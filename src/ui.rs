//! Terminal front end: welcome screen, the fixed-rate tick loop and the
//! game over screen around a [`Game`].
use std::time::Instant;

use crate::{Coords, TermInt};
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{Frame, Game, GameState, OverCause, Tick};
use crate::grid::Point;
use crate::snake::{Direction::{*, self}, EatOutcome};
use crate::term::TermManager;

use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use crossterm::style::Color;
use log::debug;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::White;
const TEXT_COLOR: Color = Color::Red;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    Restart,
    Quit,
}

enum Flow {
    Restart,
    Quit,
}

pub struct SnakeApp {
    config: GameConfig,
    term: TermManager,
}

impl SnakeApp {
    pub fn new(config: GameConfig, term: TermManager) -> Self {
        SnakeApp { config, term }
    }

    /// Runs sessions until the player quits. The terminal is restored even
    /// when a session fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.sessions();
        self.term.restore()?;
        res
    }

    fn sessions(&mut self) -> Result<()> {
        loop {
            let mut game = Game::from_entropy(self.config.clone())?;
            match self.play(&mut game)? {
                Flow::Restart => debug!("Restarting with a fresh session"),
                Flow::Quit => return Ok(()),
            }
        }
    }

    fn play(&mut self, game: &mut Game) -> Result<Flow> {
        let mut shown = game.frame(EatOutcome::Failure);

        self.term.clear()?;
        self.draw_frame(&shown)?;
        self.term.show_message(&["Let's play a game", "", "Arrow keys or WASD to move", "Press Enter"], TEXT_COLOR)?;

        loop {
            match command_for(&self.term.read_key_blocking()?, game.state()) {
                Some(Command::Start) => break,
                Some(Command::Quit) => return Ok(Flow::Quit),
                _ => {}
            }
        }

        self.term.hide_message()?;
        game.start();

        let period = game.config().tick_period();
        loop {
            let deadline = Instant::now() + period;

            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                for key_ev in self.term.read_key_events_queue(remaining)? {
                    match command_for(&key_ev, game.state()) {
                        Some(Command::Quit) => return Ok(Flow::Quit),
                        Some(Command::Turn(dir)) => game.steer(dir),
                        _ => {}
                    }
                }
                if Instant::now() >= deadline { break; }
            }

            match game.tick() {
                Tick::Continue(frame) => {
                    self.erase_frame(&shown)?;
                    self.draw_frame(&frame)?;
                    shown = frame;
                },
                Tick::Over { score, cause } => {
                    debug!("Session ended at {:?} with {} segments and score {}", game.head(), game.snake_len(), game.score());
                    self.game_over(&shown, score, cause)?;
                    break;
                },
                Tick::Idle => {},
            }
        }

        loop {
            match command_for(&self.term.read_key_blocking()?, game.state()) {
                Some(Command::Restart) => return Ok(Flow::Restart),
                Some(Command::Quit) => return Ok(Flow::Quit),
                _ => {}
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_size(&self) -> Coords {
        ((self.config.columns() + 2) as TermInt, (self.config.rows() + 2) as TermInt)
    }

    fn erase_frame(&mut self, frame: &Frame) -> Result<()> {
        for &p in frame.body.iter().chain(Some(&frame.food)) {
            if let Some(pos) = self.screen_pos(p) {
                self.term.print_at(pos, (' ', Color::Reset))?;
            }
        }
        Ok(())
    }

    fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        // The head may sit on the far edge, so borders go first.
        let board = self.board_size();
        self.term.draw_borders(board)?;
        self.term.print_str_at((2, 0), &format!(" Score : {} ", frame.score), FOOD_COLOR)?;

        if let Some(pos) = self.screen_pos(frame.food) {
            self.term.print_at(pos, (FOOD_CHAR, FOOD_COLOR))?;
        }

        for (i, &p) in frame.body.iter().enumerate() {
            let ch = if i == 0 {frame.direction.head_char()} else {SNAKE_BODY_CHAR};
            if let Some(pos) = self.screen_pos(p) {
                self.term.print_at(pos, (ch, SNAKE_COLOR))?;
            }
        }

        self.term.flush()?;
        Ok(())
    }

    fn game_over(&mut self, last: &Frame, score: u32, cause: OverCause) -> Result<()> {
        let title = match cause {
            OverCause::BoardFull => "You won!",
            OverCause::HitWall | OverCause::BitItself => "YOU DIED!",
        };

        if cause != OverCause::BoardFull {
            for &p in &last.body {
                if let Some(pos) = self.screen_pos(p) {
                    self.term.print_at(pos, (DEAD_SNAKE_CHAR, TEXT_COLOR))?;
                }
            }
        }

        self.term.show_message(&[
            title,
            &*format!("Score : {}", score),
            "",
            "Press Enter to play again,",
            "or Esc to quit."
        ], TEXT_COLOR)?;
        Ok(())
    }

    /// Terminal cell for a grid point, one character per cell inside the border.
    fn screen_pos(&self, p: Point) -> Option<Coords> {
        let (col, row) = p.cell(self.config.cell_size);
        if col < 0 || row < 0 {
            return None;
        }
        Some(((col + 1) as TermInt, (row + 1) as TermInt))
    }
}

/// Translates a key press into a command valid for `state`.
pub fn command_for(ev: &KeyEvent, state: GameState) -> Option<Command> {
    if is_quit(ev) {
        return Some(Command::Quit);
    }

    match (state, ev.code) {
        (GameState::Welcome, KeyCode::Enter) => Some(Command::Start),
        (GameState::Over, KeyCode::Enter) => Some(Command::Restart),
        (GameState::Playing, code) => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            _ => None,
        },
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Esc, modifiers: _ })
        || matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
