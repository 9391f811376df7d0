//! The game controller: owns one session's snake, food and score and
//! advances them one tick at a time.
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{FoodPolicy, GameConfig};
use crate::error::Result;
use crate::food;
use crate::grid::Point;
use crate::snake::{Direction::{*, self}, EatOutcome::{*, self}, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Welcome,
    Playing,
    Over,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverCause {
    HitWall,
    BitItself,
    /// No free cell left for food; only possible with `FoodPolicy::AvoidSnake`.
    BoardFull,
}

/// Everything the renderer needs after a live tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub body: Vec<Point>,
    pub food: Point,
    pub score: u32,
    pub direction: Direction,
    pub ate: EatOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; nothing changed.
    Idle,
    Continue(Frame),
    Over { score: u32, cause: OverCause },
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Point,
    score: u32,
    direction: Direction,
    requested: Option<Direction>,
    last_outcome: EatOutcome,
    state: GameState,
    rng: R,
}

impl Game<StdRng> {
    pub fn from_entropy(config: GameConfig) -> Result<Self> {
        Game::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let snake = Snake::new(config.start_position(), config.initial_length, config.cell_size);
        let mut game = Game {
            config,
            snake,
            food: Point::new(0, 0),
            score: 0,
            direction: Left,
            requested: None,
            last_outcome: Failure,
            state: GameState::Welcome,
            rng,
        };

        if !game.relocate_food() {
            game.food = food::spawn(&mut game.rng, game.config.width, game.config.height, game.config.cell_size);
        }

        Ok(game)
    }

    pub fn start(&mut self) {
        if self.state == GameState::Welcome {
            info!("Session started on a {}x{} grid", self.config.columns(), self.config.rows());
            self.state = GameState::Playing;
        }
    }

    /// Buffers a direction for the next tick. Later calls replace earlier ones.
    pub fn steer(&mut self, direction: Direction) {
        self.requested = Some(direction);
    }

    pub fn tick(&mut self) -> Tick {
        if self.state != GameState::Playing {
            return Tick::Idle;
        }

        if self.last_outcome == Success {
            if !self.relocate_food() {
                return self.finish(OverCause::BoardFull);
            }
            self.last_outcome = Failure;
        }

        if let Some(dir) = self.requested.take() {
            if dir == self.direction.opposite() {
                debug!("Ignoring reversal from {:?} to {:?}", self.direction, dir);
            } else {
                self.direction = dir;
            }
        }

        let new_head = self.snake.head().step(self.direction, self.config.cell_size);
        let outcome = self.snake.step_and_eat(new_head, self.food);
        self.last_outcome = outcome;

        if outcome == Success {
            self.score += 1;
            debug!("Ate food at {:?}, score {}", new_head, self.score);
        }

        if !self.config.contains(new_head) {
            return self.finish(OverCause::HitWall);
        }
        if self.snake.bites_itself() {
            return self.finish(OverCause::BitItself);
        }

        Tick::Continue(self.frame(outcome))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn food(&self) -> Point {
        self.food
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot of the current board, e.g. for the first draw before any tick.
    pub fn frame(&self, ate: EatOutcome) -> Frame {
        Frame {
            body: self.snake.segments(),
            food: self.food,
            score: self.score,
            direction: self.direction,
            ate,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn relocate_food(&mut self) -> bool {
        let GameConfig { width, height, cell_size, .. } = self.config;

        let spot = match self.config.food {
            FoodPolicy::Anywhere => Some(food::spawn(&mut self.rng, width, height, cell_size)),
            FoodPolicy::AvoidSnake => {
                food::spawn_clear_of(&mut self.rng, width, height, cell_size, &self.snake.segments())
            }
        };

        match spot {
            Some(p) => {
                debug!("Food placed at {:?}", p);
                self.food = p;
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, cause: OverCause) -> Tick {
        info!("Game over ({:?}) with score {}", cause, self.score);
        self.state = GameState::Over;
        Tick::Over { score: self.score, cause }
    }
}

#[cfg(test)]
impl<R: Rng> Game<R> {
    fn place(&mut self, body: Vec<Point>, direction: Direction, food: Point) {
        self.snake = Snake::from_segments(body);
        self.direction = direction;
        self.food = food;
        self.state = GameState::Playing;
    }
}
