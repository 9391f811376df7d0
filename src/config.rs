//! Session settings, fixed when a game is constructed.
use std::{str::FromStr, time::Duration};

use crate::error::{GameError, Result};
use crate::grid::Point;

/// How the upper edge of the play area is tested.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// A head at exactly `width` or `height` is still alive.
    Inclusive,
    /// Only `[0, width)` and `[0, height)` are inside.
    Strict,
}

/// Where new food may land.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodPolicy {
    /// Any cell, including ones under the snake.
    Anywhere,
    /// Only cells the snake does not cover.
    AvoidSnake,
}

impl FromStr for BoundaryPolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(BoundaryPolicy::Inclusive),
            "strict" => Ok(BoundaryPolicy::Strict),
            _ => Err(GameError::InvalidSetting { name: BOUNDARY_VAR, value: s.to_string() }),
        }
    }
}

impl FromStr for FoodPolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anywhere" => Ok(FoodPolicy::Anywhere),
            "avoid-snake" | "avoid" => Ok(FoodPolicy::AvoidSnake),
            _ => Err(GameError::InvalidSetting { name: FOOD_VAR, value: s.to_string() }),
        }
    }
}

/// Environment variable selecting the [`BoundaryPolicy`].
pub const BOUNDARY_VAR: &str = "SNAKE_BOUNDARY";
/// Environment variable selecting the [`FoodPolicy`].
pub const FOOD_VAR: &str = "SNAKE_FOOD";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub initial_length: usize,
    pub ticks_per_second: u32,
    pub boundary: BoundaryPolicy,
    pub food: FoodPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 640,
            height: 480,
            cell_size: 10,
            initial_length: 5,
            ticks_per_second: 20,
            boundary: BoundaryPolicy::Inclusive,
            food: FoodPolicy::Anywhere,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(GameError::InvalidCellSize(self.cell_size));
        }
        if self.initial_length == 0 {
            return Err(GameError::InvalidLength(self.initial_length));
        }
        // A head one cell past either far edge must still be representable.
        let fits = |dim: i32| dim as i64 + 2 * self.cell_size as i64 <= i32::MAX as i64;
        if self.width <= 0 || self.height <= 0
            || self.width % self.cell_size != 0 || self.height % self.cell_size != 0
            || !fits(self.width) || !fits(self.height) {
            return Err(GameError::InvalidGrid {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(GameError::InvalidTickRate(self.ticks_per_second));
        }

        let start = self.start_position();
        let room = ((self.width - start.x) / self.cell_size) as usize;
        if self.initial_length > room {
            return Err(GameError::BodyOutOfBounds);
        }

        Ok(())
    }

    /// Applies the policy settings found through `lookup`, usually the
    /// process environment. Unset keys keep their current value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BOUNDARY_VAR) {
            self.boundary = value.parse()?;
        }
        if let Some(value) = lookup(FOOD_VAR) {
            self.food = value.parse()?;
        }
        Ok(self)
    }

    /// Head position of a fresh snake: the grid centre, snapped to a cell.
    pub fn start_position(&self) -> Point {
        let snap = |v: i32| v / 2 / self.cell_size * self.cell_size;
        Point::new(snap(self.width), snap(self.height))
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ticks_per_second.max(1) as u64)
    }

    /// Whether `p` is still on the play area under the configured policy.
    pub fn contains(&self, p: Point) -> bool {
        let (max_x, max_y) = match self.boundary {
            BoundaryPolicy::Inclusive => (self.width, self.height),
            BoundaryPolicy::Strict => (self.width - self.cell_size, self.height - self.cell_size),
        };
        p.x >= 0 && p.x <= max_x && p.y >= 0 && p.y <= max_y
    }

    /// Shrinks the grid so one cell per character, plus a border on every
    /// side, fits a terminal of `cols` x `rows`.
    pub fn fit_to_terminal(mut self, cols: u16, rows: u16) -> Self {
        let cell_size = self.cell_size;
        let fit = |dim: i32, chars: u16| {
            let cells = (chars as i32 - 2).max(1);
            dim.min(cells.saturating_mul(cell_size))
        };
        self.width = fit(self.width, cols);
        self.height = fit(self.height, rows);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_position(), Point::new(320, 240));
        assert_eq!((config.columns(), config.rows()), (64, 48));
        assert_eq!(config.tick_period(), Duration::from_millis(50));
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let config = GameConfig { cell_size: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidCellSize(0))));
    }

    #[test]
    fn rejects_empty_snake() {
        let config = GameConfig { initial_length: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidLength(0))));
    }

    #[test]
    fn rejects_unaligned_grid() {
        let config = GameConfig { width: 645, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidGrid { .. })));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let config = GameConfig { ticks_per_second: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidTickRate(0))));
    }

    #[test]
    fn rejects_snake_longer_than_half_the_grid() {
        let config = GameConfig { initial_length: 33, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::BodyOutOfBounds)));

        let config = GameConfig { initial_length: 32, ..GameConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_grids_whose_edges_overflow() {
        let config = GameConfig {
            width: 1 << 30,
            height: 1 << 30,
            cell_size: 1 << 30,
            initial_length: 1,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidGrid { .. })));

        let config = GameConfig { width: i32::MAX, height: i32::MAX, cell_size: 1, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidGrid { .. })));
    }

    #[test]
    fn rejects_absurd_initial_length() {
        let config = GameConfig { initial_length: usize::MAX, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::BodyOutOfBounds)));
    }

    #[test]
    fn largest_representable_grid_is_accepted() {
        let cell_size = 1 << 28;
        let config = GameConfig {
            width: 4 * cell_size,
            height: 4 * cell_size,
            cell_size,
            initial_length: 2,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_pick_policies() {
        let config = GameConfig::default()
            .with_overrides(|key| match key {
                BOUNDARY_VAR => Some("strict".to_string()),
                FOOD_VAR => Some("Avoid-Snake".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.boundary, BoundaryPolicy::Strict);
        assert_eq!(config.food, FoodPolicy::AvoidSnake);

        let config = GameConfig::default().with_overrides(|_| None).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn overrides_reject_unknown_values() {
        let res = GameConfig::default().with_overrides(|key| {
            if key == FOOD_VAR { Some("everywhere".to_string()) } else { None }
        });
        assert!(matches!(res, Err(GameError::InvalidSetting { name: FOOD_VAR, .. })));
    }

    #[test]
    fn inclusive_boundary_accepts_the_far_edge() {
        let config = GameConfig::default();
        assert!(config.contains(Point::new(640, 480)));
        assert!(!config.contains(Point::new(650, 0)));
        assert!(!config.contains(Point::new(0, -10)));
    }

    #[test]
    fn strict_boundary_rejects_the_far_edge() {
        let config = GameConfig { boundary: BoundaryPolicy::Strict, ..GameConfig::default() };
        assert!(config.contains(Point::new(630, 470)));
        assert!(!config.contains(Point::new(640, 0)));
        assert!(!config.contains(Point::new(0, 480)));
    }

    #[test]
    fn fit_to_terminal_shrinks_only() {
        let config = GameConfig::default().fit_to_terminal(80, 24);
        assert_eq!((config.width, config.height), (640, 220));
        assert!(config.validate().is_ok());
    }
}
