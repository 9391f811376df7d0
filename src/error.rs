use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, GameError>;

/// Reasons a session cannot be built or driven.
#[derive(Debug)]
pub enum GameError {
    InvalidCellSize(i32),
    InvalidLength(usize),
    InvalidGrid { width: i32, height: i32, cell_size: i32 },
    BodyOutOfBounds,
    InvalidTickRate(u32),
    InvalidSetting { name: &'static str, value: String },
    Terminal(crossterm::ErrorKind),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::InvalidCellSize(size) => write!(f, "cell size must be positive, got {}", size),
            GameError::InvalidLength(len) => write!(f, "initial snake length must be at least 1, got {}", len),
            GameError::InvalidGrid { width, height, cell_size } => write!(
                f,
                "grid {}x{} must be a positive multiple of cell size {} with room for one cell past each edge",
                width, height, cell_size
            ),
            GameError::BodyOutOfBounds => write!(f, "initial snake does not fit inside the grid"),
            GameError::InvalidTickRate(rate) => write!(f, "tick rate must be positive, got {}", rate),
            GameError::InvalidSetting { name, value } => write!(f, "unrecognised value {:?} for {}", value, name),
            GameError::Terminal(err) => write!(f, "terminal error: {}", err),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Terminal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<crossterm::ErrorKind> for GameError {
    fn from(err: crossterm::ErrorKind) -> Self {
        GameError::Terminal(err)
    }
}
