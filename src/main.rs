mod config;
mod error;
mod food;
mod game;
mod grid;
mod snake;
mod term;
mod ui;

use std::{env, fs::File, process::exit};

use env_logger::{Env, Target};
use log::{error, LevelFilter};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    init_logging();

    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("snake: {}", err);
        exit(1);
    }
}

fn run() -> error::Result<()> {
    let term = term::TermManager::new()?;
    let (cols, rows) = term.get_terminal_size();

    let config = config::GameConfig::default()
        .with_overrides(|key| env::var(key).ok())?
        .fit_to_terminal(cols, rows);
    config.validate()?;

    ui::SnakeApp::new(config, term).run()
}

// The game owns the terminal, so logs only go to the file named by SNAKE_LOG.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    match env::var_os("SNAKE_LOG") {
        Some(path) => match File::create(&path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(err) => {
                eprintln!("snake: cannot open log file {:?}: {}", path, err);
                builder.filter_level(LevelFilter::Off);
            }
        },
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder.init();
}
