#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cursendus_core::{CellCoord, Event, GameConfig, GameId, Logger, PlayerId, SpawnPositions};
use cursendus_system_command_parser::CommandParser;
use cursendus_world::{Collaborators, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Logger that keeps every line so tests can inspect what the engine reported.
#[derive(Clone, Debug, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.lines_at(Level::Error)
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines_at(Level::Info)
    }

    fn lines_at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .expect("logger lock poisoned")
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .expect("logger lock poisoned")
            .push((level, message.to_owned()));
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

pub fn first() -> PlayerId {
    PlayerId::new("first@example.com")
}

pub fn second() -> PlayerId {
    PlayerId::new("second@example.com")
}

pub fn seeded_config(width: u32, height: u32, first: CellCoord, second: CellCoord) -> GameConfig {
    GameConfig {
        width,
        height,
        positions: SpawnPositions { first, second },
        rng_seed: Some(7),
        ..GameConfig::default()
    }
}

pub fn collaborators(logger: &RecordingLogger) -> Collaborators {
    Collaborators::new(CommandParser::new()).with_logger(logger.clone())
}

pub fn start(config: &GameConfig) -> (Game, RecordingLogger) {
    let logger = RecordingLogger::default();
    let game = Game::new(
        GameId::new("g-1"),
        first(),
        second(),
        config,
        collaborators(&logger),
    )
    .expect("valid configuration");
    (game, logger)
}

/// Queues every line for the player and commits them, as the command route does.
pub fn submit(game: &mut Game, player: &PlayerId, lines: &[&str]) -> (bool, Vec<Event>) {
    for line in lines {
        assert!(game.command(player, line), "rejected command {line:?}");
    }
    let mut events = Vec::new();
    let resolved = game.commands_end(player, &mut events);
    (resolved, events)
}
