#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hot-seat command-line adapter for Cursendus.
//!
//! Games live in JSON snapshot files. Each invocation restores the game,
//! applies one request and writes the snapshot back.

mod config;
mod render;
mod snapshot_transfer;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cursendus_core::{Event, GameConfig, GameId, PlayerId, GAME_TITLE};
use cursendus_system_command_parser::CommandParser;
use cursendus_world::{query, Collaborators, Game};

/// Two-player turn-based grid duel.
#[derive(Parser, Debug)]
#[command(name = "cursendus")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new game and save it
    New {
        /// Identifier of the game
        #[arg(long)]
        id: String,

        /// Identity of the first player
        #[arg(long)]
        player1: String,

        /// Identity of the second player
        #[arg(long)]
        player2: String,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to save the game (default: <id>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Queue commands for a player and commit them
    Play {
        /// Saved game file
        #[arg(short, long)]
        game: PathBuf,

        /// Identity of the player issuing the commands
        #[arg(short, long)]
        player: String,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Commands such as "move N", "trace E" or "attack B4"; one per
        /// argument or one per line
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Print the board and player status
    Show {
        /// Saved game file
        #[arg(short, long)]
        game: PathBuf,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a single-line transfer code for a saved game
    Export {
        /// Saved game file
        #[arg(short, long)]
        game: PathBuf,
    },

    /// Save the game carried by a transfer code
    Import {
        /// Transfer code produced by `export`
        code: String,

        /// Where to save the game (default: <id>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Entry point for the Cursendus command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Commands::New {
            id,
            player1,
            player2,
            config,
            out,
        } => {
            let config = config::load(config.as_deref())?;
            let game = Game::new(
                GameId::new(id),
                PlayerId::new(player1),
                PlayerId::new(player2),
                &config,
                collaborators(),
            )
            .context("failed to create game")?;
            let path = out.unwrap_or_else(|| default_path(&game));
            store::save(&path, &query::snapshot(&game))?;
            print!("{}", render::board(&game));
            println!("saved to {}", path.display());
        }
        Commands::Play {
            game,
            player,
            config,
            commands,
        } => {
            let config = config::load(config.as_deref())?;
            let mut state = restore(&game, &config)?;
            let player = PlayerId::new(player);
            let events = play(&mut state, &player, &commands);
            for event in &events {
                if let Event::NewTurn { turn } = event {
                    println!("turn {turn} begins");
                }
            }
            store::save(&game, &query::snapshot(&state))?;
            print!("{}", render::board(&state));
        }
        Commands::Show { game, config } => {
            let config = config::load(config.as_deref())?;
            let state = restore(&game, &config)?;
            print!("{}", render::board(&state));
        }
        Commands::Export { game } => {
            let snapshot = store::load(&game)?;
            println!("{}", snapshot_transfer::encode(&snapshot)?);
        }
        Commands::Import { code, out, config } => {
            let snapshot = snapshot_transfer::decode(&code).context("invalid transfer code")?;
            let config = config::load(config.as_deref())?;
            let game = Game::restore(snapshot, &config, collaborators())
                .context("transfer code does not hold a playable game")?;
            let path = out.unwrap_or_else(|| default_path(&game));
            store::save(&path, &query::snapshot(&game))?;
            println!("imported {GAME_TITLE} game {} to {}", query::id(&game), path.display());
        }
    }

    Ok(())
}

/// Submits every non-blank line as a command, then commits once.
///
/// Rejected lines are reported by the engine's logger and do not stop the
/// remaining lines from being queued.
fn play(game: &mut Game, player: &PlayerId, commands: &[String]) -> Vec<Event> {
    let mut accepted = 0_usize;
    for line in commands
        .iter()
        .flat_map(|text| text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        if game.command(player, line) {
            accepted += 1;
        }
    }
    tracing::debug!(accepted, "commands submitted");

    let mut events = Vec::new();
    let _ = game.commands_end(player, &mut events);
    events
}

fn restore(path: &Path, config: &GameConfig) -> Result<Game> {
    let snapshot = store::load(path)?;
    Game::restore(snapshot, config, collaborators())
        .with_context(|| format!("game file {} cannot be restored", path.display()))
}

fn collaborators() -> Collaborators {
    Collaborators::new(CommandParser::new())
}

fn default_path(game: &Game) -> PathBuf {
    PathBuf::from(format!("{}.json", query::id(game)))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursendus_core::{CellCoord, NullLogger, PlayerSlot};

    fn game() -> Game {
        let config = GameConfig {
            rng_seed: Some(9),
            ..GameConfig::default()
        };
        Game::new(
            GameId::new("cli"),
            PlayerId::new("a"),
            PlayerId::new("b"),
            &config,
            Collaborators::new(CommandParser::new()).with_logger(NullLogger),
        )
        .expect("default configuration is valid")
    }

    #[test]
    fn multi_line_submission_queues_each_line_and_commits_once() {
        let mut game = game();

        let events = play(
            &mut game,
            &PlayerId::new("a"),
            &["move S\n\nattack m16".to_owned(), "bogus".to_owned()],
        );

        assert_eq!(events, vec![Event::Updated]);
        let player = query::player(&game, PlayerSlot::First);
        assert!(player.is_ready());
        assert_eq!(player.pending().len(), 2);
    }

    #[test]
    fn second_submission_resolves_the_turn() {
        let mut game = game();
        let _ = play(&mut game, &PlayerId::new("a"), &["move E".to_owned()]);

        let events = play(&mut game, &PlayerId::new("b"), &["move W".to_owned()]);

        assert!(events.contains(&Event::NewTurn { turn: 2 }));
        assert_eq!(
            query::player(&game, PlayerSlot::First).position(),
            CellCoord::new(1, 4)
        );
    }

    #[test]
    fn args_parse_play_commands() {
        let args = Args::try_parse_from([
            "cursendus", "play", "--game", "g.json", "--player", "a", "move N", "attack B4",
        ])
        .expect("arguments parse");

        match args.command {
            Commands::Play { commands, .. } => assert_eq!(commands, ["move N", "attack B4"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
