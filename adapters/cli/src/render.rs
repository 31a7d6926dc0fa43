use std::fmt::Write as _;

use cursendus_core::{PlayerSlot, COLUMN_LETTERS, GAME_TITLE};
use cursendus_world::{query, Cell, Game, Player};

const EMPTY: char = '.';

/// Draws the terrain with labelled columns and rows, followed by one status
/// line per player.
///
/// Players are drawn with their skin number; trail marks use `x` for the
/// first player and `o` for the second.
pub(crate) fn board(game: &Game) -> String {
    let terrain = query::terrain(game);
    let (width, height) = terrain.dimensions();
    let label_width = height.to_string().len();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{GAME_TITLE} game {}, turn {}",
        query::id(game),
        query::turn(game)
    );

    let _ = write!(out, "{:label_width$} ", "");
    for letter in COLUMN_LETTERS.chars().take(width as usize) {
        out.push(' ');
        out.push(letter);
    }
    out.push('\n');

    for (row, cells) in terrain.rows().enumerate() {
        let _ = write!(out, "{:>label_width$} ", row + 1);
        for cell in cells {
            out.push(' ');
            out.push(glyph(game, cell));
        }
        out.push('\n');
    }

    for slot in PlayerSlot::ALL {
        out.push_str(&status(slot, query::player(game, slot)));
        out.push('\n');
    }
    out
}

fn glyph(game: &Game, cell: &Cell) -> char {
    if let Some(slot) = cell.occupant() {
        let skin = query::player(game, slot).skin();
        return char::from_digit(u32::from(skin), 10).unwrap_or('?');
    }
    match cell.trail() {
        Some(PlayerSlot::First) => 'x',
        Some(PlayerSlot::Second) => 'o',
        None => EMPTY,
    }
}

fn status(slot: PlayerSlot, player: &Player) -> String {
    let state = if player.is_dead() {
        "dead"
    } else if player.is_ready() {
        "ready"
    } else if player.pending().is_empty() {
        "idle"
    } else {
        "queued"
    };
    format!(
        "{slot} [{}] at {}: {}/{} health, {state}",
        player.id(),
        player.position(),
        player.health(),
        player.max_health()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursendus_core::{
        CellCoord, Direction, GameConfig, GameId, NullLogger, PlayerId, SpawnPositions,
    };
    use cursendus_system_command_parser::CommandParser;
    use cursendus_world::Collaborators;

    fn small_game() -> Game {
        let config = GameConfig {
            width: 4,
            height: 3,
            positions: SpawnPositions {
                first: CellCoord::new(0, 0),
                second: CellCoord::new(3, 2),
            },
            rng_seed: Some(1),
            ..GameConfig::default()
        };
        Game::new(
            GameId::new("7"),
            PlayerId::new("a@example.com"),
            PlayerId::new("b@example.com"),
            &config,
            Collaborators::new(CommandParser::new()).with_logger(NullLogger),
        )
        .expect("valid configuration")
    }

    #[test]
    fn draws_players_trails_and_status() {
        let mut game = small_game();
        let mut events = Vec::new();
        assert!(game.trace_player(PlayerSlot::First, Direction::East, &mut events));
        assert!(game.command(&PlayerId::new("b@example.com"), "attack b1"));

        let expected = "\
Cursendus game 7, turn 1
   A B C D
1  x 1 . .
2  . . . .
3  . . . 2
player1 [a@example.com] at (1, 0): 100/100 health, idle
player2 [b@example.com] at (3, 2): 100/100 health, queued
";
        assert_eq!(board(&game), expected);
    }
}
