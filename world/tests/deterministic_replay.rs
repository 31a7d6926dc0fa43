mod support;

use cursendus_core::{CellCoord, Event, GameConfig, GameSnapshot, PlayerId};
use cursendus_world::{query, Game};

use support::{collaborators, first, second, seeded_config, start};

#[test]
fn deterministic_replay_produces_identical_games() {
    let first_run = replay(&scripted_turns());
    let second_run = replay(&scripted_turns());

    assert_eq!(first_run, second_run, "replay diverged between runs");
    assert_eq!(first_run.snapshot.turn, 7);
    assert!(first_run.snapshot.player2.health < 100);
}

#[test]
fn replay_ignores_wall_clock_between_commits() {
    let turns = scripted_turns();
    let interleaved = replay(&turns);

    let config = config();
    let (mut game, _) = start(&config);
    for turn in &turns {
        for line in &turn.second {
            assert!(game.command(&second(), line));
        }
        for line in &turn.first {
            assert!(game.command(&first(), line));
        }
        let mut events = Vec::new();
        let _ = game.commands_end(&second(), &mut events);
        let _ = game.commands_end(&first(), &mut events);
    }

    assert_eq!(query::snapshot(&game), interleaved.snapshot);
}

#[test]
fn saving_and_restoring_every_commit_matches_an_uninterrupted_game() {
    let turns = scripted_turns();
    let uninterrupted = replay(&turns);

    let config = config();
    let (mut game, logger) = start(&config);
    let mut events = Vec::new();
    for turn in &turns {
        for (player, lines) in [(first(), &turn.first), (second(), &turn.second)] {
            commit(&mut game, &player, lines, &mut events);
            let snapshot = query::snapshot(&game);
            game = Game::restore(snapshot, &config, collaborators(&logger))
                .expect("snapshot restores");
        }
    }

    assert_eq!(query::snapshot(&game), uninterrupted.snapshot);
    assert_eq!(events, uninterrupted.events);
}

#[test]
fn repeated_hits_across_restores_follow_one_damage_stream() {
    let config = seeded_config(2, 1, CellCoord::new(0, 0), CellCoord::new(1, 0));
    let (mut uninterrupted, _) = start(&config);
    let (mut restored, logger) = start(&config);

    for _ in 0..4 {
        let mut events = Vec::new();
        for game in [&mut uninterrupted, &mut restored] {
            commit(game, &first(), &["attack b1"], &mut events);
            commit(game, &second(), &["attack a1"], &mut events);
        }
        restored = Game::restore(query::snapshot(&restored), &config, collaborators(&logger))
            .expect("snapshot restores");

        assert_eq!(
            query::snapshot(&restored).player2.health,
            query::snapshot(&uninterrupted).player2.health
        );
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    snapshot: GameSnapshot,
    events: Vec<Event>,
}

struct ScriptedTurn {
    first: Vec<&'static str>,
    second: Vec<&'static str>,
}

fn config() -> GameConfig {
    seeded_config(6, 6, CellCoord::new(0, 0), CellCoord::new(5, 5))
}

fn replay(turns: &[ScriptedTurn]) -> ReplayOutcome {
    let config = config();
    let (mut game, _) = start(&config);
    let mut events = Vec::new();

    for turn in turns {
        commit(&mut game, &first(), &turn.first, &mut events);
        commit(&mut game, &second(), &turn.second, &mut events);
    }

    ReplayOutcome {
        snapshot: query::snapshot(&game),
        events,
    }
}

fn commit(
    game: &mut cursendus_world::Game,
    player: &PlayerId,
    lines: &[&str],
    events: &mut Vec<Event>,
) {
    for line in lines {
        assert!(game.command(player, line), "rejected command {line:?}");
    }
    let _ = game.commands_end(player, events);
}

fn scripted_turns() -> Vec<ScriptedTurn> {
    vec![
        ScriptedTurn {
            first: vec!["trace E"],
            second: vec!["move N"],
        },
        ScriptedTurn {
            first: vec!["trace E", "attack F5"],
            second: vec!["trace W"],
        },
        ScriptedTurn {
            first: vec!["move S"],
            second: vec!["move N", "attack a1"],
        },
        ScriptedTurn {
            first: vec!["attack E4", "trace S"],
            second: vec!["attack C2"],
        },
        ScriptedTurn {
            first: vec!["attack d4"],
            second: vec!["move W"],
        },
        ScriptedTurn {
            first: vec!["attack c4"],
            second: vec!["trace S"],
        },
    ]
}
