#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative turn engine for Cursendus.
//!
//! A [`Game`] seats two players on a [`Terrain`], collects their queued
//! actions through [`Game::command`], and resolves a turn once both players
//! have committed through [`Game::commands_end`]. Every operation runs to
//! completion before returning, so callers serialize access simply by owning
//! the game. Visible changes are reported as [`Event`] values appended to a
//! caller-provided buffer.

mod logging;
mod player;
mod terrain;

use cursendus_core::{
    Action, AttackTarget, CellCoord, DamageRange, Direction, Event, GameConfig, GameId,
    GameSnapshot, Interpreter, Logger, PlayerId, PlayerSlot, Step,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use logging::TracingLogger;
pub use player::Player;
pub use terrain::{Cell, Terrain, TerrainError};

const FIRST_TURN: u32 = 1;
const SKINS: [u8; 2] = [1, 2];

/// Reasons a game cannot be created or restored.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configured grid has no cells.
    #[error("terrain must hold at least one cell, got {width}x{height}")]
    EmptyTerrain {
        /// Configured number of columns.
        width: u32,
        /// Configured number of rows.
        height: u32,
    },
    /// The configured damage range has its bounds swapped.
    #[error("damage range {min}..={max} is inverted")]
    InvalidDamage {
        /// Configured lower bound.
        min: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// Players would start without health.
    #[error("maximum health must be positive")]
    InvalidMaxHealth,
    /// Both seats were given the same identity.
    #[error("player [{0}] cannot take both seats")]
    DuplicatePlayer(PlayerId),
    /// A player could not be placed on its cell.
    #[error("{slot} could not be placed on {cell}")]
    Placement {
        /// Seat of the player that could not be placed.
        slot: PlayerSlot,
        /// Cell the player was meant to occupy.
        cell: CellCoord,
    },
    /// A snapshot carried a turn counter below one.
    #[error("turn counter must be at least 1, got {0}")]
    InvalidTurn(u32),
    /// The terrain snapshot was malformed.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Services the engine consumes but does not implement.
#[derive(Debug)]
pub struct Collaborators {
    interpreter: Box<dyn Interpreter>,
    logger: Box<dyn Logger>,
}

impl Collaborators {
    /// Bundles the command interpreter with a [`TracingLogger`].
    #[must_use]
    pub fn new(interpreter: impl Interpreter + 'static) -> Self {
        Self {
            interpreter: Box::new(interpreter),
            logger: Box::new(TracingLogger),
        }
    }

    /// Replaces the logger.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }
}

/// Aggregate root of a two-player game.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    turn: u32,
    players: [Player; 2],
    terrain: Terrain,
    damage: DamageRange,
    seed: u64,
    rng: ChaCha8Rng,
    interpreter: Box<dyn Interpreter>,
    logger: Box<dyn Logger>,
}

impl Game {
    /// Starts a fresh game with both players on their configured spawn cells.
    ///
    /// Construction fails instead of handing out a game whose occupancy
    /// disagrees with its players. Failures are also reported to the logger.
    pub fn new(
        id: GameId,
        first: PlayerId,
        second: PlayerId,
        config: &GameConfig,
        collaborators: Collaborators,
    ) -> Result<Self, GameError> {
        let Collaborators {
            interpreter,
            logger,
        } = collaborators;

        let (players, terrain) = match spawn(first, second, config) {
            Ok(layout) => layout,
            Err(error) => {
                logger.error(&format!("Game {id}: players not added to the map: {error}"));
                return Err(error);
            }
        };

        logger.info(&format!(
            "Game {id} created for [{}] and [{}]",
            players[0].id(),
            players[1].id()
        ));

        let seed = config.rng_seed.unwrap_or_else(rand::random);
        Ok(Self {
            id,
            turn: FIRST_TURN,
            players,
            terrain,
            damage: config.damage,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            interpreter,
            logger,
        })
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// Grid size, skin, marks and the damage generator come from the
    /// snapshot; damage range and maximum health come from `config`, which
    /// also seeds the generator when the snapshot carries none. Occupancy is
    /// always rebuilt from the players' recorded positions, whatever the
    /// snapshot's grid says.
    pub fn restore(
        snapshot: GameSnapshot,
        config: &GameConfig,
        collaborators: Collaborators,
    ) -> Result<Self, GameError> {
        let Collaborators {
            interpreter,
            logger,
        } = collaborators;
        let id = snapshot.id.clone();
        let recorded = snapshot.rng;

        let (turn, players, terrain) = match reload(snapshot, config) {
            Ok(layout) => layout,
            Err(error) => {
                logger.error(&format!("Game {id}: snapshot rejected: {error}"));
                return Err(error);
            }
        };

        logger.info(&format!("Game {id} restored at turn {turn}"));

        let (seed, rng) = match recorded {
            Some(state) => {
                let mut rng = ChaCha8Rng::seed_from_u64(state.seed);
                rng.set_word_pos(state.word_pos);
                (state.seed, rng)
            }
            None => {
                let seed = config.rng_seed.unwrap_or_else(rand::random);
                (seed, ChaCha8Rng::seed_from_u64(seed))
            }
        };

        Ok(Self {
            id,
            turn,
            players,
            terrain,
            damage: config.damage,
            seed,
            rng,
            interpreter,
            logger,
        })
    }

    /// Moves the player one cell in the provided direction.
    ///
    /// Fails without touching any state when the destination is occupied or
    /// outside the terrain. Emits [`Event::Updated`] on success.
    pub fn move_player(
        &mut self,
        slot: PlayerSlot,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let moved = self.relocate(slot, direction);
        if moved {
            out_events.push(Event::Updated);
        }
        moved
    }

    /// Marks the player's current cell as trail, then moves the player.
    ///
    /// The mark is recorded whether or not the move succeeds, and exactly one
    /// [`Event::Updated`] is emitted either way. Returns whether the player
    /// moved.
    pub fn trace_player(
        &mut self,
        slot: PlayerSlot,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let origin = self.players[slot.index()].position();
        self.players[slot.index()].record_trail(origin);
        self.terrain.trace(slot, origin);

        let moved = self.relocate(slot, direction);
        out_events.push(Event::Updated);
        moved
    }

    /// Strikes the target cell, damaging the opponent if they stand there.
    ///
    /// Fails when the target does not resolve to a cell inside the terrain or
    /// when the opponent is not on it. Damage is drawn uniformly from the
    /// configured inclusive range and health saturates at zero.
    pub fn attack_player(
        &mut self,
        slot: PlayerSlot,
        target: AttackTarget,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(cell) = target.cell() else {
            return false;
        };
        match self.terrain.is_occupied(cell) {
            Ok(true) => {}
            Ok(false) | Err(_) => return false,
        }

        let opponent = slot.other();
        if self.terrain.occupant(cell) != Some(opponent) {
            return false;
        }

        let damage = self.rng.gen_range(self.damage.min()..=self.damage.max());
        let remaining = self.players[opponent.index()].take_damage(damage);
        self.logger.info(&format!(
            "[{}] hit [{}] for {damage}, {remaining} health left",
            self.players[slot.index()].id(),
            self.players[opponent.index()].id()
        ));

        out_events.push(Event::Updated);
        true
    }

    /// Queues one line of command text for the player.
    ///
    /// An action of the same kind replaces the queued one, and a trace always
    /// wins over a move. Readiness is left untouched.
    pub fn command(&mut self, player: &PlayerId, text: &str) -> bool {
        let Some(slot) = self.slot_of(player) else {
            self.logger
                .error(&format!("Command rejected: player [{player}] is not in this game"));
            return false;
        };

        let Some(action) = self.interpreter.parse(text) else {
            self.logger
                .error(&format!("Command rejected: \"{text}\" ({player}) is not a command"));
            return false;
        };

        self.logger
            .info(&format!("Command queued: \"{action}\" ({player})"));
        if let Some(dropped) = self.players[slot.index()].queue(action) {
            self.logger
                .info(&format!("Command dropped: \"{dropped}\" ({player})"));
        }
        true
    }

    /// Commits the player's queued actions.
    ///
    /// Fails when nothing is queued. Resolves the turn when the opponent has
    /// already committed and returns whether that happened.
    pub fn commands_end(&mut self, player: &PlayerId, out_events: &mut Vec<Event>) -> bool {
        let Some(slot) = self.slot_of(player) else {
            self.logger
                .error(&format!("Commit rejected: player [{player}] is not in this game"));
            return false;
        };

        if self.players[slot.index()].pending().is_empty() {
            self.logger
                .error(&format!("Commit rejected: player [{player}] has nothing queued"));
            return false;
        }

        self.players[slot.index()].mark_ready();
        self.logger.info(&format!("Commands end: [{player}]"));

        let resolve = self.players[slot.other().index()].is_ready();
        if resolve {
            self.resolve_turn(out_events);
        }

        out_events.push(Event::Updated);
        resolve
    }

    fn resolve_turn(&mut self, out_events: &mut Vec<Event>) {
        self.logger
            .info(&format!("Game {}: end of turn {}", self.id, self.turn));

        for slot in PlayerSlot::ALL {
            let pending = *self.players[slot.index()].pending();

            if let Some(step) = pending.step() {
                let applied = match step {
                    Step::Move(direction) => self.move_player(slot, direction, out_events),
                    Step::Trace(direction) => self.trace_player(slot, direction, out_events),
                };
                self.report(slot, Action::from(step), applied);
            }

            if let Some(target) = pending.attack() {
                let applied = self.attack_player(slot, target, out_events);
                self.report(slot, Action::Attack(target), applied);
            }
        }

        for player in &mut self.players {
            player.end_turn();
        }
        self.turn = self.turn.saturating_add(1);
        out_events.push(Event::NewTurn { turn: self.turn });
    }

    fn report(&self, slot: PlayerSlot, action: Action, applied: bool) {
        let outcome = if applied { "applied" } else { "blocked" };
        self.logger.info(&format!(
            "[{}] {action}: {outcome}",
            self.players[slot.index()].id()
        ));
    }

    /// Swaps the player's cell for its neighbour without emitting events.
    fn relocate(&mut self, slot: PlayerSlot, direction: Direction) -> bool {
        let from = self.players[slot.index()].position();
        let Some(to) = from.step(direction) else {
            return false;
        };

        match self.terrain.is_occupied(to) {
            Ok(false) => {}
            Ok(true) | Err(_) => return false,
        }

        self.terrain.release(from);
        let claimed = self.terrain.occupy(slot, to);
        debug_assert!(claimed, "free cell {to} refused its occupant");
        self.players[slot.index()].set_position(to);
        true
    }

    fn slot_of(&self, id: &PlayerId) -> Option<PlayerSlot> {
        PlayerSlot::ALL
            .into_iter()
            .find(|slot| self.players[slot.index()].id() == id)
    }
}

fn spawn(
    first: PlayerId,
    second: PlayerId,
    config: &GameConfig,
) -> Result<([Player; 2], Terrain), GameError> {
    validate_rules(config)?;
    if config.width == 0 || config.height == 0 {
        return Err(GameError::EmptyTerrain {
            width: config.width,
            height: config.height,
        });
    }
    if first == second {
        return Err(GameError::DuplicatePlayer(first));
    }

    let players = [
        Player::spawn(first, SKINS[0], config.positions.first, config.max_health),
        Player::spawn(second, SKINS[1], config.positions.second, config.max_health),
    ];
    let mut terrain = Terrain::new(config.width, config.height, config.skin.clone())?;
    for slot in PlayerSlot::ALL {
        let cell = players[slot.index()].position();
        if !terrain.occupy(slot, cell) {
            return Err(GameError::Placement { slot, cell });
        }
    }

    Ok((players, terrain))
}

fn reload(
    snapshot: GameSnapshot,
    config: &GameConfig,
) -> Result<(u32, [Player; 2], Terrain), GameError> {
    validate_rules(config)?;
    if snapshot.turn < FIRST_TURN {
        return Err(GameError::InvalidTurn(snapshot.turn));
    }

    let mut terrain = Terrain::from_snapshot(&snapshot.terrain)?;
    let players = [
        Player::restore(snapshot.player1, config.max_health),
        Player::restore(snapshot.player2, config.max_health),
    ];
    if players[0].id() == players[1].id() {
        return Err(GameError::DuplicatePlayer(players[0].id().clone()));
    }

    for slot in PlayerSlot::ALL {
        terrain.evict(slot);
        terrain.release(players[slot.index()].position());
    }
    for slot in PlayerSlot::ALL {
        let cell = players[slot.index()].position();
        if !terrain.occupy(slot, cell) {
            return Err(GameError::Placement { slot, cell });
        }
    }

    Ok((snapshot.turn, players, terrain))
}

fn validate_rules(config: &GameConfig) -> Result<(), GameError> {
    if !config.damage.is_ordered() {
        return Err(GameError::InvalidDamage {
            min: config.damage.min(),
            max: config.damage.max(),
        });
    }
    if config.max_health == 0 {
        return Err(GameError::InvalidMaxHealth);
    }
    Ok(())
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use cursendus_core::{GameId, GameSnapshot, PlayerId, PlayerSlot, RngSnapshot};

    use super::{Game, Player, Terrain};

    /// Identifier of the game.
    #[must_use]
    pub fn id(game: &Game) -> &GameId {
        &game.id
    }

    /// Number of the turn in progress, starting at one.
    #[must_use]
    pub fn turn(game: &Game) -> u32 {
        game.turn
    }

    /// Player seated in the provided slot.
    #[must_use]
    pub fn player(game: &Game, slot: PlayerSlot) -> &Player {
        &game.players[slot.index()]
    }

    /// Opponent of the player seated in the provided slot.
    #[must_use]
    pub fn other_player(game: &Game, slot: PlayerSlot) -> &Player {
        player(game, slot.other())
    }

    /// Seat of the player with the provided identity, if they are in the game.
    #[must_use]
    pub fn slot_of(game: &Game, id: &PlayerId) -> Option<PlayerSlot> {
        game.slot_of(id)
    }

    /// Read-only access to the terrain grid.
    #[must_use]
    pub fn terrain(game: &Game) -> &Terrain {
        &game.terrain
    }

    /// Captures the full game state.
    #[must_use]
    pub fn snapshot(game: &Game) -> GameSnapshot {
        GameSnapshot {
            id: game.id.clone(),
            turn: game.turn,
            player1: game.players[0].snapshot(),
            player2: game.players[1].snapshot(),
            terrain: game.terrain.snapshot(),
            rng: Some(RngSnapshot {
                seed: game.seed,
                word_pos: game.rng.get_word_pos(),
            }),
        }
    }
}
