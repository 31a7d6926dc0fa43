#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cursendus engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative turn engine, and pure systems. Adapters hand raw command text
//! to the engine, which turns it into [`Action`] values through an injected
//! [`Interpreter`], holds them in each player's [`PendingActions`] until both
//! players commit, and reports every visible change as an [`Event`] pushed to
//! a caller-provided buffer.

mod config;
mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{DamageRange, GameConfig, SkinConfig, SpawnPositions};
pub use snapshot::{CellSnapshot, GameSnapshot, PlayerSnapshot, RngSnapshot, TerrainSnapshot};

/// Canonical name of the game, shown by adapters when they boot.
pub const GAME_TITLE: &str = "Cursendus";

/// Letters used to label terrain columns, `A` being column zero.
pub const COLUMN_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Widest terrain supported: one column per letter in [`COLUMN_LETTERS`].
pub const MAX_COLUMNS: u32 = 26;

/// Tallest terrain supported.
pub const MAX_ROWS: u32 = 1024;

/// Events broadcast by the engine after processing a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Visible game state changed.
    Updated,
    /// A turn was resolved and the next one began.
    NewTurn {
        /// Number of the turn that just started.
        turn: u32,
    },
}

/// One of the two seats of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    /// The player that spawned at the first configured position.
    First,
    /// The player that spawned at the second configured position.
    Second,
}

impl PlayerSlot {
    /// Both slots in turn-resolution order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Returns the opposing slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Zero-based index of the slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "player1"),
            Self::Second => write!(f, "player2"),
        }
    }
}

/// Opaque identity of a player, usually an e-mail address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps the provided identity.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed view of the identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Wraps the provided identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed view of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of a single terrain cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are not known here; the terrain rejects those.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        Some(Self::new(column?, row?))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal movement directions. There are no diagonal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    #[serde(rename = "N")]
    North,
    /// Movement toward increasing column indices.
    #[serde(rename = "E")]
    East,
    /// Movement toward increasing row indices.
    #[serde(rename = "S")]
    South,
    /// Movement toward decreasing column indices.
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// Single-letter symbol of the direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Resolves a single-letter symbol, ignoring case.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

/// Cell targeted by an attack, as typed by a player: a column letter and a
/// 1-based row number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackTarget {
    column: char,
    row: u32,
}

impl AttackTarget {
    /// Creates a target from a column letter and a 1-based row number.
    #[must_use]
    pub const fn new(column: char, row: u32) -> Self {
        Self { column, row }
    }

    /// Column letter as provided.
    #[must_use]
    pub const fn column(&self) -> char {
        self.column
    }

    /// 1-based row number as provided.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Resolves the target into a zero-based cell.
    ///
    /// The letter is matched case-insensitively with `A` mapping to column
    /// zero. Returns `None` for a non-letter column or row zero.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        let letter = self.column.to_ascii_uppercase();
        let column = COLUMN_LETTERS.find(letter)?;
        let row = self.row.checked_sub(1)?;
        Some(CellCoord::new(u32::try_from(column).ok()?, row))
    }
}

impl fmt::Display for AttackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Kinds of action a player may queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    /// Step to a neighbouring cell.
    Move,
    /// Step to a neighbouring cell while marking the vacated one.
    Trace,
    /// Damage whoever stands on a target cell.
    Attack,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Trace => write!(f, "trace"),
            Self::Attack => write!(f, "attack"),
        }
    }
}

/// A typed player intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Step in a direction.
    Move(Direction),
    /// Mark the current cell, then step in a direction.
    Trace(Direction),
    /// Strike a target cell.
    Attack(AttackTarget),
}

impl Action {
    /// Kind of the action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move(_) => ActionKind::Move,
            Self::Trace(_) => ActionKind::Trace,
            Self::Attack(_) => ActionKind::Attack,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(direction) => write!(f, "move {}", direction.symbol()),
            Self::Trace(direction) => write!(f, "trace {}", direction.symbol()),
            Self::Attack(target) => write!(f, "attack {target}"),
        }
    }
}

/// Movement half of a player's queue. Move and trace never coexist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Plain move.
    Move(Direction),
    /// Trail-leaving move.
    Trace(Direction),
}

impl From<Step> for Action {
    fn from(step: Step) -> Self {
        match step {
            Step::Move(direction) => Self::Move(direction),
            Step::Trace(direction) => Self::Trace(direction),
        }
    }
}

/// Actions queued by a player for the current turn, at most one per kind.
///
/// The movement half holds either a move or a trace. A trace always wins: it
/// replaces a queued move, and a move submitted while a trace is queued is
/// discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingActions {
    #[serde(default)]
    step: Option<Step>,
    #[serde(default)]
    attack: Option<AttackTarget>,
}

impl PendingActions {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: None,
            attack: None,
        }
    }

    /// Stores the action, overwriting any queued action of the same kind.
    ///
    /// Returns the action that no longer belongs to the set, if any: the
    /// overwritten value, the move displaced by a trace, or the incoming move
    /// itself when a trace is already queued.
    pub fn insert(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::Move(direction) => match self.step {
                Some(Step::Trace(_)) => Some(action),
                previous => {
                    self.step = Some(Step::Move(direction));
                    previous.map(Action::from)
                }
            },
            Action::Trace(direction) => self
                .step
                .replace(Step::Trace(direction))
                .map(Action::from),
            Action::Attack(target) => self.attack.replace(target).map(Action::Attack),
        }
    }

    /// Queued action of the provided kind.
    #[must_use]
    pub fn get(&self, kind: ActionKind) -> Option<Action> {
        match (kind, self.step) {
            (ActionKind::Move, Some(Step::Move(direction))) => Some(Action::Move(direction)),
            (ActionKind::Trace, Some(Step::Trace(direction))) => Some(Action::Trace(direction)),
            (ActionKind::Attack, _) => self.attack.map(Action::Attack),
            _ => None,
        }
    }

    /// Queued move or trace.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        self.step
    }

    /// Queued attack target.
    #[must_use]
    pub const fn attack(&self) -> Option<AttackTarget> {
        self.attack
    }

    /// Reports whether nothing is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.step.is_none() && self.attack.is_none()
    }

    /// Number of queued actions.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.step.is_some()) + usize::from(self.attack.is_some())
    }

    /// Queued actions in resolution order: movement first, then attack.
    pub fn iter(&self) -> impl Iterator<Item = Action> {
        self.step
            .map(Action::from)
            .into_iter()
            .chain(self.attack.map(Action::Attack))
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Converts one line of raw text into a typed action.
pub trait Interpreter: fmt::Debug + Send {
    /// Parses the text, returning `None` when it is not a valid command.
    fn parse(&self, text: &str) -> Option<Action>;
}

/// Informational and error sink handed to the engine.
///
/// Implementations must not panic and must not block.
pub trait Logger: fmt::Debug + Send {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records an error message.
    fn error(&self, message: &str);
}

/// Logger that discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::{
        Action, ActionKind, AttackTarget, CellCoord, Direction, PendingActions, PlayerSlot, Step,
    };

    #[test]
    fn step_moves_one_cell_in_each_direction() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.step(Direction::North), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Direction::East), Some(CellCoord::new(4, 3)));
        assert_eq!(origin.step(Direction::South), Some(CellCoord::new(3, 4)));
        assert_eq!(origin.step(Direction::West), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn step_off_the_origin_edges_has_no_cell() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
    }

    #[test]
    fn direction_symbols_ignore_case() {
        assert_eq!(Direction::from_symbol('n'), Some(Direction::North));
        assert_eq!(Direction::from_symbol('W'), Some(Direction::West));
        assert_eq!(Direction::from_symbol('x'), None);
        assert_eq!(Direction::South.symbol(), 'S');
    }

    #[test]
    fn attack_target_resolves_letter_and_one_based_row() {
        assert_eq!(AttackTarget::new('A', 1).cell(), Some(CellCoord::new(0, 0)));
        assert_eq!(AttackTarget::new('m', 16).cell(), Some(CellCoord::new(12, 15)));
    }

    #[test]
    fn attack_target_rejects_bad_letters_and_row_zero() {
        assert_eq!(AttackTarget::new('?', 3).cell(), None);
        assert_eq!(AttackTarget::new('B', 0).cell(), None);
    }

    #[test]
    fn slots_know_their_opponent() {
        assert_eq!(PlayerSlot::First.other(), PlayerSlot::Second);
        assert_eq!(PlayerSlot::Second.other(), PlayerSlot::First);
        assert_eq!(PlayerSlot::ALL.map(PlayerSlot::index), [0, 1]);
    }

    #[test]
    fn trace_replaces_a_queued_move() {
        let mut pending = PendingActions::new();
        assert_eq!(pending.insert(Action::Move(Direction::East)), None);
        assert_eq!(
            pending.insert(Action::Trace(Direction::North)),
            Some(Action::Move(Direction::East))
        );
        assert_eq!(pending.step(), Some(Step::Trace(Direction::North)));
        assert_eq!(pending.get(ActionKind::Move), None);
    }

    #[test]
    fn move_is_discarded_while_a_trace_is_queued() {
        let mut pending = PendingActions::new();
        assert_eq!(pending.insert(Action::Trace(Direction::South)), None);
        assert_eq!(
            pending.insert(Action::Move(Direction::West)),
            Some(Action::Move(Direction::West))
        );
        assert_eq!(
            pending.get(ActionKind::Trace),
            Some(Action::Trace(Direction::South))
        );
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn same_kind_overwrites_previous_value() {
        let mut pending = PendingActions::new();
        let first = Action::Attack(AttackTarget::new('B', 2));
        let second = Action::Attack(AttackTarget::new('C', 3));
        assert_eq!(pending.insert(first), None);
        assert_eq!(pending.insert(second), Some(first));
        assert_eq!(pending.get(ActionKind::Attack), Some(second));
    }

    #[test]
    fn iteration_yields_movement_before_attack() {
        let mut pending = PendingActions::new();
        let attack = Action::Attack(AttackTarget::new('D', 4));
        let _ = pending.insert(attack);
        let _ = pending.insert(Action::Move(Direction::South));

        let queued: Vec<_> = pending.iter().collect();
        assert_eq!(queued, vec![Action::Move(Direction::South), attack]);

        pending.clear();
        assert!(pending.is_empty());
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn actions_render_as_commands() {
        assert_eq!(Action::Trace(Direction::East).to_string(), "trace E");
        assert_eq!(
            Action::Attack(AttackTarget::new('b', 7)).to_string(),
            "attack b7"
        );
    }

    #[test]
    fn every_supported_column_has_a_letter() {
        assert_eq!(super::COLUMN_LETTERS.len(), super::MAX_COLUMNS as usize);
        let last = AttackTarget::new('z', 1).cell().expect("last letter resolves");
        assert_eq!(last.column(), super::MAX_COLUMNS - 1);
    }
}
