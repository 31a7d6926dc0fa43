//! Serializable representation of a game's full state.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, GameId, PendingActions, PlayerId, PlayerSlot, SkinConfig};

/// Full state of a game, used for persistence and restoration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Identifier of the game.
    pub id: GameId,
    /// Number of the turn in progress, starting at one.
    pub turn: u32,
    /// State of the first player.
    pub player1: PlayerSnapshot,
    /// State of the second player.
    pub player2: PlayerSnapshot,
    /// State of the terrain.
    pub terrain: TerrainSnapshot,
    /// Position of the damage generator. Snapshots without one are reseeded
    /// from the configuration on restore.
    #[serde(default)]
    pub rng: Option<RngSnapshot>,
}

/// Seed and stream position of the damage generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// Seed the generator was created from.
    pub seed: u64,
    /// Number of 32-bit words consumed since seeding.
    pub word_pos: u128,
}

impl GameSnapshot {
    /// Snapshot of the player seated in the provided slot.
    #[must_use]
    pub const fn player(&self, slot: PlayerSlot) -> &PlayerSnapshot {
        match slot {
            PlayerSlot::First => &self.player1,
            PlayerSlot::Second => &self.player2,
        }
    }

    /// Mutable snapshot of the player seated in the provided slot.
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerSnapshot {
        match slot {
            PlayerSlot::First => &mut self.player1,
            PlayerSlot::Second => &mut self.player2,
        }
    }
}

/// Captured state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Identity of the player.
    pub id: PlayerId,
    /// Visual skin number.
    pub skin: u8,
    /// Cell the player occupies.
    pub position: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Whether health reached zero.
    pub dead: bool,
    /// Visited cells, starting with the spawn cell.
    pub trail: Vec<CellCoord>,
    /// Actions queued for the current turn. Empty between turns.
    #[serde(default)]
    pub pending: PendingActions,
    /// Whether the player committed the queued actions.
    #[serde(default)]
    pub ready: bool,
}

/// Captured state of the terrain grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainSnapshot {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Visual parameters.
    #[serde(default)]
    pub skin: SkinConfig,
    /// Cells in row-major order.
    pub cells: Vec<CellSnapshot>,
}

/// Captured state of a single terrain cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Player standing on the cell.
    #[serde(default)]
    pub occupant: Option<PlayerSlot>,
    /// Player whose trail crosses the cell.
    #[serde(default)]
    pub trail: Option<PlayerSlot>,
}
