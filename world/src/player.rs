//! Player entity as seen by the turn engine.

use cursendus_core::{Action, CellCoord, PendingActions, PlayerId, PlayerSnapshot};

/// State of a seated player.
///
/// The player never references the terrain; it only records the coordinate
/// it stands on. Mutators are crate-private so that position changes always
/// flow through the engine's release and occupy pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    skin: u8,
    position: CellCoord,
    health: u32,
    max_health: u32,
    trail: Vec<CellCoord>,
    pending: PendingActions,
    ready: bool,
}

impl Player {
    pub(crate) fn spawn(id: PlayerId, skin: u8, position: CellCoord, max_health: u32) -> Self {
        Self {
            id,
            skin,
            position,
            health: max_health,
            max_health,
            trail: vec![position],
            pending: PendingActions::new(),
            ready: false,
        }
    }

    /// Health above `max_health` is clamped; the dead flag is derived from
    /// the restored health rather than trusted.
    pub(crate) fn restore(snapshot: PlayerSnapshot, max_health: u32) -> Self {
        Self {
            id: snapshot.id,
            skin: snapshot.skin,
            position: snapshot.position,
            health: snapshot.health.min(max_health),
            max_health,
            trail: snapshot.trail,
            pending: snapshot.pending,
            ready: snapshot.ready,
        }
    }

    /// Captures the player into its serializable form.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id.clone(),
            skin: self.skin,
            position: self.position,
            health: self.health,
            dead: self.is_dead(),
            trail: self.trail.clone(),
            pending: self.pending,
            ready: self.ready,
        }
    }

    /// Identity of the player.
    #[must_use]
    pub const fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Visual skin number.
    #[must_use]
    pub const fn skin(&self) -> u8 {
        self.skin
    }

    /// Cell the player stands on.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health the player started with.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// True exactly when health is zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Visited cells, starting with the spawn cell.
    #[must_use]
    pub fn trail(&self) -> &[CellCoord] {
        &self.trail
    }

    /// Actions queued for the current turn.
    #[must_use]
    pub const fn pending(&self) -> &PendingActions {
        &self.pending
    }

    /// Whether the player committed the queued actions.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn set_position(&mut self, position: CellCoord) {
        self.position = position;
    }

    pub(crate) fn record_trail(&mut self, cell: CellCoord) {
        self.trail.push(cell);
    }

    /// Removes health, saturating at zero. Returns the health left.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub(crate) fn queue(&mut self, action: Action) -> Option<Action> {
        self.pending.insert(action)
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub(crate) fn end_turn(&mut self) {
        self.pending.clear();
        self.ready = false;
    }
}
