//! Explicit game configuration and its defaults.

use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Configuration supplied when a game is created or restored.
///
/// Every field falls back to its default when absent from a serialized
/// document, so partial configuration files only override what they name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of terrain columns, at most [`MAX_COLUMNS`](crate::MAX_COLUMNS)
    /// so every column has an attack letter.
    pub width: u32,
    /// Number of terrain rows, at most [`MAX_ROWS`](crate::MAX_ROWS).
    pub height: u32,
    /// Spawn cells of both players.
    pub positions: SpawnPositions,
    /// Visual parameters of the terrain. Not used by game rules.
    pub skin: SkinConfig,
    /// Health each player starts with and can never exceed.
    pub max_health: u32,
    /// Inclusive range a single hit removes from the target's health.
    pub damage: DamageRange,
    /// Seed of the damage generator. `None` seeds from entropy. Restored
    /// games keep the generator recorded in their snapshot instead.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 13,
            height: 16,
            positions: SpawnPositions::default(),
            skin: SkinConfig::default(),
            max_health: 100,
            damage: DamageRange::default(),
            rng_seed: None,
        }
    }
}

/// Spawn cells of both players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPositions {
    /// Spawn cell of the first player.
    pub first: CellCoord,
    /// Spawn cell of the second player.
    pub second: CellCoord,
}

impl Default for SpawnPositions {
    fn default() -> Self {
        Self {
            first: CellCoord::new(0, 4),
            second: CellCoord::new(12, 15),
        }
    }
}

/// Tile names and layout hints used by presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    /// Tile drawn for the moon.
    pub moon: String,
    /// Tiles drawn for the sky.
    pub sky: Vec<String>,
    /// Tiles drawn for the horizon row.
    pub horizon: Vec<String>,
    /// Tiles drawn for the ground.
    pub ground: Vec<String>,
    /// Number of sky rows above the horizon.
    pub sky_height: u32,
    /// Row holding the moon.
    pub moon_row: u32,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            moon: "sky-moon".to_owned(),
            sky: vec!["sky-1".to_owned()],
            horizon: vec!["top-1".to_owned()],
            ground: vec!["ground-1".to_owned()],
            sky_height: 2,
            moon_row: 1,
        }
    }
}

/// Inclusive damage range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    min: u32,
    max: u32,
}

impl DamageRange {
    /// Creates a range from its inclusive bounds.
    ///
    /// Returns `None` when `min` exceeds `max`.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Option<Self> {
        if min > max {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Smallest damage a hit can deal.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Largest damage a hit can deal.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether the provided amount lies within the range.
    #[must_use]
    pub const fn contains(&self, amount: u32) -> bool {
        self.min <= amount && amount <= self.max
    }

    /// Reports whether the bounds are ordered. Always true for ranges built
    /// with [`DamageRange::new`]; deserialized ranges may violate it.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl Default for DamageRange {
    fn default() -> Self {
        Self { min: 8, max: 13 }
    }
}

#[cfg(test)]
mod tests {
    use super::{DamageRange, GameConfig};
    use crate::CellCoord;

    #[test]
    fn defaults_match_the_classic_board() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (13, 16));
        assert_eq!(config.positions.first, CellCoord::new(0, 4));
        assert_eq!(config.positions.second, CellCoord::new(12, 15));
        assert_eq!(config.damage, DamageRange::new(8, 13).expect("valid range"));
        assert_eq!(config.max_health, 100);
        assert_eq!(config.skin.sky_height, 2);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn damage_range_rejects_inverted_bounds() {
        assert!(DamageRange::new(5, 4).is_none());
        let range = DamageRange::new(3, 3).expect("single value range");
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            width = 8
            rng_seed = 7

            [positions.first]
            column = 1
            row = 1

            [damage]
            min = 1
            max = 2
            "#,
        )
        .expect("config parses");

        assert_eq!(config.width, 8);
        assert_eq!(config.height, 16);
        assert_eq!(config.positions.first, CellCoord::new(1, 1));
        assert_eq!(config.positions.second, CellCoord::new(12, 15));
        assert_eq!(config.damage, DamageRange::new(1, 2).expect("valid range"));
        assert_eq!(config.rng_seed, Some(7));
    }
}
