//! Authoritative terrain grid: cell occupancy and trail marks.

use cursendus_core::{
    CellCoord, CellSnapshot, PlayerSlot, SkinConfig, TerrainSnapshot, MAX_COLUMNS, MAX_ROWS,
};

/// Errors reported by terrain queries and reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// The coordinate lies outside the grid.
    #[error("cell {cell} lies outside the {width}x{height} terrain")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of columns of the grid.
        width: u32,
        /// Number of rows of the grid.
        height: u32,
    },
    /// A snapshot holds a different number of cells than its dimensions imply.
    #[error("terrain snapshot holds {found} cells, expected {expected}")]
    SizeMismatch {
        /// Number of cells implied by the dimensions.
        expected: u64,
        /// Number of cells present in the snapshot.
        found: u64,
    },
    /// The dimensions exceed what the terrain can address.
    #[error(
        "terrain of {width}x{height} exceeds the {}x{} limit",
        MAX_COLUMNS,
        MAX_ROWS
    )]
    Oversized {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}

/// State of a single terrain cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    occupant: Option<PlayerSlot>,
    trail: Option<PlayerSlot>,
}

impl Cell {
    /// Player standing on the cell.
    #[must_use]
    pub const fn occupant(&self) -> Option<PlayerSlot> {
        self.occupant
    }

    /// Player whose trail crosses the cell.
    #[must_use]
    pub const fn trail(&self) -> Option<PlayerSlot> {
        self.trail
    }
}

/// Dense width x height grid indexed by coordinate.
///
/// The terrain is the sole owner of occupancy. Players only hold coordinate
/// values, and the engine keeps both in agreement by pairing every
/// [`Terrain::release`] with an [`Terrain::occupy`].
#[derive(Clone, Debug)]
pub struct Terrain {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    skin: SkinConfig,
}

impl Terrain {
    /// Creates an empty terrain of the provided size.
    ///
    /// Fails when the grid is wider than [`MAX_COLUMNS`] or taller than
    /// [`MAX_ROWS`].
    pub fn new(width: u32, height: u32, skin: SkinConfig) -> Result<Self, TerrainError> {
        if width > MAX_COLUMNS || height > MAX_ROWS {
            return Err(TerrainError::Oversized { width, height });
        }
        let capacity = usize::try_from(cell_count(width, height))
            .map_err(|_| TerrainError::Oversized { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); capacity],
            skin,
        })
    }

    /// Rebuilds a terrain from its snapshot, keeping occupants and trail marks
    /// exactly as recorded.
    ///
    /// The cell count is checked against the dimensions before anything is
    /// allocated.
    pub fn from_snapshot(snapshot: &TerrainSnapshot) -> Result<Self, TerrainError> {
        let expected = cell_count(snapshot.width, snapshot.height);
        let found = u64::try_from(snapshot.cells.len()).unwrap_or(u64::MAX);
        if expected != found {
            return Err(TerrainError::SizeMismatch { expected, found });
        }

        let mut terrain = Self::new(snapshot.width, snapshot.height, snapshot.skin.clone())?;
        for (cell, recorded) in terrain.cells.iter_mut().zip(&snapshot.cells) {
            *cell = Cell {
                occupant: recorded.occupant,
                trail: recorded.trail,
            };
        }
        Ok(terrain)
    }

    /// Captures the terrain into its serializable form.
    #[must_use]
    pub fn snapshot(&self) -> TerrainSnapshot {
        TerrainSnapshot {
            width: self.width,
            height: self.height,
            skin: self.skin.clone(),
            cells: self
                .cells
                .iter()
                .map(|cell| CellSnapshot {
                    occupant: cell.occupant,
                    trail: cell.trail,
                })
                .collect(),
        }
    }

    /// Places the player on the cell.
    ///
    /// Returns `false`, leaving the grid untouched, when the cell is already
    /// occupied or lies outside the grid.
    pub fn occupy(&mut self, slot: PlayerSlot, cell: CellCoord) -> bool {
        match self.cell_mut(cell) {
            Some(entry) if entry.occupant.is_none() => {
                entry.occupant = Some(slot);
                true
            }
            _ => false,
        }
    }

    /// Clears the occupant of the cell. Out-of-bounds cells are ignored.
    pub fn release(&mut self, cell: CellCoord) {
        if let Some(entry) = self.cell_mut(cell) {
            entry.occupant = None;
        }
    }

    /// Clears every cell occupied by the provided player.
    pub fn evict(&mut self, slot: PlayerSlot) {
        for cell in &mut self.cells {
            if cell.occupant == Some(slot) {
                cell.occupant = None;
            }
        }
    }

    /// Reports whether a player stands on the cell.
    pub fn is_occupied(&self, cell: CellCoord) -> Result<bool, TerrainError> {
        self.cell(cell)
            .map(|entry| entry.occupant.is_some())
            .ok_or(TerrainError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
    }

    /// Marks the cell as part of the player's trail. Out-of-bounds cells are
    /// ignored.
    pub fn trace(&mut self, slot: PlayerSlot, cell: CellCoord) {
        if let Some(entry) = self.cell_mut(cell) {
            entry.trail = Some(slot);
        }
    }

    /// Player standing on the cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<PlayerSlot> {
        self.cell(cell).and_then(Cell::occupant)
    }

    /// State of the cell, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let width = usize::try_from(self.width).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }

    /// Provides the dimensions of the grid as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Visual parameters of the terrain.
    #[must_use]
    pub const fn skin(&self) -> &SkinConfig {
        &self.skin
    }

    fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        self.index(cell).and_then(|index| self.cells.get_mut(index))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn cell_count(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height)
}
