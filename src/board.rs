//! Game board: one combatant's grid of cells.
//!
//! The board only knows about its own cells. Life accounting and shields
//! live one level up in [`Combatant`](crate::Combatant).

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{ActionRejected, AttackResult, PlacementError};
use crate::ship::{Orientation, Ship, ShipId};

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CellState {
    Empty,
    Occupied,
    Miss,
    Hit,
    /// Occupied cell whose incoming hit was absorbed by a shield.
    Shielded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Cell {
    state: CellState,
    occupant: Option<ShipId>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        state: CellState::Empty,
        occupant: None,
    };

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn occupant(&self) -> Option<ShipId> {
        self.occupant
    }

    /// `Hit` and `Miss` are terminal.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, CellState::Hit | CellState::Miss)
    }

    /// Holds a ship segment that has not been destroyed.
    pub fn is_intact_ship(&self) -> bool {
        matches!(self.state, CellState::Occupied | CellState::Shielded)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// Square grid, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            self.cells.get(row * self.size + col)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.in_bounds(row, col) {
            self.cells.get_mut(row * self.size + col)
        } else {
            None
        }
    }

    /// Read-only row-major view for renderers.
    pub fn cells_view(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterator over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Cells a ship of `length` would cover from (`row`, `col`), checked
    /// against bounds and existing ships.
    pub fn check_run(
        &self,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Vec<(usize, usize)>, PlacementError> {
        let mut run = Vec::with_capacity(length);
        for i in 0..length {
            let (r, c) = orientation.offset(row, col, i);
            let cell = self.cell(r, c).ok_or(PlacementError::OutOfBounds)?;
            if cell.state != CellState::Empty {
                return Err(PlacementError::Overlap);
            }
            run.push((r, c));
        }
        Ok(run)
    }

    /// Place `ship` at (`row`, `col`) with `orientation`. On failure the
    /// board and the ship are left untouched.
    pub fn place_ship(
        &mut self,
        ship: &mut Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if ship.is_placed() {
            return Err(PlacementError::AlreadyPlaced);
        }
        let run = self.check_run(ship.length(), row, col, orientation)?;
        for &(r, c) in &run {
            if let Some(cell) = self.cell_mut(r, c) {
                cell.state = CellState::Occupied;
                cell.occupant = Some(ship.id());
            }
        }
        ship.set_placement(orientation, run);
        Ok(())
    }

    /// Whether a ship of `length` fits anywhere on the current board.
    pub fn has_room(&self, length: usize) -> bool {
        (0..self.size).any(|r| {
            (0..self.size).any(|c| {
                self.check_run(length, r, c, Orientation::Horizontal).is_ok()
                    || self.check_run(length, r, c, Orientation::Vertical).is_ok()
            })
        })
    }

    /// Process an attack at (`row`, `col`).
    pub fn apply_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, ActionRejected> {
        let cell = self.cell_mut(row, col).ok_or(ActionRejected::OutOfBounds)?;
        match (cell.state, cell.occupant) {
            (CellState::Hit | CellState::Miss, _) => Ok(AttackResult::AlreadyAttacked),
            (CellState::Occupied | CellState::Shielded, Some(id)) => {
                cell.state = CellState::Hit;
                Ok(AttackResult::Hit(id))
            }
            _ => {
                cell.state = CellState::Miss;
                Ok(AttackResult::Miss)
            }
        }
    }

    /// Mark an intact ship cell as shielded. Returns the ship that was
    /// covered, or `None` when the cell holds no intact segment.
    pub fn mark_shielded(&mut self, row: usize, col: usize) -> Option<ShipId> {
        let cell = self.cell_mut(row, col)?;
        if !cell.is_intact_ship() {
            return None;
        }
        cell.state = CellState::Shielded;
        cell.occupant
    }

    /// Number of cells in state `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    pub fn hit_count(&self) -> usize {
        self.count(CellState::Hit)
    }

    /// Cells holding intact ship segments, row-major.
    pub fn intact_ship_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_intact_ship())
            .map(move |(i, _)| (i / size, i % size))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board<{}>:", self.size)?;
        for row in self.rows() {
            for cell in row {
                let ch = match cell.state {
                    CellState::Empty => '.',
                    CellState::Occupied => 'S',
                    CellState::Miss => 'o',
                    CellState::Hit => 'X',
                    CellState::Shielded => '#',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipType;

    #[test]
    fn shielded_cell_can_still_be_hit() {
        let mut board = Board::new(4);
        let mut ship = Ship::new(ShipId(0), ShipType::new("Test", 2));
        board.place_ship(&mut ship, 0, 0, Orientation::Horizontal).unwrap();
        assert_eq!(board.mark_shielded(0, 0), Some(ShipId(0)));
        assert_eq!(board.cell(0, 0).unwrap().state(), CellState::Shielded);
        assert_eq!(board.apply_attack(0, 0), Ok(AttackResult::Hit(ShipId(0))));
        assert_eq!(board.mark_shielded(0, 0), None);
    }

    #[test]
    fn has_room_detects_full_rows() {
        let mut board = Board::new(2);
        let mut a = Ship::new(ShipId(0), ShipType::new("A", 2));
        board.place_ship(&mut a, 0, 0, Orientation::Horizontal).unwrap();
        assert!(board.has_room(2));
        assert!(!board.has_room(3));
        let mut b = Ship::new(ShipId(1), ShipType::new("B", 2));
        board.place_ship(&mut b, 1, 0, Orientation::Horizontal).unwrap();
        assert!(!board.has_room(1));
    }
}
