//! What a combatant has learned about its opponent's grid.

use alloc::vec;
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Mark {
    #[default]
    Unknown,
    Miss,
    Hit,
    ShieldBlocked,
    RadarMarked,
}

impl Mark {
    /// `Hit` and `Miss` cannot be targeted again.
    pub fn is_resolved(self) -> bool {
        matches!(self, Mark::Hit | Mark::Miss)
    }
}

/// Attacker-side knowledge grid, same size as the opponent's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackView {
    size: usize,
    marks: Vec<Mark>,
}

impl AttackView {
    pub fn new(size: usize) -> Self {
        AttackView {
            size,
            marks: vec![Mark::Unknown; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if row < self.size && col < self.size {
            self.marks.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, mark: Mark) {
        if row < self.size && col < self.size {
            if let Some(m) = self.marks.get_mut(row * self.size + col) {
                *m = mark;
            }
        }
    }

    pub fn is_resolved(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Mark::is_resolved)
    }

    /// Row-major view for renderers.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.marks.chunks(self.size.max(1))
    }

    /// Coordinates that may still be attacked, row-major.
    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_resolved())
            .map(move |(i, _)| (i / size, i % size))
    }
}
