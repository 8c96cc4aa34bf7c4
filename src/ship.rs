//! Ship catalog, orientation and the ship instances that make up a fleet.

use alloc::vec::Vec;
use core::fmt;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `i` steps away from (`row`, `col`) along this orientation.
    #[inline]
    pub fn offset(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }

    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// One catalog line: a ship type and how many instances a fleet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    ship_type: ShipType,
    count: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self {
            ship_type: ShipType::new(name, length),
            count,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Cells occupied by every instance of this class together.
    pub fn total_cells(&self) -> usize {
        self.ship_type.length() * self.count
    }
}

/// Index of a ship inside its owner's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single ship instance. Unplaced until the board assigns it cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    ship_type: ShipType,
    orientation: Option<Orientation>,
    cells: Vec<(usize, usize)>,
    hits: usize,
    shield_absorbed: usize,
}

impl Ship {
    pub fn new(id: ShipId, ship_type: ShipType) -> Self {
        Ship {
            id,
            ship_type,
            orientation: None,
            cells: Vec::new(),
            hits: 0,
            shield_absorbed: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Ship's type.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn is_placed(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Cells covered by the ship, origin first.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Origin of the ship (row, col), if placed.
    pub fn origin(&self) -> Option<(usize, usize)> {
        self.cells.first().copied()
    }

    /// Orientation of the ship, if placed.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Number of segments destroyed so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.is_placed() && self.hits >= self.ship_type.length()
    }

    /// True once a temporary shield has absorbed a hit aimed at this ship.
    pub fn has_shield(&self) -> bool {
        self.shield_absorbed > 0
    }

    pub(crate) fn set_placement(&mut self, orientation: Orientation, cells: Vec<(usize, usize)>) {
        self.orientation = Some(orientation);
        self.cells = cells;
    }

    /// Register a hit. Returns `true` if this hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        let was_sunk = self.is_sunk();
        self.hits = (self.hits + 1).min(self.ship_type.length());
        !was_sunk && self.is_sunk()
    }

    pub(crate) fn record_shield(&mut self) {
        self.shield_absorbed += 1;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", origin: {:?}, orientation: {:?}, hits: {}/{} }}",
            self.id,
            self.ship_type.name(),
            self.origin(),
            self.orientation,
            self.hits,
            self.ship_type.length(),
        )
    }
}

/// Ordered list of ship instances expanded from a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// Expand a type→(size, count) catalog into individual ships, keeping
    /// catalog order.
    pub fn from_catalog(catalog: &[ShipClass]) -> Self {
        let mut ships = Vec::new();
        for class in catalog {
            for _ in 0..class.count() {
                let id = ShipId(ships.len());
                ships.push(Ship::new(id, class.ship_type()));
            }
        }
        Fleet { ships }
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0)
    }

    /// Sum of all ship lengths; this is a combatant's starting life.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(Ship::length).sum()
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// First ship still waiting for a position.
    pub fn next_unplaced(&self) -> Option<&Ship> {
        self.ships.iter().find(|s| !s.is_placed())
    }

    /// Instances of `name` that are not yet destroyed.
    pub fn remaining_of(&self, name: &str) -> usize {
        self.ships
            .iter()
            .filter(|s| s.name() == name && !s.is_sunk())
            .count()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Ship> {
        self.ships.iter()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Ship;
    type IntoIter = core::slice::Iter<'a, Ship>;

    fn into_iter(self) -> Self::IntoIter {
        self.ships.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_expands_in_order() {
        let fleet = Fleet::from_catalog(&[ShipClass::new("Big", 3, 1), ShipClass::new("Small", 1, 2)]);
        let names: Vec<_> = fleet.iter().map(Ship::name).collect();
        assert_eq!(names, ["Big", "Small", "Small"]);
        assert_eq!(fleet.total_cells(), 5);
        assert_eq!(fleet.get(ShipId(2)).map(Ship::id), Some(ShipId(2)));
    }

    #[test]
    fn register_hit_reports_sink_once() {
        let mut ship = Ship::new(ShipId(0), ShipType::new("Test", 2));
        ship.set_placement(Orientation::Horizontal, alloc::vec![(1, 1), (1, 2)]);
        assert!(!ship.register_hit());
        assert!(ship.register_hit());
        assert!(ship.is_sunk());
        assert!(!ship.register_hit());
    }

    #[test]
    fn unplaced_ship_is_not_sunk() {
        let ship = Ship::new(ShipId(0), ShipType::new("Test", 1));
        assert!(!ship.is_sunk());
        assert_eq!(ship.origin(), None);
    }
}
