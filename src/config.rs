//! Immutable game configuration supplied once at game start.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ability::AbilityCosts;
use crate::common::ConfigError;
use crate::ship::ShipClass;

pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Smallest and largest accepted board side. The upper bound keeps
/// column labels within A..Z.
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 26;
pub const DEFAULT_STARTING_STAMINA: u32 = 5;

pub const FLEET_CATALOG: [ShipClass; 5] = [
    ShipClass::new("Carrier", 6, 1),
    ShipClass::new("Battleship", 4, 1),
    ShipClass::new("Cruiser", 3, 2),
    ShipClass::new("Submarine", 2, 3),
    ShipClass::new("Destroyer", 1, 4),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 6 + 4 + 3 * 2 + 2 * 3 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub catalog: Vec<ShipClass>,
    pub costs: AbilityCosts,
    pub starting_stamina: u32,
    pub player_name: String,
    pub bot_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            catalog: FLEET_CATALOG.to_vec(),
            costs: AbilityCosts::CANONICAL,
            starting_stamina: DEFAULT_STARTING_STAMINA,
            player_name: String::from("Player"),
            bot_name: String::from("Bot"),
        }
    }
}

impl GameConfig {
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_catalog(mut self, catalog: &[ShipClass]) -> Self {
        self.catalog = catalog.to_vec();
        self
    }

    pub fn with_costs(mut self, costs: AbilityCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_starting_stamina(mut self, stamina: u32) -> Self {
        self.starting_stamina = stamina;
        self
    }

    pub fn without_radar(mut self) -> Self {
        self.costs.radar = None;
        self
    }

    pub fn with_names(mut self, player: &str, bot: &str) -> Self {
        self.player_name = String::from(player);
        self.bot_name = String::from(bot);
        self
    }

    /// Cells the whole fleet occupies.
    pub fn total_ship_cells(&self) -> usize {
        self.catalog.iter().map(ShipClass::total_cells).sum()
    }

    /// Check that a fleet can be deployed on the board at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        if self.catalog.iter().all(|c| c.count() == 0) {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(class) = self
            .catalog
            .iter()
            .find(|c| c.count() > 0 && (c.ship_type().length() == 0 || c.ship_type().length() > self.board_size))
        {
            return Err(ConfigError::ShipTooLong {
                name: class.ship_type().name(),
                length: class.ship_type().length(),
                board_size: self.board_size,
            });
        }
        let cells = self.total_ship_cells();
        let capacity = self.board_size * self.board_size;
        if cells > capacity {
            return Err(ConfigError::FleetExceedsBoardCapacity { cells, capacity });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_ship_cells(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn oversized_fleet_is_rejected() {
        let config = GameConfig::default()
            .with_board_size(4)
            .with_catalog(&[ShipClass::new("Raft", 1, 17)]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::FleetExceedsBoardCapacity {
                cells: 17,
                capacity: 16
            })
        );
    }

    #[test]
    fn long_ship_and_bad_size_are_rejected() {
        let config = GameConfig::default().with_board_size(5);
        assert!(matches!(config.validate(), Err(ConfigError::ShipTooLong { name: "Carrier", .. })));
        assert_eq!(
            GameConfig::default().with_board_size(30).validate(),
            Err(ConfigError::InvalidBoardSize(30))
        );
        assert_eq!(
            GameConfig::default().with_catalog(&[]).validate(),
            Err(ConfigError::EmptyFleet)
        );
    }
}
