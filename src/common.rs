//! Common result and error types shared by the board, resolver and engine.

use core::fmt;

use crate::game::Phase;
use crate::ship::ShipId;

/// Result of applying a single attack to a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// Cell held a ship segment, which is now destroyed.
    Hit(ShipId),
    /// Cell was open water.
    Miss,
    /// Cell was already `Hit` or `Miss`; nothing changed.
    AlreadyAttacked,
}

/// What a combatant's grid reports back for one attacked cell, after the
/// temporary shield has had its say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Impact {
    Hit { ship: ShipId, sunk: bool },
    Miss,
    Shielded(ShipId),
    AlreadyAttacked,
}

impl Impact {
    /// A hit that got through to the hull.
    pub fn is_hit(&self) -> bool {
        matches!(self, Impact::Hit { .. })
    }
}

/// Errors returned when a ship cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Some cell of the run falls outside the board.
    OutOfBounds,
    /// Some cell of the run is already occupied.
    Overlap,
    /// The ship already has a position.
    AlreadyPlaced,
    /// No ship with this id in the fleet.
    UnknownShip,
    /// A fleet deployment left ships without a position.
    FleetIncomplete,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::AlreadyPlaced => write!(f, "Ship is already placed on the board"),
            PlacementError::UnknownShip => write!(f, "Ship not found in fleet"),
            PlacementError::FleetIncomplete => write!(f, "Not every ship of the fleet was placed"),
        }
    }
}

/// Reasons an ability invocation is refused. A rejected action never
/// mutates state or charges stamina.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRejected {
    InsufficientStamina { needed: u32, available: u32 },
    AlreadyAttacked,
    NoValidTarget,
    OutOfBounds,
    /// The ability is not part of this game's roster.
    Disabled,
}

impl fmt::Display for ActionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRejected::InsufficientStamina { needed, available } => write!(
                f,
                "Not enough stamina: needs {}, have {}",
                needed, available
            ),
            ActionRejected::AlreadyAttacked => write!(f, "That cell was already attacked"),
            ActionRejected::NoValidTarget => write!(f, "No valid target for this ability"),
            ActionRejected::OutOfBounds => write!(f, "Target is outside the board"),
            ActionRejected::Disabled => write!(f, "Ability is not available in this game"),
        }
    }
}

/// Fatal problems with a game configuration, reported before any turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    FleetExceedsBoardCapacity { cells: usize, capacity: usize },
    ShipTooLong { name: &'static str, length: usize, board_size: usize },
    InvalidBoardSize(usize),
    EmptyFleet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FleetExceedsBoardCapacity { cells, capacity } => write!(
                f,
                "Fleet needs {} cells but the board only has {}",
                cells, capacity
            ),
            ConfigError::ShipTooLong {
                name,
                length,
                board_size,
            } => write!(
                f,
                "{} (length {}) does not fit on a {}x{} board",
                name, length, board_size, board_size
            ),
            ConfigError::InvalidBoardSize(n) => write!(f, "Unsupported board size {}", n),
            ConfigError::EmptyFleet => write!(f, "Fleet catalog is empty"),
        }
    }
}

/// Errors returned by the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// Input does not belong to the current phase.
    WrongPhase(Phase),
    /// Fate roll outside 1..=100.
    InvalidRoll(u8),
    Placement(PlacementError),
    Action(ActionRejected),
}

impl From<PlacementError> for TurnError {
    fn from(err: PlacementError) -> Self {
        TurnError::Placement(err)
    }
}

impl From<ActionRejected> for TurnError {
    fn from(err: ActionRejected) -> Self {
        TurnError::Action(err)
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::WrongPhase(p) => write!(f, "Input not accepted during {:?}", p),
            TurnError::InvalidRoll(r) => write!(f, "Fate roll {} is outside 1..=100", r),
            TurnError::Placement(e) => write!(f, "Placement rejected: {}", e),
            TurnError::Action(e) => write!(f, "Action rejected: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ActionRejected {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
#[cfg(feature = "std")]
impl std::error::Error for TurnError {}
