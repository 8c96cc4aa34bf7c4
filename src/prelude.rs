//! Commonly used types and utilities for ease of import.

pub use crate::{
    Ability, ActionIntent, BotController, Controller, GameConfig, GameEngine, Orientation, Phase,
    PlacementIntent, Session, SessionEnd, Side, TurnError,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, print_player_view, CliController};
