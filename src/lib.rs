#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ability;
pub mod ai;
mod attack_view;
mod board;
mod combatant;
mod common;
mod config;
pub mod fate;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod player;
pub mod prelude;
pub mod resolver;
mod session;
mod ship;
#[cfg(feature = "std")]
mod ui;

pub use ability::*;
pub use attack_view::*;
pub use board::*;
pub use combatant::*;
pub use common::*;
pub use config::*;
pub use fate::{effect_for, roll_die, FateEffect, FateRange, FATE_DIE_SIDES, FATE_TABLE};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::{BotController, Controller};
#[cfg(feature = "std")]
pub use player::CliController;
pub use resolver::{resolve, ActionOutcome, CellOutcome, RadarPing};
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use ui::*;
