//! Controller trait and implementations
//!
//! A controller is the input collaborator for one side of the table. It
//! turns whatever it knows into intents the engine can validate:
//! - BotController: the randomized bot policy
//! - CliController: interactive terminal player
//!
//! Controllers only ever see their own combatant. The opponent is visible
//! through that combatant's attack view and nothing else.

use rand::rngs::SmallRng;

use crate::ability::{AbilityCosts, ActionIntent};
use crate::combatant::Combatant;
use crate::common::TurnError;
use crate::game::{PlacementIntent, Transition};
use crate::ship::Ship;

pub trait Controller {
    /// Choose where `ship` goes. `None` asks for a random valid spot.
    fn place_ship(&mut self, rng: &mut SmallRng, me: &Combatant, ship: &Ship) -> Option<PlacementIntent>;

    /// Produce this turn's fate roll.
    fn roll_fate(&mut self, rng: &mut SmallRng) -> u8;

    /// Choose the next action. `None` means the controller gives up.
    fn choose_action(
        &mut self,
        rng: &mut SmallRng,
        me: &Combatant,
        costs: &AbilityCosts,
    ) -> Option<ActionIntent>;

    /// The engine refused the last intent; the controller will be asked again.
    fn handle_rejection(&mut self, _err: &TurnError) {}

    /// Something happened in the game that this side may want to show.
    fn handle_transition(&mut self, _me: &Combatant, _transition: &Transition) {}
}

pub mod ai;
pub use ai::BotController;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliController;
