use rand::rngs::SmallRng;

use crate::ability::{AbilityCosts, ActionIntent};
use crate::ai;
use crate::combatant::Combatant;
use crate::common::TurnError;
use crate::fate;
use crate::game::PlacementIntent;
use crate::ship::Ship;

use super::Controller;

/// Bot driven by the randomized policy in [`crate::ai`].
#[derive(Debug, Default)]
pub struct BotController {
    fallback: bool,
}

impl BotController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Controller for BotController {
    fn place_ship(&mut self, _rng: &mut SmallRng, _me: &Combatant, _ship: &Ship) -> Option<PlacementIntent> {
        None
    }

    fn roll_fate(&mut self, rng: &mut SmallRng) -> u8 {
        fate::roll_die(rng)
    }

    fn choose_action(
        &mut self,
        rng: &mut SmallRng,
        me: &Combatant,
        costs: &AbilityCosts,
    ) -> Option<ActionIntent> {
        let view = me.attack_view();
        let intent = if core::mem::take(&mut self.fallback) {
            ai::choose_normal(view, rng)
        } else {
            ai::choose_action(view, me.stamina(), costs, rng)
        };
        if intent.is_none() {
            log::warn!("{} has no open cell left to target, giving up", me.name());
        }
        intent
    }

    fn handle_rejection(&mut self, err: &TurnError) {
        log::debug!("bot action rejected ({}), falling back to a normal attack", err);
        self.fallback = true;
    }
}
