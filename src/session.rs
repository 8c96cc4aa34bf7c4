//! Imperative shell around [`GameEngine`]: asks each side's controller for
//! input, feeds it to the engine and reports transitions back.

use alloc::boxed::Box;

use rand::rngs::SmallRng;

use crate::combatant::Side;
use crate::common::TurnError;
use crate::game::{GameEngine, Phase, Transition};
use crate::player::Controller;

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum SessionEnd {
    Winner(Side),
    /// The side's controller stopped providing input.
    Abandoned(Side),
}

pub struct Session {
    engine: GameEngine,
    player: Box<dyn Controller>,
    bot: Box<dyn Controller>,
    actions: usize,
    rejections: usize,
}

impl Session {
    pub fn new(engine: GameEngine, player: Box<dyn Controller>, bot: Box<dyn Controller>) -> Self {
        Self {
            engine,
            player,
            bot,
            actions: 0,
            rejections: 0,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Actions resolved so far, both sides together.
    pub fn action_count(&self) -> usize {
        self.actions
    }

    /// Intents the engine refused so far.
    pub fn rejection_count(&self) -> usize {
        self.rejections
    }

    /// Drive the game until someone wins or a controller gives up.
    pub fn run(&mut self, rng: &mut SmallRng) -> Result<SessionEnd, TurnError> {
        loop {
            if let Some(end) = self.step(rng)? {
                return Ok(end);
            }
        }
    }

    /// Ask for and apply one input. Returns `Some` once the session is over.
    pub fn step(&mut self, rng: &mut SmallRng) -> Result<Option<SessionEnd>, TurnError> {
        let Session {
            engine,
            player,
            bot,
            actions,
            rejections,
        } = self;
        let phase = engine.phase();
        let result = match phase {
            Phase::GameOver { winner } => return Ok(Some(SessionEnd::Winner(winner))),
            Phase::PlacingBotFleet => engine.place_bot_fleet(rng),
            Phase::PlacingPlayerFleet => {
                let me = engine.player();
                let ship = me.fleet().next_unplaced().cloned();
                let intent = ship.and_then(|s| player.place_ship(rng, me, &s));
                match intent {
                    Some(intent) => engine.place(intent),
                    None => engine.place_random(rng),
                }
            }
            Phase::FateRoll(side) => {
                let roll = controller(player, bot, side).roll_fate(rng);
                engine.roll_fate(roll)
            }
            Phase::AttackChain(side) => {
                let costs = engine.config().costs;
                let me = engine.combatant(side);
                let Some(intent) = controller(player, bot, side).choose_action(rng, me, &costs) else {
                    log::info!("{} abandoned the game", me.name());
                    return Ok(Some(SessionEnd::Abandoned(side)));
                };
                engine.act(intent).inspect(|_| *actions += 1)
            }
        };

        match result {
            Ok(transition) => {
                notify(engine, player.as_mut(), bot.as_mut(), &transition);
                Ok(None)
            }
            Err(err @ TurnError::WrongPhase(_)) => Err(err),
            Err(err) => {
                *rejections += 1;
                match phase.active_side() {
                    Some(side) if phase != Phase::PlacingBotFleet => {
                        controller(player, bot, side).handle_rejection(&err);
                        Ok(None)
                    }
                    _ => Err(err),
                }
            }
        }
    }
}

fn controller<'a>(
    player: &'a mut Box<dyn Controller>,
    bot: &'a mut Box<dyn Controller>,
    side: Side,
) -> &'a mut dyn Controller {
    match side {
        Side::Player => player.as_mut(),
        Side::Bot => bot.as_mut(),
    }
}

fn notify(engine: &GameEngine, player: &mut dyn Controller, bot: &mut dyn Controller, transition: &Transition) {
    player.handle_transition(engine.player(), transition);
    bot.handle_transition(engine.bot(), transition);
}
