//! Turn state machine.
//!
//! [`GameEngine::step`] is the single transition function: it takes the
//! current phase plus one input and produces the next phase and what
//! happened. It performs no I/O and draws no random numbers; dice rolls and
//! random placements are produced by callers and passed in as inputs.

use alloc::vec::Vec;

use rand::Rng;

use crate::ability::ActionIntent;
use crate::ai;
use crate::combatant::{Combatant, CombatantSnapshot, Side};
use crate::common::{ConfigError, PlacementError, TurnError};
use crate::config::GameConfig;
use crate::fate::{self, FateEffect};
use crate::resolver::{self, ActionOutcome};
use crate::ship::{Orientation, ShipId};

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Phase {
    PlacingPlayerFleet,
    PlacingBotFleet,
    FateRoll(Side),
    AttackChain(Side),
    GameOver { winner: Side },
}

impl Phase {
    /// Side expected to provide the next input, if any.
    pub fn active_side(&self) -> Option<Side> {
        match *self {
            Phase::PlacingPlayerFleet => Some(Side::Player),
            Phase::PlacingBotFleet => Some(Side::Bot),
            Phase::FateRoll(side) | Phase::AttackChain(side) => Some(side),
            Phase::GameOver { .. } => None,
        }
    }
}

/// Request to put one ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementIntent {
    pub ship: ShipId,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// One input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    /// Place a single ship of the side currently deploying.
    Place(PlacementIntent),
    /// Place every remaining ship at once; all or nothing.
    Deploy(Vec<PlacementIntent>),
    /// Fate roll in 1..=100.
    Fate(u8),
    Act(ActionIntent),
}

/// What a successful step did.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum TurnEvent {
    ShipPlaced {
        side: Side,
        ship: ShipId,
    },
    FleetDeployed {
        side: Side,
    },
    Fate {
        side: Side,
        roll: u8,
        effect: FateEffect,
        skipped: bool,
    },
    Action {
        side: Side,
        outcome: ActionOutcome,
        /// Stamina granted if this action ended the turn.
        regenerated: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Transition {
    pub phase: Phase,
    pub event: TurnEvent,
}

/// Read-only view for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub round: u32,
    pub player: CombatantSnapshot,
    pub bot: CombatantSnapshot,
}

/// Owns both combatants and drives the game through its phases.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    player: Combatant,
    bot: Combatant,
    phase: Phase,
    round: u32,
}

impl GameEngine {
    /// Validate `config` and set up a fresh game awaiting the player's fleet.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Combatant::new(&config.player_name, &config);
        let bot = Combatant::new(&config.bot_name, &config);
        Ok(GameEngine {
            config,
            player,
            bot,
            phase: Phase::PlacingPlayerFleet,
            round: 0,
        })
    }

    /// Discard both combatants and start over with the same configuration.
    pub fn restart(&mut self) {
        self.player = Combatant::new(&self.config.player_name, &self.config);
        self.bot = Combatant::new(&self.config.bot_name, &self.config);
        self.phase = Phase::PlacingPlayerFleet;
        self.round = 0;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed player turns plus one; zero during setup.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn bot(&self) -> &Combatant {
        &self.bot
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Bot => &self.bot,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Bot => &mut self.bot,
        }
    }

    /// Split into (acting, opposing) combatants.
    fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        match side {
            Side::Player => (&mut self.player, &mut self.bot),
            Side::Bot => (&mut self.bot, &mut self.player),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            player: self.player.snapshot(),
            bot: self.bot.snapshot(),
        }
    }

    /// Apply one input. Inputs that do not fit the current phase, or that
    /// are invalid, leave the engine untouched.
    pub fn step(&mut self, input: TurnInput) -> Result<Transition, TurnError> {
        let event = match (self.phase, input) {
            (Phase::PlacingPlayerFleet, TurnInput::Place(intent)) => self.place_one(Side::Player, intent)?,
            (Phase::PlacingBotFleet, TurnInput::Place(intent)) => self.place_one(Side::Bot, intent)?,
            (Phase::PlacingPlayerFleet, TurnInput::Deploy(intents)) => self.deploy(Side::Player, &intents)?,
            (Phase::PlacingBotFleet, TurnInput::Deploy(intents)) => self.deploy(Side::Bot, &intents)?,
            (Phase::FateRoll(side), TurnInput::Fate(roll)) => self.apply_fate(side, roll)?,
            (Phase::AttackChain(side), TurnInput::Act(intent)) => self.apply_action(side, intent)?,
            (phase, _) => return Err(TurnError::WrongPhase(phase)),
        };
        Ok(Transition {
            phase: self.phase,
            event,
        })
    }

    pub fn place(&mut self, intent: PlacementIntent) -> Result<Transition, TurnError> {
        self.step(TurnInput::Place(intent))
    }

    /// Place the deploying side's next ship at a random valid spot.
    pub fn place_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Transition, TurnError> {
        let side = match self.phase {
            Phase::PlacingPlayerFleet => Side::Player,
            Phase::PlacingBotFleet => Side::Bot,
            phase => return Err(TurnError::WrongPhase(phase)),
        };
        let me = self.combatant(side);
        let ship = me
            .fleet()
            .next_unplaced()
            .ok_or(PlacementError::AlreadyPlaced)?;
        let (row, col, orientation) =
            ai::random_placement(me.board(), ship.length(), rng).ok_or(PlacementError::Overlap)?;
        let intent = PlacementIntent {
            ship: ship.id(),
            row,
            col,
            orientation,
        };
        self.place(intent)
    }

    /// Deploy the bot's whole fleet by uniform rejection sampling.
    pub fn place_bot_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Transition, TurnError> {
        if self.phase != Phase::PlacingBotFleet {
            return Err(TurnError::WrongPhase(self.phase));
        }
        let intents = ai::random_fleet(self.bot.board(), self.bot.fleet(), rng);
        self.step(TurnInput::Deploy(intents))
    }

    pub fn roll_fate(&mut self, roll: u8) -> Result<Transition, TurnError> {
        self.step(TurnInput::Fate(roll))
    }

    pub fn act(&mut self, intent: ActionIntent) -> Result<Transition, TurnError> {
        self.step(TurnInput::Act(intent))
    }

    fn place_one(&mut self, side: Side, intent: PlacementIntent) -> Result<TurnEvent, TurnError> {
        self.combatant_mut(side)
            .place_ship(intent.ship, intent.row, intent.col, intent.orientation)?;
        log::debug!(
            "{:?} placed ship {} at ({}, {}) {:?}",
            side,
            intent.ship,
            intent.row,
            intent.col,
            intent.orientation
        );
        self.finish_placement(side);
        Ok(TurnEvent::ShipPlaced {
            side,
            ship: intent.ship,
        })
    }

    fn deploy(&mut self, side: Side, intents: &[PlacementIntent]) -> Result<TurnEvent, TurnError> {
        let mut staged = self.combatant(side).clone();
        for intent in intents {
            staged.place_ship(intent.ship, intent.row, intent.col, intent.orientation)?;
        }
        if !staged.fleet().all_placed() {
            return Err(PlacementError::FleetIncomplete.into());
        }
        *self.combatant_mut(side) = staged;
        self.finish_placement(side);
        Ok(TurnEvent::FleetDeployed { side })
    }

    fn finish_placement(&mut self, side: Side) {
        if !self.combatant(side).fleet().all_placed() {
            return;
        }
        self.phase = match side {
            Side::Player => Phase::PlacingBotFleet,
            Side::Bot => {
                self.round = 1;
                Phase::FateRoll(Side::Player)
            }
        };
        log::info!("{:?} fleet deployed, entering {:?}", side, self.phase);
    }

    fn apply_fate(&mut self, side: Side, roll: u8) -> Result<TurnEvent, TurnError> {
        let effect = fate::effect_for(roll).ok_or(TurnError::InvalidRoll(roll))?;
        let me = self.combatant_mut(side);
        effect.apply(me);
        let skipped = me.take_skip();
        log::info!("{} rolled {}: {}", me.name(), roll, effect.message());

        if !self.check_game_over() {
            if skipped {
                self.pass_turn(side);
            } else {
                self.phase = Phase::AttackChain(side);
            }
        }
        Ok(TurnEvent::Fate {
            side,
            roll,
            effect,
            skipped,
        })
    }

    fn apply_action(&mut self, side: Side, intent: ActionIntent) -> Result<TurnEvent, TurnError> {
        let costs = self.config.costs;
        let (caster, defender) = self.pair_mut(side);
        let outcome = resolver::resolve(caster, defender, &intent, &costs)?;

        let mut regenerated = None;
        if !self.check_game_over() && !outcome.continues_chain() {
            regenerated = Some(self.combatant_mut(side).regenerate());
            self.pass_turn(side);
        }
        Ok(TurnEvent::Action {
            side,
            outcome,
            regenerated,
        })
    }

    fn pass_turn(&mut self, side: Side) {
        let next = side.opponent();
        if next == Side::Player {
            self.round += 1;
        }
        self.phase = Phase::FateRoll(next);
        log::debug!("turn passes to {:?} (round {})", next, self.round);
    }

    /// Move to `GameOver` if either side is out of life.
    fn check_game_over(&mut self) -> bool {
        let winner = if self.player.is_destroyed() {
            Side::Bot
        } else if self.bot.is_destroyed() {
            Side::Player
        } else {
            return false;
        };
        self.phase = Phase::GameOver { winner };
        log::info!("game over after round {}: {:?} wins", self.round, winner);
        true
    }
}
