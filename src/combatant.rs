//! A combatant: its board, fleet, knowledge of the opponent and counters.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ability::Ability;
use crate::attack_view::AttackView;
use crate::board::Board;
use crate::common::{ActionRejected, AttackResult, Impact, PlacementError};
use crate::config::GameConfig;
use crate::ship::{Fleet, Orientation, ShipId};

/// Which seat a combatant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    name: String,
    board: Board,
    fleet: Fleet,
    attack_view: AttackView,
    initial_life: u32,
    life: u32,
    stamina: u32,
    turn_skipped: bool,
    shield_active: bool,
    last_ability: Option<Ability>,
    fate_penalty: u32,
}

impl Combatant {
    /// Fresh combatant with an empty board and an unplaced fleet.
    pub fn new(name: &str, config: &GameConfig) -> Self {
        let fleet = Fleet::from_catalog(&config.catalog);
        let life = fleet.total_cells() as u32;
        Combatant {
            name: String::from(name),
            board: Board::new(config.board_size),
            fleet,
            attack_view: AttackView::new(config.board_size),
            initial_life: life,
            life,
            stamina: config.starting_stamina,
            turn_skipped: false,
            shield_active: false,
            last_ability: None,
            fate_penalty: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn attack_view(&self) -> &AttackView {
        &self.attack_view
    }

    pub(crate) fn attack_view_mut(&mut self) -> &mut AttackView {
        &mut self.attack_view
    }

    pub fn initial_life(&self) -> u32 {
        self.initial_life
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn is_destroyed(&self) -> bool {
        self.life == 0
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn turn_skipped(&self) -> bool {
        self.turn_skipped
    }

    pub fn last_ability(&self) -> Option<Ability> {
        self.last_ability
    }

    /// Life lost to fate rather than to enemy fire.
    pub fn fate_penalty(&self) -> u32 {
        self.fate_penalty
    }

    /// Place one of our own ships.
    pub fn place_ship(
        &mut self,
        ship: ShipId,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let ship = self.fleet.get_mut(ship).ok_or(PlacementError::UnknownShip)?;
        self.board.place_ship(ship, row, col, orientation)
    }

    /// Take an incoming attack on (`row`, `col`). An active shield turns a
    /// would-be hit into [`Impact::Shielded`] and is consumed.
    pub(crate) fn receive_attack(&mut self, row: usize, col: usize) -> Result<Impact, ActionRejected> {
        let cell = *self.board.cell(row, col).ok_or(ActionRejected::OutOfBounds)?;
        if cell.is_resolved() {
            return Ok(Impact::AlreadyAttacked);
        }
        if self.shield_active && cell.is_intact_ship() {
            if let Some(id) = self.board.mark_shielded(row, col) {
                self.shield_active = false;
                if let Some(ship) = self.fleet.get_mut(id) {
                    ship.record_shield();
                }
                log::debug!("{}: shield absorbed hit at ({}, {})", self.name, row, col);
                return Ok(Impact::Shielded(id));
            }
        }
        match self.board.apply_attack(row, col)? {
            AttackResult::Hit(id) => {
                self.life = self.life.saturating_sub(1);
                let sunk = self.fleet.get_mut(id).is_some_and(|s| s.register_hit());
                Ok(Impact::Hit { ship: id, sunk })
            }
            AttackResult::Miss => Ok(Impact::Miss),
            AttackResult::AlreadyAttacked => Ok(Impact::AlreadyAttacked),
        }
    }

    pub(crate) fn spend_stamina(&mut self, cost: u32) {
        self.stamina = self.stamina.saturating_sub(cost);
    }

    pub fn gain_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_add(amount);
    }

    pub(crate) fn lose_life_to_fate(&mut self, amount: u32) {
        let lost = amount.min(self.life);
        self.life -= lost;
        self.fate_penalty += lost;
    }

    pub fn raise_shield(&mut self) {
        self.shield_active = true;
    }

    pub(crate) fn skip_next_turn(&mut self) {
        self.turn_skipped = true;
    }

    /// Clear the skip flag, returning whether it was set.
    pub(crate) fn take_skip(&mut self) -> bool {
        core::mem::take(&mut self.turn_skipped)
    }

    pub(crate) fn set_last_ability(&mut self, ability: Ability) {
        self.last_ability = Some(ability);
    }

    /// End-of-turn stamina regeneration: +2 after a normal attack, +1
    /// after anything else. Returns the amount granted.
    pub(crate) fn regenerate(&mut self) -> u32 {
        let amount = match self.last_ability {
            Some(Ability::Normal) => 2,
            _ => 1,
        };
        self.gain_stamina(amount);
        amount
    }

    /// Read-only counters for renderers.
    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            life: self.life,
            initial_life: self.initial_life,
            stamina: self.stamina,
            shield_active: self.shield_active,
            ships: self
                .fleet
                .iter()
                .map(|s| ShipStatus {
                    name: s.name(),
                    length: s.length(),
                    hits: s.hits(),
                    sunk: s.is_sunk(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipStatus {
    pub name: &'static str,
    pub length: usize,
    pub hits: usize,
    pub sunk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct CombatantSnapshot {
    pub name: String,
    pub life: u32,
    pub initial_life: u32,
    pub stamina: u32,
    pub shield_active: bool,
    pub ships: Vec<ShipStatus>,
}
