//! Ability resolution.
//!
//! A single code path resolves every ability for either side: the engine
//! hands in whichever combatant is acting as `caster` and the other as
//! `defender`. Validation happens up front so a rejected action never
//! mutates anything or charges stamina.

use alloc::vec::Vec;

use crate::ability::{affected_cells, Ability, AbilityCosts, ActionIntent};
use crate::attack_view::{AttackView, Mark};
use crate::board::{Board, CellState};
use crate::combatant::Combatant;
use crate::common::{ActionRejected, Impact};
use crate::ship::ShipId;

/// Result for one attacked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct CellOutcome {
    pub row: usize,
    pub col: usize,
    pub impact: Impact,
}

/// Cell revealed by a radar sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct RadarPing {
    pub row: usize,
    pub col: usize,
    /// Euclidean distance from the scan origin.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ActionOutcome {
    pub ability: Ability,
    pub stamina_spent: u32,
    pub cells: Vec<CellOutcome>,
    /// Some cell took an unblocked hit.
    pub any_hit: bool,
    pub radar: Option<RadarPing>,
}

impl ActionOutcome {
    /// A damaging ability that landed lets the same side act again.
    pub fn continues_chain(&self) -> bool {
        self.ability.is_damaging() && self.any_hit
    }

    pub fn hits(&self) -> usize {
        self.cells.iter().filter(|c| c.impact.is_hit()).count()
    }

    /// Ships sunk by this action.
    pub fn sunk(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.cells.iter().filter_map(|c| match c.impact {
            Impact::Hit { ship, sunk: true } => Some(ship),
            _ => None,
        })
    }
}

/// Resolve `intent` cast by `caster` against `defender`.
pub fn resolve(
    caster: &mut Combatant,
    defender: &mut Combatant,
    intent: &ActionIntent,
    costs: &AbilityCosts,
) -> Result<ActionOutcome, ActionRejected> {
    let ability = intent.ability;
    let cost = costs.cost(ability).ok_or(ActionRejected::Disabled)?;
    if caster.stamina() < cost {
        return Err(ActionRejected::InsufficientStamina {
            needed: cost,
            available: caster.stamina(),
        });
    }

    let (row, col) = (intent.row, intent.col);
    let size = defender.board().size();
    let mut cells = Vec::new();
    let mut ping = None;
    if ability.needs_target() {
        if row >= size || col >= size {
            return Err(ActionRejected::OutOfBounds);
        }
        if caster.attack_view().is_resolved(row, col) {
            return Err(ActionRejected::AlreadyAttacked);
        }
        if ability == Ability::Radar {
            let found = nearest_hidden_ship(caster.attack_view(), defender.board(), row, col)
                .ok_or(ActionRejected::NoValidTarget)?;
            ping = Some(found);
        } else {
            cells = affected_cells(ability, row, col, intent.orientation, size);
            if cells.is_empty() {
                return Err(ActionRejected::OutOfBounds);
            }
        }
    }

    caster.spend_stamina(cost);
    caster.set_last_ability(ability);
    let mut outcome = ActionOutcome {
        ability,
        stamina_spent: cost,
        cells: Vec::with_capacity(cells.len()),
        any_hit: false,
        radar: None,
    };

    match ability {
        Ability::Shield => caster.raise_shield(),
        Ability::Radar => {
            if let Some((r, c, dist_sq)) = ping {
                caster.attack_view_mut().set(r, c, Mark::RadarMarked);
                outcome.radar = Some(RadarPing {
                    row: r,
                    col: c,
                    distance: libm::sqrt(dist_sq as f64),
                });
            }
        }
        Ability::Normal | Ability::Line | Ability::Square => {
            for (r, c) in cells {
                if caster.attack_view().is_resolved(r, c) {
                    continue;
                }
                let impact = defender.receive_attack(r, c)?;
                let mark = match impact {
                    Impact::Hit { .. } => Mark::Hit,
                    Impact::Miss => Mark::Miss,
                    Impact::Shielded(_) => Mark::ShieldBlocked,
                    Impact::AlreadyAttacked => match defender.board().cell(r, c).map(|cell| cell.state()) {
                        Some(CellState::Hit) => Mark::Hit,
                        _ => Mark::Miss,
                    },
                };
                caster.attack_view_mut().set(r, c, mark);
                outcome.any_hit |= impact.is_hit();
                outcome.cells.push(CellOutcome { row: r, col: c, impact });
            }
        }
    }

    log::debug!(
        "{} used {} at ({}, {}): {} hit(s), stamina {} -> {}",
        caster.name(),
        ability,
        row,
        col,
        outcome.hits(),
        caster.stamina() + cost,
        caster.stamina()
    );
    Ok(outcome)
}

/// Closest intact enemy ship cell to (`row`, `col`) that the caster has not
/// already marked, ties broken row-major. Returns the squared distance.
fn nearest_hidden_ship(
    view: &AttackView,
    board: &Board,
    row: usize,
    col: usize,
) -> Option<(usize, usize, usize)> {
    board
        .intact_ship_cells()
        .filter(|&(r, c)| view.get(r, c) != Some(Mark::RadarMarked))
        .map(|(r, c)| {
            let dr = r.abs_diff(row);
            let dc = c.abs_diff(col);
            (r, c, dr * dr + dc * dc)
        })
        .min_by_key(|&(r, c, d)| (d, r, c))
}
