// Bot decision policy: randomized ability choice, uniform targeting and
// rejection-sampled fleet placement. Reads only the bot's own state and its
// attack view, never the opponent's board.

use alloc::vec::Vec;

use rand::Rng;

use crate::ability::{Ability, AbilityCosts, ActionIntent};
use crate::attack_view::AttackView;
use crate::board::Board;
use crate::game::PlacementIntent;
use crate::ship::{Fleet, Orientation};

/// Below this much stamina the bot only uses normal attacks.
pub const SPECIAL_STAMINA_THRESHOLD: u32 = 4;

fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Orientation {
    if rng.random() {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    }
}

/// Pick an ability uniformly among those `stamina` can pay for.
pub fn choose_ability<R: Rng + ?Sized>(stamina: u32, costs: &AbilityCosts, rng: &mut R) -> Ability {
    if stamina < SPECIAL_STAMINA_THRESHOLD {
        return Ability::Normal;
    }
    let options: Vec<Ability> = costs.affordable(stamina).collect();
    if options.is_empty() {
        return Ability::Normal;
    }
    options[rng.random_range(0..options.len())]
}

/// Uniform choice among cells not yet `Hit`/`Miss` in `view`.
pub fn choose_target<R: Rng + ?Sized>(view: &AttackView, rng: &mut R) -> Option<(usize, usize)> {
    let open: Vec<(usize, usize)> = view.open_cells().collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Full bot decision for one action. `None` once `view` has no open cell
/// left to aim at.
pub fn choose_action<R: Rng + ?Sized>(
    view: &AttackView,
    stamina: u32,
    costs: &AbilityCosts,
    rng: &mut R,
) -> Option<ActionIntent> {
    let ability = choose_ability(stamina, costs, rng);
    intent_for(ability, view, rng)
}

/// Normal attack on a fresh random target.
pub fn choose_normal<R: Rng + ?Sized>(view: &AttackView, rng: &mut R) -> Option<ActionIntent> {
    intent_for(Ability::Normal, view, rng)
}

fn intent_for<R: Rng + ?Sized>(ability: Ability, view: &AttackView, rng: &mut R) -> Option<ActionIntent> {
    if ability == Ability::Shield {
        return Some(ActionIntent::shield());
    }
    let (row, col) = choose_target(view, rng)?;
    Some(match ability {
        Ability::Radar => ActionIntent::radar(row, col),
        _ => ActionIntent::new(ability, row, col, random_orientation(rng)),
    })
}

/// Sample uniform (origin, orientation) pairs until one fits. Returns `None`
/// only when no position on the board can hold the ship.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    length: usize,
    rng: &mut R,
) -> Option<(usize, usize, Orientation)> {
    if !board.has_room(length) {
        return None;
    }
    let size = board.size();
    loop {
        let orientation = random_orientation(rng);
        let row = rng.random_range(0..size);
        let col = rng.random_range(0..size);
        if board.check_run(length, row, col, orientation).is_ok() {
            return Some((row, col, orientation));
        }
    }
}

/// Placements for every unplaced ship of `fleet`, computed on a scratch
/// copy of `board`. If an earlier random choice boxes a later ship out the
/// whole layout is redrawn.
pub fn random_fleet<R: Rng + ?Sized>(board: &Board, fleet: &Fleet, rng: &mut R) -> Vec<PlacementIntent> {
    'layout: loop {
        let mut scratch_board = board.clone();
        let mut scratch_fleet = fleet.clone();
        let mut intents = Vec::new();
        let pending: Vec<_> = fleet.iter().filter(|s| !s.is_placed()).map(|s| s.id()).collect();
        for id in pending {
            let Some(ship) = scratch_fleet.get_mut(id) else {
                continue;
            };
            let Some((row, col, orientation)) = random_placement(&scratch_board, ship.length(), rng) else {
                log::debug!("no room left for {}, redrawing fleet layout", ship.name());
                continue 'layout;
            };
            if scratch_board.place_ship(ship, row, col, orientation).is_err() {
                continue 'layout;
            }
            intents.push(PlacementIntent {
                ship: id,
                row,
                col,
                orientation,
            });
        }
        return intents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FLEET_CATALOG;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn low_stamina_always_normal() {
        let mut rng = SmallRng::seed_from_u64(7);
        for stamina in 0..SPECIAL_STAMINA_THRESHOLD {
            for _ in 0..20 {
                assert_eq!(
                    choose_ability(stamina, &AbilityCosts::CANONICAL, &mut rng),
                    Ability::Normal
                );
            }
        }
    }

    #[test]
    fn random_fleet_covers_every_ship() {
        let mut rng = SmallRng::seed_from_u64(3);
        let board = Board::new(10);
        let fleet = Fleet::from_catalog(&FLEET_CATALOG);
        let intents = random_fleet(&board, &fleet, &mut rng);
        assert_eq!(intents.len(), fleet.len());
    }

    #[test]
    fn no_target_on_fully_resolved_view() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut view = AttackView::new(2);
        for r in 0..2 {
            for c in 0..2 {
                view.set(r, c, crate::attack_view::Mark::Miss);
            }
        }
        assert_eq!(choose_target(&view, &mut rng), None);
        assert_eq!(choose_normal(&view, &mut rng), None);
        assert_eq!(
            choose_action(&view, 10, &AbilityCosts::CANONICAL, &mut rng),
            None
        );
    }
}
