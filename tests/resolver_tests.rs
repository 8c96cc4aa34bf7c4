use fleet_fate::{
    resolve, Ability, AbilityCosts, ActionIntent, ActionRejected, Combatant, GameConfig, Impact, Mark,
    Orientation, ShipClass, ShipId,
};

const COSTS: AbilityCosts = AbilityCosts::CANONICAL;

fn destroyer_config() -> GameConfig {
    GameConfig::default().with_catalog(&[ShipClass::new("Destroyer", 1, 2)])
}

/// Caster plus a defender with destroyers at (5,4) and (0,0).
fn duel(config: &GameConfig) -> (Combatant, Combatant) {
    let caster = Combatant::new("caster", config);
    let mut defender = Combatant::new("defender", config);
    defender.place_ship(ShipId(0), 5, 4, Orientation::Horizontal).unwrap();
    defender.place_ship(ShipId(1), 0, 0, Orientation::Horizontal).unwrap();
    (caster, defender)
}

/// Cells hit on the defender's board always equal life lost to attacks.
fn assert_life_matches_hits(defender: &Combatant) {
    assert_eq!(
        defender.board().hit_count() as u32,
        defender.initial_life() - defender.life() - defender.fate_penalty()
    );
}

#[test]
fn test_square_rejected_with_two_stamina() {
    let config = destroyer_config().with_starting_stamina(2);
    let (mut caster, mut defender) = duel(&config);
    let (caster_before, defender_before) = (caster.clone(), defender.clone());

    let err = resolve(&mut caster, &mut defender, &ActionIntent::square(5, 4), &COSTS).unwrap_err();
    assert_eq!(
        err,
        ActionRejected::InsufficientStamina {
            needed: 3,
            available: 2
        }
    );
    assert_eq!(caster, caster_before);
    assert_eq!(defender, defender_before);
}

#[test]
fn test_horizontal_line_one_hit_two_misses() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);

    let outcome = resolve(
        &mut caster,
        &mut defender,
        &ActionIntent::line(5, 5, Orientation::Horizontal),
        &COSTS,
    )
    .unwrap();

    let cells: Vec<_> = outcome.cells.iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(cells, vec![(5, 4), (5, 5), (5, 6)]);
    assert_eq!(outcome.hits(), 1);
    assert_eq!(
        outcome.cells[0].impact,
        Impact::Hit {
            ship: ShipId(0),
            sunk: true
        }
    );
    assert_eq!(outcome.cells[1].impact, Impact::Miss);
    assert_eq!(outcome.cells[2].impact, Impact::Miss);
    assert!(outcome.continues_chain());
    assert_eq!(outcome.stamina_spent, 2);
    assert_eq!(caster.stamina(), 3);
    assert_eq!(caster.last_ability(), Some(Ability::Line));
    assert_eq!(defender.life(), 1);
    assert_eq!(caster.attack_view().get(5, 4), Some(Mark::Hit));
    assert_eq!(caster.attack_view().get(5, 6), Some(Mark::Miss));
    assert_life_matches_hits(&defender);
}

#[test]
fn test_vertical_line_clips_to_board() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    let outcome = resolve(
        &mut caster,
        &mut defender,
        &ActionIntent::line(0, 0, Orientation::Vertical),
        &COSTS,
    )
    .unwrap();
    let cells: Vec<_> = outcome.cells.iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(cells, vec![(0, 0), (1, 0)]);
    assert_eq!(outcome.hits(), 1);
}

#[test]
fn test_square_covers_two_by_two_and_clips() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::square(4, 3), &COSTS).unwrap();
    let cells: Vec<_> = outcome.cells.iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(cells, vec![(4, 3), (4, 4), (5, 3), (5, 4)]);
    assert_eq!(outcome.hits(), 1);
    assert_eq!(outcome.sunk().collect::<Vec<_>>(), vec![ShipId(0)]);

    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::normal(9, 9), &COSTS).unwrap();
    assert!(!outcome.continues_chain());
    caster.gain_stamina(3);
    let err = resolve(&mut caster, &mut defender, &ActionIntent::square(9, 9), &COSTS).unwrap_err();
    assert_eq!(err, ActionRejected::AlreadyAttacked);
    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::square(8, 9), &COSTS).unwrap();
    // (9, 9) was already resolved and is skipped
    let cells: Vec<_> = outcome.cells.iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(cells, vec![(8, 9)]);
}

#[test]
fn test_shield_absorbs_exactly_one_hit() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    defender.raise_shield();

    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::normal(5, 4), &COSTS).unwrap();
    assert_eq!(outcome.cells[0].impact, Impact::Shielded(ShipId(0)));
    assert!(!outcome.continues_chain());
    assert!(!defender.shield_active());
    assert_eq!(defender.life(), defender.initial_life());
    assert_eq!(caster.attack_view().get(5, 4), Some(Mark::ShieldBlocked));
    assert_eq!(defender.fleet().get(ShipId(0)).map(|s| s.has_shield()), Some(true));

    // the blocked cell stays targetable
    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::normal(5, 4), &COSTS).unwrap();
    assert_eq!(
        outcome.cells[0].impact,
        Impact::Hit {
            ship: ShipId(0),
            sunk: true
        }
    );
    assert_life_matches_hits(&defender);
}

#[test]
fn test_shield_only_covers_first_intact_cell_of_a_line() {
    let config = destroyer_config();
    let mut caster = Combatant::new("caster", &config);
    let mut defender = Combatant::new("defender", &config);
    defender.place_ship(ShipId(0), 5, 4, Orientation::Horizontal).unwrap();
    defender.place_ship(ShipId(1), 5, 6, Orientation::Horizontal).unwrap();
    defender.raise_shield();

    let outcome = resolve(
        &mut caster,
        &mut defender,
        &ActionIntent::line(5, 5, Orientation::Horizontal),
        &COSTS,
    )
    .unwrap();
    let impacts: Vec<_> = outcome.cells.iter().map(|c| c.impact).collect();
    assert_eq!(
        impacts,
        vec![
            Impact::Shielded(ShipId(0)),
            Impact::Miss,
            Impact::Hit {
                ship: ShipId(1),
                sunk: true
            },
        ]
    );
    assert!(outcome.continues_chain());
    assert_eq!(defender.life(), 1);
}

#[test]
fn test_shield_ability_sets_flag_and_ends_chain() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::shield(), &COSTS).unwrap();
    assert!(caster.shield_active());
    assert!(outcome.cells.is_empty());
    assert!(!outcome.continues_chain());
    assert_eq!(caster.stamina(), 3);
}

#[test]
fn test_radar_marks_nearest_hidden_ship() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    caster.gain_stamina(20);

    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::radar(1, 1), &COSTS).unwrap();
    let ping = outcome.radar.unwrap();
    assert_eq!((ping.row, ping.col), (0, 0));
    assert!((ping.distance - 2f64.sqrt()).abs() < 1e-9);
    assert!(!outcome.continues_chain());
    assert_eq!(caster.attack_view().get(0, 0), Some(Mark::RadarMarked));
    assert_eq!(defender.life(), defender.initial_life());

    // marked cells are skipped on the next sweep
    let outcome = resolve(&mut caster, &mut defender, &ActionIntent::radar(1, 1), &COSTS).unwrap();
    let ping = outcome.radar.unwrap();
    assert_eq!((ping.row, ping.col), (5, 4));
    assert!((ping.distance - 5.0).abs() < 1e-9);

    let stamina = caster.stamina();
    let err = resolve(&mut caster, &mut defender, &ActionIntent::radar(1, 1), &COSTS).unwrap_err();
    assert_eq!(err, ActionRejected::NoValidTarget);
    assert_eq!(caster.stamina(), stamina);
}

#[test]
fn test_already_attacked_and_out_of_bounds_rejected() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    resolve(&mut caster, &mut defender, &ActionIntent::normal(3, 3), &COSTS).unwrap();
    let snapshot = (caster.clone(), defender.clone());

    assert_eq!(
        resolve(&mut caster, &mut defender, &ActionIntent::normal(3, 3), &COSTS),
        Err(ActionRejected::AlreadyAttacked)
    );
    assert_eq!(
        resolve(&mut caster, &mut defender, &ActionIntent::normal(10, 0), &COSTS),
        Err(ActionRejected::OutOfBounds)
    );
    assert_eq!(
        resolve(&mut caster, &mut defender, &ActionIntent::line(3, 10, Orientation::Horizontal), &COSTS),
        Err(ActionRejected::OutOfBounds)
    );
    assert_eq!((caster, defender), snapshot);
}

#[test]
fn test_radar_from_resolved_cell_rejected() {
    let config = destroyer_config();
    let (mut caster, mut defender) = duel(&config);
    caster.gain_stamina(10);
    resolve(&mut caster, &mut defender, &ActionIntent::normal(3, 3), &COSTS).unwrap();
    assert_eq!(caster.attack_view().get(3, 3), Some(Mark::Miss));
    let snapshot = (caster.clone(), defender.clone());

    assert_eq!(
        resolve(&mut caster, &mut defender, &ActionIntent::radar(3, 3), &COSTS),
        Err(ActionRejected::AlreadyAttacked)
    );
    assert_eq!((caster, defender), snapshot);
}

#[test]
fn test_disabled_radar_is_rejected() {
    let config = destroyer_config().without_radar();
    let (mut caster, mut defender) = duel(&config);
    assert_eq!(
        resolve(&mut caster, &mut defender, &ActionIntent::radar(0, 0), &config.costs),
        Err(ActionRejected::Disabled)
    );
}
