use fleet_fate::ai::random_fleet;
use fleet_fate::{AttackResult, Board, CellState, Fleet, Orientation, Ship, FLEET_CATALOG};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64, size: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size);
    let fleet = Fleet::from_catalog(&FLEET_CATALOG);
    let mut ships: Vec<Ship> = fleet.ships().to_vec();
    for intent in random_fleet(&board, &fleet, &mut rng) {
        board
            .place_ship(&mut ships[intent.ship.0], intent.row, intent.col, intent.orientation)
            .unwrap();
    }
    let attacks = rng.random_range(0..size * size / 2);
    for _ in 0..attacks {
        let r = rng.random_range(0..size);
        let c = rng.random_range(0..size);
        let _ = board.apply_attack(r, c);
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn attack_idempotent(seed in any::<u64>(), row in 0usize..10, col in 0usize..10) {
        let mut board = random_board(seed, 10);
        let first = board.apply_attack(row, col).unwrap();
        let after = board.clone();
        let second = board.apply_attack(row, col).unwrap();
        prop_assert_eq!(second, AttackResult::AlreadyAttacked);
        prop_assert_eq!(&board, &after);
        let state = board.cell(row, col).unwrap().state();
        prop_assert!(state == CellState::Hit || state == CellState::Miss);
        if first == AttackResult::AlreadyAttacked {
            prop_assert!(board.cell(row, col).unwrap().is_resolved());
        }
    }

    #[test]
    fn failed_placement_leaves_board_unchanged(
        seed in any::<u64>(),
        size in 10usize..=20,
        length in 1usize..=6,
        row in 0usize..22,
        col in 0usize..22,
        vertical in any::<bool>(),
    ) {
        let mut board = random_board(seed, size);
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let mut ship = Ship::new(fleet_fate::ShipId(99), fleet_fate::ShipType::new("Probe", length));
        let before = board.clone();
        match board.place_ship(&mut ship, row, col, orientation) {
            Ok(()) => {
                prop_assert_eq!(ship.cells().len(), length);
                for &(r, c) in ship.cells() {
                    prop_assert_eq!(board.cell(r, c).unwrap().occupant(), Some(fleet_fate::ShipId(99)));
                }
            }
            Err(_) => {
                prop_assert_eq!(&board, &before);
                prop_assert!(!ship.is_placed());
            }
        }
    }

    #[test]
    fn random_fleet_never_overlaps(seed in any::<u64>(), size in 10usize..=26) {
        let board = random_board(seed, size);
        let occupied = board.count(CellState::Occupied) + board.hit_count();
        prop_assert_eq!(occupied, fleet_fate::TOTAL_SHIP_CELLS);
    }
}
