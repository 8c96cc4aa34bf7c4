#![cfg(feature = "std")]

//! Terminal rendering of boards, status panels and turn reports.

use std::string::String;

use crate::{
    ability::Ability,
    attack_view::{AttackView, Mark},
    board::CellState,
    combatant::{Combatant, CombatantSnapshot, Side},
    common::Impact,
    game::{GameEngine, Phase, Snapshot, Transition, TurnEvent},
};

/// Column letter plus 1-based row, e.g. `(4, 0)` is `A5`.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    std::format!("{}{}", col, r + 1)
}

fn print_frame<I>(size: usize, rows: I)
where
    I: Iterator<Item = Vec<char>>,
{
    let bar = "═".repeat(2 * size + 4);
    std::println!("    ╔{}╗", bar);
    std::print!("    ║   ");
    for c in 0..size {
        let ch = (b'A' + c as u8) as char;
        std::print!(" {}", ch);
    }
    std::println!(" ║");
    std::println!("    ╠{}╣", bar);
    for (r, row) in rows.enumerate() {
        std::print!("    ║ {:2}", r + 1);
        for ch in row {
            std::print!(" {}", ch);
        }
        std::println!(" ║");
    }
    std::println!("    ╚{}╝", bar);
}

/// Our own board with ships revealed, followed by the fleet roster.
pub fn print_own_board(me: &Combatant) {
    let board = me.board();
    let rows = board.rows().map(|row| {
        row.iter()
            .map(|cell| match cell.state() {
                CellState::Empty => '.',
                CellState::Occupied => 'S',
                CellState::Miss => 'o',
                CellState::Hit => 'X',
                CellState::Shielded => '#',
            })
            .collect()
    });
    print_frame(board.size(), rows);
    std::println!("    Legend: S=Ship  X=Hit  o=Miss  #=Shielded  .=Water");

    std::println!("\n    Ships:");
    for ship in me.fleet() {
        let status = if ship.is_sunk() {
            "SUNK"
        } else if ship.hits() > 0 {
            "Damaged"
        } else {
            "Active"
        };
        std::println!(
            "      {} ({}): {} [{}/{}]",
            ship.name(),
            ship.length(),
            status,
            ship.hits(),
            ship.length()
        );
    }
}

/// What we know about the opponent's waters.
pub fn print_attack_view(view: &AttackView) {
    let rows = view.rows().map(|row| {
        row.iter()
            .map(|mark| match mark {
                Mark::Unknown => '.',
                Mark::Miss => 'o',
                Mark::Hit => 'X',
                Mark::ShieldBlocked => '#',
                Mark::RadarMarked => '?',
            })
            .collect()
    });
    print_frame(view.size(), rows);
    std::println!("    Legend: X=Hit  o=Miss  #=Blocked  ?=Radar contact  .=Unknown");
}

fn print_panel(s: &CombatantSnapshot) {
    let afloat = s.ships.iter().filter(|ship| !ship.sunk).count();
    std::println!(
        "  {:<10} life {:>2}/{:<2}  stamina {:>2}  ships {:>2}/{:<2}{}",
        s.name,
        s.life,
        s.initial_life,
        s.stamina,
        afloat,
        s.ships.len(),
        if s.shield_active { "  [shield up]" } else { "" }
    );
}

pub fn print_status(snapshot: &Snapshot) {
    let title = match snapshot.phase {
        Phase::PlacingPlayerFleet | Phase::PlacingBotFleet => "FLEET PLACEMENT",
        Phase::FateRoll(_) => "FATE ROLL",
        Phase::AttackChain(_) => "ATTACK",
        Phase::GameOver { .. } => "GAME OVER",
    };
    std::println!("\n════════════════════════════════════════════════════════════");
    std::println!("  {}  (round {})", title, snapshot.round);
    std::println!("════════════════════════════════════════════════════════════");
    print_panel(&snapshot.player);
    print_panel(&snapshot.bot);
}

/// Display the status panel, the opponent board (top) and the player's board (bottom).
pub fn print_player_view(engine: &GameEngine) {
    print_status(&engine.snapshot());
    std::println!("\nEnemy waters:");
    print_attack_view(engine.player().attack_view());
    std::println!("\nYour fleet:");
    print_own_board(engine.player());
}

fn actor(viewer: Side, side: Side) -> &'static str {
    if viewer == side {
        "You"
    } else {
        "Enemy"
    }
}

/// Human-readable report of `transition` as seen from `viewer`'s seat.
/// `me` is the viewer's combatant and is used to name our own ships.
pub fn describe_transition(viewer: Side, me: &Combatant, transition: &Transition) -> Vec<String> {
    let mut lines = Vec::new();
    match &transition.event {
        TurnEvent::ShipPlaced { .. } => {}
        TurnEvent::FleetDeployed { side } => {
            if *side != viewer {
                lines.push(String::from("Enemy fleet deployed. Battle begins!"));
            }
        }
        TurnEvent::Fate {
            side,
            roll,
            effect,
            skipped,
        } => {
            lines.push(std::format!(
                "🎲 {} rolled {}: {}",
                actor(viewer, *side),
                roll,
                effect.message()
            ));
            if *skipped {
                lines.push(std::format!("   {} turn is skipped.", if *side == viewer { "Your" } else { "Enemy" }));
            }
        }
        TurnEvent::Action {
            side,
            outcome,
            regenerated,
        } => {
            let ours = *side == viewer;
            lines.push(std::format!("{} used {}.", actor(viewer, *side), outcome.ability));
            for cell in &outcome.cells {
                let at = coord_to_string(cell.row, cell.col);
                let text = match cell.impact {
                    Impact::Hit { sunk: true, .. } if ours => {
                        std::format!("   💥 {} HIT and SUNK an enemy ship!", at)
                    }
                    Impact::Hit { sunk: true, ship } => {
                        let name = me.fleet().get(ship).map(|s| s.name()).unwrap_or("ship");
                        std::format!("   💀 {} HIT, your {} was sunk!", at, name)
                    }
                    Impact::Hit { .. } => std::format!("   🎯 {} HIT", at),
                    Impact::Miss => std::format!("   💧 {} miss", at),
                    Impact::Shielded(_) => std::format!("   🛡  {} blocked by a shield", at),
                    Impact::AlreadyAttacked => std::format!("   {} already attacked", at),
                };
                lines.push(text);
            }
            if outcome.ability == Ability::Shield {
                lines.push(String::from("   Shield raised against the next hit."));
            }
            if let Some(ping) = outcome.radar {
                let at = coord_to_string(ping.row, ping.col);
                if ours {
                    lines.push(std::format!("   📡 contact at {}, {:.1} cells away", at, ping.distance));
                } else {
                    lines.push(std::format!("   📡 enemy radar spotted your ship at {}", at));
                }
            }
            match regenerated {
                Some(gain) => lines.push(std::format!("   Turn over, +{} stamina.", gain)),
                None if outcome.continues_chain() && !matches!(transition.phase, Phase::GameOver { .. }) => {
                    lines.push(String::from("   Hit! Same side attacks again."))
                }
                None => {}
            }
        }
    }
    if let Phase::GameOver { winner } = transition.phase {
        if winner == viewer {
            lines.push(String::from("🏆 VICTORY! The enemy fleet is destroyed."));
        } else {
            lines.push(String::from("☠  DEFEAT. Your fleet is lost."));
        }
    }
    lines
}
