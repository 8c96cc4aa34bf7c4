#![cfg(feature = "std")]

use std::io::{self, BufRead, StdinLock, Write};
use std::string::{String, ToString};

use rand::rngs::SmallRng;

use crate::ability::{Ability, AbilityCosts, ActionIntent};
use crate::combatant::{Combatant, Side};
use crate::common::TurnError;
use crate::fate;
use crate::game::{PlacementIntent, Transition, TurnEvent};
use crate::ship::{Orientation, Ship};
use crate::ui::{self, coord_to_string};

use super::Controller;

/// Interactive player reading commands from `input`.
pub struct CliController<R> {
    input: R,
}

impl CliController<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> CliController<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `msg` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, msg: &str) -> Option<String> {
        std::print!("{}", msg);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

/// Parse `A5`-style coordinates on a board of `size` columns and rows.
pub fn parse_coord(input: &str, size: usize) -> Result<(usize, usize), String> {
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let last_col = (b'A' + size as u8 - 1) as char;
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= size {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 {
        return Err(format!("Row cannot be 0 - must be 1-{}", size));
    }
    if row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok((row - 1, col))
}

/// `H`/`V` in any case; a missing token means horizontal.
pub fn parse_orientation(token: Option<&str>) -> Result<Orientation, String> {
    match token.and_then(|s| s.chars().next()) {
        None | Some('h') | Some('H') => Ok(Orientation::Horizontal),
        Some('v') | Some('V') => Ok(Orientation::Vertical),
        Some(other) => Err(format!("Invalid orientation '{}' - use H or V", other)),
    }
}

/// Parse an attack command such as `A5`, `line B3 V`, `square C4`,
/// `radar E5` or `shield`.
pub fn parse_action(line: &str, size: usize) -> Result<ActionIntent, String> {
    let mut parts = line.split_whitespace();
    let first = parts.next().ok_or("Please enter a command (e.g., A5 or line B3 V)")?;
    let (ability, coord) = match first.parse::<Ability>() {
        Ok(ability) => (ability, parts.next()),
        Err(()) => (Ability::Normal, Some(first)),
    };
    if !ability.needs_target() {
        return Ok(ActionIntent::shield());
    }
    let coord = coord.ok_or_else(|| format!("{} needs a target (e.g., {} A5)", ability, ability))?;
    let (row, col) = parse_coord(coord, size)?;
    let orientation = parse_orientation(parts.next())?;
    Ok(ActionIntent::new(ability, row, col, orientation))
}

fn print_roster(me: &Combatant, costs: &AbilityCosts) {
    std::println!(
        "\n  {}: life {}/{}  stamina {}{}",
        me.name(),
        me.life(),
        me.initial_life(),
        me.stamina(),
        if me.shield_active() { "  [shield up]" } else { "" }
    );
    std::print!("  Abilities:");
    for ability in Ability::ALL {
        match costs.cost(ability) {
            Some(cost) if cost <= me.stamina() => std::print!("  {}({})", ability, cost),
            Some(cost) => std::print!("  [{}({})]", ability, cost),
            None => {}
        }
    }
    std::println!();
}

impl<R: BufRead> Controller for CliController<R> {
    fn place_ship(&mut self, _rng: &mut SmallRng, me: &Combatant, ship: &Ship) -> Option<PlacementIntent> {
        let size = me.board().size();
        loop {
            std::println!("\n════════════════════════════════════════════════════════════");
            ui::print_own_board(me);
            std::println!(
                "\nShip {}/{}: {} (length {})",
                ship.id().0 + 1,
                me.fleet().len(),
                ship.name(),
                ship.length()
            );
            let line = self.prompt("Enter placement (or ENTER for random, 'help' for help): ")?;
            if line.is_empty() {
                return None;
            }
            if line.eq_ignore_ascii_case("help") {
                print_placement_help(size);
                continue;
            }

            let mut parts = line.split_whitespace();
            let coord = match parts.next().map(|s| parse_coord(s, size)) {
                Some(Ok(coord)) => coord,
                Some(Err(e)) => {
                    std::println!("✗ Error: {}", e);
                    continue;
                }
                None => {
                    std::println!("✗ Error: Please enter coordinates (e.g., A5 H)");
                    continue;
                }
            };
            let orientation = match parse_orientation(parts.next()) {
                Ok(o) => o,
                Err(e) => {
                    std::println!("✗ Error: {}", e);
                    continue;
                }
            };
            return Some(PlacementIntent {
                ship: ship.id(),
                row: coord.0,
                col: coord.1,
                orientation,
            });
        }
    }

    fn roll_fate(&mut self, rng: &mut SmallRng) -> u8 {
        let _ = self.prompt("\nPress ENTER to roll the die of fate... ");
        fate::roll_die(rng)
    }

    fn choose_action(
        &mut self,
        _rng: &mut SmallRng,
        me: &Combatant,
        costs: &AbilityCosts,
    ) -> Option<ActionIntent> {
        let size = me.board().size();
        loop {
            std::println!("\nEnemy waters:");
            ui::print_attack_view(me.attack_view());
            print_roster(me, costs);
            let line = self.prompt("Enter command (e.g., A5, line B3 V, 'help', 'quit'): ")?;
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                return None;
            }
            if line.eq_ignore_ascii_case("help") {
                print_targeting_help(size);
                continue;
            }
            if line.eq_ignore_ascii_case("fleet") {
                ui::print_own_board(me);
                continue;
            }
            match parse_action(&line, size) {
                Ok(intent) => return Some(intent),
                Err(e) => {
                    std::println!("✗ Invalid command: {}", e);
                    std::println!("   Example: A5, line B3 V, square C4, radar E5, shield");
                }
            }
        }
    }

    fn handle_rejection(&mut self, err: &TurnError) {
        std::println!("✗ {}", err);
    }

    fn handle_transition(&mut self, me: &Combatant, transition: &Transition) {
        if let TurnEvent::ShipPlaced { side: Side::Player, ship } = transition.event {
            if let Some(ship) = me.fleet().get(ship) {
                let at = ship.origin().map(|(r, c)| coord_to_string(r, c)).unwrap_or_default();
                std::println!("✓ {} placed at {}", ship.name(), at);
            }
            if me.fleet().all_placed() {
                std::println!("\n✓ All ships placed! Ready to begin battle.\n");
            }
            return;
        }
        for line in ui::describe_transition(Side::Player, me, transition) {
            std::println!("{}", line);
        }
    }
}

fn print_placement_help(size: usize) {
    let last_col = (b'A' + size as u8 - 1) as char;
    std::println!("\n╔════════════════════════════════════════════════════════╗");
    std::println!("║              SHIP PLACEMENT HELP                       ║");
    std::println!("╚════════════════════════════════════════════════════════╝");
    std::println!("  Format: <COLUMN><ROW> <ORIENTATION>");
    std::println!();
    std::println!("  Examples:");
    std::println!("    A5 H    - Place ship at A5, horizontal");
    std::println!("    B3 V    - Place ship at B3, vertical");
    std::println!();
    std::println!("  Valid columns: A-{} (A is leftmost)", last_col);
    std::println!("  Valid rows: 1-{} (1 is topmost)", size);
    std::println!("  Orientation: H=Horizontal, V=Vertical");
    std::println!();
    std::println!("  Ships extend from the starting cell to the right or");
    std::println!("  downward. They must fit on the board and not overlap.");
    std::println!("  Press ENTER without input for a random placement.\n");
}

fn print_targeting_help(size: usize) {
    let last_col = (b'A' + size as u8 - 1) as char;
    std::println!("\n╔════════════════════════════════════════════════════════╗");
    std::println!("║                  TARGETING HELP                        ║");
    std::println!("╚════════════════════════════════════════════════════════╝");
    std::println!("  Commands:");
    std::println!("    A5            - Normal shot at A5 (free, +2 stamina after)");
    std::println!("    line B3 H|V   - Three cells centred on B3");
    std::println!("    square C4     - 2x2 block from C4 down and right");
    std::println!("    radar E5      - Reveal the hidden ship cell closest to E5");
    std::println!("    shield        - Block the next hit on your fleet");
    std::println!("    fleet         - Show your own board");
    std::println!("    quit          - Give up");
    std::println!();
    std::println!("  Valid columns: A-{}, valid rows: 1-{}", last_col, size);
    std::println!("  A hit with normal, line or square lets you attack again.");
    std::println!();
    std::println!("  Board symbols:");
    std::println!("    X = Hit   o = Miss   # = Blocked by shield");
    std::println!("    ? = Radar contact   . = Unknown\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_follow_board_size() {
        assert_eq!(parse_coord("A1", 10), Ok((0, 0)));
        assert_eq!(parse_coord("j10", 10), Ok((9, 9)));
        assert!(parse_coord("K1", 10).is_err());
        assert_eq!(parse_coord("T20", 20), Ok((19, 19)));
        assert!(parse_coord("A0", 10).is_err());
        assert!(parse_coord("A", 10).is_err());
    }

    #[test]
    fn bare_coordinate_is_a_normal_attack() {
        assert_eq!(parse_action("C4", 10), Ok(ActionIntent::normal(3, 2)));
    }

    #[test]
    fn named_abilities_parse() {
        assert_eq!(
            parse_action("line B3 v", 10),
            Ok(ActionIntent::line(2, 1, Orientation::Vertical))
        );
        assert_eq!(parse_action("sq A1", 10), Ok(ActionIntent::square(0, 0)));
        assert_eq!(parse_action("radar E5", 10), Ok(ActionIntent::radar(4, 4)));
        assert_eq!(parse_action("shield", 10), Ok(ActionIntent::shield()));
        assert!(parse_action("radar", 10).is_err());
        assert!(parse_action("line B3 X", 10).is_err());
    }

    #[test]
    fn eof_abandons_the_game() {
        let mut cli = CliController::new(io::Cursor::new(""));
        let config = crate::config::GameConfig::default();
        let me = Combatant::new("tester", &config);
        let mut rng = <SmallRng as rand::SeedableRng>::seed_from_u64(1);
        assert_eq!(cli.choose_action(&mut rng, &me, &config.costs), None);
    }

    #[test]
    fn scripted_input_is_read_line_by_line() {
        let mut cli = CliController::new(io::Cursor::new("help\nZ9\nline A1 H\n"));
        let config = crate::config::GameConfig::default();
        let me = Combatant::new("tester", &config);
        let mut rng = <SmallRng as rand::SeedableRng>::seed_from_u64(1);
        assert_eq!(
            cli.choose_action(&mut rng, &me, &config.costs),
            Some(ActionIntent::line(0, 0, Orientation::Horizontal))
        );
    }
}
