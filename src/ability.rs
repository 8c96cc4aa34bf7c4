//! Abilities, their stamina costs and the cells each one touches.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::ship::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Ability {
    /// Single cell.
    Normal,
    /// Three cells centred on the target.
    Line,
    /// 2×2 block with the target as top-left corner.
    Square,
    /// Reveals the hidden ship cell closest to the target.
    Radar,
    /// Absorbs the next incoming hit.
    Shield,
}

impl Ability {
    pub const ALL: [Ability; 5] = [
        Ability::Normal,
        Ability::Line,
        Ability::Square,
        Ability::Radar,
        Ability::Shield,
    ];

    /// Damaging abilities are the only ones that can extend a chain.
    pub fn is_damaging(self) -> bool {
        matches!(self, Ability::Normal | Ability::Line | Ability::Square)
    }

    pub fn needs_target(self) -> bool {
        !matches!(self, Ability::Shield)
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Normal => "normal",
            Ability::Line => "line",
            Ability::Square => "square",
            Ability::Radar => "radar",
            Ability::Shield => "shield",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALIASES: [(&str, Ability); 5] = [
            ("n", Ability::Normal),
            ("l", Ability::Line),
            ("sq", Ability::Square),
            ("r", Ability::Radar),
            ("sh", Ability::Shield),
        ];
        Ability::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .or_else(|| {
                ALIASES
                    .into_iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
                    .map(|(_, a)| a)
            })
            .ok_or(())
    }
}

/// Stamina price list. `radar: None` removes radar from the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCosts {
    pub normal: u32,
    pub line: u32,
    pub square: u32,
    pub shield: u32,
    pub radar: Option<u32>,
}

impl AbilityCosts {
    pub const CANONICAL: AbilityCosts = AbilityCosts {
        normal: 0,
        line: 2,
        square: 3,
        shield: 2,
        radar: Some(4),
    };

    /// Cost of `ability`, or `None` if it is disabled.
    pub fn cost(&self, ability: Ability) -> Option<u32> {
        match ability {
            Ability::Normal => Some(self.normal),
            Ability::Line => Some(self.line),
            Ability::Square => Some(self.square),
            Ability::Shield => Some(self.shield),
            Ability::Radar => self.radar,
        }
    }

    /// Enabled abilities costing at most `stamina`.
    pub fn affordable(&self, stamina: u32) -> impl Iterator<Item = Ability> + '_ {
        Ability::ALL
            .into_iter()
            .filter(move |&a| self.cost(a).is_some_and(|c| c <= stamina))
    }
}

impl Default for AbilityCosts {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// A combatant's request to use an ability. `row`/`col` are ignored for
/// Shield; `orientation` only matters for Line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionIntent {
    pub ability: Ability,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl ActionIntent {
    pub fn new(ability: Ability, row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            ability,
            row,
            col,
            orientation,
        }
    }

    pub fn normal(row: usize, col: usize) -> Self {
        Self::new(Ability::Normal, row, col, Orientation::Horizontal)
    }

    pub fn line(row: usize, col: usize, orientation: Orientation) -> Self {
        Self::new(Ability::Line, row, col, orientation)
    }

    pub fn square(row: usize, col: usize) -> Self {
        Self::new(Ability::Square, row, col, Orientation::Horizontal)
    }

    pub fn radar(row: usize, col: usize) -> Self {
        Self::new(Ability::Radar, row, col, Orientation::Horizontal)
    }

    pub fn shield() -> Self {
        Self::new(Ability::Shield, 0, 0, Orientation::Horizontal)
    }
}

/// Cells damaged by `ability` aimed at (`row`, `col`) on a `size`×`size`
/// board, clipped to the board. Radar and Shield damage nothing.
pub fn affected_cells(
    ability: Ability,
    row: usize,
    col: usize,
    orientation: Orientation,
    size: usize,
) -> Vec<(usize, usize)> {
    let offsets: &[(isize, isize)] = match (ability, orientation) {
        (Ability::Normal, _) => &[(0, 0)],
        (Ability::Line, Orientation::Horizontal) => &[(0, -1), (0, 0), (0, 1)],
        (Ability::Line, Orientation::Vertical) => &[(-1, 0), (0, 0), (1, 0)],
        (Ability::Square, _) => &[(0, 0), (0, 1), (1, 0), (1, 1)],
        (Ability::Radar | Ability::Shield, _) => &[],
    };
    offsets
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < size && c < size).then_some((r, c))
        })
        .collect()
}
