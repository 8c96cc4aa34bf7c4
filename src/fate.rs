//! Fate roll: a d100 drawn once per turn before attacking.

use rand::Rng;

use crate::combatant::Combatant;

pub const FATE_DIE_SIDES: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FateEffect {
    SkipTurn,
    GainStamina(u32),
    LoseLife(u32),
    Nothing,
    Shield,
}

impl FateEffect {
    /// Short line for the renderer.
    pub fn message(&self) -> &'static str {
        match self {
            FateEffect::SkipTurn => "You lose your turn.",
            FateEffect::GainStamina(1) => "You gain 1 stamina.",
            FateEffect::GainStamina(2) => "You gain 2 stamina.",
            FateEffect::GainStamina(3) => "You gain 3 stamina.",
            FateEffect::GainStamina(_) => "You gain stamina.",
            FateEffect::LoseLife(1) => "You lose 1 life.",
            FateEffect::LoseLife(_) => "You lose life.",
            FateEffect::Nothing => "Nothing happens.",
            FateEffect::Shield => "You gain a temporary shield.",
        }
    }

    pub(crate) fn apply(self, target: &mut Combatant) {
        match self {
            FateEffect::SkipTurn => target.skip_next_turn(),
            FateEffect::GainStamina(n) => target.gain_stamina(n),
            FateEffect::LoseLife(n) => target.lose_life_to_fate(n),
            FateEffect::Nothing => {}
            FateEffect::Shield => target.raise_shield(),
        }
    }
}

/// Inclusive roll range mapped to an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FateRange {
    pub low: u8,
    pub high: u8,
    pub effect: FateEffect,
}

impl FateRange {
    const fn new(low: u8, high: u8, effect: FateEffect) -> Self {
        Self { low, high, effect }
    }

    pub fn contains(&self, roll: u8) -> bool {
        (self.low..=self.high).contains(&roll)
    }
}

pub const FATE_TABLE: [FateRange; 7] = [
    FateRange::new(1, 5, FateEffect::SkipTurn),
    FateRange::new(6, 35, FateEffect::GainStamina(1)),
    FateRange::new(36, 45, FateEffect::GainStamina(2)),
    FateRange::new(46, 50, FateEffect::GainStamina(3)),
    FateRange::new(51, 55, FateEffect::LoseLife(1)),
    FateRange::new(56, 95, FateEffect::Nothing),
    FateRange::new(96, 100, FateEffect::Shield),
];

/// Effect for `roll`, or `None` outside 1..=100.
pub fn effect_for(roll: u8) -> Option<FateEffect> {
    FATE_TABLE.iter().find(|r| r.contains(roll)).map(|r| r.effect)
}

/// Uniform draw in 1..=100.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=FATE_DIE_SIDES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_boundaries() {
        assert_eq!(effect_for(0), None);
        assert_eq!(effect_for(5), Some(FateEffect::SkipTurn));
        assert_eq!(effect_for(6), Some(FateEffect::GainStamina(1)));
        assert_eq!(effect_for(55), Some(FateEffect::LoseLife(1)));
        assert_eq!(effect_for(100), Some(FateEffect::Shield));
        assert_eq!(effect_for(101), None);
    }
}
