//! Ability scores, point-buy costs, and racial bonus assignment
//!
//! Provides type safety for ability references instead of magic strings like
//! "Strength". Scores follow the 27-point point-buy system: base values stay
//! in 8..=15 and the budget is a display-only warning, never a hard block on
//! calculation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Total points available under point buy.
pub const POINT_BUY_BUDGET: u32 = 27;

/// Lowest base score purchasable under point buy.
pub const MIN_BASE_SCORE: u8 = 8;

/// Highest base score purchasable under point buy.
pub const MAX_BASE_SCORE: u8 = 15;

/// The six character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in display order.
    pub fn all() -> [Ability; 6] {
        [
            Self::Strength,
            Self::Dexterity,
            Self::Constitution,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
        ]
    }

    /// Returns the full name of the ability (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Dexterity => 1,
            Self::Constitution => 2,
            Self::Intelligence => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Self::Strength),
            "DEX" | "DEXTERITY" => Ok(Self::Dexterity),
            "CON" | "CONSTITUTION" => Ok(Self::Constitution),
            "INT" | "INTELLIGENCE" => Ok(Self::Intelligence),
            "WIS" | "WISDOM" => Ok(Self::Wisdom),
            "CHA" | "CHARISMA" => Ok(Self::Charisma),
            _ => Err(()),
        }
    }
}

/// Ability modifier for a final score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    // Rust's / rounds toward zero; modifiers need floor division
    (score - 10).div_euclid(2)
}

/// Point-buy cost for a base score. Scores outside the purchasable range
/// cost nothing, matching the lookup-with-default behavior of the cost table.
pub fn point_cost(score: u8) -> u32 {
    match score {
        8 => 0,
        9 => 1,
        10 => 2,
        11 => 3,
        12 => 4,
        13 => 5,
        14 => 7,
        15 => 9,
        _ => 0,
    }
}

/// Format a modifier with an explicit sign (`+3`, `+0`, `-1`).
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

/// Racial +2/+1 bonus assignment
///
/// At most one ability holds the +2 and at most one holds the +1, and a single
/// ability never holds both. The setters clear conflicting prior assignments
/// atomically rather than leaving validation to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacialBonusAssignment {
    plus_two: Option<Ability>,
    plus_one: Option<Ability>,
}

impl RacialBonusAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign (or clear, with `None`) the +2 bonus. If the chosen ability
    /// currently holds the +1, that assignment is cleared first.
    pub fn assign_plus_two(&mut self, ability: Option<Ability>) {
        if let Some(chosen) = ability {
            if self.plus_one == Some(chosen) {
                self.plus_one = None;
            }
        }
        self.plus_two = ability;
    }

    /// Assign (or clear, with `None`) the +1 bonus. If the chosen ability
    /// currently holds the +2, that assignment is cleared first.
    pub fn assign_plus_one(&mut self, ability: Option<Ability>) {
        if let Some(chosen) = ability {
            if self.plus_two == Some(chosen) {
                self.plus_two = None;
            }
        }
        self.plus_one = ability;
    }

    pub fn plus_two(&self) -> Option<Ability> {
        self.plus_two
    }

    pub fn plus_one(&self) -> Option<Ability> {
        self.plus_one
    }

    /// Racial bonus granted to an ability (0, 1, or 2).
    pub fn bonus(&self, ability: Ability) -> u8 {
        if self.plus_two == Some(ability) {
            2
        } else if self.plus_one == Some(ability) {
            1
        } else {
            0
        }
    }
}

/// Point-buy base scores plus racial bonus assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    base: [u8; 6],
    racial: RacialBonusAssignment,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            base: [MIN_BASE_SCORE; 6],
            racial: RacialBonusAssignment::default(),
        }
    }
}

impl AbilityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base score. Values outside the point-buy range are rejected.
    pub fn set_base(&mut self, ability: Ability, score: u8) -> Result<(), DomainError> {
        if !(MIN_BASE_SCORE..=MAX_BASE_SCORE).contains(&score) {
            return Err(DomainError::validation(format!(
                "{} base score {} outside point-buy range {}..={}",
                ability, score, MIN_BASE_SCORE, MAX_BASE_SCORE
            )));
        }
        self.base[ability.index()] = score;
        Ok(())
    }

    pub fn base(&self, ability: Ability) -> u8 {
        self.base[ability.index()]
    }

    pub fn racial(&self) -> &RacialBonusAssignment {
        &self.racial
    }

    pub fn racial_mut(&mut self) -> &mut RacialBonusAssignment {
        &mut self.racial
    }

    /// Final score: base plus any racial bonus.
    pub fn score(&self, ability: Ability) -> u8 {
        self.base(ability) + self.racial.bonus(ability)
    }

    /// Modifier for the final score.
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(i32::from(self.score(ability)))
    }

    /// Total point-buy cost of the current base scores.
    pub fn points_used(&self) -> u32 {
        Ability::all()
            .iter()
            .map(|ability| point_cost(self.base(*ability)))
            .sum()
    }

    /// Whether the current base scores fit the point-buy budget. Used for a
    /// display warning only; an over-budget build still calculates.
    pub fn within_budget(&self) -> bool {
        self.points_used() <= POINT_BUY_BUDGET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_boundaries() {
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(17), 3);
    }

    #[test]
    fn test_modifier_for_every_point_buy_score() {
        for score in 8..=15i32 {
            let expected = (score - 10).div_euclid(2);
            assert_eq!(ability_modifier(score), expected);
        }
    }

    #[test]
    fn test_format_modifier() {
        assert_eq!(format_modifier(3), "+3");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn test_point_cost_table() {
        assert_eq!(point_cost(8), 0);
        assert_eq!(point_cost(13), 5);
        assert_eq!(point_cost(14), 7);
        assert_eq!(point_cost(15), 9);
        assert_eq!(point_cost(16), 0);
    }

    #[test]
    fn test_set_base_rejects_out_of_range() {
        let mut scores = AbilityScores::new();
        assert!(scores.set_base(Ability::Strength, 7).is_err());
        assert!(scores.set_base(Ability::Strength, 16).is_err());
        assert!(scores.set_base(Ability::Strength, 15).is_ok());
        assert_eq!(scores.base(Ability::Strength), 15);
    }

    #[test]
    fn test_points_used_and_budget() {
        let mut scores = AbilityScores::new();
        assert_eq!(scores.points_used(), 0);
        scores.set_base(Ability::Strength, 15).unwrap();
        scores.set_base(Ability::Dexterity, 15).unwrap();
        scores.set_base(Ability::Constitution, 15).unwrap();
        // 9 + 9 + 9 = 27: exactly on budget
        assert_eq!(scores.points_used(), 27);
        assert!(scores.within_budget());
        scores.set_base(Ability::Wisdom, 9).unwrap();
        assert!(!scores.within_budget());
    }

    #[test]
    fn test_racial_plus_two_clears_other_holder() {
        let mut racial = RacialBonusAssignment::new();
        racial.assign_plus_two(Some(Ability::Strength));
        racial.assign_plus_two(Some(Ability::Dexterity));
        assert_eq!(racial.plus_two(), Some(Ability::Dexterity));
        assert_eq!(racial.bonus(Ability::Strength), 0);
    }

    #[test]
    fn test_racial_tiers_mutually_exclusive_per_ability() {
        let mut racial = RacialBonusAssignment::new();
        racial.assign_plus_one(Some(Ability::Wisdom));
        racial.assign_plus_two(Some(Ability::Wisdom));
        // +2 displaces the +1 on the same ability
        assert_eq!(racial.plus_two(), Some(Ability::Wisdom));
        assert_eq!(racial.plus_one(), None);
        assert_eq!(racial.bonus(Ability::Wisdom), 2);

        racial.assign_plus_one(Some(Ability::Wisdom));
        assert_eq!(racial.plus_two(), None);
        assert_eq!(racial.plus_one(), Some(Ability::Wisdom));
    }

    #[test]
    fn test_final_score_includes_racial_bonus() {
        let mut scores = AbilityScores::new();
        scores.set_base(Ability::Dexterity, 15).unwrap();
        scores.racial_mut().assign_plus_two(Some(Ability::Dexterity));
        assert_eq!(scores.score(Ability::Dexterity), 17);
        assert_eq!(scores.modifier(Ability::Dexterity), 3);
    }

    #[test]
    fn test_ability_from_str() {
        assert_eq!("str".parse::<Ability>(), Ok(Ability::Strength));
        assert_eq!("Dexterity".parse::<Ability>(), Ok(Ability::Dexterity));
        assert_eq!("luck".parse::<Ability>(), Err(()));
    }
}
