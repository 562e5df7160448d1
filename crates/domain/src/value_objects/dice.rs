//! Dice pools and damage-range math
//!
//! Unlike an interactive roller, this core never rolls: it derives the
//! min/max/average envelope of a pool for display. Parsing is deliberately
//! lossy - the source text is hand-authored and irregular, so anything that
//! is not `NdM` degrades to the zero pool instead of erroring.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dice pool like `1d8` or `2d6` (X in XdY, Y in XdY)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    /// Number of dice
    pub count: u32,
    /// Sides per die
    pub sides: u32,
}

impl DicePool {
    /// The `0d0` sentinel: no damage dice at all.
    pub const ZERO: DicePool = DicePool { count: 0, sides: 0 };

    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Lossy parse of `NdM` notation. Anything else - empty text, missing
    /// `d`, extra separators, non-numeric parts - is the zero pool.
    pub fn parse(input: &str) -> Self {
        let lower = input.trim().to_lowercase();
        let parts: Vec<&str> = lower.split('d').collect();
        if parts.len() != 2 {
            return Self::ZERO;
        }
        match (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
            (Ok(count), Ok(sides)) => Self { count, sides },
            _ => Self::ZERO,
        }
    }

    /// A pool with no dice contributes nothing to range math.
    pub fn is_zero(&self) -> bool {
        self.count == 0
    }

    /// Damage range for a normal hit with a flat modifier applied.
    /// The zero pool yields an all-zero range regardless of modifier.
    pub fn normal_range(&self, modifier: i32) -> DamageRange {
        self.range_with_count(i64::from(self.count), modifier)
    }

    /// Damage range for a critical hit: the dice count doubles, the flat
    /// modifier stays the same.
    pub fn critical_range(&self, modifier: i32) -> DamageRange {
        self.range_with_count(i64::from(self.count) * 2, modifier)
    }

    fn range_with_count(&self, count: i64, modifier: i32) -> DamageRange {
        if self.is_zero() {
            return DamageRange::ZERO;
        }
        let sides = i64::from(self.sides);
        let modifier = i64::from(modifier);
        DamageRange {
            min: (count + modifier) as i32,
            max: (count * sides + modifier) as i32,
            average: (count as f64) * (sides as f64 + 1.0) / 2.0 + modifier as f64,
        }
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Min/max/average damage envelope. Min and max are integers; the average is
/// a real number, rounded to one decimal only at display time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
    pub average: f64,
}

impl DamageRange {
    pub const ZERO: DamageRange = DamageRange {
        min: 0,
        max: 0,
        average: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(DicePool::parse("1d8"), DicePool::new(1, 8));
        assert_eq!(DicePool::parse("2d6"), DicePool::new(2, 6));
        assert_eq!(DicePool::parse("0d0"), DicePool::ZERO);
    }

    #[test]
    fn test_parse_trims_and_ignores_case() {
        assert_eq!(DicePool::parse(" 1D10 "), DicePool::new(1, 10));
    }

    #[test]
    fn test_parse_degrades_to_zero() {
        assert_eq!(DicePool::parse(""), DicePool::ZERO);
        assert_eq!(DicePool::parse("8"), DicePool::ZERO);
        assert_eq!(DicePool::parse("1d8d9"), DicePool::ZERO);
        assert_eq!(DicePool::parse("xdy"), DicePool::ZERO);
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(DicePool::new(2, 6).to_string(), "2d6");
        assert_eq!(DicePool::ZERO.to_string(), "0d0");
    }

    #[test]
    fn test_normal_range_2d6_plus_3() {
        let range = DicePool::new(2, 6).normal_range(3);
        assert_eq!(range.min, 5);
        assert_eq!(range.max, 15);
        assert!((range.average - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_critical_doubles_dice_only() {
        let range = DicePool::new(2, 6).critical_range(3);
        assert_eq!(range.min, 7);
        assert_eq!(range.max, 27);
        assert!((range.average - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_pool_ignores_modifier() {
        assert_eq!(DicePool::ZERO.normal_range(5), DamageRange::ZERO);
        assert_eq!(DicePool::ZERO.critical_range(5), DamageRange::ZERO);
    }

    #[test]
    fn test_negative_modifier() {
        let range = DicePool::new(1, 4).normal_range(-1);
        assert_eq!(range.min, 0);
        assert_eq!(range.max, 3);
        assert!((range.average - 1.5).abs() < f64::EPSILON);
    }
}
