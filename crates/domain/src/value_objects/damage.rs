//! Structured damage components with display provenance

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ability::format_modifier;
use super::dice::DicePool;

/// One contribution to a damage breakdown
///
/// Created fresh on every recalculation and never persisted. A component with
/// `dice_count == 0` is a pure flat contribution. List order is append order
/// and must be preserved for display determinism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageComponent {
    /// Damage type word as parsed (e.g., "Slashing", "Acid", "Unspecified")
    pub damage_type: String,
    pub dice_count: u32,
    pub dice_sides: u32,
    pub flat_bonus: i32,
    /// Human-readable provenance, e.g. "Longsword (weapon)" or
    /// "Ability modifier"
    pub source_label: String,
}

impl DamageComponent {
    pub fn new(
        damage_type: impl Into<String>,
        pool: DicePool,
        flat_bonus: i32,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            damage_type: damage_type.into(),
            dice_count: pool.count,
            dice_sides: pool.sides,
            flat_bonus,
            source_label: source_label.into(),
        }
    }

    /// A pure flat contribution with no dice.
    pub fn flat(
        damage_type: impl Into<String>,
        flat_bonus: i32,
        source_label: impl Into<String>,
    ) -> Self {
        Self::new(damage_type, DicePool::ZERO, flat_bonus, source_label)
    }

    pub fn is_flat(&self) -> bool {
        self.dice_count == 0
    }

    pub fn pool(&self) -> DicePool {
        DicePool::new(self.dice_count, self.dice_sides)
    }

    /// True when the component carries no dice and no flat value.
    pub fn is_zero(&self) -> bool {
        self.dice_count == 0 && self.dice_sides == 0 && self.flat_bonus == 0
    }
}

impl fmt::Display for DamageComponent {
    /// The per-component breakdown line, e.g.
    /// `Slashing (Longsword (weapon)): 1d8 -> 1-8 (Avg 4.5) +1 flat` or
    /// `Acid (Ring of Acid (equipment)): +2 flat`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice_count > 0 {
            let min = self.dice_count;
            let max = self.dice_count * self.dice_sides;
            let avg = f64::from(self.dice_count) * (f64::from(self.dice_sides) + 1.0) / 2.0;
            write!(
                f,
                "{} ({}): {}d{} -> {}-{} (Avg {:.1})",
                self.damage_type, self.source_label, self.dice_count, self.dice_sides, min, max, avg
            )?;
            if self.flat_bonus != 0 {
                write!(f, " {} flat", format_modifier(self.flat_bonus))?;
            }
            Ok(())
        } else {
            write!(
                f,
                "{} ({}): {} flat",
                self.damage_type,
                self.source_label,
                format_modifier(self.flat_bonus)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_component() {
        let comp = DamageComponent::flat("Acid", 2, "Ring of Acid (equipment)");
        assert!(comp.is_flat());
        assert!(!comp.is_zero());
        assert_eq!(comp.to_string(), "Acid (Ring of Acid (equipment)): +2 flat");
    }

    #[test]
    fn test_dice_component_line() {
        let comp = DamageComponent::new("Slashing", DicePool::new(1, 8), 1, "Longsword (weapon)");
        assert_eq!(
            comp.to_string(),
            "Slashing (Longsword (weapon)): 1d8 -> 1-8 (Avg 4.5) +1 flat"
        );
    }

    #[test]
    fn test_dice_component_without_flat() {
        let comp = DamageComponent::new("Fire", DicePool::new(2, 6), 0, "Everburn Blade (weapon)");
        assert_eq!(
            comp.to_string(),
            "Fire (Everburn Blade (weapon)): 2d6 -> 2-12 (Avg 7.0)"
        );
    }

    #[test]
    fn test_zero_detection() {
        assert!(DamageComponent::flat("Force", 0, "x").is_zero());
        assert!(!DamageComponent::new("Force", DicePool::new(1, 4), 0, "x").is_zero());
    }

    #[test]
    fn test_serde_shape() {
        let comp = DamageComponent::flat("Acid", 2, "Ring (equipment)");
        let json = serde_json::to_value(&comp).unwrap();
        assert_eq!(json["damageType"], "Acid");
        assert_eq!(json["flatBonus"], 2);
        assert_eq!(json["sourceLabel"], "Ring (equipment)");
    }
}
