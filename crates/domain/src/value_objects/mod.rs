//! Value objects - Immutable objects defined by their attributes

mod ability;
mod damage;
mod dice;
mod slots;

pub use ability::{
    ability_modifier, format_modifier, point_cost, Ability, AbilityScores, RacialBonusAssignment,
    MAX_BASE_SCORE, MIN_BASE_SCORE, POINT_BUY_BUDGET,
};
pub use damage::DamageComponent;
pub use dice::{DamageRange, DicePool};
pub use slots::{AttackSlot, EquipmentSelection, EquipmentSlot, UNARMED};
