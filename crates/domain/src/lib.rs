//! Character-builder statistics core.
//!
//! Pure domain crate for a point-buy character planner: ability scores with
//! racial bonuses, equipment slot selection with handedness locking, the
//! effect-text damage grammar, and the armor class and weapon damage engines.
//! Everything is deterministic and side-effect free; callers own persistence
//! and presentation.

pub mod aggregates;
pub mod calculators;
pub mod catalog;
pub mod effects;
pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

pub use aggregates::CharacterState;
pub use calculators::{ArmorCalculator, ArmorClassResult, DamageCalculator, DamageReport};
pub use catalog::{Catalog, EquipmentBuckets, WeaponClassification, WeaponRange};
pub use effects::{
    extract_handedness_segment, has_handedness_token, mentions_unarmed,
    parse_additional_damage_components, parse_damage_value, parse_weapon_base,
    parse_weapon_base_components, DamageValue, Handedness,
};
pub use entities::{ItemIndex, ItemRecord};
pub use error::DomainError;
pub use events::{BonusTier, BuilderEvent};
pub use value_objects::{
    ability_modifier, format_modifier, point_cost, Ability, AbilityScores, AttackSlot,
    DamageComponent, DamageRange, DicePool, EquipmentSelection, EquipmentSlot,
    RacialBonusAssignment, MAX_BASE_SCORE, MIN_BASE_SCORE, POINT_BUY_BUDGET, UNARMED,
};
