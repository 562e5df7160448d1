//! Character state aggregate
//!
//! The explicit, immutable-value pair of ability state and equipment
//! selection that every engine call consumes. The engines never read or
//! write UI-owned storage; the display collaborator feeds changes in as
//! [`BuilderEvent`]s and re-derives every stat from the updated state.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::DomainError;
use crate::events::{BonusTier, BuilderEvent};
use crate::value_objects::{AbilityScores, EquipmentSelection};

/// Ability scores plus equipment selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterState {
    pub abilities: AbilityScores,
    pub selection: EquipmentSelection,
}

impl CharacterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input change, enforcing the racial-bonus mutual exclusion
    /// and the off-hand lock invariants as part of the mutation.
    pub fn apply(&mut self, event: BuilderEvent, catalog: &Catalog) -> Result<(), DomainError> {
        match event {
            BuilderEvent::AbilityScoreChanged { ability, score } => {
                self.abilities.set_base(ability, score)
            }
            BuilderEvent::RacialBonusAssigned { tier, ability } => {
                match tier {
                    BonusTier::PlusTwo => self.abilities.racial_mut().assign_plus_two(ability),
                    BonusTier::PlusOne => self.abilities.racial_mut().assign_plus_one(ability),
                }
                Ok(())
            }
            BuilderEvent::SlotChanged { slot, item } => {
                self.selection.select(slot, item, &catalog.weapons)
            }
        }
    }
}
