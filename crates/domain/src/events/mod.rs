//! Builder events
//!
//! Tagged variants for every input change the calculator reacts to,
//! dispatched to dedicated handlers on the character aggregate. This replaces
//! brittle string-tag sender dispatch: the event itself says which ability,
//! tier, or slot changed.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Ability, EquipmentSlot};

/// Which racial bonus tier an assignment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusTier {
    PlusTwo,
    PlusOne,
}

/// An input change from the display collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuilderEvent {
    /// A base ability score was edited.
    AbilityScoreChanged { ability: Ability, score: u8 },
    /// A racial bonus tier was assigned to an ability, or cleared.
    RacialBonusAssigned {
        tier: BonusTier,
        ability: Option<Ability>,
    },
    /// A slot selection changed; `None` empties the slot.
    SlotChanged {
        slot: EquipmentSlot,
        item: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_round_trip() {
        let event = BuilderEvent::SlotChanged {
            slot: EquipmentSlot::MeleeMainHand,
            item: Some("Longsword".into()),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BuilderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_event_wire_shape() {
        let event = BuilderEvent::AbilityScoreChanged {
            ability: Ability::Dexterity,
            score: 14,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("abilityScoreChanged").is_some());
    }
}
