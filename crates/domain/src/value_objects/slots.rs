//! Equipment slots and the current selection
//!
//! The selection maps each slot to an item name or nothing. It owns one
//! invariant: a strictly two-handed main-hand weapon (or the unarmed
//! placeholder) locks the matching off-hand slot, clearing it whenever the
//! main hand changes. Everything else is free-form - unknown names simply
//! fail their lookups downstream.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{WeaponClassification, WeaponRange};
use crate::error::DomainError;

/// Sentinel name for the melee main-hand unarmed placeholder.
pub const UNARMED: &str = "Unarmed";

/// Every selectable equipment slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    Helmet,
    Cape,
    Armor,
    Gloves,
    Boots,
    Amulet,
    Ring1,
    Ring2,
    MeleeMainHand,
    MeleeOffHand,
    RangedMainHand,
    RangedOffHand,
}

impl EquipmentSlot {
    /// All slots in display order. This order also fixes the AC bonus scan.
    pub fn all() -> [EquipmentSlot; 12] {
        [
            Self::Helmet,
            Self::Cape,
            Self::Armor,
            Self::Gloves,
            Self::Boots,
            Self::Amulet,
            Self::Ring1,
            Self::Ring2,
            Self::MeleeMainHand,
            Self::MeleeOffHand,
            Self::RangedMainHand,
            Self::RangedOffHand,
        ]
    }

    /// The eight non-weapon slots, in the fixed order the damage engine
    /// scans them for "additional damage" bonuses.
    pub fn accessories() -> [EquipmentSlot; 8] {
        [
            Self::Helmet,
            Self::Cape,
            Self::Armor,
            Self::Gloves,
            Self::Boots,
            Self::Amulet,
            Self::Ring1,
            Self::Ring2,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Helmet => "Helmet",
            Self::Cape => "Cape",
            Self::Armor => "Armor",
            Self::Gloves => "Gloves",
            Self::Boots => "Boots",
            Self::Amulet => "Amulet",
            Self::Ring1 => "Ring 1",
            Self::Ring2 => "Ring 2",
            Self::MeleeMainHand => "Melee Main Hand",
            Self::MeleeOffHand => "Melee Off Hand",
            Self::RangedMainHand => "Ranged Main Hand",
            Self::RangedOffHand => "Ranged Off Hand",
        }
    }

    pub fn is_weapon_slot(&self) -> bool {
        matches!(
            self,
            Self::MeleeMainHand | Self::MeleeOffHand | Self::RangedMainHand | Self::RangedOffHand
        )
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The two attack slots the damage engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackSlot {
    MeleeMainHand,
    RangedMainHand,
}

impl AttackSlot {
    pub fn weapon_slot(&self) -> EquipmentSlot {
        match self {
            Self::MeleeMainHand => EquipmentSlot::MeleeMainHand,
            Self::RangedMainHand => EquipmentSlot::RangedMainHand,
        }
    }

    pub fn range(&self) -> WeaponRange {
        match self {
            Self::MeleeMainHand => WeaponRange::Melee,
            Self::RangedMainHand => WeaponRange::Ranged,
        }
    }
}

/// Current item selection across all slots
///
/// An absent entry is the "empty" sentinel. The melee main hand additionally
/// admits [`UNARMED`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSelection {
    slots: BTreeMap<EquipmentSlot, String>,
}

impl EquipmentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item selected in a slot, if any.
    pub fn selected(&self, slot: EquipmentSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Whether the melee main hand holds the unarmed placeholder.
    pub fn is_unarmed(&self) -> bool {
        self.selected(EquipmentSlot::MeleeMainHand) == Some(UNARMED)
    }

    /// Whether an off-hand slot is currently locked by its main hand.
    pub fn off_hand_locked(&self, range: WeaponRange, weapons: &WeaponClassification) -> bool {
        let main = match range {
            WeaponRange::Melee => self.selected(EquipmentSlot::MeleeMainHand),
            WeaponRange::Ranged => self.selected(EquipmentSlot::RangedMainHand),
        };
        match main {
            Some(UNARMED) if range == WeaponRange::Melee => true,
            Some(name) => weapons.is_strictly_two_handed(name, range),
            None => false,
        }
    }

    /// Change a slot selection. `None` clears the slot. Selecting into a
    /// locked off-hand slot is rejected; changing a main hand clears its
    /// off-hand whenever the new selection locks it.
    pub fn select(
        &mut self,
        slot: EquipmentSlot,
        item: Option<String>,
        weapons: &WeaponClassification,
    ) -> Result<(), DomainError> {
        let lock_range = match slot {
            EquipmentSlot::MeleeOffHand => Some(WeaponRange::Melee),
            EquipmentSlot::RangedOffHand => Some(WeaponRange::Ranged),
            _ => None,
        };
        if let Some(range) = lock_range {
            if item.is_some() && self.off_hand_locked(range, weapons) {
                return Err(DomainError::constraint(format!(
                    "{} is locked by a two-handed main hand",
                    slot
                )));
            }
        }

        match item {
            Some(name) => {
                self.slots.insert(slot, name);
            }
            None => {
                self.slots.remove(&slot);
            }
        }

        // Re-enforce the off-hand lock after any main-hand change.
        if slot == EquipmentSlot::MeleeMainHand
            && self.off_hand_locked(WeaponRange::Melee, weapons)
        {
            self.slots.remove(&EquipmentSlot::MeleeOffHand);
        }
        if slot == EquipmentSlot::RangedMainHand
            && self.off_hand_locked(WeaponRange::Ranged, weapons)
        {
            self.slots.remove(&EquipmentSlot::RangedOffHand);
        }
        Ok(())
    }

    /// All (slot, item) pairs in the fixed slot order.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &str)> {
        EquipmentSlot::all()
            .into_iter()
            .filter_map(|slot| self.selected(slot).map(|name| (slot, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::entities::ItemRecord;

    fn classification() -> WeaponClassification {
        let weapons = vec![
            ItemRecord::new("Greatsword", "Greatsword").with_effect("2h Slashing(2d6)"),
            ItemRecord::new("Longsword", "Longsword")
                .with_effect("1h Slashing(1d8) 2h Slashing(1d10)"),
            ItemRecord::new("Longbow", "Longbow").with_effect("2h Piercing(1d8)"),
        ];
        Catalog::new(&[], &weapons).weapons
    }

    #[test]
    fn test_strictly_two_handed_main_locks_and_clears_off_hand() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(
                EquipmentSlot::MeleeOffHand,
                Some("Longsword".into()),
                &weapons,
            )
            .unwrap();
        selection
            .select(
                EquipmentSlot::MeleeMainHand,
                Some("Greatsword".into()),
                &weapons,
            )
            .unwrap();
        assert_eq!(selection.selected(EquipmentSlot::MeleeOffHand), None);
        assert!(selection.off_hand_locked(WeaponRange::Melee, &weapons));
        assert!(selection
            .select(
                EquipmentSlot::MeleeOffHand,
                Some("Longsword".into()),
                &weapons
            )
            .is_err());
    }

    #[test]
    fn test_versatile_main_re_enables_off_hand() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(
                EquipmentSlot::MeleeMainHand,
                Some("Greatsword".into()),
                &weapons,
            )
            .unwrap();
        selection
            .select(
                EquipmentSlot::MeleeMainHand,
                Some("Longsword".into()),
                &weapons,
            )
            .unwrap();
        assert!(!selection.off_hand_locked(WeaponRange::Melee, &weapons));
        assert!(selection
            .select(
                EquipmentSlot::MeleeOffHand,
                Some("Longsword".into()),
                &weapons
            )
            .is_ok());
    }

    #[test]
    fn test_unarmed_locks_melee_off_hand() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(EquipmentSlot::MeleeMainHand, Some(UNARMED.into()), &weapons)
            .unwrap();
        assert!(selection.is_unarmed());
        assert!(selection.off_hand_locked(WeaponRange::Melee, &weapons));
    }

    #[test]
    fn test_ranged_two_handed_locks_ranged_off_hand_only() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(
                EquipmentSlot::RangedMainHand,
                Some("Longbow".into()),
                &weapons,
            )
            .unwrap();
        assert!(selection.off_hand_locked(WeaponRange::Ranged, &weapons));
        assert!(!selection.off_hand_locked(WeaponRange::Melee, &weapons));
    }

    #[test]
    fn test_clearing_a_slot() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(EquipmentSlot::Helmet, Some("Circlet".into()), &weapons)
            .unwrap();
        assert_eq!(selection.selected(EquipmentSlot::Helmet), Some("Circlet"));
        selection
            .select(EquipmentSlot::Helmet, None, &weapons)
            .unwrap();
        assert_eq!(selection.selected(EquipmentSlot::Helmet), None);
    }

    #[test]
    fn test_equipped_iterates_in_slot_order() {
        let weapons = classification();
        let mut selection = EquipmentSelection::new();
        selection
            .select(EquipmentSlot::Boots, Some("Boots of Speed".into()), &weapons)
            .unwrap();
        selection
            .select(EquipmentSlot::Helmet, Some("Circlet".into()), &weapons)
            .unwrap();
        let order: Vec<EquipmentSlot> = selection.equipped().map(|(slot, _)| slot).collect();
        assert_eq!(order, vec![EquipmentSlot::Helmet, EquipmentSlot::Boots]);
    }
}
