//! Bucketing rules for equipment types and weapon classes

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{has_handedness_token, Handedness};
use crate::entities::ItemRecord;

/// Melee vs. ranged weapon class.
///
/// Classification relies strictly on the weapon's type string - inspecting
/// effect text for range cues is superseded, since damage-type words like
/// "Bow(" would misread as range indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponRange {
    Melee,
    Ranged,
}

impl WeaponRange {
    fn from_type(item_type: &str) -> Self {
        let lower = item_type.to_lowercase();
        if lower.contains("bow") || lower.contains("crossbow") {
            Self::Ranged
        } else {
            Self::Melee
        }
    }
}

impl fmt::Display for WeaponRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melee => write!(f, "melee"),
            Self::Ranged => write!(f, "ranged"),
        }
    }
}

/// Equipment names bucketed by type, each alphabetically sorted
///
/// An item belongs to at most one bucket; unmatched types join none but stay
/// retrievable by name from the raw item maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentBuckets {
    pub helmets: Vec<String>,
    pub capes: Vec<String>,
    pub armor_clothing: Vec<String>,
    pub gloves: Vec<String>,
    pub boots: Vec<String>,
    pub amulets: Vec<String>,
    pub rings: Vec<String>,
    pub shields: Vec<String>,
}

impl EquipmentBuckets {
    fn build(equipment: &[ItemRecord]) -> Self {
        let mut buckets = Self::default();
        for item in equipment {
            let bucket = match item.item_type.as_str() {
                "Helmet" => &mut buckets.helmets,
                "Cape" | "Cloak" => &mut buckets.capes,
                "Medium Armour" | "Heavy Armour" | "Light Armour" | "Clothing" => {
                    &mut buckets.armor_clothing
                }
                "Gloves" => &mut buckets.gloves,
                "Boots" => &mut buckets.boots,
                "Amulet" => &mut buckets.amulets,
                "Ring" => &mut buckets.rings,
                "Shield" => &mut buckets.shields,
                _ => continue,
            };
            bucket.push(item.name.clone());
        }
        buckets.helmets.sort();
        buckets.capes.sort();
        buckets.armor_clothing.sort();
        buckets.gloves.sort();
        buckets.boots.sort();
        buckets.amulets.sort();
        buckets.rings.sort();
        buckets.shields.sort();
        buckets
    }

    pub fn is_shield(&self, name: &str) -> bool {
        self.shields.iter().any(|shield| shield == name)
    }
}

/// Weapon names partitioned into the four handedness/range sets
///
/// A versatile weapon appears in both the 1H and 2H set for its range
/// category; no weapon appears in both a melee and a ranged set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponClassification {
    pub melee_one_handed: BTreeSet<String>,
    pub melee_two_handed: BTreeSet<String>,
    pub ranged_one_handed: BTreeSet<String>,
    pub ranged_two_handed: BTreeSet<String>,
}

impl WeaponClassification {
    fn build(weapons: &[ItemRecord]) -> Self {
        let mut sets = Self::default();
        for weapon in weapons {
            let effects_text = weapon.effects_text().to_lowercase();
            let one_handed = has_handedness_token(&effects_text, Handedness::OneHanded);
            let two_handed = has_handedness_token(&effects_text, Handedness::TwoHanded);
            let range = WeaponRange::from_type(&weapon.item_type);
            debug!(
                weapon = %weapon.name,
                %range,
                one_handed,
                two_handed,
                "classified weapon"
            );

            match range {
                WeaponRange::Melee => {
                    if one_handed {
                        sets.melee_one_handed.insert(weapon.name.clone());
                    }
                    if two_handed {
                        sets.melee_two_handed.insert(weapon.name.clone());
                    }
                }
                WeaponRange::Ranged => {
                    if one_handed {
                        sets.ranged_one_handed.insert(weapon.name.clone());
                    }
                    if two_handed {
                        sets.ranged_two_handed.insert(weapon.name.clone());
                    }
                    // Fallback when the effect text carries no token: hand
                    // crossbows are one-handed, every other bow/crossbow is
                    // two-handed. Union semantics, applied in addition to
                    // the token-derived sets.
                    let type_lower = weapon.item_type.to_lowercase();
                    if type_lower.contains("hand crossbow") {
                        sets.ranged_one_handed.insert(weapon.name.clone());
                    } else if type_lower.contains("bow") || type_lower.contains("crossbow") {
                        sets.ranged_two_handed.insert(weapon.name.clone());
                    }
                }
            }
        }
        sets
    }

    fn sets(&self, range: WeaponRange) -> (&BTreeSet<String>, &BTreeSet<String>) {
        match range {
            WeaponRange::Melee => (&self.melee_one_handed, &self.melee_two_handed),
            WeaponRange::Ranged => (&self.ranged_one_handed, &self.ranged_two_handed),
        }
    }

    /// Present in the 2H set for the range category and absent from its 1H
    /// set. Governs off-hand locking and main-hand dice-mode selection.
    pub fn is_strictly_two_handed(&self, name: &str, range: WeaponRange) -> bool {
        let (one_handed, two_handed) = self.sets(range);
        two_handed.contains(name) && !one_handed.contains(name)
    }

    /// Present in both sets for the range category.
    pub fn is_versatile(&self, name: &str, range: WeaponRange) -> bool {
        let (one_handed, two_handed) = self.sets(range);
        two_handed.contains(name) && one_handed.contains(name)
    }
}

/// Derived classification over both item tables, computed once at load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub equipment: EquipmentBuckets,
    pub weapons: WeaponClassification,
}

impl Catalog {
    pub fn new(equipment: &[ItemRecord], weapons: &[ItemRecord]) -> Self {
        Self {
            equipment: EquipmentBuckets::build(equipment),
            weapons: WeaponClassification::build(weapons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(name: &str, item_type: &str, effect: &str) -> ItemRecord {
        ItemRecord::new(name, item_type).with_effect(effect)
    }

    #[test]
    fn test_equipment_buckets_sorted() {
        let equipment = vec![
            ItemRecord::new("Winged Boots", "Boots"),
            ItemRecord::new("Boots of Speed", "Boots"),
            ItemRecord::new("Cloak of Protection", "Cloak"),
            ItemRecord::new("Cape of the Mountebank", "Cape"),
            ItemRecord::new("Scale Mail", "Medium Armour"),
            ItemRecord::new("Simple Robe", "Clothing"),
            ItemRecord::new("Adamantine Shield", "Shield"),
        ];
        let buckets = EquipmentBuckets::build(&equipment);
        assert_eq!(buckets.boots, vec!["Boots of Speed", "Winged Boots"]);
        // Cape and Cloak share a bucket
        assert_eq!(
            buckets.capes,
            vec!["Cape of the Mountebank", "Cloak of Protection"]
        );
        // Armour grades and clothing share a bucket
        assert_eq!(buckets.armor_clothing, vec!["Scale Mail", "Simple Robe"]);
        assert!(buckets.is_shield("Adamantine Shield"));
        assert!(!buckets.is_shield("Scale Mail"));
    }

    #[test]
    fn test_unrecognized_type_joins_no_bucket() {
        let equipment = vec![ItemRecord::new("Mysterious Trinket", "Curio")];
        let buckets = EquipmentBuckets::build(&equipment);
        assert_eq!(buckets, EquipmentBuckets::default());
    }

    #[test]
    fn test_versatile_melee_weapon_joins_both_sets() {
        let weapons = vec![weapon(
            "Longsword",
            "Longsword",
            "1h Slashing(1d8) 2h Slashing(1d10)",
        )];
        let sets = WeaponClassification::build(&weapons);
        assert!(sets.melee_one_handed.contains("Longsword"));
        assert!(sets.melee_two_handed.contains("Longsword"));
        assert!(sets.is_versatile("Longsword", WeaponRange::Melee));
        assert!(!sets.is_strictly_two_handed("Longsword", WeaponRange::Melee));
    }

    #[test]
    fn test_strictly_two_handed_melee() {
        let weapons = vec![weapon("Greatsword", "Greatsword", "2h Slashing(2d6)")];
        let sets = WeaponClassification::build(&weapons);
        assert!(sets.is_strictly_two_handed("Greatsword", WeaponRange::Melee));
    }

    #[test]
    fn test_range_comes_from_type_not_effects() {
        // A melee weapon whose damage type word contains "Bow(" must stay
        // melee; a bow with no handedness token must still land in ranged-2H.
        let weapons = vec![
            weapon("Trick Club", "Club", "1h Bow(1d4)"),
            weapon("Plain Longbow", "Longbow", "Piercing shots"),
        ];
        let sets = WeaponClassification::build(&weapons);
        assert!(sets.melee_one_handed.contains("Trick Club"));
        assert!(!sets.ranged_one_handed.contains("Trick Club"));
        assert!(!sets.ranged_two_handed.contains("Trick Club"));
        assert!(sets.ranged_two_handed.contains("Plain Longbow"));
    }

    #[test]
    fn test_hand_crossbow_fallback_forces_one_handed() {
        let weapons = vec![weapon("Hand Crossbow +1", "Hand Crossbow", "Piercing bolts")];
        let sets = WeaponClassification::build(&weapons);
        assert!(sets.ranged_one_handed.contains("Hand Crossbow +1"));
        assert!(!sets.ranged_two_handed.contains("Hand Crossbow +1"));
    }

    #[test]
    fn test_ranged_fallback_unions_with_token_sets() {
        // Token says 2h and the type fallback also says 2h: one entry, no dupes.
        let weapons = vec![weapon("Heavy Crossbow", "Heavy Crossbow", "2h Piercing(1d10)")];
        let sets = WeaponClassification::build(&weapons);
        assert_eq!(sets.ranged_two_handed.len(), 1);
        assert!(sets.is_strictly_two_handed("Heavy Crossbow", WeaponRange::Ranged));
    }

    #[test]
    fn test_melee_weapon_without_tokens_joins_no_set() {
        let weapons = vec![weapon("Whip of Mystery", "Whip", "Deal an additional Fire(1)")];
        let sets = WeaponClassification::build(&weapons);
        assert!(!sets.melee_one_handed.contains("Whip of Mystery"));
        assert!(!sets.melee_two_handed.contains("Whip of Mystery"));
        assert!(!sets.is_strictly_two_handed("Whip of Mystery", WeaponRange::Melee));
    }

    #[test]
    fn test_catalog_builds_both_halves() {
        let equipment = vec![ItemRecord::new("Ring of Protection", "Ring")];
        let weapons = vec![weapon("Shortbow", "Shortbow", "2h Piercing(1d6)")];
        let catalog = Catalog::new(&equipment, &weapons);
        assert_eq!(catalog.equipment.rings, vec!["Ring of Protection"]);
        assert!(catalog
            .weapons
            .is_strictly_two_handed("Shortbow", WeaponRange::Ranged));
    }
}
