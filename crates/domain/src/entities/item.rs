//! Item records handed over by the data-loading collaborator
//!
//! Records come from the `equipment.json` and `weapons.json` tables, loaded
//! once at startup and treated as immutable for the session. This is a
//! data-carrying struct with no invariants to protect: any combination of
//! values is valid, and malformed effect text degrades at parse time rather
//! than at load time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single equipment or weapon record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique name within its table (e.g., "Longsword", "Bracers of Defence")
    pub name: String,
    /// Category tag (e.g., "Heavy Armour", "Shield", "Longbow")
    #[serde(rename = "type")]
    pub item_type: String,
    /// Free-form rule text, in authored order; may be empty
    #[serde(default)]
    pub effects: Vec<String>,
    /// Explicit AC value, present for some shields and armor
    #[serde(default)]
    pub armor_class: Option<i32>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
            effects: Vec::new(),
            armor_class: None,
        }
    }

    /// Builder-style helper for adding an effect line.
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Builder-style helper for setting the explicit armor class.
    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = Some(armor_class);
        self
    }

    /// All effect lines joined into one text blob with single-space
    /// separators, preserving original order. This is the input the
    /// effect-text grammar operates on.
    pub fn effects_text(&self) -> String {
        self.effects.join(" ")
    }
}

/// Name lookup over both item tables
///
/// Names are assumed globally unique across the two tables; a name present in
/// both is ambiguous and resolved with equipment-map precedence.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    equipment: HashMap<String, ItemRecord>,
    weapons: HashMap<String, ItemRecord>,
}

impl ItemIndex {
    pub fn new(equipment: Vec<ItemRecord>, weapons: Vec<ItemRecord>) -> Self {
        Self {
            equipment: equipment
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
            weapons: weapons
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
        }
    }

    /// Look up an equipment record by name.
    pub fn equipment(&self, name: &str) -> Option<&ItemRecord> {
        self.equipment.get(name)
    }

    /// Look up a weapon record by name.
    pub fn weapon(&self, name: &str) -> Option<&ItemRecord> {
        self.weapons.get(name)
    }

    /// Look up a record in either table. The equipment table takes
    /// precedence when a name exists in both.
    pub fn lookup(&self, name: &str) -> Option<&ItemRecord> {
        self.equipment.get(name).or_else(|| self.weapons.get(name))
    }

    pub fn equipment_records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.equipment.values()
    }

    pub fn weapon_records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.weapons.values()
    }
}
