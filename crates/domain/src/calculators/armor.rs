//! Armor Class derivation
//!
//! Combines base armor value, the dexterity modifier capped by armor weight,
//! the off-hand shield bonus, and itemized flat AC bonuses into a final AC
//! with an explanatory breakdown. Absent or malformed data degrades to the
//! unarmored base-10 defaults; nothing here errors.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::entities::ItemIndex;
use crate::value_objects::{EquipmentSelection, EquipmentSlot};

/// Named-item exception: its `Shield + N AC` bonus applies only while
/// unarmored with no shield equipped.
const BRACERS_OF_DEFENCE: &str = "Bracers of Defence";

/// Default AC bonus for a shield without an explicit armor class value.
const DEFAULT_SHIELD_BONUS: i32 = 2;

// Base AC override in armor effect text: "Shield 14 AC".
static BASE_AC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Shield (\d+) AC").expect("base AC pattern"));

// Itemized flat bonus: "Shield + 1 AC". May match multiple times per item.
static BONUS_AC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Shield \+ (\d+) AC").expect("bonus AC pattern"));

/// Result of an AC calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorClassResult {
    pub base_ac: i32,
    pub effective_dex: i32,
    pub bonus_ac: i32,
    pub final_ac: i32,
}

impl ArmorClassResult {
    /// One-line display summary, e.g.
    /// `Armor Class: 15 (Base 10 + Dex 2 + Bonus 3)`.
    pub fn summary(&self) -> String {
        format!(
            "Armor Class: {} (Base {} + Dex {} + Bonus {})",
            self.final_ac, self.base_ac, self.effective_dex, self.bonus_ac
        )
    }
}

/// Armor Class engine over the loaded item tables
#[derive(Debug, Clone, Copy)]
pub struct ArmorCalculator<'a> {
    index: &'a ItemIndex,
    catalog: &'a Catalog,
}

impl<'a> ArmorCalculator<'a> {
    pub fn new(index: &'a ItemIndex, catalog: &'a Catalog) -> Self {
        Self { index, catalog }
    }

    /// Compute final AC from the dexterity modifier and current selection.
    pub fn calculate(
        &self,
        dex_modifier: i32,
        selection: &EquipmentSelection,
    ) -> ArmorClassResult {
        let mut base_ac = 10;
        let mut max_dex_bonus: Option<i32> = None; // None = uncapped
        let mut bonus_ac = 0;

        // Armor slot: base AC override, dex cap, unarmored flag.
        let armor_name = selection.selected(EquipmentSlot::Armor);
        let armor_item = armor_name.and_then(|name| self.index.equipment(name));
        let mut is_unarmored = armor_item.is_none();

        if let Some(armor) = armor_item {
            is_unarmored = armor.item_type == "Clothing";

            let effects_text = armor.effects_text();
            if let Some(caps) = BASE_AC.captures(&effects_text) {
                base_ac = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(base_ac);
            } else if let Some(explicit) = armor.armor_class {
                base_ac = explicit;
            }

            if armor.item_type.contains("Medium") {
                max_dex_bonus = Some(2);
            } else if armor.item_type.contains("Heavy") {
                max_dex_bonus = Some(0);
            }
        }

        // Off-hand shield.
        let off_hand_name = selection.selected(EquipmentSlot::MeleeOffHand);
        let has_shield =
            off_hand_name.is_some_and(|name| self.catalog.equipment.is_shield(name));
        if has_shield {
            if let Some(shield) = off_hand_name.and_then(|name| self.index.lookup(name)) {
                bonus_ac += shield.armor_class.unwrap_or(DEFAULT_SHIELD_BONUS);
            }
        }

        // Itemized flat bonuses across every equipped slot, weapons included.
        for (_, item_name) in selection.equipped() {
            let Some(item) = self.index.lookup(item_name) else {
                continue;
            };
            let effects_text = item.effects_text();
            for caps in BONUS_AC.captures_iter(&effects_text) {
                let bonus: i32 = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0);
                if item.name == BRACERS_OF_DEFENCE {
                    if is_unarmored && !has_shield {
                        bonus_ac += bonus;
                    } else {
                        debug!(item = %item.name, "conditional AC bonus suppressed");
                    }
                } else {
                    bonus_ac += bonus;
                }
            }
        }

        let effective_dex = match max_dex_bonus {
            Some(cap) => dex_modifier.min(cap),
            None => dex_modifier,
        };
        let final_ac = base_ac + effective_dex + bonus_ac;
        debug!(base_ac, effective_dex, bonus_ac, final_ac, "armor class derived");

        ArmorClassResult {
            base_ac,
            effective_dex,
            bonus_ac,
            final_ac,
        }
    }
}
