//! Weapon damage derivation
//!
//! For each attack slot this resolves the effective handedness, picks the
//! ability modifier (with the finesse and Titanstring overrides), aggregates
//! flat bonuses from the weapon enchantment and equipped accessories, and
//! produces normal/critical damage ranges plus an ordered breakdown of every
//! contributing component. Everything is recomputed from scratch per call;
//! a missing or unknown weapon yields `None` rather than an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, WeaponRange};
use crate::effects::{
    mentions_unarmed, parse_additional_damage_components, parse_weapon_base,
    parse_weapon_base_components, Handedness,
};
use crate::entities::ItemIndex;
use crate::value_objects::{
    Ability, AbilityScores, AttackSlot, DamageComponent, DamageRange, DicePool,
    EquipmentSelection, EquipmentSlot, UNARMED,
};

/// Named-item exception: adds the strength modifier on top of the
/// dexterity-based ranged total.
const TITANSTRING: &str = "Titanstring";

/// Source label for the synthesized ability-modifier component.
const ABILITY_MODIFIER_SOURCE: &str = "Ability modifier";

/// Damage type used when a weapon has no parsed base component.
const GENERIC_WEAPON_TYPE: &str = "Weapon";

/// Whether accessory bonuses tagged "unarmed" are the ones excluded or the
/// only ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnarmedFilter {
    /// Armed attacks: skip items whose effect text mentions "unarmed".
    ExcludeUnarmedTagged,
    /// Unarmed mode: include only items whose effect text mentions "unarmed".
    OnlyUnarmedTagged,
}

/// Derived damage output for one attack slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageReport {
    /// Resolved base dice (the `0d0` sentinel when nothing parsed)
    pub dice: DicePool,
    /// Ability modifier + enchantment + flat equipment bonuses
    pub total_modifier: i32,
    pub normal: DamageRange,
    pub critical: DamageRange,
    /// Contributing components in fixed append order: weapon base, weapon
    /// enchantment, equipment, ability modifier, named-item bonuses
    pub breakdown: Vec<DamageComponent>,
}

impl DamageReport {
    /// Three-line display summary:
    /// ```text
    /// 1d8 + 5
    /// Damage: 6-13 (Avg 9.5)
    /// Crit:   7-21 (Avg 14.0)
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "{} + {}\nDamage: {}-{} (Avg {:.1})\nCrit:   {}-{} (Avg {:.1})",
            self.dice,
            self.total_modifier,
            self.normal.min,
            self.normal.max,
            self.normal.average,
            self.critical.min,
            self.critical.max,
            self.critical.average
        )
    }

    /// Formatted per-component breakdown lines, in breakdown order.
    pub fn breakdown_lines(&self) -> Vec<String> {
        self.breakdown.iter().map(|comp| comp.to_string()).collect()
    }
}

/// Damage engine over the loaded item tables
#[derive(Debug, Clone, Copy)]
pub struct DamageCalculator<'a> {
    index: &'a ItemIndex,
    catalog: &'a Catalog,
}

impl<'a> DamageCalculator<'a> {
    pub fn new(index: &'a ItemIndex, catalog: &'a Catalog) -> Self {
        Self { index, catalog }
    }

    /// Compute the damage report for an attack slot, or `None` when the
    /// slot is empty or holds an unknown weapon name.
    pub fn calculate(
        &self,
        slot: AttackSlot,
        selection: &EquipmentSelection,
        abilities: &AbilityScores,
    ) -> Option<DamageReport> {
        match slot {
            AttackSlot::MeleeMainHand => self.calculate_melee(selection, abilities),
            AttackSlot::RangedMainHand => self.calculate_ranged(selection, abilities),
        }
    }

    fn calculate_melee(
        &self,
        selection: &EquipmentSelection,
        abilities: &AbilityScores,
    ) -> Option<DamageReport> {
        let name = selection.selected(EquipmentSlot::MeleeMainHand)?;
        let str_mod = abilities.modifier(Ability::Strength);

        if name == UNARMED {
            return Some(self.unarmed_report(selection, str_mod));
        }

        let weapon = self.index.weapon(name)?;
        let effects_text = weapon.effects_text();

        // Handedness mode: 1h unless the weapon is strictly two-handed, or
        // versatile with nothing in the off hand.
        let off_hand_empty = selection.selected(EquipmentSlot::MeleeOffHand).is_none();
        let versatile = self.catalog.weapons.is_versatile(name, WeaponRange::Melee);
        let strictly_two_handed = self
            .catalog
            .weapons
            .is_strictly_two_handed(name, WeaponRange::Melee);
        let mode = if (off_hand_empty && versatile) || strictly_two_handed {
            Handedness::TwoHanded
        } else {
            Handedness::OneHanded
        };
        debug!(weapon = %name, ?mode, versatile, "resolved melee handedness");

        let (dice, enchant) = parse_weapon_base(weapon, mode);

        // Finesse upgrades to dexterity only when it strictly beats strength.
        let dex_mod = abilities.modifier(Ability::Dexterity);
        let finesse = effects_text.to_lowercase().contains("finesse");
        let ability_mod = if finesse && dex_mod > str_mod {
            dex_mod
        } else {
            str_mod
        };

        let (flat_bonuses, equipment_components) =
            self.equipment_damage_components(selection, UnarmedFilter::ExcludeUnarmedTagged);
        let total_modifier = ability_mod + enchant + flat_bonuses;

        let base_components =
            parse_weapon_base_components(weapon, mode, &format!("{name} (weapon)"));
        let mut breakdown = base_components.clone();
        breakdown.extend(parse_additional_damage_components(
            &effects_text,
            &format!("{name} (weapon effect)"),
        ));
        breakdown.extend(equipment_components);

        let base_type = base_components
            .first()
            .map_or(GENERIC_WEAPON_TYPE, |comp| comp.damage_type.as_str())
            .to_string();
        if ability_mod != 0 {
            breakdown.push(DamageComponent::flat(
                base_type,
                ability_mod,
                ABILITY_MODIFIER_SOURCE,
            ));
        }

        Some(DamageReport {
            dice,
            total_modifier,
            normal: dice.normal_range(total_modifier),
            critical: dice.critical_range(total_modifier),
            breakdown,
        })
    }

    fn calculate_ranged(
        &self,
        selection: &EquipmentSelection,
        abilities: &AbilityScores,
    ) -> Option<DamageReport> {
        let name = selection.selected(EquipmentSlot::RangedMainHand)?;
        let weapon = self.index.weapon(name)?;
        let effects_text = weapon.effects_text();

        // Most ranged weapons are two-handed; retry one-handed only when the
        // two-handed extraction comes back empty.
        let (mut dice, mut enchant) = parse_weapon_base(weapon, Handedness::TwoHanded);
        if dice.is_zero() {
            (dice, enchant) = parse_weapon_base(weapon, Handedness::OneHanded);
            debug!(weapon = %name, "ranged base damage fell back to one-handed");
        }

        let dex_mod = abilities.modifier(Ability::Dexterity);
        let str_mod = abilities.modifier(Ability::Strength);
        let ability_mod = dex_mod;

        let (mut flat_bonuses, equipment_components) =
            self.equipment_damage_components(selection, UnarmedFilter::ExcludeUnarmedTagged);
        let titanstring = name.contains(TITANSTRING);
        if titanstring {
            flat_bonuses += str_mod;
        }
        let total_modifier = ability_mod + enchant + flat_bonuses;

        let mut base_components =
            parse_weapon_base_components(weapon, Handedness::TwoHanded, &format!("{name} (weapon)"));
        if base_components.is_empty() {
            base_components =
                parse_weapon_base_components(weapon, Handedness::OneHanded, &format!("{name} (weapon)"));
        }
        let mut breakdown = base_components.clone();
        breakdown.extend(parse_additional_damage_components(
            &effects_text,
            &format!("{name} (weapon effect)"),
        ));
        breakdown.extend(equipment_components);

        let base_type = base_components
            .first()
            .map_or(GENERIC_WEAPON_TYPE, |comp| comp.damage_type.as_str())
            .to_string();
        if ability_mod != 0 {
            breakdown.push(DamageComponent::flat(
                base_type.clone(),
                ability_mod,
                ABILITY_MODIFIER_SOURCE,
            ));
        }
        if titanstring && str_mod != 0 {
            breakdown.push(DamageComponent::flat(
                base_type,
                str_mod,
                "Titanstring bonus",
            ));
        }

        Some(DamageReport {
            dice,
            total_modifier,
            normal: dice.normal_range(total_modifier),
            critical: dice.critical_range(total_modifier),
            breakdown,
        })
    }

    /// The unarmed placeholder bypasses weapon parsing entirely: fixed 1d1
    /// bludgeoning, always strength, and only unarmed-tagged accessories.
    fn unarmed_report(&self, selection: &EquipmentSelection, str_mod: i32) -> DamageReport {
        let dice = DicePool::new(1, 1);
        let (flat_bonuses, equipment_components) =
            self.equipment_damage_components(selection, UnarmedFilter::OnlyUnarmedTagged);
        let total_modifier = str_mod + flat_bonuses;

        let mut breakdown = vec![DamageComponent::flat("Bludgeoning", 1, "Unarmed base")];
        breakdown.extend(equipment_components);
        if str_mod != 0 {
            breakdown.push(DamageComponent::flat(
                "Bludgeoning",
                str_mod,
                ABILITY_MODIFIER_SOURCE,
            ));
        }

        DamageReport {
            dice,
            total_modifier,
            normal: dice.normal_range(total_modifier),
            critical: dice.critical_range(total_modifier),
            breakdown,
        }
    }

    /// "Additional damage" contributions from the eight accessory slots, in
    /// fixed scan order. Only flat (dice-free) components fold into the
    /// running total; dice-bearing ones appear in the breakdown only.
    fn equipment_damage_components(
        &self,
        selection: &EquipmentSelection,
        filter: UnarmedFilter,
    ) -> (i32, Vec<DamageComponent>) {
        let mut flat_total = 0;
        let mut components = Vec::new();

        for slot in EquipmentSlot::accessories() {
            let Some(item_name) = selection.selected(slot) else {
                continue;
            };
            let Some(item) = self.index.equipment(item_name) else {
                continue;
            };
            let effects_text = item.effects_text();
            let unarmed_tagged = mentions_unarmed(&effects_text);
            let skip = match filter {
                UnarmedFilter::ExcludeUnarmedTagged => unarmed_tagged,
                UnarmedFilter::OnlyUnarmedTagged => !unarmed_tagged,
            };
            if skip {
                continue;
            }

            for component in
                parse_additional_damage_components(&effects_text, &format!("{item_name} (equipment)"))
            {
                if component.is_flat() && component.flat_bonus != 0 {
                    flat_total += component.flat_bonus;
                }
                components.push(component);
            }
        }

        (flat_total, components)
    }
}
