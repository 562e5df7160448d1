//! The effect-text grammar
//!
//! Item effects are hand-authored free text with known quirks, so every rule
//! here treats its input as untrusted: a miss degrades to a zero value or an
//! empty list, never an error. The grammar is deliberately narrow - it covers
//! exactly the patterns found in the item tables and nothing more.
//!
//! Three kinds of structure are extracted:
//! - handedness segments: `1h Slashing(1d8) 2h Slashing(1d10)` splits into a
//!   `1h` and a `2h` segment, each holding `Type(Value)` damage clauses;
//! - additional-damage clauses: `Deal an additional Acid(2)` anywhere in the
//!   text, independent of handedness; the `🎲` glyph stands in for an
//!   unspecified damage type;
//! - the weapon base-damage shorthand used for range math, with a loose
//!   fallback for items that never mention handedness.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::ItemRecord;
use crate::value_objects::{DamageComponent, DicePool};

/// Weapon grip for segment extraction and base-damage parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Handedness {
    OneHanded,
    TwoHanded,
}

impl Handedness {
    /// The token used in effect text (`1h` / `2h`).
    pub fn token(&self) -> &'static str {
        match self {
            Self::OneHanded => "1h",
            Self::TwoHanded => "2h",
        }
    }
}

/// A parsed `<ValueExpression>`: dice notation with an optional flat bonus,
/// or a bare integer, or all-zero for anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageValue {
    pub pool: DicePool,
    pub flat: i32,
}

impl DamageValue {
    pub const ZERO: DamageValue = DamageValue {
        pool: DicePool::ZERO,
        flat: 0,
    };

    pub fn is_zero(&self) -> bool {
        self.pool.count == 0 && self.pool.sides == 0 && self.flat == 0
    }
}

// A handedness token is a whole word preceded by start-of-text, whitespace,
// or a closing parenthesis, and followed by whitespace.
static HANDEDNESS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\s|\))(1h|2h)\s+").expect("handedness token pattern"));

// `Slashing(1d8 + 1)` - an alphabetic word directly followed by a
// parenthesized value expression.
static DAMAGE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+)\(([^)]+)\)").expect("damage clause pattern"));

static VALUE_DICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)d(\d+)(?:\s*\+\s*(\d+))?$").expect("dice value pattern"));

static VALUE_FLAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)$").expect("flat value pattern"));

// `Deal an additional Acid(2)` / `an additional 🎲(1d4)`, case-insensitive,
// anywhere in the text.
static ADDITIONAL_DAMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:deal\s+)?an\s+additional\s+(?:([A-Za-z]+)|🎲)\(([^)]+)\)")
        .expect("additional damage pattern")
});

// Strict base-damage shorthand per handedness: `1h Slashing(1d8 + 1)`.
static BASE_DAMAGE_1H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)1h\s+\w+\((\d+d\d+)(?:\s*\+\s*(\d+))?\)").expect("1h base damage pattern")
});

static BASE_DAMAGE_2H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)2h\s+\w+\((\d+d\d+)(?:\s*\+\s*(\d+))?\)").expect("2h base damage pattern")
});

// Loose fallback: any parenthesized dice expression, regardless of label.
static LOOSE_DICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d+d\d+)(?:\s*\+\s*(\d+))?\)").expect("loose dice pattern"));

static UNARMED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bunarmed\b").expect("unarmed word pattern"));

fn base_damage_pattern(handedness: Handedness) -> &'static Regex {
    match handedness {
        Handedness::OneHanded => &BASE_DAMAGE_1H,
        Handedness::TwoHanded => &BASE_DAMAGE_2H,
    }
}

fn parse_int(digits: &str) -> i32 {
    // Captured digits only; absurdly long runs degrade to zero like any
    // other parse miss.
    digits.parse().unwrap_or(0)
}

/// Whether the text carries a whole-word `unarmed` mention.
pub fn mentions_unarmed(effects_text: &str) -> bool {
    UNARMED_WORD.is_match(effects_text)
}

/// Whether the text carries a standalone handedness token.
pub fn has_handedness_token(effects_text: &str, handedness: Handedness) -> bool {
    HANDEDNESS_TOKEN
        .captures_iter(effects_text)
        .any(|caps| caps.get(2).map(|m| m.as_str()) == Some(handedness.token()))
}

/// Extract the text segment attributed to a handedness: from just after its
/// token to the start of the next handedness token or end of text. Returns
/// the first (only) matching segment, or empty when none exists.
pub fn extract_handedness_segment(effects_text: &str, handedness: Handedness) -> &str {
    let tokens: Vec<(usize, usize, &str)> = HANDEDNESS_TOKEN
        .captures_iter(effects_text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let token = caps.get(2)?;
            Some((whole.start(), whole.end(), token.as_str()))
        })
        .collect();

    for (idx, (_, end, token)) in tokens.iter().enumerate() {
        if *token == handedness.token() {
            let segment_end = tokens
                .get(idx + 1)
                .map_or(effects_text.len(), |next| next.0);
            return &effects_text[*end..segment_end];
        }
    }
    ""
}

/// Parse a `<ValueExpression>` like `1d8 + 1` or `2`. Anything else is the
/// all-zero value ("no damage").
pub fn parse_damage_value(value: &str) -> DamageValue {
    let value = value.trim();
    if let Some(caps) = VALUE_DICE.captures(value) {
        let count = caps.get(1).map_or(0, |m| parse_int(m.as_str()).max(0) as u32);
        let sides = caps.get(2).map_or(0, |m| parse_int(m.as_str()).max(0) as u32);
        let flat = caps.get(3).map_or(0, |m| parse_int(m.as_str()));
        return DamageValue {
            pool: DicePool::new(count, sides),
            flat,
        };
    }
    if let Some(caps) = VALUE_FLAT.captures(value) {
        let flat = caps.get(1).map_or(0, |m| parse_int(m.as_str()));
        return DamageValue {
            pool: DicePool::ZERO,
            flat,
        };
    }
    DamageValue::ZERO
}

/// Parse the base weapon damage clauses tied to a handedness, in order of
/// appearance. Zero-value clauses are kept - base damage reports what the
/// text says, discarding is an additional-damage rule.
pub fn parse_weapon_base_components(
    item: &ItemRecord,
    handedness: Handedness,
    source_label: &str,
) -> Vec<DamageComponent> {
    let effects_text = item.effects_text();
    let segment = extract_handedness_segment(&effects_text, handedness);
    if segment.is_empty() {
        return Vec::new();
    }

    DAMAGE_CLAUSE
        .captures_iter(segment)
        .filter_map(|caps| {
            let damage_type = caps.get(1)?.as_str();
            let value = parse_damage_value(caps.get(2)?.as_str());
            Some(DamageComponent::new(
                damage_type,
                value.pool,
                value.flat,
                source_label,
            ))
        })
        .collect()
}

/// Parse "additional damage" enchantment clauses anywhere in the text,
/// independent of handedness. Clauses whose value parses to all-zero are
/// discarded. The `🎲` glyph yields the type "Unspecified".
pub fn parse_additional_damage_components(
    effects_text: &str,
    source_label: &str,
) -> Vec<DamageComponent> {
    ADDITIONAL_DAMAGE
        .captures_iter(effects_text)
        .filter_map(|caps| {
            let damage_type = caps.get(1).map_or("Unspecified", |m| m.as_str());
            let value = parse_damage_value(caps.get(2)?.as_str());
            if value.is_zero() {
                return None;
            }
            Some(DamageComponent::new(
                damage_type,
                value.pool,
                value.flat,
                source_label,
            ))
        })
        .collect()
}

/// Weapon base-damage shorthand for range math: the first
/// `<handedness> <Type>(<N>d<M> [+ <K>])` match, falling back to a loose
/// search for any parenthesized dice expression, then to the `0d0` sentinel.
pub fn parse_weapon_base(item: &ItemRecord, handedness: Handedness) -> (DicePool, i32) {
    let effects_text = item.effects_text();

    if let Some(caps) = base_damage_pattern(handedness).captures(&effects_text) {
        let pool = caps.get(1).map_or(DicePool::ZERO, |m| DicePool::parse(m.as_str()));
        let enchant = caps.get(2).map_or(0, |m| parse_int(m.as_str()));
        return (pool, enchant);
    }

    if let Some(caps) = LOOSE_DICE.captures(&effects_text) {
        let pool = caps.get(1).map_or(DicePool::ZERO, |m| DicePool::parse(m.as_str()));
        let enchant = caps.get(2).map_or(0, |m| parse_int(m.as_str()));
        return (pool, enchant);
    }

    (DicePool::ZERO, 0)
}
