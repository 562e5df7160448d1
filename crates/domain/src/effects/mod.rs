//! Effect-text parsing - the grammar over item rule text

mod parser;

pub use parser::{
    extract_handedness_segment, has_handedness_token, mentions_unarmed,
    parse_additional_damage_components, parse_damage_value, parse_weapon_base,
    parse_weapon_base_components, DamageValue, Handedness,
};
