//! Derived-statistics engines

mod armor;
mod damage;

pub use armor::{ArmorCalculator, ArmorClassResult};
pub use damage::{DamageCalculator, DamageReport};
