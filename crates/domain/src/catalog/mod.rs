//! Equipment and weapon categorization
//!
//! Partitions the loaded item tables into the named category lists that
//! populate slot options and drive rule branches downstream ("is this a
//! shield", "is this strictly two-handed"). Built once after data load and
//! treated as immutable for the session.

mod categorizer;

pub use categorizer::{Catalog, EquipmentBuckets, WeaponClassification, WeaponRange};
