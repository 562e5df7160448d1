//! Entities - Loaded records with identity

mod item;

pub use item::{ItemIndex, ItemRecord};
