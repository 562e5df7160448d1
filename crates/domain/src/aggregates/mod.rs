//! Aggregates - State mutated through invariant-preserving methods

mod character;

pub use character::CharacterState;
