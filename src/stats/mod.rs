//! Derived statistics recomputed after every accepted build change

pub mod derived;
pub mod location;

pub use derived::{base_initiative, hp, initiative, mana, DerivedStats};
pub use location::{BodyLocation, LocationHp};
