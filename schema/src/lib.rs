// Battle Engine Schema - Shared type definitions
// This crate contains the static enums and lookup tables shared across the
// battle engine: the elemental type system with its effectiveness chart,
// move categories, and the categorical effectiveness labels reported to
// callers.

// Re-export the main types
pub use battle_data::*;
pub use pokemon_types::*;

pub mod battle_data;
pub mod pokemon_types;
