//! Turn-based battle resolution engine.
//!
//! The engine owns battle state and resolves complete turns from a single
//! player move selection: accuracy, type effectiveness, critical hits,
//! damage variance, PP accounting, and fainting. All randomness flows
//! through an injectable oracle so outcomes can be scripted in tests.

pub mod battle;
pub mod catalog;
pub mod combatant;
pub mod errors;
pub mod roster;
pub mod service;

pub use battle::calculators::DamageConfig;
pub use battle::state::{BattleState, Outcome, Side, TurnReport, TurnRng};
pub use errors::{BattleEngineError, BattleResult};
pub use service::BattleService;
