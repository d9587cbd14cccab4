use crate::battle::state::Side;
use std::fmt;

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// A battle could not be created from the supplied combatants
    InvalidBattleSetup(SetupError),
    /// A submitted move selection was rejected; the battle is unchanged
    InvalidMoveSelection(MoveSelectionError),
    /// Combatant or move data is missing or malformed
    InvalidCombatantData(CombatantDataError),
    /// The battle has already reached a terminal outcome
    BattleAlreadyFinished,
    /// No battle is registered under the given id
    BattleNotFound(String),
}

/// Errors detected while validating combatants at battle creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The combatant on this side entered the battle with 0 current HP
    FaintedCombatant(Side),
    /// The combatant on this side has no moves to select from
    EmptyMoveSet(Side),
}

/// Errors detected while validating a move selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveSelectionError {
    /// The index does not refer to a move in the combatant's move set
    InvalidMoveIndex(usize),
    /// The selected move has no uses remaining
    NoUsesRemaining { move_name: String },
}

/// Errors raised when combatant or move data cannot be trusted.
/// Missing data is never silently defaulted inside damage math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatantDataError {
    /// A required stat was absent from a roster snapshot
    MissingStat {
        combatant: String,
        stat: &'static str,
    },
    /// A stat is negative, or zero where the damage formula divides by it
    NonPositiveStat {
        combatant: String,
        stat: &'static str,
    },
    /// The combatant's type list is empty or longer than two entries
    InvalidTypeList { combatant: String },
    /// A type or category string from the wire did not parse
    UnknownTypeName(String),
    /// Move accuracy must be a fraction in [0, 1]
    InvalidAccuracy { move_name: String },
    /// Current HP exceeds maximum HP, or maximum HP is zero
    InvalidHitPoints { combatant: String },
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::InvalidBattleSetup(err) => {
                write!(f, "Invalid battle setup: {}", err)
            }
            BattleEngineError::InvalidMoveSelection(err) => {
                write!(f, "Invalid move selection: {}", err)
            }
            BattleEngineError::InvalidCombatantData(err) => {
                write!(f, "Invalid combatant data: {}", err)
            }
            BattleEngineError::BattleAlreadyFinished => {
                write!(f, "Battle is already finished")
            }
            BattleEngineError::BattleNotFound(id) => write!(f, "Battle not found: {}", id),
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::FaintedCombatant(side) => {
                write!(f, "{} combatant has no remaining HP", side)
            }
            SetupError::EmptyMoveSet(side) => {
                write!(f, "{} combatant has an empty move set", side)
            }
        }
    }
}

impl fmt::Display for MoveSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveSelectionError::InvalidMoveIndex(index) => {
                write!(f, "No move at index {}", index)
            }
            MoveSelectionError::NoUsesRemaining { move_name } => {
                write!(f, "{} has no uses remaining", move_name)
            }
        }
    }
}

impl fmt::Display for CombatantDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatantDataError::MissingStat { combatant, stat } => {
                write!(f, "{} is missing required stat '{}'", combatant, stat)
            }
            CombatantDataError::NonPositiveStat { combatant, stat } => {
                write!(f, "{} has a non-positive '{}' stat", combatant, stat)
            }
            CombatantDataError::InvalidTypeList { combatant } => {
                write!(f, "{} must have one or two types", combatant)
            }
            CombatantDataError::UnknownTypeName(name) => {
                write!(f, "Unknown type name: {}", name)
            }
            CombatantDataError::InvalidAccuracy { move_name } => {
                write!(f, "{} accuracy must be within [0, 1]", move_name)
            }
            CombatantDataError::InvalidHitPoints { combatant } => {
                write!(f, "{} has inconsistent hit points", combatant)
            }
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for SetupError {}
impl std::error::Error for MoveSelectionError {}
impl std::error::Error for CombatantDataError {}

impl From<SetupError> for BattleEngineError {
    fn from(err: SetupError) -> Self {
        BattleEngineError::InvalidBattleSetup(err)
    }
}

impl From<MoveSelectionError> for BattleEngineError {
    fn from(err: MoveSelectionError) -> Self {
        BattleEngineError::InvalidMoveSelection(err)
    }
}

impl From<CombatantDataError> for BattleEngineError {
    fn from(err: CombatantDataError) -> Self {
        BattleEngineError::InvalidCombatantData(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
