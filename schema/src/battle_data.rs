use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumString;

/// Which stat pair a move's damage is computed from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum MoveCategory {
    /// Attack vs. Defense.
    Physical,
    /// Special Attack vs. Special Defense.
    Special,
    /// No damage output from this core; power is null.
    Status,
}

/// Categorical label derived from the combined type multiplier of an attack
/// against a defender's type list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl Effectiveness {
    /// Maps a combined multiplier to its label: 0x is NoEffect, below 1x is
    /// NotVeryEffective, exactly 1x is Normal, above 1x is SuperEffective.
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier <= 0.0 {
            Effectiveness::NoEffect
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Normal
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effectiveness::NoEffect => write!(f, "It had no effect!"),
            Effectiveness::NotVeryEffective => write!(f, "It's not very effective..."),
            Effectiveness::Normal => Ok(()),
            Effectiveness::SuperEffective => write!(f, "It's super effective!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_labels() {
        assert_eq!(Effectiveness::from_multiplier(0.0), Effectiveness::NoEffect);
        assert_eq!(
            Effectiveness::from_multiplier(0.25),
            Effectiveness::NotVeryEffective
        );
        assert_eq!(
            Effectiveness::from_multiplier(0.5),
            Effectiveness::NotVeryEffective
        );
        assert_eq!(Effectiveness::from_multiplier(1.0), Effectiveness::Normal);
        assert_eq!(
            Effectiveness::from_multiplier(2.0),
            Effectiveness::SuperEffective
        );
        assert_eq!(
            Effectiveness::from_multiplier(4.0),
            Effectiveness::SuperEffective
        );
    }

    #[test]
    fn category_parses_from_wire_strings() {
        assert_eq!(
            "physical".parse::<MoveCategory>().unwrap(),
            MoveCategory::Physical
        );
        assert_eq!(
            "Special".parse::<MoveCategory>().unwrap(),
            MoveCategory::Special
        );
        assert!("other".parse::<MoveCategory>().is_err());
    }
}
