//! Wire-facing roster snapshots and their conversion into battle combatants.
//!
//! Snapshots carry the field names and loose typing of the upstream roster
//! service (floating point stats, stringly-typed types and categories).
//! Conversion into a `Combatant` is where that data is checked: a missing
//! or zeroed stat is an error, never a silent default.

use crate::combatant::{Combatant, MoveData};
use crate::errors::CombatantDataError;
use schema::{MoveCategory, PokemonType};
use serde::{Deserialize, Serialize};

fn default_pp() -> u8 {
    10
}

/// A move as the roster service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSnapshot {
    pub move_id: u32,
    pub name: String,
    /// Null or zero power marks a status move.
    #[serde(default)]
    pub power: Option<f64>,
    /// Hit chance as a fraction in [0, 1].
    pub accuracy: f64,
    pub move_type: String,
    #[serde(default)]
    pub category: Option<String>,
    /// The upstream service does not track PP; absent values get a flat
    /// allotment.
    #[serde(default = "default_pp")]
    pub pp: u8,
}

impl MoveSnapshot {
    pub fn into_move_data(self) -> Result<MoveData, CombatantDataError> {
        let move_type: PokemonType = self
            .move_type
            .parse()
            .map_err(|_| CombatantDataError::UnknownTypeName(self.move_type.clone()))?;

        let category = match &self.category {
            Some(raw) => Some(
                raw.parse::<MoveCategory>()
                    .map_err(|_| CombatantDataError::UnknownTypeName(raw.clone()))?,
            ),
            None => None,
        };

        let power = match self.power {
            Some(p) if p > 0.0 => Some(p.round() as u16),
            _ => None,
        };

        let data = MoveData {
            name: self.name,
            power,
            accuracy: self.accuracy,
            move_type,
            category,
            max_pp: self.pp,
        };
        data.validate()?;
        Ok(data)
    }
}

/// A combatant as the roster service describes it. Stats arrive as optional
/// floats so that absent fields surface as conversion errors instead of
/// deserialization failures with no context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub pokemon_id: u32,
    pub nickname: String,
    pub level: u8,
    pub max_hp: Option<f64>,
    pub current_hp: Option<f64>,
    pub attack: Option<f64>,
    pub defense: Option<f64>,
    pub speed: Option<f64>,
    pub special_atk: Option<f64>,
    pub special_def: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    pub types: Vec<String>,
    pub moves: Vec<MoveSnapshot>,
}

impl CombatantSnapshot {
    pub fn into_combatant(self) -> Result<Combatant, CombatantDataError> {
        let nickname = self.nickname.clone();
        let stat = |value: Option<f64>, name: &'static str| {
            let v = value.ok_or(CombatantDataError::MissingStat {
                combatant: nickname.clone(),
                stat: name,
            })?;
            if v < 0.0 {
                return Err(CombatantDataError::NonPositiveStat {
                    combatant: nickname.clone(),
                    stat: name,
                });
            }
            Ok(v.round() as u16)
        };

        let max_hp = stat(self.max_hp, "max_hp")?;
        let current_hp = stat(self.current_hp, "current_hp")?;
        let attack = stat(self.attack, "attack")?;
        let defense = stat(self.defense, "defense")?;
        let speed = stat(self.speed, "speed")?;
        let special_attack = stat(self.special_atk, "special_atk")?;
        let special_defense = stat(self.special_def, "special_def")?;

        let types = self
            .types
            .iter()
            .map(|raw| {
                raw.parse::<PokemonType>()
                    .map_err(|_| CombatantDataError::UnknownTypeName(raw.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let moves = self
            .moves
            .into_iter()
            .map(MoveSnapshot::into_move_data)
            .collect::<Result<Vec<_>, _>>()?;

        Combatant::new(
            self.pokemon_id,
            self.nickname,
            self.level,
            max_hp,
            current_hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
            types,
            moves,
        )
    }
}

/// Source of party snapshots for battle setup.
pub trait RosterStore {
    fn get_party(&self, trainer_id: &str) -> Option<Vec<CombatantSnapshot>>;
}

/// Built-in starter parties, for demos and offline play.
#[derive(Debug, Default)]
pub struct PrefabRoster;

impl PrefabRoster {
    pub fn new() -> Self {
        PrefabRoster
    }

    fn starters() -> Vec<CombatantSnapshot> {
        vec![
            snapshot(
                56,
                "Mankey",
                40.0,
                80.0,
                35.0,
                70.0,
                35.0,
                45.0,
                &["fighting"],
                vec![
                    move_snapshot(10, "Scratch", Some(40.0), 1.0, "normal", 35),
                    move_snapshot(2, "Karate Chop", Some(50.0), 1.0, "fighting", 25),
                ],
            ),
            snapshot(
                27,
                "Sandshrew",
                50.0,
                75.0,
                85.0,
                40.0,
                20.0,
                30.0,
                &["ground"],
                vec![
                    move_snapshot(10, "Scratch", Some(40.0), 1.0, "normal", 35),
                    move_snapshot(28, "Sand Attack", None, 1.0, "ground", 15),
                ],
            ),
            snapshot(
                58,
                "Growlithe",
                55.0,
                70.0,
                45.0,
                60.0,
                70.0,
                50.0,
                &["fire"],
                vec![
                    move_snapshot(52, "Ember", Some(40.0), 1.0, "fire", 25),
                    move_snapshot(44, "Bite", Some(60.0), 1.0, "dark", 25),
                ],
            ),
        ]
    }
}

impl RosterStore for PrefabRoster {
    fn get_party(&self, _trainer_id: &str) -> Option<Vec<CombatantSnapshot>> {
        Some(Self::starters())
    }
}

#[allow(clippy::too_many_arguments)]
fn snapshot(
    pokemon_id: u32,
    nickname: &str,
    hp: f64,
    attack: f64,
    defense: f64,
    speed: f64,
    special_atk: f64,
    special_def: f64,
    types: &[&str],
    moves: Vec<MoveSnapshot>,
) -> CombatantSnapshot {
    CombatantSnapshot {
        pokemon_id,
        nickname: nickname.to_string(),
        level: 5,
        max_hp: Some(hp),
        current_hp: Some(hp),
        attack: Some(attack),
        defense: Some(defense),
        speed: Some(speed),
        special_atk: Some(special_atk),
        special_def: Some(special_def),
        status: Some("healthy".to_string()),
        types: types.iter().map(|t| t.to_string()).collect(),
        moves,
    }
}

fn move_snapshot(
    move_id: u32,
    name: &str,
    power: Option<f64>,
    accuracy: f64,
    move_type: &str,
    pp: u8,
) -> MoveSnapshot {
    MoveSnapshot {
        move_id,
        name: name.to_string(),
        power,
        accuracy,
        move_type: move_type.to_string(),
        category: None,
        pp,
    }
}
