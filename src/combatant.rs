use crate::errors::CombatantDataError;
use schema::{MoveCategory, PokemonType};
use serde::{Deserialize, Serialize};

/// Static move metadata, as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    /// Null for status moves, which deal no damage in this core.
    pub power: Option<u16>,
    /// Chance to hit, as a fraction in [0, 1].
    pub accuracy: f64,
    pub move_type: PokemonType,
    /// Damage classification. Source data does not consistently carry this
    /// field; damaging moves without one are treated as physical.
    pub category: Option<MoveCategory>,
    pub max_pp: u8,
}

impl MoveData {
    pub fn validate(&self) -> Result<(), CombatantDataError> {
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(CombatantDataError::InvalidAccuracy {
                move_name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// The category used for stat selection. Moves with null power are
    /// status moves regardless of any declared category.
    pub fn resolved_category(&self) -> MoveCategory {
        if self.power.is_none() {
            return MoveCategory::Status;
        }
        self.category.unwrap_or(MoveCategory::Physical)
    }

    pub fn is_damaging(&self) -> bool {
        self.power.is_some()
    }
}

/// A move slot on a combatant: static data plus battle-local uses remaining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.max_pp;
        MoveInstance { data, pp }
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    /// Use the move (decrease PP). Returns false if no uses remain.
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

/// Per-battle combatant status. Richer status conditions are outside this
/// core's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Healthy,
    Fainted,
}

/// A single combatant participating in a battle.
///
/// Constructed once at battle start from a roster snapshot; mutated only by
/// the engine during turn resolution (current HP and move uses). Stats are
/// fixed for the duration of the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub species_id: u32,
    pub nickname: String,
    pub level: u8,
    pub max_hp: u16,
    current_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
    /// One or two elemental types; each contributes independently to
    /// effectiveness.
    pub types: Vec<PokemonType>,
    pub moves: [Option<MoveInstance>; 4],
    pub status: Status,
}

#[allow(clippy::too_many_arguments)]
impl Combatant {
    pub fn new(
        species_id: u32,
        nickname: String,
        level: u8,
        max_hp: u16,
        current_hp: u16,
        attack: u16,
        defense: u16,
        special_attack: u16,
        special_defense: u16,
        speed: u16,
        types: Vec<PokemonType>,
        moves: Vec<MoveData>,
    ) -> Result<Self, CombatantDataError> {
        if level == 0 {
            return Err(CombatantDataError::NonPositiveStat {
                combatant: nickname,
                stat: "level",
            });
        }
        if max_hp == 0 || current_hp > max_hp {
            return Err(CombatantDataError::InvalidHitPoints { combatant: nickname });
        }
        // The damage formula divides by the defensive stats; a zero there is
        // bad data, not a zero-damage situation.
        if defense == 0 {
            return Err(CombatantDataError::NonPositiveStat {
                combatant: nickname,
                stat: "defense",
            });
        }
        if special_defense == 0 {
            return Err(CombatantDataError::NonPositiveStat {
                combatant: nickname,
                stat: "special_def",
            });
        }
        if types.is_empty() || types.len() > 2 {
            return Err(CombatantDataError::InvalidTypeList { combatant: nickname });
        }

        let mut move_array: [Option<MoveInstance>; 4] = [None, None, None, None];
        for (i, data) in moves.into_iter().take(4).enumerate() {
            data.validate()?;
            move_array[i] = Some(MoveInstance::new(data));
        }

        let status = if current_hp == 0 {
            Status::Fainted
        } else {
            Status::Healthy
        };

        Ok(Combatant {
            species_id,
            nickname,
            level,
            max_hp,
            current_hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
            types,
            moves: move_array,
            status,
        })
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.status == Status::Fainted
    }

    /// Apply damage, flooring current HP at 0. Returns true if the combatant
    /// fainted from this damage.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(damage);
        if self.current_hp == 0 && self.status == Status::Healthy {
            self.status = Status::Fainted;
            return true;
        }
        false
    }

    /// Set current HP directly, clamped to max. Intended for battle setup
    /// and tests; turn resolution only ever moves HP through `take_damage`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
        self.status = if self.current_hp == 0 {
            Status::Fainted
        } else {
            Status::Healthy
        };
    }

    pub fn move_slot(&self, index: usize) -> Option<&MoveInstance> {
        self.moves.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn move_slot_mut(&mut self, index: usize) -> Option<&mut MoveInstance> {
        self.moves.get_mut(index).and_then(|slot| slot.as_mut())
    }

    pub fn move_count(&self) -> usize {
        self.moves.iter().filter(|slot| slot.is_some()).count()
    }

    /// Indices of moves that still have uses remaining.
    pub fn usable_move_indices(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(inst) if inst.pp > 0 => Some(i),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::PokemonType;

    fn tackle() -> MoveData {
        MoveData {
            name: "Tackle".to_string(),
            power: Some(40),
            accuracy: 1.0,
            move_type: PokemonType::Normal,
            category: Some(MoveCategory::Physical),
            max_pp: 35,
        }
    }

    fn build(types: Vec<PokemonType>, moves: Vec<MoveData>) -> Result<Combatant, CombatantDataError> {
        Combatant::new(
            25,
            "Pikachu".to_string(),
            5,
            35,
            35,
            55,
            40,
            50,
            50,
            90,
            types,
            moves,
        )
    }

    #[test]
    fn construction_rejects_zero_defense() {
        let err = Combatant::new(
            25,
            "Pikachu".to_string(),
            5,
            35,
            35,
            55,
            0,
            50,
            50,
            90,
            vec![PokemonType::Electric],
            vec![tackle()],
        )
        .unwrap_err();
        assert!(matches!(err, CombatantDataError::NonPositiveStat { stat: "defense", .. }));
    }

    #[test]
    fn construction_rejects_bad_type_list() {
        assert!(build(vec![], vec![tackle()]).is_err());
        assert!(build(
            vec![PokemonType::Fire, PokemonType::Flying, PokemonType::Dragon],
            vec![tackle()]
        )
        .is_err());
    }

    #[test]
    fn construction_rejects_out_of_range_accuracy() {
        let mut bad = tackle();
        bad.accuracy = 1.5;
        assert!(matches!(
            build(vec![PokemonType::Electric], vec![bad]),
            Err(CombatantDataError::InvalidAccuracy { .. })
        ));
    }

    #[test]
    fn take_damage_floors_at_zero_and_faints() {
        let mut combatant = build(vec![PokemonType::Electric], vec![tackle()]).unwrap();
        assert!(!combatant.take_damage(10));
        assert_eq!(combatant.current_hp(), 25);
        assert!(combatant.take_damage(9999));
        assert_eq!(combatant.current_hp(), 0);
        assert!(combatant.is_fainted());
        // Further damage neither underflows nor re-reports the faint.
        assert!(!combatant.take_damage(10));
        assert_eq!(combatant.current_hp(), 0);
    }

    #[test]
    fn null_power_moves_resolve_as_status() {
        let growl = MoveData {
            name: "Growl".to_string(),
            power: None,
            accuracy: 1.0,
            move_type: PokemonType::Normal,
            category: None,
            max_pp: 40,
        };
        assert_eq!(growl.resolved_category(), MoveCategory::Status);

        let mut unclassified = tackle();
        unclassified.category = None;
        assert_eq!(unclassified.resolved_category(), MoveCategory::Physical);
    }
}
