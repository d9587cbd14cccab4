//! Shared helpers for battle tests.

use crate::battle::calculators::DamageConfig;
use crate::battle::engine;
use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::{Combatant, MoveData};
use schema::{MoveCategory, PokemonType};

/// Builder for test combatants with sensible defaults, so each test only
/// names the stats it cares about.
#[derive(Debug, Clone)]
pub struct TestCombatantBuilder {
    nickname: String,
    level: u8,
    hp: u16,
    attack: u16,
    defense: u16,
    special_attack: u16,
    special_defense: u16,
    speed: u16,
    types: Vec<PokemonType>,
    moves: Vec<MoveData>,
}

impl TestCombatantBuilder {
    pub fn new(nickname: &str) -> Self {
        TestCombatantBuilder {
            nickname: nickname.to_string(),
            level: 10,
            hp: 50,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
            types: vec![PokemonType::Normal],
            moves: vec![basic_move("Tackle", 40)],
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_attack(mut self, attack: u16) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = moves;
        self
    }

    pub fn build(self) -> Combatant {
        Combatant::new(
            0,
            self.nickname,
            self.level,
            self.hp,
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
            self.types,
            self.moves,
        )
        .expect("test combatant should be valid")
    }
}

/// A plain physical normal-type move that always hits.
pub fn basic_move(name: &str, power: u16) -> MoveData {
    MoveData {
        name: name.to_string(),
        power: Some(power),
        accuracy: 1.0,
        move_type: PokemonType::Normal,
        category: Some(MoveCategory::Physical),
        max_pp: 35,
    }
}

/// A damage-free status move.
pub fn status_move(name: &str) -> MoveData {
    MoveData {
        name: name.to_string(),
        power: None,
        accuracy: 1.0,
        move_type: PokemonType::Normal,
        category: None,
        max_pp: 40,
    }
}

/// A move with a custom PP allotment. Zero PP yields a filled slot that can
/// never be used.
pub fn limited_move(name: &str, power: u16, max_pp: u8) -> MoveData {
    MoveData {
        max_pp,
        ..basic_move(name, power)
    }
}

pub fn create_test_battle(player: Combatant, opponent: Combatant) -> BattleState {
    engine::create_battle("test_battle".to_string(), player, opponent)
        .expect("test battle setup should be valid")
}

/// An oracle that always rolls 50: every sure-hit move connects, nothing
/// crits, and variance lands mid-band.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 20])
}

/// Default damage constants with the variance draw disabled, for exact
/// damage assertions.
pub fn no_variance_config() -> DamageConfig {
    DamageConfig {
        variance: false,
        ..DamageConfig::default()
    }
}
