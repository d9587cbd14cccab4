//! Battle session management: owns every live battle and drives the engine
//! on behalf of callers.

use crate::battle::calculators::DamageConfig;
use crate::battle::engine;
use crate::battle::state::{BattleState, TurnReport, TurnRng};
use crate::combatant::Combatant;
use crate::errors::{BattleEngineError, BattleResult};
use log::{debug, info};
use std::collections::HashMap;

/// Holds all active battles, keyed by battle id. Callers drive it through
/// `&mut self`, so turns within a battle are inherently sequential.
pub struct BattleService {
    battles: HashMap<String, BattleState>,
    next_battle_id: u64,
    config: DamageConfig,
}

impl Default for BattleService {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleService {
    pub fn new() -> Self {
        Self::with_config(DamageConfig::default())
    }

    pub fn with_config(config: DamageConfig) -> Self {
        BattleService {
            battles: HashMap::new(),
            next_battle_id: 1,
            config,
        }
    }

    /// Validate the combatants and register a new battle, returning its id.
    pub fn create_battle(&mut self, player: Combatant, opponent: Combatant) -> BattleResult<String> {
        let battle_id = format!("battle_{:06}", self.next_battle_id);
        let state = engine::create_battle(battle_id.clone(), player, opponent)?;

        info!(
            "Created battle {}: {} vs {}",
            battle_id,
            state.combatant(crate::battle::state::Side::Player).nickname,
            state
                .combatant(crate::battle::state::Side::Opponent)
                .nickname
        );

        self.next_battle_id += 1;
        self.battles.insert(battle_id.clone(), state);
        Ok(battle_id)
    }

    /// Submit the player's move selection and resolve one full turn.
    pub fn submit_move(&mut self, battle_id: &str, move_index: usize) -> BattleResult<TurnReport> {
        self.submit_move_with_rng(battle_id, move_index, TurnRng::new_random())
    }

    /// Turn resolution with a caller-supplied oracle, for scripted outcomes.
    pub fn submit_move_with_rng(
        &mut self,
        battle_id: &str,
        move_index: usize,
        rng: TurnRng,
    ) -> BattleResult<TurnReport> {
        let state = self
            .battles
            .get_mut(battle_id)
            .ok_or_else(|| BattleEngineError::BattleNotFound(battle_id.to_string()))?;

        let (report, bus) = engine::resolve_turn(state, move_index, rng, &self.config)?;

        for line in bus.format_all(state) {
            debug!("[{}] {}", battle_id, line);
        }

        Ok(report)
    }

    /// Current state of a battle, for rendering or inspection.
    pub fn battle_state(&self, battle_id: &str) -> BattleResult<&BattleState> {
        self.battles
            .get(battle_id)
            .ok_or_else(|| BattleEngineError::BattleNotFound(battle_id.to_string()))
    }
}
