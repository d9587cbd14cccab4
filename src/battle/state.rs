use crate::combatant::Combatant;
use schema::Effectiveness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two fixed sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Terminal result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWin,
    OpponentWin,
    /// Reserved. Single-combatant battles with sequential actions cannot
    /// currently end level, but callers match on this exhaustively.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerWin => write!(f, "Player wins"),
            Outcome::OpponentWin => write!(f, "Opponent wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Battle lifecycle. `Resolving` is only observable mid-resolution; a
/// battle at rest is either awaiting moves or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    AwaitingMoves,
    Resolving,
    Finished(Outcome),
}

/// Complete state of one battle between two combatants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub battle_id: String,
    /// Indexed by `Side::index()`: player at 0, opponent at 1.
    pub combatants: [Combatant; 2],
    /// Count of fully resolved turns, starting at 0.
    pub turn_number: u32,
    pub game_state: GameState,
}

impl BattleState {
    pub fn new(battle_id: String, player: Combatant, opponent: Combatant) -> Self {
        BattleState {
            battle_id,
            combatants: [player, opponent],
            turn_number: 0,
            game_state: GameState::AwaitingMoves,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.game_state, GameState::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.game_state {
            GameState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Something that happened during turn resolution, for display purposes.
/// The authoritative record of a turn is the `TurnReport`; events only feed
/// human-readable commentary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    TurnStarted { turn_number: u32 },
    MoveUsed { side: Side, nickname: String, move_name: String },
    MoveMissed { side: Side, nickname: String, move_name: String },
    CriticalHit { nickname: String },
    TypeEffectiveness { effectiveness: Effectiveness },
    DamageDealt { nickname: String, damage: u16, remaining_hp: u16 },
    CombatantFainted { side: Side, nickname: String },
    ActionPassed { side: Side, nickname: String },
    BattleEnded { outcome: Outcome },
    TurnEnded,
}

impl BattleEvent {
    /// Human-readable commentary for the event, or None for events that
    /// carry no player-facing text.
    pub fn format(&self, _state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("--- Turn {} ---", turn_number + 1))
            }
            BattleEvent::MoveUsed { nickname, move_name, .. } => {
                Some(format!("{} used {}!", nickname, move_name))
            }
            BattleEvent::MoveMissed { nickname, .. } => {
                Some(format!("{}'s attack missed!", nickname))
            }
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::TypeEffectiveness { effectiveness } => match effectiveness {
                Effectiveness::Normal => None,
                other => Some(other.to_string()),
            },
            BattleEvent::DamageDealt { nickname, damage, remaining_hp } => Some(format!(
                "{} took {} damage! ({} HP remaining)",
                nickname, damage, remaining_hp
            )),
            BattleEvent::CombatantFainted { nickname, .. } => {
                Some(format!("{} fainted!", nickname))
            }
            BattleEvent::ActionPassed { nickname, .. } => {
                Some(format!("{} has no usable moves and passes!", nickname))
            }
            BattleEvent::BattleEnded { outcome } => Some(format!("{}!", outcome)),
            BattleEvent::TurnEnded => None,
        }
    }
}

/// Ordered collection of events emitted while resolving a single turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Formatted commentary lines for the whole turn, skipping silent events.
    pub fn format_all(&self, state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(state))
            .collect()
    }
}

/// Oracle of pre-drawn percentile outcomes used during turn resolution.
///
/// Every probabilistic decision draws a value in 1..=100 from this oracle,
/// in a fixed documented order, so tests can script exact outcomes.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    /// A scripted oracle for tests. Values must be in 1..=100.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        TurnRng { outcomes, index: 0 }
    }

    /// An oracle seeded with fresh random outcomes, enough for any single
    /// turn's worth of draws.
    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let outcomes = (0..20).map(|_| rng.random_range(1..=100u8)).collect();
        TurnRng { outcomes, index: 0 }
    }

    /// Draw the next outcome. The reason string names the decision being
    /// made, for test traces and exhaustion diagnostics.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng ran out of outcomes at draw {} ({})",
                self.index, reason
            );
        }
        let value = self.outcomes[self.index];
        self.index += 1;

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", value, reason);

        value
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

/// What a single action within a turn did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub actor: Side,
    /// None when the actor passed (no usable moves).
    pub move_name: Option<String>,
    pub hit: bool,
    pub critical_hit: bool,
    pub damage: u16,
    pub effectiveness: Effectiveness,
    pub defender_hp_after: u16,
    pub defender_fainted: bool,
}

/// Authoritative summary of one resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The turn counter as it stood when resolution began.
    pub turn_number: u32,
    pub actions: Vec<ActionReport>,
    pub player_hp: u16,
    pub opponent_hp: u16,
    /// Set when this turn ended the battle.
    pub outcome: Option<Outcome>,
}
