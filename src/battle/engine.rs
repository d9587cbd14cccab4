use crate::battle::calculators::{calculate_damage, DamageConfig, DamageResult};
use crate::battle::state::{
    ActionReport, BattleEvent, BattleState, EventBus, GameState, Outcome, Side, TurnReport,
    TurnRng,
};
use crate::combatant::Combatant;
use crate::errors::{BattleResult, MoveSelectionError, SetupError};

/// Validate both combatants and assemble a fresh battle awaiting its first
/// move selection.
pub fn create_battle(
    battle_id: String,
    player: Combatant,
    opponent: Combatant,
) -> BattleResult<BattleState> {
    for (side, combatant) in [(Side::Player, &player), (Side::Opponent, &opponent)] {
        if combatant.is_fainted() {
            return Err(SetupError::FaintedCombatant(side).into());
        }
        if combatant.move_count() == 0 {
            return Err(SetupError::EmptyMoveSet(side).into());
        }
    }
    Ok(BattleState::new(battle_id, player, opponent))
}

/// Check that `move_index` names a usable move on the player's combatant.
/// Never mutates the battle.
pub fn validate_move_selection(state: &BattleState, move_index: usize) -> BattleResult<()> {
    let player = state.combatant(Side::Player);
    let Some(instance) = player.move_slot(move_index) else {
        return Err(MoveSelectionError::InvalidMoveIndex(move_index).into());
    };
    if instance.pp == 0 {
        return Err(MoveSelectionError::NoUsesRemaining {
            move_name: instance.data.name.clone(),
        }
        .into());
    }
    Ok(())
}

/// Resolve one full turn: the player's selected move, then the opponent's
/// response. Resolution stops the moment either combatant faints, so a
/// knocked-out opponent never retaliates.
///
/// On a rejected selection the state is returned to the caller untouched.
pub fn resolve_turn(
    state: &mut BattleState,
    move_index: usize,
    mut rng: TurnRng,
    config: &DamageConfig,
) -> BattleResult<(TurnReport, EventBus)> {
    if state.is_finished() {
        return Err(crate::errors::BattleEngineError::BattleAlreadyFinished);
    }
    validate_move_selection(state, move_index)?;

    let entry_turn = state.turn_number;
    state.game_state = GameState::Resolving;

    let mut bus = EventBus::new();
    bus.push(BattleEvent::TurnStarted {
        turn_number: entry_turn,
    });

    let mut actions = Vec::with_capacity(2);
    let mut ended = false;

    for actor in [Side::Player, Side::Opponent] {
        if state.combatant(actor).is_fainted() {
            break;
        }

        let selected = match actor {
            Side::Player => Some(move_index),
            Side::Opponent => choose_opponent_move(state, &mut rng),
        };

        let Some(index) = selected else {
            // No usable moves: the action is passed, not substituted.
            let nickname = state.combatant(actor).nickname.clone();
            bus.push(BattleEvent::ActionPassed {
                side: actor,
                nickname,
            });
            actions.push(passed_action(state, actor));
            continue;
        };

        // A failure here must not leave the battle stuck in Resolving.
        let report = match execute_move(state, actor, index, &mut rng, config, &mut bus) {
            Ok(report) => report,
            Err(err) => {
                state.game_state = GameState::AwaitingMoves;
                return Err(err);
            }
        };
        let fainted = report.defender_fainted;
        actions.push(report);

        if fainted {
            let defender = actor.opponent();
            bus.push(BattleEvent::CombatantFainted {
                side: defender,
                nickname: state.combatant(defender).nickname.clone(),
            });
            let outcome = match defender {
                Side::Player => Outcome::OpponentWin,
                Side::Opponent => Outcome::PlayerWin,
            };
            state.game_state = GameState::Finished(outcome);
            bus.push(BattleEvent::BattleEnded { outcome });
            ended = true;
            break;
        }
    }

    if !ended {
        state.turn_number += 1;
        state.game_state = GameState::AwaitingMoves;
        bus.push(BattleEvent::TurnEnded);
    }

    let report = TurnReport {
        turn_number: entry_turn,
        actions,
        player_hp: state.combatant(Side::Player).current_hp(),
        opponent_hp: state.combatant(Side::Opponent).current_hp(),
        outcome: state.outcome(),
    };
    Ok((report, bus))
}

/// Pick the opponent's move from its usable moves, consuming one oracle
/// draw. Returns None when nothing is usable. The 1..=100 draw is folded
/// by modulo: when the slot count does not divide 100, the earliest slots
/// each absorb one extra roll (a bias of at most 1 part in 100).
fn choose_opponent_move(state: &BattleState, rng: &mut TurnRng) -> Option<usize> {
    let usable = state.combatant(Side::Opponent).usable_move_indices();
    if usable.is_empty() {
        return None;
    }
    let roll = rng.next_outcome("Opponent Move Choice");
    Some(usable[(usize::from(roll) - 1) % usable.len()])
}

fn passed_action(state: &BattleState, actor: Side) -> ActionReport {
    ActionReport {
        actor,
        move_name: None,
        hit: false,
        critical_hit: false,
        damage: 0,
        effectiveness: schema::Effectiveness::Normal,
        defender_hp_after: state.combatant(actor.opponent()).current_hp(),
        defender_fainted: false,
    }
}

/// Execute one action: spend a use of the move, then resolve its damage
/// against the defender. The use is spent whether or not the move connects.
fn execute_move(
    state: &mut BattleState,
    actor: Side,
    move_index: usize,
    rng: &mut TurnRng,
    config: &DamageConfig,
    bus: &mut EventBus,
) -> BattleResult<ActionReport> {
    let defender_side = actor.opponent();

    let (move_data, move_name) = {
        let attacker = state.combatant_mut(actor);
        let instance = attacker
            .move_slot_mut(move_index)
            .ok_or(MoveSelectionError::InvalidMoveIndex(move_index))?;
        if !instance.use_move() {
            return Err(MoveSelectionError::NoUsesRemaining {
                move_name: instance.data.name.clone(),
            }
            .into());
        }
        (instance.data.clone(), instance.data.name.clone())
    };

    bus.push(BattleEvent::MoveUsed {
        side: actor,
        nickname: state.combatant(actor).nickname.clone(),
        move_name: move_name.clone(),
    });

    let result: DamageResult = {
        let attacker = state.combatant(actor);
        let defender = state.combatant(defender_side);
        calculate_damage(attacker, defender, &move_data, config, rng)?
    };

    if !result.hit {
        bus.push(BattleEvent::MoveMissed {
            side: actor,
            nickname: state.combatant(actor).nickname.clone(),
            move_name: move_name.clone(),
        });
        return Ok(ActionReport {
            actor,
            move_name: Some(move_name),
            hit: false,
            critical_hit: false,
            damage: 0,
            effectiveness: result.effectiveness,
            defender_hp_after: state.combatant(defender_side).current_hp(),
            defender_fainted: false,
        });
    }

    if result.critical {
        bus.push(BattleEvent::CriticalHit {
            nickname: state.combatant(actor).nickname.clone(),
        });
    }
    bus.push(BattleEvent::TypeEffectiveness {
        effectiveness: result.effectiveness,
    });

    let defender = state.combatant_mut(defender_side);
    let fainted = if result.damage > 0 {
        defender.take_damage(result.damage)
    } else {
        false
    };
    let remaining = defender.current_hp();

    if move_data.is_damaging() {
        bus.push(BattleEvent::DamageDealt {
            nickname: state.combatant(defender_side).nickname.clone(),
            damage: result.damage,
            remaining_hp: remaining,
        });
    }

    Ok(ActionReport {
        actor,
        move_name: Some(move_name),
        hit: true,
        critical_hit: result.critical,
        damage: result.damage,
        effectiveness: result.effectiveness,
        defender_hp_after: remaining,
        defender_fainted: fainted,
    })
}
