use crate::battle::engine;
use crate::battle::state::{Side, TurnRng};
use crate::battle::tests::common::*;
use crate::errors::{BattleEngineError, MoveSelectionError};
use pretty_assertions::assert_eq;

#[test]
fn using_a_move_spends_exactly_one_pp() {
    let player = TestCombatantBuilder::new("Mankey").with_hp(200).build();
    let opponent = TestCombatantBuilder::new("Sandshrew").with_hp(200).build();
    let mut state = create_test_battle(player, opponent);

    engine::resolve_turn(&mut state, 0, predictable_rng(), &no_variance_config()).unwrap();

    let player_move = state.combatant(Side::Player).move_slot(0).unwrap();
    assert_eq!(player_move.pp, player_move.max_pp() - 1);
    let opponent_move = state.combatant(Side::Opponent).move_slot(0).unwrap();
    assert_eq!(opponent_move.pp, opponent_move.max_pp() - 1);
}

#[test]
fn missed_move_still_spends_pp() {
    let mut inaccurate = basic_move("Mud Bomb", 65);
    inaccurate.accuracy = 0.5;
    let player = TestCombatantBuilder::new("Mankey")
        .with_hp(200)
        .with_moves(vec![inaccurate])
        .build();
    let opponent = TestCombatantBuilder::new("Sandshrew")
        .with_hp(200)
        .with_moves(vec![status_move("Growl")])
        .build();
    let mut state = create_test_battle(player, opponent);

    let rng = TurnRng::new_for_test(vec![51, 50, 50]);
    let (report, _) = engine::resolve_turn(&mut state, 0, rng, &no_variance_config()).unwrap();

    assert!(!report.actions[0].hit);
    let player_move = state.combatant(Side::Player).move_slot(0).unwrap();
    assert_eq!(player_move.pp, player_move.max_pp() - 1);
}

#[test]
fn selecting_an_exhausted_move_is_rejected_without_side_effects() {
    let player = TestCombatantBuilder::new("Mankey")
        .with_hp(200)
        .with_moves(vec![
            limited_move("Thrash", 90, 0),
            basic_move("Scratch", 40),
        ])
        .build();
    let opponent = TestCombatantBuilder::new("Sandshrew").with_hp(200).build();
    let mut state = create_test_battle(player, opponent);
    let before = state.clone();

    let err = engine::resolve_turn(&mut state, 0, predictable_rng(), &no_variance_config())
        .unwrap_err();
    assert_eq!(
        err,
        BattleEngineError::InvalidMoveSelection(MoveSelectionError::NoUsesRemaining {
            move_name: "Thrash".to_string(),
        })
    );
    assert_eq!(state, before);

    // The other slot is still selectable.
    engine::resolve_turn(&mut state, 1, predictable_rng(), &no_variance_config()).unwrap();
    assert_eq!(state.turn_number, 1);
}

#[test]
fn opponent_only_picks_moves_with_uses_remaining() {
    let player = TestCombatantBuilder::new("Mankey").with_hp(200).build();
    let opponent = TestCombatantBuilder::new("Sandshrew")
        .with_hp(200)
        .with_moves(vec![
            limited_move("Thrash", 90, 0),
            basic_move("Scratch", 40),
        ])
        .build();
    let mut state = create_test_battle(player, opponent);

    for _ in 0..3 {
        let (report, _) =
            engine::resolve_turn(&mut state, 0, predictable_rng(), &no_variance_config())
                .unwrap();
        assert_eq!(
            report.actions[1].move_name.as_deref(),
            Some("Scratch"),
            "only the move with PP left is eligible"
        );
    }

    let exhausted = state.combatant(Side::Opponent).move_slot(0).unwrap();
    assert_eq!(exhausted.pp, 0);
}
