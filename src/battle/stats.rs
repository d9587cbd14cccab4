use crate::battle::state::TurnRng;
use crate::combatant::{Combatant, MoveData};
use schema::MoveCategory;

/// The stat a move attacks with, per its resolved category.
pub fn offensive_stat(combatant: &Combatant, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => combatant.attack,
        MoveCategory::Special => combatant.special_attack,
        MoveCategory::Status => 0,
    }
}

/// The stat a move is defended with, per its resolved category.
pub fn defensive_stat(combatant: &Combatant, category: MoveCategory) -> u16 {
    match category {
        MoveCategory::Physical => combatant.defense,
        MoveCategory::Special => combatant.special_defense,
        MoveCategory::Status => 0,
    }
}

/// Accuracy check. Consumes exactly one oracle draw unless the move cannot
/// miss (accuracy of 1.0 or higher still draws, so the draw order stays the
/// same for every used move).
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let roll = rng.next_outcome("Accuracy Check");
    if move_data.accuracy >= 1.0 {
        return true;
    }
    let threshold = (move_data.accuracy * 100.0).round().clamp(1.0, 100.0) as u8;
    roll <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::PokemonType;

    fn move_with_accuracy(accuracy: f64) -> MoveData {
        MoveData {
            name: "Test Move".to_string(),
            power: Some(40),
            accuracy,
            move_type: PokemonType::Normal,
            category: Some(MoveCategory::Physical),
            max_pp: 10,
        }
    }

    #[test]
    fn sure_hit_moves_never_miss() {
        let data = move_with_accuracy(1.0);
        let mut rng = TurnRng::new_for_test(vec![100]);
        assert!(move_hits(&data, &mut rng));
    }

    #[rstest::rstest]
    #[case(0.85, 85, true)]
    #[case(0.85, 86, false)]
    #[case(0.5, 50, true)]
    #[case(0.5, 51, false)]
    #[case(0.1, 10, true)]
    #[case(0.1, 11, false)]
    fn accuracy_thresholds_on_percentile_roll(
        #[case] accuracy: f64,
        #[case] roll: u8,
        #[case] hits: bool,
    ) {
        let data = move_with_accuracy(accuracy);
        let mut rng = TurnRng::new_for_test(vec![roll]);
        assert_eq!(move_hits(&data, &mut rng), hits);
    }

    #[test]
    fn accuracy_check_always_consumes_one_draw() {
        let data = move_with_accuracy(1.0);
        let mut rng = TurnRng::new_for_test(vec![50, 50]);
        move_hits(&data, &mut rng);
        assert_eq!(rng.remaining(), 1);
    }
}
