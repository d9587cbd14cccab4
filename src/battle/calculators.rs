use crate::battle::state::TurnRng;
use crate::battle::stats::{defensive_stat, move_hits, offensive_stat};
use crate::combatant::{Combatant, MoveData};
use crate::errors::{BattleResult, CombatantDataError};
use schema::{Effectiveness, PokemonType};

/// Tunable constants for the damage formula. Defaults mirror the service's
/// production values.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageConfig {
    /// Scales the attacker's level inside the base term.
    pub level_coefficient: f64,
    /// Flat term added before and after the ratio scaling.
    pub base_damage: f64,
    /// Divisor applied to the scaled product.
    pub damage_divisor: f64,
    /// Critical hit chance as a percentage in 1..=100.
    pub critical_chance: u8,
    pub critical_multiplier: f64,
    /// When false, the variance draw is skipped and damage is deterministic
    /// for a given matchup.
    pub variance: bool,
}

impl Default for DamageConfig {
    fn default() -> Self {
        DamageConfig {
            level_coefficient: 0.4,
            base_damage: 2.0,
            damage_divisor: 50.0,
            critical_chance: 6,
            critical_multiplier: 1.5,
            variance: true,
        }
    }
}

/// Outcome of a single damage calculation, before it is applied to the
/// defender.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageResult {
    pub damage: u16,
    pub effectiveness: Effectiveness,
    pub hit: bool,
    pub critical: bool,
}

impl DamageResult {
    fn miss() -> Self {
        DamageResult {
            damage: 0,
            effectiveness: Effectiveness::Normal,
            hit: false,
            critical: false,
        }
    }

    fn no_damage(effectiveness: Effectiveness) -> Self {
        DamageResult {
            damage: 0,
            effectiveness,
            hit: true,
            critical: false,
        }
    }
}

/// Resolve one use of a move against a defender.
///
/// Oracle draw order: one Accuracy Check per use; on a hit with a damaging,
/// non-immune move, one Critical Hit Check, then one Damage Variance draw
/// (when variance is enabled). Misses, status moves, and immune defenders
/// consume no further draws.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    config: &DamageConfig,
    rng: &mut TurnRng,
) -> BattleResult<DamageResult> {
    if !move_hits(move_data, rng) {
        return Ok(DamageResult::miss());
    }

    let Some(power) = move_data.power else {
        return Ok(DamageResult::no_damage(Effectiveness::Normal));
    };

    let category = move_data.resolved_category();
    let attack = offensive_stat(attacker, category);
    let defense = defensive_stat(defender, category);
    if defense == 0 {
        return Err(CombatantDataError::NonPositiveStat {
            combatant: defender.nickname.clone(),
            stat: "defense",
        }
        .into());
    }

    let multiplier = PokemonType::effectiveness_against(move_data.move_type, &defender.types);
    let effectiveness = Effectiveness::from_multiplier(multiplier);
    if effectiveness == Effectiveness::NoEffect {
        // Immunity short-circuits before any crit or variance draw.
        return Ok(DamageResult::no_damage(Effectiveness::NoEffect));
    }

    let level_term = config.level_coefficient * f64::from(attacker.level) + config.base_damage;
    let stat_ratio = f64::from(attack) / f64::from(defense);
    let mut damage =
        (level_term * f64::from(power) * stat_ratio) / config.damage_divisor + config.base_damage;

    damage *= multiplier;

    let critical = rng.next_outcome("Critical Hit Check") <= config.critical_chance;
    if critical {
        damage *= config.critical_multiplier;
    }

    if config.variance {
        let roll = rng.next_outcome("Damage Variance");
        // Maps the percentile draw onto sixteen variance steps in
        // [0.85, 1.00]. 100 rolls fold onto 16 steps, so the first four
        // steps carry one extra roll each.
        let factor = 0.85 + f64::from((roll - 1) % 16) / 100.0;
        damage *= factor;
    }

    let damage = (damage.floor() as u32).min(u32::from(u16::MAX)) as u16;
    // A connecting damaging move against a non-immune defender always
    // deals at least 1.
    Ok(DamageResult {
        damage: damage.max(1),
        effectiveness,
        hit: true,
        critical,
    })
}
