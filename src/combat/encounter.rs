//! Random encounter rolls for the overworld timer.

use super::types::EnemyKind;
use crate::core::balance::BalanceConfig;
use rand::Rng;

/// Rolls for a battle. On a hit, picks an enemy kind uniformly.
pub fn roll_encounter(rng: &mut impl Rng, probability: f64) -> Option<EnemyKind> {
    let probability = probability.clamp(0.0, 1.0);
    if rng.gen::<f64>() < probability {
        Some(EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())])
    } else {
        None
    }
}

/// Delay until the next encounter check, drawn fresh for every cycle.
pub fn next_encounter_delay_ms(rng: &mut impl Rng, config: &BalanceConfig) -> u64 {
    let min = config.encounter_min_delay_ms;
    let max = config.encounter_max_delay_ms.max(min);
    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_probability_never_triggers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..1000).all(|_| roll_encounter(&mut rng, 0.0).is_none()));
    }

    #[test]
    fn test_certain_probability_always_triggers() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!((0..1000).all(|_| roll_encounter(&mut rng, 1.0).is_some()));
    }

    #[test]
    fn test_default_rate_is_roughly_thirty_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hits = (0..10_000)
            .filter(|_| roll_encounter(&mut rng, 0.3).is_some())
            .count();
        assert!((2_700..3_300).contains(&hits), "got {} hits", hits);
    }

    #[test]
    fn test_both_enemy_kinds_appear() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let kinds: Vec<_> = (0..200).filter_map(|_| roll_encounter(&mut rng, 1.0)).collect();
        assert!(kinds.contains(&EnemyKind::Slime));
        assert!(kinds.contains(&EnemyKind::Goblin));
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(roll_encounter(&mut a, 0.3), roll_encounter(&mut b, 0.3));
        }
    }

    #[test]
    fn test_encounter_delay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = BalanceConfig::default();
        for _ in 0..500 {
            let delay = next_encounter_delay_ms(&mut rng, &config);
            assert!((10_000..=20_000).contains(&delay));
        }
    }
}
