//! Experience curves.

/// Lifetime experience required to advance past `level`.
///
/// `level² × 100 + level × 500`, saturating at `u64::MAX`.
pub const fn exp_to_next(level: u32) -> u64 {
    let level = level as u64;
    (level * level).saturating_mul(100).saturating_add(level * 500)
}

/// Experience awarded for defeating a non-player combatant of `level`.
///
/// `level² × 10 + level × 50`, saturating at `u64::MAX`.
pub const fn adj_exp(level: u32) -> u64 {
    let level = level as u64;
    (level * level).saturating_mul(10).saturating_add(level * 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(exp_to_next(1), 600);
        assert_eq!(exp_to_next(10), 15_000);
        assert_eq!(exp_to_next(29), 98_600);
        assert_eq!(exp_to_next(30), 105_000);
    }

    #[test]
    fn kill_rewards() {
        assert_eq!(adj_exp(1), 60);
        assert_eq!(adj_exp(10), 1_500);
        assert_eq!(adj_exp(50), 27_500);
    }

    #[test]
    fn curves_increase_with_level() {
        for level in 1..300 {
            assert!(exp_to_next(level + 1) > exp_to_next(level));
            assert!(adj_exp(level + 1) > adj_exp(level));
        }
    }

    #[test]
    fn curves_saturate_at_extreme_levels() {
        assert_eq!(exp_to_next(u32::MAX), u64::MAX);
        assert_eq!(adj_exp(u32::MAX), u64::MAX);
        assert!(exp_to_next(400_000_000) < u64::MAX);
    }
}
