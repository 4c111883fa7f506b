//! Timing of the sequence playback.
//!
//! Playback is a fixed-rate tick. Tick `k` (1-based, first tick one interval
//! after the start) lights `sequence[(k - 1) % len]` for half an interval. The
//! tick after the last flash ends the playback. Higher levels replay the head
//! of the sequence again, one extra flash per level above the first.

use super::config::GameConfig;
use super::panel::PanelColor;

pub fn flash_interval_ms(level: u32, config: &GameConfig) -> u64 {
    let step = u64::from(level.saturating_sub(1)).saturating_mul(config.interval_step_ms);
    config
        .base_interval_ms
        .saturating_sub(step)
        .max(config.min_interval_ms)
}

pub fn flash_count(sequence_len: usize, level: u32) -> usize {
    if sequence_len == 0 {
        return 0;
    }
    sequence_len + level.saturating_sub(1) as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashStep {
    /// Offset from the start of playback.
    pub at_ms: u64,
    pub panel: usize,
    pub color: PanelColor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashPlan {
    pub interval_ms: u64,
    pub steps: Vec<FlashStep>,
    pub done_at_ms: u64,
}

impl FlashPlan {
    pub fn new(sequence: &[usize], level: u32, config: &GameConfig) -> Self {
        let interval_ms = flash_interval_ms(level, config);
        let count = flash_count(sequence.len(), level);
        let lit_ms = interval_ms / 2;
        let mut steps = Vec::with_capacity(count * 2);
        for tick in 1..=count {
            let panel = sequence[(tick - 1) % sequence.len()];
            let at_ms = tick as u64 * interval_ms;
            steps.push(FlashStep {
                at_ms,
                panel,
                color: PanelColor::Lit,
            });
            steps.push(FlashStep {
                at_ms: at_ms + lit_ms,
                panel,
                color: PanelColor::Idle,
            });
        }
        FlashPlan {
            interval_ms,
            steps,
            done_at_ms: (count as u64 + 1) * interval_ms,
        }
    }

    #[cfg(test)]
    pub fn lit_panels(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps
            .iter()
            .filter(|step| step.color == PanelColor::Lit)
            .map(|step| step.panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_shrinks_by_level() {
        let cfg = GameConfig::default();
        assert_eq!(flash_interval_ms(1, &cfg), 1000);
        assert_eq!(flash_interval_ms(2, &cfg), 800);
        assert_eq!(flash_interval_ms(3, &cfg), 600);
        assert_eq!(flash_interval_ms(5, &cfg), 200);
    }

    #[test]
    fn interval_never_drops_below_floor() {
        let cfg = GameConfig::default();
        assert_eq!(flash_interval_ms(6, &cfg), 100);
        assert_eq!(flash_interval_ms(40, &cfg), 100);
        assert_eq!(flash_interval_ms(u32::MAX, &cfg), 100);
    }

    #[test]
    fn extra_flash_per_level() {
        assert_eq!(flash_count(5, 1), 5);
        assert_eq!(flash_count(6, 2), 7);
        assert_eq!(flash_count(7, 3), 9);
        assert_eq!(flash_count(0, 3), 0);
    }

    #[test]
    fn level_one_plays_sequence_once() {
        let cfg = GameConfig::default();
        let plan = FlashPlan::new(&[2, 5, 2, 8, 1], 1, &cfg);
        assert_eq!(plan.lit_panels().collect::<Vec<_>>(), vec![2, 5, 2, 8, 1]);
        assert_eq!(
            plan.steps[0],
            FlashStep {
                at_ms: 1000,
                panel: 2,
                color: PanelColor::Lit,
            }
        );
        assert_eq!(
            plan.steps[1],
            FlashStep {
                at_ms: 1500,
                panel: 2,
                color: PanelColor::Idle,
            }
        );
        assert_eq!(plan.done_at_ms, 6000);
    }

    #[test]
    fn higher_levels_wrap_to_the_head() {
        let cfg = GameConfig::default();
        let seq = [0, 1, 2, 3, 4, 5, 6];
        let plan = FlashPlan::new(&seq, 3, &cfg);
        assert_eq!(
            plan.lit_panels().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6, 0, 1]
        );
        assert_eq!(plan.interval_ms, 600);
        assert_eq!(plan.done_at_ms, 10 * 600);
    }

    #[test]
    fn lit_for_half_the_interval() {
        let cfg = GameConfig::default();
        let plan = FlashPlan::new(&[3, 3, 3, 3, 3, 3], 2, &cfg);
        for pair in plan.steps.chunks(2) {
            assert_eq!(pair[0].color, PanelColor::Lit);
            assert_eq!(pair[1].color, PanelColor::Idle);
            assert_eq!(pair[1].at_ms - pair[0].at_ms, 400);
        }
    }
}
