use rand::{Rng, RngCore};

use super::panel::PANEL_COUNT;

const BASE_LENGTH: usize = 4;

pub fn sequence_length(level: u32) -> usize {
    level as usize + BASE_LENGTH
}

/// Draws `level + 4` panel indices, each uniform over the board. Repeats are allowed.
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<usize> {
    (0..sequence_length(level))
        .map(|_| rng.random_range(0..PANEL_COUNT))
        .collect()
}

/// Where a session gets each round's target sequence from.
pub trait SequenceSource {
    fn next_sequence(&mut self, level: u32) -> Vec<usize>;
}

pub struct RandomSequence {
    rng: Box<dyn RngCore>,
}

impl RandomSequence {
    pub fn new(rng: Box<dyn RngCore>) -> Self {
        RandomSequence { rng }
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(rand::rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(Box::new(rand::rngs::StdRng::seed_from_u64(seed)))
    }
}

impl SequenceSource for RandomSequence {
    fn next_sequence(&mut self, level: u32) -> Vec<usize> {
        generate(level, self.rng.as_mut())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    /// Hands out fixed sequences in order, then falls back to all-zero rounds.
    pub(crate) struct ScriptedSequence {
        rounds: VecDeque<Vec<usize>>,
    }

    impl ScriptedSequence {
        pub(crate) fn new(rounds: Vec<Vec<usize>>) -> Self {
            ScriptedSequence {
                rounds: rounds.into(),
            }
        }
    }

    impl SequenceSource for ScriptedSequence {
        fn next_sequence(&mut self, level: u32) -> Vec<usize> {
            self.rounds
                .pop_front()
                .unwrap_or_else(|| vec![0; sequence_length(level)])
        }
    }

    #[test]
    fn length_is_level_plus_four() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in 1..=12 {
            let seq = generate(level, &mut rng);
            assert_eq!(seq.len(), level as usize + 4);
            assert!(seq.iter().all(|&i| i < PANEL_COUNT));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomSequence::seeded(42);
        let mut b = RandomSequence::seeded(42);
        assert_eq!(a.next_sequence(3), b.next_sequence(3));
    }

    #[test]
    fn every_panel_shows_up_eventually() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut seen = [false; PANEL_COUNT];
        for _ in 0..200 {
            for idx in generate(1, &mut rng) {
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
