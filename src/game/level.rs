pub const START_LEVEL: u32 = 1;
const LEVEL_TWO_SCORE: u32 = 100;
const LEVEL_THREE_SCORE: u32 = 200;

/// Level reached for a cumulative score. Caps at 3.
pub fn level_for_score(score: u32) -> u32 {
    if score < LEVEL_TWO_SCORE {
        START_LEVEL
    } else if score < LEVEL_THREE_SCORE {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(99), 1);
        assert_eq!(level_for_score(100), 2);
        assert_eq!(level_for_score(199), 2);
        assert_eq!(level_for_score(200), 3);
    }

    #[test]
    fn level_never_exceeds_three() {
        for score in (200..5_000).step_by(100) {
            assert_eq!(level_for_score(score), 3);
        }
    }
}
