//! Session statistics - the per-attempt answer accumulator.
//!
//! Pure in-memory counters owned by the traversal engine for the duration of
//! one quest attempt. Independent of `UserQuestProgress`, which persists
//! across attempts; these counters are discarded when the attempt ends.

use serde::{Deserialize, Serialize};

/// XP granted for each correct answer during a session.
pub const XP_PER_CORRECT_ANSWER: u32 = 10;

/// Per-attempt counters. `total >= correct` holds by construction: the only
/// mutation path is `record_answer`, which always increments `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    correct: u32,
    total: u32,
    xp_earned: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all counters. Called when a quest attempt (re)starts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records one answered scene.
    pub fn record_answer(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
            self.xp_earned += XP_PER_CORRECT_ANSWER;
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn xp_earned(&self) -> u32 {
        self.xp_earned
    }

    /// Point-in-time summary for the end-of-quest screen.
    pub fn snapshot(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct,
            total: self.total,
            xp_earned: self.xp_earned,
            accuracy: if self.total > 0 {
                f64::from(self.correct) / f64::from(self.total)
            } else {
                0.0
            },
        }
    }
}

/// Immutable summary exposed when a quest completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub correct: u32,
    pub total: u32,
    pub xp_earned: u32,
    /// `correct / total`, 0 when nothing was answered.
    pub accuracy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = SessionStats::new();
        let summary = stats.snapshot();
        assert_eq!(summary.correct, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.xp_earned, 0);
        assert_eq!(summary.accuracy, 0.0);
    }

    #[test]
    fn test_correct_then_wrong_yields_half_accuracy() {
        let mut stats = SessionStats::new();
        stats.record_answer(true);
        stats.record_answer(false);

        let summary = stats.snapshot();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.accuracy, 0.5);
        assert_eq!(summary.xp_earned, XP_PER_CORRECT_ANSWER);
    }

    #[test]
    fn test_wrong_answers_earn_no_xp() {
        let mut stats = SessionStats::new();
        stats.record_answer(false);
        stats.record_answer(false);
        assert_eq!(stats.xp_earned(), 0);
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.correct(), 0);
    }

    #[test]
    fn test_total_never_less_than_correct() {
        let mut stats = SessionStats::new();
        for i in 0..20 {
            stats.record_answer(i % 3 == 0);
            assert!(stats.total() >= stats.correct());
        }
    }

    #[test]
    fn test_reset_discards_previous_attempt() {
        let mut stats = SessionStats::new();
        stats.record_answer(true);
        stats.reset();
        assert_eq!(stats, SessionStats::new());
    }
}
