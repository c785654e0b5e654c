use serde::{Deserialize, Serialize};

/// Outcome of scoring one draft against the finals board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Points already locked in (never negative)
    pub score: i32,

    /// Upper bound on additional points from unresolved outcomes.
    ///
    /// May be negative in the fully-eliminated branch; that signal is
    /// preserved rather than clamped.
    pub points_available: i32,
}

impl ScoreResult {
    pub fn new(score: i32, points_available: i32) -> Self {
        Self {
            score,
            points_available,
        }
    }
}

/// One sorted leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub drafter: String,
    pub score: i32,
    pub points_available: i32,
}

/// Drafts ranked for display: score descending, points available
/// descending, drafter name ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Longest drafter name, for aligned text output
    pub fn max_drafter_len(&self) -> usize {
        self.rows.iter().map(|r| r.drafter.len()).max().unwrap_or(0)
    }
}
