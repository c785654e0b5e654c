pub mod draft;
pub mod roster;
pub mod score;

pub use draft::{Draft, Entry, Metadata, CURRENT_DRAFTER};
pub use roster::{Contestant, SeasonRoster};
pub use score::{Leaderboard, LeaderboardRow, ScoreResult};
