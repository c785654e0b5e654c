//! # Survivor Draft Engine
//!
//! Scoring engine for fantasy-style elimination-game drafts:
//! - Flat-text draft/finals parsing
//! - Fuzzy contestant-name matching against a canonical season roster
//! - Current-score and points-available calculation, mid-season aware
//! - Leaderboard aggregation and optional Discord publishing
//!
//! ## Example Usage
//!
//! ```rust
//! use survivor_draft_engine::{Draft, DraftEngine, EngineOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let draft = Draft::parse("Drafter: zoe\nSeason: 46\n---\n1. Tom\n2. Dick\n")?;
//!     let finals = Draft::parse("Drafter: Current\nSeason: 46\n---\n1. \n2. Tom\n")?;
//!
//!     let engine = DraftEngine::new(EngineOptions::default());
//!     let board = engine.leaderboard(&[draft], &finals)?;
//!     for row in &board.rows {
//!         println!("{}: {}", row.drafter, row.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod publisher;
pub mod scorer;

// Re-export primary types
pub use self::core::{Contestant, Draft, Entry, Leaderboard, LeaderboardRow, Metadata,
    ScoreResult, SeasonRoster, CURRENT_DRAFTER};
pub use engine::{DraftEngine, EngineOptions, FixOutcome, ValidationIssue};
pub use error::{DraftError, Result};
pub use matcher::{MatchResult, MatchType, NameMatcher};
pub use publisher::{DiscordPublisher, Publisher};
pub use scorer::{score, score_all};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
