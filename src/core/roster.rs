use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};

/// A contestant on a season's canonical roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    /// The official name used in drafts (e.g., "Sophie S")
    pub canonical_name: String,

    /// First name (e.g., "Sophie")
    pub first_name: String,

    /// Last name, may be empty (e.g., "Stevens")
    #[serde(default)]
    pub last_name: String,

    /// Preferred nickname if any (e.g., "MC" for Michelle)
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Contestant {
    pub fn new(
        canonical_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        nickname: Option<&str>,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            nickname: nickname.map(str::to_string),
        }
    }
}

/// Canonical roster for one season, read-only for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRoster {
    pub season: u32,
    pub contestants: Vec<Contestant>,
}

impl SeasonRoster {
    /// Deserialize and validate a roster from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let roster: SeasonRoster = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Load `<dir>/<season>.json` and validate it
    pub fn load(dir: impl AsRef<Path>, season: u32) -> Result<Self> {
        let path = dir.as_ref().join(format!("{season}.json"));
        tracing::debug!(path = %path.display(), "loading roster");
        let data = std::fs::read_to_string(&path)?;
        Self::from_json(&data)
    }

    /// Validate roster invariants: positive season, at least one
    /// contestant, unique non-empty canonical names, non-empty first
    /// names.
    pub fn validate(&self) -> Result<()> {
        if self.season == 0 {
            return Err(DraftError::Roster("season must be positive".to_string()));
        }

        if self.contestants.is_empty() {
            return Err(DraftError::Roster(
                "roster must contain at least one contestant".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (i, contestant) in self.contestants.iter().enumerate() {
            if contestant.canonical_name.is_empty() {
                return Err(DraftError::Roster(format!(
                    "contestant {i} has empty canonical_name"
                )));
            }
            if !seen.insert(contestant.canonical_name.as_str()) {
                return Err(DraftError::Roster(format!(
                    "duplicate canonical_name: {}",
                    contestant.canonical_name
                )));
            }
            if contestant.first_name.is_empty() {
                return Err(DraftError::Roster(format!(
                    "contestant {} has empty first_name",
                    contestant.canonical_name
                )));
            }
        }

        Ok(())
    }
}
