pub mod normalize;

use std::fmt;

use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};

use crate::core::{Contestant, SeasonRoster};
use crate::error::{DraftError, Result};

pub use normalize::normalize;

/// Minimum acceptance score for a match
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// How confident a match is, classified from the winning score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Score exactly 1.0 (canonical name)
    Exact,
    /// Score >= 0.95 (nickname or token hit)
    Nickname,
    /// Score >= 0.85 (first/last/full name)
    NameComponent,
    /// Score >= 0.70 (Levenshtein similarity)
    Fuzzy,
    /// Score below the default threshold
    LowConfidence,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchType::Exact => "exact match",
            MatchType::Nickname => "nickname match",
            MatchType::NameComponent => "name component match",
            MatchType::Fuzzy => "fuzzy match",
            MatchType::LowConfidence => "low confidence match",
        };
        f.write_str(s)
    }
}

/// Classify a winning score into a match type
pub fn classify_score(score: f64) -> MatchType {
    if score == 1.0 {
        MatchType::Exact
    } else if score >= 0.95 {
        MatchType::Nickname
    } else if score >= 0.85 {
        MatchType::NameComponent
    } else if score >= 0.70 {
        MatchType::Fuzzy
    } else {
        MatchType::LowConfidence
    }
}

/// A resolved contestant with its match confidence
#[derive(Debug, Clone)]
pub struct MatchResult<'r> {
    pub contestant: &'r Contestant,
    pub match_type: MatchType,
    pub score: f64,
}

/// Fuzzy matcher reconciling free-text names against a canonical roster
#[derive(Debug, Clone, Copy)]
pub struct NameMatcher {
    threshold: f64,
}

impl NameMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match an input name against the roster.
    ///
    /// Pure function of (input, roster, threshold). Ties resolve to
    /// roster order via a stable sort.
    pub fn match_contestant<'r>(
        &self,
        input: &str,
        roster: &'r SeasonRoster,
    ) -> Result<MatchResult<'r>> {
        let normalized = normalize(input);

        let mut candidates: Vec<(&'r Contestant, f64)> = roster
            .contestants
            .iter()
            .filter_map(|contestant| {
                let score = match_score(&normalized, contestant);
                (score > 0.0).then_some((contestant, score))
            })
            .collect();

        if candidates.is_empty() {
            return Err(DraftError::NoMatch {
                name: input.to_string(),
                best_score: 0.0,
            });
        }

        // Stable sort: equal scores keep roster order
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let (contestant, score) = candidates[0];
        if score < self.threshold {
            return Err(DraftError::NoMatch {
                name: input.to_string(),
                best_score: score,
            });
        }

        tracing::debug!(input, matched = %contestant.canonical_name, score, "matched contestant");

        Ok(MatchResult {
            contestant,
            match_type: classify_score(score),
            score,
        })
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Score one contestant against a normalized input, taking the maximum
/// over the exact, nickname, token, name-component and fuzzy rules.
fn match_score(input: &str, contestant: &Contestant) -> f64 {
    let canonical = normalize(&contestant.canonical_name);
    if input == canonical {
        return 1.0;
    }

    let nickname = contestant
        .nickname
        .as_deref()
        .map(normalize)
        .filter(|n| !n.is_empty());

    if let Some(nick) = nickname.as_deref() {
        if input == nick {
            return 0.95;
        }
    }

    let mut max_score: f64 = 0.0;

    // Any single token of the input hitting the canonical name or
    // nickname counts as a nickname-strength match
    for word in input.split(' ') {
        if word == canonical || nickname.as_deref() == Some(word) {
            max_score = max_score.max(0.95);
        }
    }

    let first = normalize(&contestant.first_name);
    let last = normalize(&contestant.last_name);

    if input == first {
        max_score = max_score.max(0.85);
    }
    if !last.is_empty() && input == last {
        max_score = max_score.max(0.85);
    }

    if !last.is_empty() {
        let full = format!("{first} {last}");
        let reverse = format!("{last} {first}");
        if input == full || input == reverse {
            max_score = max_score.max(0.90);
        }
        max_score = max_score.max(similarity(input, &full) * 0.9);
        max_score = max_score.max(similarity(input, &reverse) * 0.9);
    }

    max_score = max_score.max(similarity(input, &canonical));
    if let Some(nick) = nickname.as_deref() {
        max_score = max_score.max(similarity(input, nick) * 0.9);
    }
    max_score = max_score.max(similarity(input, &first) * 0.8);
    if !last.is_empty() {
        max_score = max_score.max(similarity(input, &last) * 0.8);
    }

    max_score
}

/// Levenshtein similarity: 1 - distance / max(len), with the empty pair
/// defined as 1.0
fn similarity(a: &str, b: &str) -> f64 {
    levenshtein::normalized_similarity(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> SeasonRoster {
        SeasonRoster {
            season: 46,
            contestants: vec![
                Contestant::new("Sophie S", "Sophie", "Stevens", None),
                Contestant::new("Michelle", "Michelle", "", Some("MC")),
                Contestant::new("Kristen", "Kristen", "", None),
            ],
        }
    }

    #[test]
    fn test_exact_match() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("Michelle", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Michelle");
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("  sophie s ", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Sophie S");
        assert_eq!(result.match_type, MatchType::Exact);
    }

    #[test]
    fn test_nickname_match() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("MC", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Michelle");
        assert_eq!(result.match_type, MatchType::Nickname);
        assert!((result.score - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_token_hits_nickname() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("MC rules", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Michelle");
        assert_eq!(result.match_type, MatchType::Nickname);
    }

    #[test]
    fn test_first_name_component() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("Sophie", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Sophie S");
        assert_eq!(result.match_type, MatchType::NameComponent);
        assert!((result.score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_last_name_component() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("Stevens", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Sophie S");
        assert_eq!(result.match_type, MatchType::NameComponent);
    }

    #[test]
    fn test_full_and_reverse_name() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher
            .match_contestant("Sophie Stevens", &roster)
            .unwrap();
        assert_eq!(result.contestant.canonical_name, "Sophie S");
        assert!((result.score - 0.90).abs() < 1e-9);

        let result = matcher
            .match_contestant("Stevens Sophie", &roster)
            .unwrap();
        assert_eq!(result.contestant.canonical_name, "Sophie S");
        assert!((result.score - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_match_kristina_to_kristen() {
        // Levenshtein distance 2 over max length 8
        let matcher = NameMatcher::default();
        let roster = roster();
        let result = matcher.match_contestant("Kristina", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Kristen");
        assert_eq!(result.match_type, MatchType::Fuzzy);
        assert!((result.score - 0.75).abs() < 0.01);
    }

    #[test]
    fn test_no_match_below_threshold() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let err = matcher.match_contestant("Zebulon", &roster).unwrap_err();
        assert!(matches!(err, DraftError::NoMatch { .. }));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = NameMatcher::new(0.90);
        let roster = roster();
        // "Kristina" scores 0.75 against Kristen; strict matcher rejects it
        let err = strict.match_contestant("Kristina", &roster).unwrap_err();
        match err {
            DraftError::NoMatch { best_score, .. } => assert!((best_score - 0.75).abs() < 0.01),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tie_breaks_to_roster_order() {
        let roster = SeasonRoster {
            season: 1,
            contestants: vec![
                Contestant::new("Kristen", "Kristen", "", None),
                Contestant::new("Kristan", "Kristan", "", None),
            ],
        };
        // One substitution away from both; roster order wins
        let matcher = NameMatcher::default();
        let result = matcher.match_contestant("Kristin", &roster).unwrap();
        assert_eq!(result.contestant.canonical_name, "Kristen");
    }

    #[test]
    fn test_classify_score() {
        assert_eq!(classify_score(1.0), MatchType::Exact);
        assert_eq!(classify_score(0.97), MatchType::Nickname);
        assert_eq!(classify_score(0.90), MatchType::NameComponent);
        assert_eq!(classify_score(0.75), MatchType::Fuzzy);
        assert_eq!(classify_score(0.50), MatchType::LowConfidence);
    }

    #[test]
    fn test_match_type_display() {
        assert_eq!(MatchType::Exact.to_string(), "exact match");
        assert_eq!(MatchType::Nickname.to_string(), "nickname match");
        assert_eq!(MatchType::NameComponent.to_string(), "name component match");
        assert_eq!(MatchType::Fuzzy.to_string(), "fuzzy match");
        assert_eq!(MatchType::LowConfidence.to_string(), "low confidence match");
    }

    #[test]
    fn test_deterministic() {
        let matcher = NameMatcher::default();
        let roster = roster();
        let a = matcher.match_contestant("Kristina", &roster).unwrap();
        let b = matcher.match_contestant("Kristina", &roster).unwrap();
        assert_eq!(a.contestant, b.contestant);
        assert_eq!(a.score, b.score);
    }
}
