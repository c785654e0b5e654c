use std::collections::HashSet;

use crate::core::{Draft, Leaderboard, LeaderboardRow, SeasonRoster};
use crate::error::Result;
use crate::matcher::{MatchType, NameMatcher, DEFAULT_THRESHOLD};
use crate::publisher::Publisher;
use crate::scorer;

/// Engine configuration, built from CLI flags
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Minimum acceptance score for fuzzy name matching
    pub match_threshold: f64,
    /// Include points available in leaderboard messages
    pub show_points_available: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_THRESHOLD,
            show_points_available: false,
        }
    }
}

/// A draft entry that is not an exact canonical-name match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Drafter name, or "final" for the finals board
    pub source: String,
    pub name: String,
}

/// One corrected draft-file line
#[derive(Debug, Clone)]
pub struct Correction {
    pub line: usize,
    pub original: String,
    pub corrected: String,
    pub match_type: MatchType,
    pub score: f64,
}

/// A draft-file line whose name could not be reconciled
#[derive(Debug, Clone)]
pub struct FixFailure {
    pub line: usize,
    pub name: String,
    pub reason: String,
}

/// Result of reconciling a draft file's lines against the roster
#[derive(Debug, Clone, Default)]
pub struct FixOutcome {
    pub lines: Vec<String>,
    pub corrections: Vec<Correction>,
    pub failures: Vec<FixFailure>,
    pub modified: bool,
}

/// Orchestrates scoring, validation, draft fixing and publishing
pub struct DraftEngine {
    options: EngineOptions,
    matcher: NameMatcher,
}

impl DraftEngine {
    pub fn new(options: EngineOptions) -> Self {
        let matcher = NameMatcher::new(options.match_threshold);
        Self { options, matcher }
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    /// Score all drafts and rank them: score descending, points available
    /// descending, drafter name ascending.
    pub fn leaderboard(&self, drafts: &[Draft], finals: &Draft) -> Result<Leaderboard> {
        let scored = scorer::score_all(drafts, finals)?;

        let mut rows: Vec<LeaderboardRow> = scored
            .into_iter()
            .map(|(draft, result)| LeaderboardRow {
                drafter: draft.metadata.drafter.clone(),
                score: result.score,
                points_available: result.points_available,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.points_available.cmp(&a.points_available))
                .then(a.drafter.cmp(&b.drafter))
        });

        Ok(Leaderboard { rows })
    }

    /// Check every non-empty entry name in the finals and drafts for an
    /// exact canonical-name hit, returning the misses.
    pub fn validate_names(
        &self,
        drafts: &[Draft],
        finals: &Draft,
        roster: &SeasonRoster,
    ) -> Vec<ValidationIssue> {
        let canonical: HashSet<&str> = roster
            .contestants
            .iter()
            .map(|c| c.canonical_name.as_str())
            .collect();

        let mut issues = Vec::new();
        let mut check = |source: &str, draft: &Draft| {
            for entry in &draft.entries {
                if !entry.player_name.is_empty() && !canonical.contains(entry.player_name.as_str())
                {
                    issues.push(ValidationIssue {
                        source: source.to_string(),
                        name: entry.player_name.clone(),
                    });
                }
            }
        };

        check("final", finals);
        for draft in drafts {
            check(&draft.metadata.drafter, draft);
        }
        issues
    }

    /// Reconcile raw draft-file lines against the roster: reformat sloppy
    /// entry lines to `<position>. <name>` and replace matched names with
    /// their canonical form. Metadata lines and unresolved positions are
    /// left untouched; writing the result back is the caller's decision.
    pub fn fix_lines(&self, lines: &[String], roster: &SeasonRoster) -> FixOutcome {
        let mut outcome = FixOutcome {
            lines: lines.to_vec(),
            ..FixOutcome::default()
        };

        let mut parsing_metadata = true;
        for (i, line) in lines.iter().enumerate() {
            let line_no = i + 1;

            if line.trim() == "---" {
                parsing_metadata = false;
                continue;
            }
            if parsing_metadata {
                continue;
            }

            let Some((position, name)) = split_entry_line(line) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let mut fixed = format!("{position}. {name}");
            if fixed != line.trim() {
                outcome.modified = true;
            }

            match self.matcher.match_contestant(&name, roster) {
                Ok(result) => {
                    let canonical = &result.contestant.canonical_name;
                    if *canonical != name {
                        fixed = format!("{position}. {canonical}");
                        outcome.corrections.push(Correction {
                            line: line_no,
                            original: name.clone(),
                            corrected: canonical.clone(),
                            match_type: result.match_type,
                            score: result.score,
                        });
                        outcome.modified = true;
                    }
                }
                Err(e) => {
                    outcome.failures.push(FixFailure {
                        line: line_no,
                        name: name.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            outcome.lines[i] = fixed;
        }

        outcome
    }

    /// Build the Discord leaderboard message
    pub fn build_message(&self, season: u32, voted_out: &[String], board: &Leaderboard) -> String {
        let mut message = format!("**Survivor Season {season} Scores**\n");
        if !voted_out.is_empty() {
            message.push_str(&format!(
                "Voted out this week: {}\n\n",
                voted_out.join(", ")
            ));
        }
        message.push_str("**Leaderboard:**\n");
        for (i, row) in board.rows.iter().enumerate() {
            if self.options.show_points_available {
                message.push_str(&format!(
                    "{}. {}: {} (points available: {})\n",
                    i + 1,
                    row.drafter,
                    row.score,
                    row.points_available
                ));
            } else {
                message.push_str(&format!("{}. {}: {}\n", i + 1, row.drafter, row.score));
            }
        }
        message.push_str("\n*Scores calculated automatically.*");
        message
    }

    /// Fire-and-forget publish: failures are logged, never propagated, so
    /// report output always continues.
    pub async fn publish(&self, publisher: &dyn Publisher, message: &str) {
        match publisher.publish(message).await {
            Ok(()) => tracing::info!(publisher = publisher.name(), "leaderboard published"),
            Err(e) => tracing::warn!(
                publisher = publisher.name(),
                error = %e,
                "publish failed; continuing with report output"
            ),
        }
    }
}

impl Default for DraftEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

/// Leniently split a draft entry line into (position, name): leading
/// digits, then any mix of `.`/`)`/space separators, then the name with
/// surrounding quotes stripped.
fn split_entry_line(line: &str) -> Option<(usize, String)> {
    let trimmed = line.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return None;
    }
    let position: usize = trimmed[..digits_end].parse().ok()?;
    let name = trimmed[digits_end..]
        .trim_start_matches(|c| c == '.' || c == ')' || c == ' ')
        .trim()
        .trim_matches('"')
        .to_string();
    Some((position, name))
}
