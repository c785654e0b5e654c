use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};

/// Drafter name used by in-progress finals files
pub const CURRENT_DRAFTER: &str = "Current";

/// Draft metadata block (`Key: Value` lines above the `---` separator)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Name of the person who created the draft
    #[serde(default)]
    pub drafter: String,

    /// Date of the draft
    #[serde(default)]
    pub date: String,

    /// Season or edition of the elimination game
    #[serde(default)]
    pub season: String,
}

/// One ranked pick: a 1-based position and a player name.
///
/// An empty `player_name` marks an unresolved position; finals files for
/// in-progress seasons use these for players not yet eliminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub position: usize,
    pub player_name: String,
}

impl Entry {
    pub fn new(position: usize, player_name: impl Into<String>) -> Self {
        Self {
            position,
            player_name: player_name.into(),
        }
    }
}

/// A participant's ranked prediction list (or the finals board).
///
/// Immutable after parsing; the scorer only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub metadata: Metadata,
    pub entries: Vec<Entry>,
}

impl Draft {
    /// Parse line-oriented draft text.
    ///
    /// Format: `Key: Value` metadata lines, a `---` separator, then
    /// `<position>. <playerName>` entry lines. Blank lines are skipped.
    /// Entry order is preserved as written.
    pub fn parse(text: &str) -> Result<Self> {
        let mut draft = Draft::default();
        let mut parsing_metadata = true;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;

            if raw.trim().is_empty() {
                continue;
            }

            if raw == "---" {
                parsing_metadata = false;
                continue;
            }

            if parsing_metadata {
                let (key, value) = raw.split_once(": ").ok_or_else(|| DraftError::Format {
                    line: line_no,
                    reason: format!("metadata line missing ': ' separator: {raw:?}"),
                })?;
                match key.trim() {
                    "Drafter" => draft.metadata.drafter = value.trim().to_string(),
                    "Date" => draft.metadata.date = value.trim().to_string(),
                    "Season" => draft.metadata.season = value.trim().to_string(),
                    _ => {} // unrecognized keys ignored
                }
            } else {
                let (pos, name) = raw.split_once(". ").ok_or_else(|| DraftError::Format {
                    line: line_no,
                    reason: format!("entry line missing '. ' separator: {raw:?}"),
                })?;
                let position: usize = pos.trim().parse().map_err(|_| DraftError::Format {
                    line: line_no,
                    reason: format!("position is not an integer: {pos:?}"),
                })?;
                if position == 0 {
                    return Err(DraftError::Format {
                        line: line_no,
                        reason: "position must be positive".to_string(),
                    });
                }
                draft.entries.push(Entry::new(position, name.trim()));
            }
        }

        Ok(draft)
    }

    /// Serialize back to the draft text format.
    ///
    /// `Draft::parse` of the output reproduces the same metadata and
    /// entries.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Drafter: {}\n", self.metadata.drafter));
        out.push_str(&format!("Date: {}\n", self.metadata.date));
        out.push_str(&format!("Season: {}\n", self.metadata.season));
        out.push_str("---\n");
        for entry in &self.entries {
            out.push_str(&format!("{}. {}\n", entry.position, entry.player_name));
        }
        out
    }

    /// Whether this draft is an in-progress finals board.
    pub fn is_current(&self) -> bool {
        self.metadata.drafter == CURRENT_DRAFTER
    }

    /// Scaffold an empty in-progress finals board with `positions`
    /// unresolved entries, stamped with today's date.
    pub fn empty_final(season: u32, positions: usize) -> Self {
        Self {
            metadata: Metadata {
                drafter: CURRENT_DRAFTER.to_string(),
                date: chrono::Local::now().format("%Y-%m-%d").to_string(),
                season: season.to_string(),
            },
            entries: (1..=positions).map(|p| Entry::new(p, "")).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Drafter: bryan
Date: 2024-02-28
Season: 46
---
1. Tom
2. Dick
3. Harry
";

    #[test]
    fn test_parse_draft() {
        let draft = Draft::parse(SAMPLE).unwrap();
        assert_eq!(draft.metadata.drafter, "bryan");
        assert_eq!(draft.metadata.date, "2024-02-28");
        assert_eq!(draft.metadata.season, "46");
        assert_eq!(draft.entries.len(), 3);
        assert_eq!(draft.entries[0], Entry::new(1, "Tom"));
        assert_eq!(draft.entries[2], Entry::new(3, "Harry"));
    }

    #[test]
    fn test_parse_preserves_file_order() {
        let text = "Drafter: x\n---\n3. C\n1. A\n2. B\n";
        let draft = Draft::parse(text).unwrap();
        let positions: Vec<usize> = draft.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_empty_player_names() {
        // In-progress finals mark unresolved positions with empty names
        let text = "Drafter: Current\nSeason: 46\n---\n1. \n2. \n3. Harry\n";
        let draft = Draft::parse(text).unwrap();
        assert!(draft.is_current());
        assert_eq!(draft.entries[0].player_name, "");
        assert_eq!(draft.entries[2].player_name, "Harry");
    }

    #[test]
    fn test_parse_tolerates_blank_lines() {
        let text = "Drafter: bryan\n\n---\n1. Tom\n\n2. Dick\n\n";
        let draft = Draft::parse(text).unwrap();
        assert_eq!(draft.entries.len(), 2);
    }

    #[test]
    fn test_parse_ignores_unknown_metadata() {
        let text = "Drafter: bryan\nNotes: whatever\n---\n1. Tom\n";
        let draft = Draft::parse(text).unwrap();
        assert_eq!(draft.metadata.drafter, "bryan");
        assert_eq!(draft.entries.len(), 1);
    }

    #[test]
    fn test_parse_bad_metadata_line() {
        let err = Draft::parse("Drafter bryan\n---\n1. Tom\n").unwrap_err();
        assert!(matches!(err, DraftError::Format { line: 1, .. }));
    }

    #[test]
    fn test_parse_bad_entry_separator() {
        let err = Draft::parse("Drafter: bryan\n---\n1 Tom\n").unwrap_err();
        assert!(matches!(err, DraftError::Format { line: 3, .. }));
    }

    #[test]
    fn test_parse_non_numeric_position() {
        let err = Draft::parse("Drafter: bryan\n---\nfirst. Tom\n").unwrap_err();
        assert!(matches!(err, DraftError::Format { .. }));
    }

    #[test]
    fn test_parse_zero_position() {
        let err = Draft::parse("Drafter: bryan\n---\n0. Tom\n").unwrap_err();
        assert!(matches!(err, DraftError::Format { .. }));
    }

    #[test]
    fn test_round_trip() {
        let draft = Draft::parse(SAMPLE).unwrap();
        let reparsed = Draft::parse(&draft.to_text()).unwrap();
        assert_eq!(draft, reparsed);
    }

    #[test]
    fn test_round_trip_with_unresolved_positions() {
        let text = "Drafter: Current\nDate: 2024-03-01\nSeason: 46\n---\n1. \n2. Dick\n";
        let draft = Draft::parse(text).unwrap();
        let reparsed = Draft::parse(&draft.to_text()).unwrap();
        assert_eq!(draft, reparsed);
    }

    #[test]
    fn test_empty_final() {
        let finals = Draft::empty_final(46, 18);
        assert!(finals.is_current());
        assert_eq!(finals.metadata.season, "46");
        assert_eq!(finals.entries.len(), 18);
        assert!(finals.entries.iter().all(|e| e.player_name.is_empty()));
        assert_eq!(finals.entries[17].position, 18);
    }
}
