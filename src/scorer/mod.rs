use std::collections::{HashMap, HashSet};

use crate::core::{Draft, ScoreResult};
use crate::error::{DraftError, Result};

/// Score one draft against the finals board.
///
/// Finals entries with empty player names are unresolved positions; a
/// draft player absent from the finals is tolerated (with a warning)
/// only while the finals are marked in-progress (`Drafter: Current`),
/// otherwise it is a `PlayerNotFound` error.
pub fn score(draft: &Draft, finals: &Draft) -> Result<ScoreResult> {
    let total_positions = finals.entries.len();
    tracing::debug!(
        drafter = %draft.metadata.drafter,
        total_positions,
        "scoring draft"
    );

    // Lookup of eliminated players to their final positions
    let mut final_positions: HashMap<&str, usize> = HashMap::new();
    for entry in &finals.entries {
        if !entry.player_name.is_empty() {
            final_positions.insert(entry.player_name.as_str(), entry.position);
        }
    }

    for entry in &draft.entries {
        if !final_positions.contains_key(entry.player_name.as_str()) {
            if finals.is_current() {
                tracing::warn!(
                    drafter = %draft.metadata.drafter,
                    player = %entry.player_name,
                    "season is current; assuming player has not finished"
                );
            } else {
                return Err(DraftError::PlayerNotFound(entry.player_name.clone()));
            }
        }
    }

    Ok(ScoreResult::new(
        current_score(draft, &final_positions, total_positions),
        points_available(draft, &final_positions, total_positions),
    ))
}

/// Score every draft against the finals, in input order, stopping at the
/// first failure.
pub fn score_all<'a>(drafts: &'a [Draft], finals: &Draft) -> Result<Vec<(&'a Draft, ScoreResult)>> {
    drafts
        .iter()
        .map(|draft| score(draft, finals).map(|result| (draft, result)))
        .collect()
}

/// Points already locked in by eliminated players.
///
/// Each elimination carries a position value of `N - finalPosition + 1`
/// (earlier final positions are worth more); every unit of ranking error
/// subtracts one point down to a floor of zero.
fn current_score(
    draft: &Draft,
    final_positions: &HashMap<&str, usize>,
    total_positions: usize,
) -> i32 {
    let total = total_positions as i32;
    let mut score = 0;
    for entry in &draft.entries {
        if let Some(&final_pos) = final_positions.get(entry.player_name.as_str()) {
            let draft_pos = entry.position as i32;
            let distance = (draft_pos - final_pos as i32).abs();
            let position_value = total + 1 - final_pos as i32;
            score += (position_value - distance).max(0);
        }
    }
    score
}

/// Maximum additional points obtainable from still-undetermined outcomes.
///
/// With survivors remaining, each one independently claims the open final
/// position nearest its draft position; contributions may be negative and
/// are summed as-is. With no survivors, the legacy season-complete
/// aggregate applies, which may itself go negative -- that result is
/// preserved, not clamped.
fn points_available(
    draft: &Draft,
    final_positions: &HashMap<&str, usize>,
    total_positions: usize,
) -> i32 {
    let total = total_positions as i32;

    let survivors: Vec<_> = draft
        .entries
        .iter()
        .filter(|e| !final_positions.contains_key(e.player_name.as_str()))
        .collect();

    if survivors.is_empty() {
        let perfect_score = total * (total + 1) / 2;
        let max_position = final_positions.values().copied().max().unwrap_or(0) as i32;

        let mut current_max = 0;
        let mut current_score = 0;
        let mut known_losses = 0;
        for entry in &draft.entries {
            let mut position_value = 0;
            let mut entry_score = 0;
            let mut known_loss = 0;
            if let Some(&final_pos) = final_positions.get(entry.player_name.as_str()) {
                let draft_pos = entry.position as i32;
                let distance = (draft_pos - final_pos as i32).abs();
                // Position value keys off the final position here
                position_value = total - final_pos as i32 + 1;
                entry_score = (position_value - distance).max(0);

                let loss_distance = (draft_pos - max_position).abs();
                if loss_distance > position_value {
                    known_loss = position_value; // complete loss of points
                } else if loss_distance > 0 {
                    known_loss = distance; // partial loss of points
                }
            }
            current_max += position_value;
            current_score += entry_score;
            known_losses += known_loss;
        }

        let current_miss = current_max - current_score;
        return perfect_score - current_max - current_miss - known_losses;
    }

    // Final positions not yet claimed by any eliminated player
    let claimed: HashSet<usize> = final_positions.values().copied().collect();
    let open_positions: Vec<i32> = (1..=total_positions)
        .filter(|p| !claimed.contains(p))
        .map(|p| p as i32)
        .collect();

    if open_positions.is_empty() {
        return 0;
    }

    // Each survivor independently claims its nearest open position; no
    // uniqueness constraint between survivors
    survivors
        .iter()
        .map(|survivor| {
            let draft_pos = survivor.position as i32;
            let best_distance = open_positions
                .iter()
                .map(|p| (draft_pos - p).abs())
                .min()
                .unwrap_or(0);
            let position_value = total + 1 - draft_pos;
            position_value - best_distance
        })
        .sum()
}
