//! Semantic checks of a scanned index document.
//!
//! Checks run in document order and the first failure is returned: header,
//! then each group's players, then every play of the group.

use std::collections::HashSet;

use crate::errors::{DocumentError, MIN_GROUP_SIZE};
use crate::eval::ScoreEvaluator;
use crate::index::{Group, IndexDocument};

pub fn validate(document: &IndexDocument) -> Result<(), DocumentError> {
    if document.place.is_empty() {
        return Err(DocumentError::EmptyPlace);
    }
    if document.date.is_none() {
        return Err(DocumentError::InvalidDate {
            raw: document.raw_date.clone(),
        });
    }

    for (index, group) in document.groups.iter().enumerate() {
        validate_group(index + 1, group, document)?;
    }
    Ok(())
}

fn validate_group(
    number: usize,
    group: &Group,
    document: &IndexDocument,
) -> Result<(), DocumentError> {
    if group.len() < MIN_GROUP_SIZE {
        return Err(DocumentError::GroupTooSmall {
            group: number,
            players: group.len(),
            offset: group.players.first().map_or(0, |player| player.start),
        });
    }

    let mut seen = HashSet::new();
    for player in &group.players {
        if player.name.is_empty() {
            return Err(DocumentError::EmptyPlayerName {
                group: number,
                offset: player.start,
            });
        }
        if !seen.insert(player.name.as_str()) {
            return Err(DocumentError::DuplicatePlayer {
                group: number,
                name: player.name.clone(),
                offset: player.start,
            });
        }
    }

    let evaluator = ScoreEvaluator::new(group.len(), document.scoring).map_err(|source| {
        DocumentError::Config {
            group: number,
            source,
        }
    })?;

    for player in &group.players {
        for (index, play) in player.plays.iter().enumerate() {
            evaluator
                .score(&play.spec)
                .map_err(|source| DocumentError::InvalidPlay {
                    group: number,
                    player: player.name.clone(),
                    play: index + 1,
                    span: play.span(),
                    source,
                })?;
        }
    }
    Ok(())
}
