//! Balance aggregation
//!
//! Sums evaluated plays into player balances: per member of a group, per
//! group, per index and across many indexes. Every group must settle to zero
//! before a balance is reported from it; a nonzero total or a play that fails
//! to evaluate after validation is an invariant violation.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::BalanceError;
use crate::eval::ScoreEvaluator;
use crate::index::{Group, IndexDocument, Player};
use crate::options::ScoringOptions;

/// A player's standing across a set of indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub name: String,
    /// Net balance in minor currency units.
    pub balance: i64,
    /// Number of indexes the player appears in.
    pub indexes: usize,
}

/// What `pov` gains or loses from the plays of `member`.
pub fn balance_for_member(
    evaluator: &ScoreEvaluator,
    pov: &str,
    member: &Player,
) -> Result<i64, BalanceError> {
    let own = member.name == pov;
    member.plays.iter().try_fold(0_i64, |total, play| {
        let score = evaluator
            .score(&play.spec)
            .map_err(|source| BalanceError::UnscorablePlay {
                player: member.name.clone(),
                play: play.spec.clone(),
                source,
            })?;
        let value = if own {
            score.own_value
        } else {
            score.enemy_value
        };
        Ok(total.saturating_add(value))
    })
}

/// Verify that the balances of every member of the group sum to zero.
pub fn check_group_balance(group: &Group, options: ScoringOptions) -> Result<(), BalanceError> {
    let evaluator = ScoreEvaluator::new(group.len(), options)?;
    check_with(&evaluator, group)
}

/// Balance of `pov` within one group; 0 when `pov` did not play in it.
pub fn balance_for_group(
    pov: &str,
    group: &Group,
    options: ScoringOptions,
) -> Result<i64, BalanceError> {
    let evaluator = ScoreEvaluator::new(group.len(), options)?;
    check_with(&evaluator, group)?;
    if group.player(pov).is_none() {
        return Ok(0);
    }
    sum_for(&evaluator, pov, group)
}

/// Balance of `pov` over every group of an index.
pub fn balance_for_index(pov: &str, index: &IndexDocument) -> Result<i64, BalanceError> {
    index.groups.iter().try_fold(0_i64, |total, group| {
        Ok(total.saturating_add(balance_for_group(pov, group, index.scoring)?))
    })
}

/// Balance of every player of a group, in group order.
pub fn group_balances(
    group: &Group,
    options: ScoringOptions,
) -> Result<Vec<(String, i64)>, BalanceError> {
    let evaluator = ScoreEvaluator::new(group.len(), options)?;
    check_with(&evaluator, group)?;
    group
        .players
        .iter()
        .map(|player| Ok((player.name.clone(), sum_for(&evaluator, &player.name, group)?)))
        .collect()
}

/// Standings of every player over all indexes, best balance first.
pub fn leaderboard(indexes: &[IndexDocument]) -> Result<Vec<Standing>, BalanceError> {
    let mut standings: Vec<Standing> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for index in indexes {
        for name in index.player_names() {
            let balance = balance_for_index(name, index)?;
            let position = *positions.entry(name.to_string()).or_insert_with(|| {
                standings.push(Standing {
                    name: name.to_string(),
                    balance: 0,
                    indexes: 0,
                });
                standings.len() - 1
            });
            let standing = &mut standings[position];
            standing.balance = standing.balance.saturating_add(balance);
            standing.indexes += 1;
        }
    }

    standings.sort_by(|a, b| b.balance.cmp(&a.balance).then_with(|| a.name.cmp(&b.name)));
    debug!(players = standings.len(), indexes = indexes.len(), "leaderboard");
    Ok(standings)
}

fn sum_for(evaluator: &ScoreEvaluator, pov: &str, group: &Group) -> Result<i64, BalanceError> {
    group.players.iter().try_fold(0_i64, |total, member| {
        Ok(total.saturating_add(balance_for_member(evaluator, pov, member)?))
    })
}

fn check_with(evaluator: &ScoreEvaluator, group: &Group) -> Result<(), BalanceError> {
    let total = group.players.iter().try_fold(0_i64, |total, pov| {
        Ok::<_, BalanceError>(total.saturating_add(sum_for(evaluator, &pov.name, group)?))
    })?;
    if total != 0 {
        warn!(total, players = group.len(), "group balance does not sum to zero");
        return Err(BalanceError::GroupBalanceNotZero { total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(rows: &[(&str, &[&str])]) -> Group {
        Group::new(
            rows.iter()
                .map(|(name, plays)| Player::with_plays(*name, plays.iter().copied()))
                .collect(),
        )
    }

    #[test]
    fn test_member_balance_uses_perspective() {
        let evaluator = ScoreEvaluator::new(3, ScoringOptions::default()).unwrap();
        let pepa = Player::with_plays("Pepa", ["+c", "e"]);
        assert_eq!(balance_for_member(&evaluator, "Pepa", &pepa).unwrap(), 180);
        assert_eq!(balance_for_member(&evaluator, "Franta", &pepa).unwrap(), -90);
    }

    #[test]
    fn test_group_balances_sum_to_zero() {
        let group = group(&[("A", &["+c", "-k120"]), ("B", &["e"]), ("C", &[])]);
        let balances = group_balances(&group, ScoringOptions::default()).unwrap();
        assert_eq!(
            balances,
            vec![
                ("A".to_string(), 300 - 320 + 60),
                ("B".to_string(), -150 + 160 - 120),
                ("C".to_string(), -150 + 160 + 60),
            ]
        );
        assert_eq!(balances.iter().map(|(_, b)| b).sum::<i64>(), 0);
    }

    #[test]
    fn test_absent_player_has_zero_balance() {
        let group = group(&[("A", &["+c"]), ("B", &[]), ("C", &[])]);
        assert_eq!(
            balance_for_group("Z", &group, ScoringOptions::default()).unwrap(),
            0
        );
    }

    #[test]
    fn test_solo_parity_breaks_zero_sum() {
        let group = group(&[("A", &["$:-c"]), ("B", &[]), ("C", &[])]);
        assert_eq!(
            check_group_balance(&group, ScoringOptions::default()),
            Err(BalanceError::GroupBalanceNotZero { total: -150 })
        );
    }

    #[test]
    fn test_unscorable_play_is_an_invariant_error() {
        let group = group(&[("A", &["+c*"]), ("B", &[]), ("C", &[])]);
        assert!(matches!(
            check_group_balance(&group, ScoringOptions::default()),
            Err(BalanceError::UnscorablePlay { .. })
        ));
    }
}
