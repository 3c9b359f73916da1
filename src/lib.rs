//! Scoring of mariáš rounds and tournament indexes.
//!
//! The pipeline runs one way: a play code is parsed by [`syntax`], valued by
//! [`eval`], collected from index documents by [`index`] and summed into
//! player balances by [`balance`].
//!
//! ```
//! use marias::{ScoreEvaluator, ScoringOptions};
//!
//! let evaluator = ScoreEvaluator::new(3, ScoringOptions::default()).unwrap();
//! let result = evaluator.evaluate("+1s-h*");
//! assert!(result.accepted);
//! assert_eq!((result.own_value, result.enemy_value), (120, -60));
//! ```

pub mod balance;
pub mod cli;
pub mod diagnostics;
pub mod errors;
pub mod eval;
pub mod index;
pub mod options;
pub mod syntax;

pub use crate::balance::{
    balance_for_group, balance_for_index, balance_for_member, check_group_balance,
    group_balances, leaderboard, Standing,
};
pub use crate::diagnostics::IndexDiagnostic;
pub use crate::errors::{BalanceError, ConfigError, DocumentError, SyntaxError, MIN_GROUP_SIZE};
pub use crate::eval::{Perspective, Score, ScoreEvaluator, ScoreResult};
pub use crate::index::{Group, IndexDocument, Play, Player};
pub use crate::options::{HundredRule, ScoringOptions};
pub use crate::syntax::{parse, CommitmentPart, Contract, PlayRecord, Span};
