//! Scoring configuration
//!
//! `ScoringOptions` decides how a hundred's score scales its value and how
//! much one unit of stake is worth. Options come from the `{...}` block of an
//! index header, from command-line flags, or from serialized configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, DocumentError};

/// Stake multipliers an index header may ask for.
pub const INDEX_MULTIPLIERS: [u32; 3] = [1, 2, 10];

/// How the score of a hundred scales the commitment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HundredRule {
    /// Every ten points above the hundred doubles the value.
    #[default]
    Multiplicative,
    /// Every ten points above the hundred adds the base value once.
    Additive,
}

impl HundredRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            HundredRule::Multiplicative => "mult",
            HundredRule::Additive => "add",
        }
    }
}

impl fmt::Display for HundredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HundredRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mult" | "multiplicative" => Ok(HundredRule::Multiplicative),
            "add" | "additive" => Ok(HundredRule::Additive),
            _ => Err(ConfigError::UnsupportedHundredRule(s.to_string())),
        }
    }
}

impl TryFrom<String> for HundredRule {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HundredRule> for String {
    fn from(rule: HundredRule) -> Self {
        rule.as_str().to_string()
    }
}

impl clap::ValueEnum for HundredRule {
    fn value_variants<'a>() -> &'a [Self] {
        &[HundredRule::Multiplicative, HundredRule::Additive]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.as_str());
        Some(match self {
            HundredRule::Multiplicative => value.alias("multiplicative"),
            HundredRule::Additive => value.alias("additive"),
        })
    }
}

/// Scoring rules of one index or one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    pub hundred_rule: HundredRule,
    pub stake_multiplier: u32,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            hundred_rule: HundredRule::Multiplicative,
            stake_multiplier: 1,
        }
    }
}

impl ScoringOptions {
    pub fn new(hundred_rule: HundredRule, stake_multiplier: u32) -> Result<Self, ConfigError> {
        if stake_multiplier == 0 {
            return Err(ConfigError::InvalidStakeMultiplier);
        }
        Ok(Self {
            hundred_rule,
            stake_multiplier,
        })
    }

    /// Interpret the option tokens of an index header, in order; later tokens
    /// override earlier ones.
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut options = Self::default();
        for (token, offset) in tokens {
            options.apply_token(token).ok_or_else(|| DocumentError::UnknownIndexOption {
                option: token.to_string(),
                offset,
            })?;
        }
        Ok(options)
    }

    fn apply_token(&mut self, token: &str) -> Option<()> {
        let (key, value) = token.split_once('=')?;
        match key {
            "hundred" => {
                self.hundred_rule = match value {
                    "add" => HundredRule::Additive,
                    "mult" => HundredRule::Multiplicative,
                    _ => return None,
                };
            }
            "multiplier" => {
                let multiplier = value.parse::<u32>().ok()?;
                if !INDEX_MULTIPLIERS.contains(&multiplier) {
                    return None;
                }
                self.stake_multiplier = multiplier;
            }
            _ => return None,
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_override_defaults() {
        let options =
            ScoringOptions::from_tokens([("hundred=add", 10), ("multiplier=10", 22)]).unwrap();
        assert_eq!(options.hundred_rule, HundredRule::Additive);
        assert_eq!(options.stake_multiplier, 10);
    }

    #[test]
    fn test_unknown_token_reports_offset() {
        let err = ScoringOptions::from_tokens([("multiplier=3", 17)]).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownIndexOption {
                option: "multiplier=3".to_string(),
                offset: 17,
            }
        );
        assert!(ScoringOptions::from_tokens([("hundred", 0)]).is_err());
        assert!(ScoringOptions::from_tokens([("bonus=1", 0)]).is_err());
    }

    #[test]
    fn test_hundred_rule_from_str() {
        assert_eq!("ADD".parse::<HundredRule>().unwrap(), HundredRule::Additive);
        assert_eq!(
            "triple".parse::<HundredRule>(),
            Err(ConfigError::UnsupportedHundredRule("triple".to_string()))
        );
    }

    #[test]
    fn test_zero_multiplier_is_rejected() {
        assert_eq!(
            ScoringOptions::new(HundredRule::Additive, 0),
            Err(ConfigError::InvalidStakeMultiplier)
        );
    }

    #[test]
    fn test_serde_uses_short_rule_names() {
        let json = serde_json::to_string(&ScoringOptions::default()).unwrap();
        assert_eq!(json, r#"{"hundred_rule":"mult","stake_multiplier":1}"#);
        let parsed: ScoringOptions = serde_json::from_str(r#"{"hundred_rule":"add"}"#).unwrap();
        assert_eq!(parsed.hundred_rule, HundredRule::Additive);
        assert_eq!(parsed.stake_multiplier, 1);
        assert!(serde_json::from_str::<ScoringOptions>(r#"{"hundred_rule":"x"}"#).is_err());
    }
}
