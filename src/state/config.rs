//! Match rules.

use serde::{Deserialize, Serialize};

use super::command::MatchError;

pub const DEFAULT_BALLS_PER_OVER: u32 = 6;
pub const DEFAULT_INNINGS_PER_SIDE: u32 = 2;
pub const DEFAULT_PLAYERS_PER_SIDE: u32 = 11;

/// Rules fixed when a match is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub balls_per_over: u32,
    pub innings_per_side: u32,
    pub players_per_side: u32,
    /// Count no-balls toward the striker's balls faced
    pub no_balls_as_balls_faced: bool,
    /// Count wides toward the striker's balls faced
    pub wides_as_balls_faced: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            innings_per_side: DEFAULT_INNINGS_PER_SIDE,
            players_per_side: DEFAULT_PLAYERS_PER_SIDE,
            no_balls_as_balls_faced: true,
            wides_as_balls_faced: false,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.balls_per_over == 0 {
            return Err(MatchError::InvalidConfig(
                "balls per over must be at least 1".to_string(),
            ));
        }
        if self.players_per_side == 0 {
            return Err(MatchError::InvalidConfig(
                "players per side must be at least 1".to_string(),
            ));
        }
        if !(1..=2).contains(&self.innings_per_side) {
            return Err(MatchError::InvalidConfig(format!(
                "innings per side must be 1 or 2, got {}",
                self.innings_per_side
            )));
        }
        Ok(())
    }
}
