//! Match commands and errors.
//!
//! Commands are the wire form of every operation the scorer can apply to a
//! [`Match`](super::Match). They serialize as `{"type": ..., "payload": ...}`
//! with camelCase names, so an event source can post them as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::delivery::Delivery;
use super::player::{Player, PlayerId, Team};

/// A single scoring or setup event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum MatchCommand {
    Delivery(Delivery),
    Over,
    SetActiveInning { value: u8 },
    SetFollowOn { value: bool },
    SetTeam1Name { value: String },
    SetTeam2Name { value: String },
    SetTeam1Player { player: Player },
    SetTeam2Player { player: Player },
    SwapStrike,
}

impl MatchCommand {
    /// Parse one command from JSON.
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Team-name command for either side.
    pub fn set_team_name(team: Team, value: impl Into<String>) -> Self {
        let value = value.into();
        match team {
            Team::One => Self::SetTeam1Name { value },
            Team::Two => Self::SetTeam2Name { value },
        }
    }

    /// Roster upsert command for either side.
    pub fn set_team_player(team: Team, player: Player) -> Self {
        match team {
            Team::One => Self::SetTeam1Player { player },
            Team::Two => Self::SetTeam2Player { player },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery(_) => "delivery",
            Self::Over => "over",
            Self::SetActiveInning { .. } => "setActiveInning",
            Self::SetFollowOn { .. } => "setFollowOn",
            Self::SetTeam1Name { .. } => "setTeam1Name",
            Self::SetTeam2Name { .. } => "setTeam2Name",
            Self::SetTeam1Player { .. } => "setTeam1Player",
            Self::SetTeam2Player { .. } => "setTeam2Player",
            Self::SwapStrike => "swapStrike",
        }
    }

    /// Whether the command needs a live inning to apply to.
    pub fn needs_inning(&self) -> bool {
        matches!(self, Self::Delivery(_) | Self::Over | Self::SwapStrike)
    }
}

/// Match errors.
///
/// Every variant is raised before any state is written.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("No inning at index {index}")]
    NoActiveInning { index: u8 },

    #[error("No batter on strike")]
    NoStriker,

    #[error("No current bowler")]
    NoBowler,

    #[error("Batter {0} has no figures in this inning")]
    UnknownBatter(PlayerId),

    #[error("Bowler {0} has no figures in this inning")]
    UnknownBowler(PlayerId),

    #[error("Inning index {0} out of range (0-3)")]
    InvalidInningIndex(u8),

    #[error("Delivery would overflow the scorecard figures")]
    RunsOverflow,

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::delivery::{BallType, RunType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_delivery() {
        let cmd = MatchCommand::from_json(
            r#"{"type":"delivery","payload":{"ballType":"wide","boundary":false,"runType":"bat","runs":0}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            MatchCommand::Delivery(Delivery::new(BallType::Wide, false, RunType::Bat, 0))
        );
        assert_eq!(cmd.as_str(), "delivery");
        assert!(cmd.needs_inning());
    }

    #[test]
    fn test_parse_unit_commands() {
        assert_eq!(
            MatchCommand::from_json(r#"{"type":"over"}"#).unwrap(),
            MatchCommand::Over
        );
        assert_eq!(
            MatchCommand::from_json(r#"{"type":"swapStrike"}"#).unwrap(),
            MatchCommand::SwapStrike
        );
    }

    #[test]
    fn test_parse_roster_command() {
        let cmd = MatchCommand::from_json(
            r#"{"type":"setTeam2Player","payload":{"player":{"id":"p9","name":"Dana"}}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            MatchCommand::set_team_player(Team::Two, Player::new("p9", "Dana"))
        );
        assert!(!cmd.needs_inning());
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = MatchCommand::SetActiveInning { value: 2 };
        assert_eq!(
            cmd.to_json(),
            serde_json::json!({"type": "setActiveInning", "payload": {"value": 2}})
        );
    }

    #[test]
    fn test_unknown_command_is_json_error() {
        let err = MatchCommand::from_json(r#"{"type":"declare"}"#).unwrap_err();
        assert!(matches!(err, MatchError::Json(_)));
    }

    #[test]
    fn test_negative_runs_rejected() {
        let err = MatchCommand::from_json(
            r#"{"type":"delivery","payload":{"ballType":"legal","boundary":false,"runType":"bat","runs":-1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::Json(_)));
    }
}
