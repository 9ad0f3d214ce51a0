//! Match state for live cricket scoring.
//!
//! This module provides the core state types:
//!
//! - `player` - Players, team rosters
//! - `inning` - Batting and bowling figures, strike and bowler slots, extras
//! - `delivery` - One ball's outcome and the scoring rules derived from it
//! - `command` - Serializable commands and the error type
//! - `config` - Match rules (balls per over, balls-faced policy)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                              Match                                │
//! │                                                                   │
//! │  team1_players / team2_players     innings[0..4]                  │
//! │  ┌─────────────────┐              ┌─────────────────────────────┐ │
//! │  │ player_id →     │              │ Inning                      │ │
//! │  │   Player        │              │  on/off strike  ⇄ swap      │ │
//! │  └─────────────────┘              │  current/previous bowler ⇄  │ │
//! │                                   │  player_id → Batter         │ │
//! │  active_inning ─────────────────▶ │  player_id → Bowler         │ │
//! │                                   │  byes, leg byes, nb, wd     │ │
//! │                                   └─────────────────────────────┘ │
//! │                                                                   │
//! │  MatchCommand ──▶ Match::apply ──▶ in-place update of one inning  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use cricket_state::state::{Delivery, Inning, Match, MatchCommand};
//!
//! let mut game = Match::new();
//! let mut inning = Inning::new(Some(20));
//! inning.set_batters("opener-1".into(), "opener-2".into());
//! inning.set_bowlers("quick-1".into(), Some("quick-2".into()));
//! game.push_inning(inning);
//!
//! game.apply(MatchCommand::Delivery(Delivery::four()))?;
//! game.apply(MatchCommand::Over)?;
//! ```

pub mod command;
pub mod config;
pub mod delivery;
pub mod inning;
pub mod player;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

// Re-export commonly used types
pub use command::{MatchCommand, MatchError};
pub use config::MatchConfig;
pub use delivery::{BallType, Delivery, Extra, RunType, ILLEGAL_DELIVERY_PENALTY};
pub use inning::{overs_notation, Batter, Bowler, FallOfWicket, HowOut, Inning};
pub use player::{Player, PlayerId, Roster, Team};

/// Up to two innings per side.
pub const MAX_INNINGS: u8 = 4;

/// The match aggregate.
///
/// Owns every inning and both rosters. All mutation goes through `&mut self`,
/// so one command is fully applied before the next can start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Index into `innings` of the inning being scored
    pub active_inning: u8,

    pub innings: Vec<Inning>,

    pub balls_per_over: u32,
    pub innings_per_side: u32,
    pub players_per_side: u32,

    pub follow_on: bool,

    pub team1_name: String,
    pub team1_players: Roster,
    pub team2_name: String,
    pub team2_players: Roster,

    pub no_balls_as_balls_faced: bool,
    pub wides_as_balls_faced: bool,

    /// When the match was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the last command was applied
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Match {
    fn default() -> Self {
        Self::from_config(MatchConfig::default())
    }
}

impl Match {
    /// Create a match with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a match with custom rules.
    pub fn with_config(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: MatchConfig) -> Self {
        Self {
            active_inning: 0,
            innings: Vec::new(),
            balls_per_over: config.balls_per_over,
            innings_per_side: config.innings_per_side,
            players_per_side: config.players_per_side,
            follow_on: false,
            team1_name: String::new(),
            team1_players: Roster::new(),
            team2_name: String::new(),
            team2_players: Roster::new(),
            no_balls_as_balls_faced: config.no_balls_as_balls_faced,
            wides_as_balls_faced: config.wides_as_balls_faced,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The rules this match was created with.
    pub fn config(&self) -> MatchConfig {
        MatchConfig {
            balls_per_over: self.balls_per_over,
            innings_per_side: self.innings_per_side,
            players_per_side: self.players_per_side,
            no_balls_as_balls_faced: self.no_balls_as_balls_faced,
            wides_as_balls_faced: self.wides_as_balls_faced,
        }
    }

    /// Append an inning, returning its index.
    pub fn push_inning(&mut self, inning: Inning) -> usize {
        self.innings.push(inning);
        self.innings.len() - 1
    }

    /// The inning `active_inning` points at, if it exists yet.
    pub fn current_inning(&self) -> Option<&Inning> {
        self.innings.get(usize::from(self.active_inning))
    }

    pub fn current_inning_mut(&mut self) -> Option<&mut Inning> {
        self.innings.get_mut(usize::from(self.active_inning))
    }

    fn active_inning_mut(&mut self) -> Result<&mut Inning, MatchError> {
        let index = self.active_inning;
        self.innings
            .get_mut(usize::from(index))
            .ok_or(MatchError::NoActiveInning { index })
    }

    /// Score one ball against the active inning.
    pub fn delivery(&mut self, delivery: Delivery) -> Result<(), MatchError> {
        let ball_faced = delivery
            .counts_as_ball_faced(self.no_balls_as_balls_faced, self.wides_as_balls_faced);
        let index = self.active_inning;
        let inning = self.active_inning_mut()?;
        let striker = inning.batter_on_strike.clone();
        let bowler = inning.bowler_current.clone();

        inning.record_delivery(&delivery, ball_faced)?;

        trace!(
            inning = index,
            striker = ?striker,
            bowler = ?bowler,
            %delivery,
            ball_faced,
            "delivery recorded"
        );
        Ok(())
    }

    /// End the over: batters change ends and the bowlers alternate.
    pub fn over(&mut self) -> Result<(), MatchError> {
        let inning = self.active_inning_mut()?;
        inning.end_over();
        trace!(
            on_strike = ?inning.batter_on_strike,
            bowler = ?inning.bowler_current,
            "over completed"
        );
        Ok(())
    }

    /// Exchange the striker and non-striker without touching any figures.
    pub fn swap_strike(&mut self) -> Result<(), MatchError> {
        let inning = self.active_inning_mut()?;
        inning.swap_strike();
        trace!(on_strike = ?inning.batter_on_strike, "strike swapped");
        Ok(())
    }

    /// Point the match at another inning.
    ///
    /// The inning itself does not have to exist yet, only the index has to
    /// be one a match can have.
    pub fn set_active_inning(&mut self, value: u8) -> Result<(), MatchError> {
        if value >= MAX_INNINGS {
            return Err(MatchError::InvalidInningIndex(value));
        }
        self.active_inning = value;
        Ok(())
    }

    pub fn set_follow_on(&mut self, value: bool) {
        self.follow_on = value;
    }

    pub fn set_team_name(&mut self, team: Team, value: String) {
        match team {
            Team::One => self.team1_name = value,
            Team::Two => self.team2_name = value,
        }
    }

    /// Insert or replace a player on a team's roster.
    pub fn set_team_player(&mut self, team: Team, player: Player) {
        self.roster_mut(team).upsert(player);
    }

    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team1_name,
            Team::Two => &self.team2_name,
        }
    }

    pub fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::One => &self.team1_players,
            Team::Two => &self.team2_players,
        }
    }

    fn roster_mut(&mut self, team: Team) -> &mut Roster {
        match team {
            Team::One => &mut self.team1_players,
            Team::Two => &mut self.team2_players,
        }
    }

    /// Apply a command in place.
    ///
    /// A rejected command leaves the match exactly as it was.
    pub fn apply(&mut self, command: MatchCommand) -> Result<(), MatchError> {
        let name = command.as_str();
        let result = match command {
            MatchCommand::Delivery(delivery) => self.delivery(delivery),
            MatchCommand::Over => self.over(),
            MatchCommand::SwapStrike => self.swap_strike(),
            MatchCommand::SetActiveInning { value } => self.set_active_inning(value),
            MatchCommand::SetFollowOn { value } => {
                self.set_follow_on(value);
                Ok(())
            }
            MatchCommand::SetTeam1Name { value } => {
                self.set_team_name(Team::One, value);
                Ok(())
            }
            MatchCommand::SetTeam2Name { value } => {
                self.set_team_name(Team::Two, value);
                Ok(())
            }
            MatchCommand::SetTeam1Player { player } => {
                self.set_team_player(Team::One, player);
                Ok(())
            }
            MatchCommand::SetTeam2Player { player } => {
                self.set_team_player(Team::Two, player);
                Ok(())
            }
        };

        match &result {
            Ok(()) => {
                self.updated_at = Some(Utc::now());
                debug!(command = name, active_inning = self.active_inning, "command applied");
            }
            Err(e) => warn!(command = name, error = %e, "command rejected"),
        }
        result
    }

    /// Parse a JSON command and apply it.
    pub fn apply_json(&mut self, json: &str) -> Result<(), MatchError> {
        let command = MatchCommand::from_json(json)?;
        self.apply(command)
    }

    /// Full state snapshot for display clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
