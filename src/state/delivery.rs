//! Delivery outcomes and the scoring rules derived from them.
//!
//! A [`Delivery`] is the payload of one bowled ball. Every figure the
//! ball contributes (batter credit, bowler charge, extras) is computed
//! here so the inning only has to add the numbers up.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::command::MatchError;

/// Penalty run conceded by any no-ball or wide.
pub const ILLEGAL_DELIVERY_PENALTY: u32 = 1;

/// Legality of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BallType {
    Legal,
    NoBall,
    Wide,
}

impl BallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::NoBall => "noBall",
            Self::Wide => "wide",
        }
    }

    pub fn is_legal(&self) -> bool {
        matches!(self, Self::Legal)
    }
}

/// Who the runs on a delivery are credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunType {
    /// Off the bat, credited to the striker
    Bat,
    Byes,
    LegByes,
}

impl RunType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bat => "bat",
            Self::Byes => "byes",
            Self::LegByes => "legByes",
        }
    }
}

/// The extras bucket a delivery adds to, with the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    Byes(u32),
    LegByes(u32),
    NoBalls(u32),
    Wides(u32),
}

impl Extra {
    pub fn runs(&self) -> u32 {
        match self {
            Self::Byes(r) | Self::LegByes(r) | Self::NoBalls(r) | Self::Wides(r) => *r,
        }
    }
}

/// One ball's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub ball_type: BallType,
    /// Set only when the shot crossed the rope
    pub boundary: bool,
    pub run_type: RunType,
    /// Runs physically scored, excluding the illegal-delivery penalty
    pub runs: u32,
}

impl Delivery {
    pub fn new(ball_type: BallType, boundary: bool, run_type: RunType, runs: u32) -> Self {
        Self {
            ball_type,
            boundary,
            run_type,
            runs,
        }
    }

    /// Legal ball, runs off the bat, no boundary.
    pub fn legal(runs: u32) -> Self {
        Self::new(BallType::Legal, false, RunType::Bat, runs)
    }

    pub fn four() -> Self {
        Self::new(BallType::Legal, true, RunType::Bat, 4)
    }

    pub fn six() -> Self {
        Self::new(BallType::Legal, true, RunType::Bat, 6)
    }

    /// Runs credited to the striker's personal tally.
    pub fn batter_runs(&self) -> u32 {
        match self.run_type {
            RunType::Bat => self.runs,
            RunType::Byes | RunType::LegByes => 0,
        }
    }

    /// Only an exact boundary four off the bat counts.
    pub fn is_four(&self) -> bool {
        self.boundary && self.run_type == RunType::Bat && self.runs == 4
    }

    /// Only an exact boundary six off the bat counts.
    pub fn is_six(&self) -> bool {
        self.boundary && self.run_type == RunType::Bat && self.runs == 6
    }

    /// Whether the striker is charged a ball faced.
    pub fn counts_as_ball_faced(
        &self,
        no_balls_as_balls_faced: bool,
        wides_as_balls_faced: bool,
    ) -> bool {
        match self.ball_type {
            BallType::Legal => true,
            BallType::NoBall => no_balls_as_balls_faced,
            BallType::Wide => wides_as_balls_faced,
        }
    }

    /// Odd runs leave the batters at opposite ends.
    pub fn rotates_strike(&self) -> bool {
        self.runs % 2 == 1
    }

    /// Runs charged against the bowler's figures.
    ///
    /// Byes and leg-byes off a legal ball are not the bowler's fault. On a
    /// no-ball or wide the penalty and every run scored go against the
    /// bowler, whatever the run type.
    pub fn bowler_runs(&self) -> u32 {
        match self.ball_type {
            BallType::Legal => self.batter_runs(),
            BallType::NoBall | BallType::Wide => self.runs_with_penalty(),
        }
    }

    /// The extras this delivery adds to the inning, if any.
    ///
    /// Runs off the bat on a no-ball stay with the batter; only the penalty
    /// is an extra. Everything scored on a wide is an extra.
    pub fn extra(&self) -> Option<Extra> {
        match (self.ball_type, self.run_type) {
            (BallType::Legal, RunType::Bat) => None,
            (BallType::Legal, RunType::Byes) => Some(Extra::Byes(self.runs)),
            (BallType::Legal, RunType::LegByes) => Some(Extra::LegByes(self.runs)),
            (BallType::NoBall, RunType::Bat) => Some(Extra::NoBalls(ILLEGAL_DELIVERY_PENALTY)),
            (BallType::NoBall, _) => Some(Extra::NoBalls(self.runs_with_penalty())),
            (BallType::Wide, _) => Some(Extra::Wides(self.runs_with_penalty())),
        }
    }

    /// Runs this delivery adds to [`Inning::total`](super::Inning::total).
    ///
    /// Runs off the bat on a wide are credited to the striker and are also
    /// part of the wides tally, so they count twice here.
    pub fn total_runs(&self) -> u32 {
        self.batter_runs()
            .saturating_add(self.extra().map_or(0, |e| e.runs()))
    }

    /// Reject a run count the penalty cannot be added to.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.ball_type.is_legal() {
            return Ok(());
        }
        self.runs
            .checked_add(ILLEGAL_DELIVERY_PENALTY)
            .map(|_| ())
            .ok_or(MatchError::RunsOverflow)
    }

    /// Saturates; [`validate`](Self::validate) rules out the overflowing case.
    fn runs_with_penalty(&self) -> u32 {
        self.runs.saturating_add(ILLEGAL_DELIVERY_PENALTY)
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.ball_type.as_str(),
            self.runs,
            self.run_type.as_str(),
            if self.boundary { " (boundary)" } else { "" }
        )
    }
}
