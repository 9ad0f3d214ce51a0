//! Cricket Match State Library
//!
//! This crate provides state management for live cricket scoring.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Delivery Scoring** - Given one ball's outcome (legal, no-ball or wide,
//!   runs, boundary, byes or leg-byes), updates batter and bowler figures,
//!   strike rotation and extras in one step.
//!
//! - **Innings** - Batting and bowling figures per player, with explicit
//!   batting and bowling orders for display.
//!
//! - **Commands** - Every operation as a serializable [`state::MatchCommand`]
//!   applied through [`state::Match::apply`].
//!
//! - **Rosters** - Team names and player registration.
//!
//! # Design Principles
//!
//! 1. **Validate, then write** - A command that cannot be applied returns an
//!    error and leaves the match untouched.
//!
//! 2. **Orders are explicit** - Figures live in maps keyed by player id; the
//!    display order lives in separate vectors.
//!
//! 3. **No persistence** - This crate is pure in-memory state.
//!
//! 4. **Serialization-ready** - The whole match can be converted to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use cricket_state::{BallType, Delivery, Inning, Match, MatchCommand, RunType};
//!
//! let mut game = Match::new();
//!
//! // The innings collaborator sets up the crease and the bowlers
//! let mut inning = Inning::new(Some(20));
//! inning.set_batters("opener-1".into(), "opener-2".into());
//! inning.set_bowlers("quick-1".into(), Some("quick-2".into()));
//! game.push_inning(inning);
//!
//! // A single off the bat, then a no-ball hit for four
//! game.apply(MatchCommand::Delivery(Delivery::legal(1))).unwrap();
//! game.apply(MatchCommand::Delivery(Delivery::new(BallType::NoBall, true, RunType::Bat, 4)))
//!     .unwrap();
//!
//! let inning = game.current_inning().unwrap();
//! assert_eq!(inning.total(), 6);
//! assert_eq!(inning.no_balls, 1);
//! assert_eq!(inning.batter_on_strike.as_ref().map(|p| p.as_str()), Some("opener-2"));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
