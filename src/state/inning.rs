//! Innings state.
//!
//! An inning owns the per-player batting and bowling figures, the two
//! strike slots, the two bowler slots, and the extras tallies.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::command::MatchError;
use super::delivery::{BallType, Delivery, Extra};
use super::player::PlayerId;

/// Mode of dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HowOut {
    #[serde(rename = "absent injured")]
    AbsentInjured,
    #[serde(rename = "bowled")]
    Bowled,
    #[serde(rename = "caught")]
    Caught,
    #[serde(rename = "handling the ball")]
    HandlingTheBall,
    #[serde(rename = "hit wicket")]
    HitWicket,
    #[default]
    #[serde(rename = "not out")]
    NotOut,
    #[serde(rename = "lbw")]
    Lbw,
    #[serde(rename = "obstructing the field")]
    ObstructingTheField,
    #[serde(rename = "retired hurt")]
    RetiredHurt,
    #[serde(rename = "retired out")]
    RetiredOut,
    #[serde(rename = "run out")]
    RunOut,
    #[serde(rename = "stumped")]
    Stumped,
    #[serde(rename = "timed out")]
    TimedOut,
}

impl HowOut {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbsentInjured => "absent injured",
            Self::Bowled => "bowled",
            Self::Caught => "caught",
            Self::HandlingTheBall => "handling the ball",
            Self::HitWicket => "hit wicket",
            Self::NotOut => "not out",
            Self::Lbw => "lbw",
            Self::ObstructingTheField => "obstructing the field",
            Self::RetiredHurt => "retired hurt",
            Self::RetiredOut => "retired out",
            Self::RunOut => "run out",
            Self::Stumped => "stumped",
            Self::TimedOut => "timed out",
        }
    }

    /// Whether this counts as a wicket against the batting side.
    pub fn is_wicket(&self) -> bool {
        !matches!(self, Self::NotOut | Self::RetiredHurt | Self::AbsentInjured)
    }
}

impl fmt::Display for HowOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a ball count in overs notation, e.g. 20 balls of 6 is `"3.2"`.
pub fn overs_notation(balls: u32, balls_per_over: u32) -> String {
    let per_over = balls_per_over.max(1);
    match balls % per_over {
        0 => format!("{}", balls / per_over),
        rem => format!("{}.{}", balls / per_over, rem),
    }
}

fn checked_tally(total: u32, runs: u32) -> Result<u32, MatchError> {
    total.checked_add(runs).ok_or(MatchError::RunsOverflow)
}

/// Batting figures for one player in one inning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batter {
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Bowler credited with the dismissal
    pub bowler: Option<PlayerId>,
    /// Fielders involved in the dismissal, in order
    pub fielders: Vec<PlayerId>,
    pub how_out: HowOut,
}

impl Batter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_out(&self) -> bool {
        self.how_out.is_wicket()
    }

    /// Runs per hundred balls.
    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls_faced == 0 {
            return None;
        }
        Some(f64::from(self.runs) * 100.0 / f64::from(self.balls_faced))
    }
}

/// Bowling figures for one player in one inning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bowler {
    /// Legal deliveries only
    pub balls: u32,
    pub maidens: u32,
    pub no_balls: u32,
    pub runs: u32,
    pub wides: u32,
}

impl Bowler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overs(&self, balls_per_over: u32) -> String {
        overs_notation(self.balls, balls_per_over)
    }

    /// Runs conceded per over.
    pub fn economy(&self, balls_per_over: u32) -> Option<f64> {
        if self.balls == 0 {
            return None;
        }
        let overs = f64::from(self.balls) / f64::from(balls_per_over.max(1));
        Some(f64::from(self.runs) / overs)
    }
}

/// One entry in the fall-of-wickets log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub batter: PlayerId,
    pub over: String,
    pub score: u32,
    pub wicket: u32,
}

/// One side's innings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inning {
    pub batter_on_strike: Option<PlayerId>,
    pub batter_off_strike: Option<PlayerId>,
    batters: HashMap<PlayerId, Batter>,
    batting_order: Vec<PlayerId>,

    pub bowler_current: Option<PlayerId>,
    pub bowler_previous: Option<PlayerId>,
    bowlers: HashMap<PlayerId, Bowler>,
    bowling_order: Vec<PlayerId>,

    pub byes: u32,
    pub leg_byes: u32,
    pub no_balls: u32,
    pub wides: u32,
    pub penalties: u32,

    fall_of_wickets: Vec<FallOfWicket>,

    /// Over limit for limited-overs innings
    pub max_overs: Option<u32>,
}

impl Inning {
    /// Create an empty inning.
    pub fn new(max_overs: Option<u32>) -> Self {
        Self {
            max_overs,
            ..Self::default()
        }
    }

    /// Register a batter, appending to the batting order on first sight.
    pub fn add_batter(&mut self, id: PlayerId) -> &mut Batter {
        if !self.batters.contains_key(&id) {
            self.batting_order.push(id.clone());
        }
        self.batters.entry(id).or_default()
    }

    /// Register a bowler, appending to the bowling order on first sight.
    pub fn add_bowler(&mut self, id: PlayerId) -> &mut Bowler {
        if !self.bowlers.contains_key(&id) {
            self.bowling_order.push(id.clone());
        }
        self.bowlers.entry(id).or_default()
    }

    /// Put two batters at the crease, registering either if new.
    pub fn set_batters(&mut self, on_strike: PlayerId, off_strike: PlayerId) {
        self.add_batter(on_strike.clone());
        self.add_batter(off_strike.clone());
        self.batter_on_strike = Some(on_strike);
        self.batter_off_strike = Some(off_strike);
    }

    /// Set the bowler for this over and the one from the other end.
    pub fn set_bowlers(&mut self, current: PlayerId, previous: Option<PlayerId>) {
        self.add_bowler(current.clone());
        if let Some(prev) = &previous {
            self.add_bowler(prev.clone());
        }
        self.bowler_current = Some(current);
        self.bowler_previous = previous;
    }

    pub fn record_fall_of_wicket(&mut self, entry: FallOfWicket) {
        self.fall_of_wickets.push(entry);
    }

    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    pub fn batter(&self, id: &PlayerId) -> Option<&Batter> {
        self.batters.get(id)
    }

    pub fn batter_mut(&mut self, id: &PlayerId) -> Option<&mut Batter> {
        self.batters.get_mut(id)
    }

    pub fn bowler(&self, id: &PlayerId) -> Option<&Bowler> {
        self.bowlers.get(id)
    }

    pub fn bowler_mut(&mut self, id: &PlayerId) -> Option<&mut Bowler> {
        self.bowlers.get_mut(id)
    }

    pub fn batting_order(&self) -> &[PlayerId] {
        &self.batting_order
    }

    pub fn bowling_order(&self) -> &[PlayerId] {
        &self.bowling_order
    }

    /// Batting figures in batting order.
    pub fn batters_in_order(&self) -> impl Iterator<Item = (&PlayerId, &Batter)> {
        self.batting_order
            .iter()
            .filter_map(|id| self.batters.get(id).map(|b| (id, b)))
    }

    /// Bowling figures in bowling order.
    pub fn bowlers_in_order(&self) -> impl Iterator<Item = (&PlayerId, &Bowler)> {
        self.bowling_order
            .iter()
            .filter_map(|id| self.bowlers.get(id).map(|b| (id, b)))
    }

    pub fn extras(&self) -> u32 {
        [self.byes, self.leg_byes, self.no_balls, self.wides, self.penalties]
            .into_iter()
            .fold(0, u32::saturating_add)
    }

    /// Batter runs plus extras.
    ///
    /// A wide recorded as runs off the bat credits those runs to the striker
    /// and to the wides tally, and both are counted here.
    pub fn total(&self) -> u32 {
        self.batters
            .values()
            .map(|b| b.runs)
            .fold(self.extras(), u32::saturating_add)
    }

    pub fn wickets(&self) -> usize {
        self.batters.values().filter(|b| b.is_out()).count()
    }

    pub fn legal_balls(&self) -> u32 {
        self.bowlers
            .values()
            .map(|b| b.balls)
            .fold(0, u32::saturating_add)
    }

    pub fn overs(&self, balls_per_over: u32) -> String {
        overs_notation(self.legal_balls(), balls_per_over)
    }

    /// Score a delivery against the current striker and bowler.
    ///
    /// Every new figure is worked out before anything is written, so a
    /// rejected delivery leaves the inning untouched.
    pub fn record_delivery(
        &mut self,
        delivery: &Delivery,
        ball_faced: bool,
    ) -> Result<(), MatchError> {
        delivery.validate()?;

        let striker_id = self.batter_on_strike.clone().ok_or(MatchError::NoStriker)?;
        let bowler_id = self.bowler_current.clone().ok_or(MatchError::NoBowler)?;

        let mut batter = self
            .batters
            .get(&striker_id)
            .cloned()
            .ok_or_else(|| MatchError::UnknownBatter(striker_id.clone()))?;
        let mut bowler = self
            .bowlers
            .get(&bowler_id)
            .cloned()
            .ok_or_else(|| MatchError::UnknownBowler(bowler_id.clone()))?;

        batter.runs = checked_tally(batter.runs, delivery.batter_runs())?;
        if delivery.is_four() {
            batter.fours = checked_tally(batter.fours, 1)?;
        } else if delivery.is_six() {
            batter.sixes = checked_tally(batter.sixes, 1)?;
        }
        if ball_faced {
            batter.balls_faced = checked_tally(batter.balls_faced, 1)?;
        }

        match delivery.ball_type {
            BallType::Legal => bowler.balls = checked_tally(bowler.balls, 1)?,
            BallType::NoBall => bowler.no_balls = checked_tally(bowler.no_balls, 1)?,
            BallType::Wide => bowler.wides = checked_tally(bowler.wides, 1)?,
        }
        bowler.runs = checked_tally(bowler.runs, delivery.bowler_runs())?;

        let extra = match delivery.extra() {
            Some(Extra::Byes(r)) => Some(Extra::Byes(checked_tally(self.byes, r)?)),
            Some(Extra::LegByes(r)) => Some(Extra::LegByes(checked_tally(self.leg_byes, r)?)),
            Some(Extra::NoBalls(r)) => Some(Extra::NoBalls(checked_tally(self.no_balls, r)?)),
            Some(Extra::Wides(r)) => Some(Extra::Wides(checked_tally(self.wides, r)?)),
            None => None,
        };

        // Nothing can fail past this point
        self.batters.insert(striker_id, batter);
        self.bowlers.insert(bowler_id, bowler);
        match extra {
            Some(Extra::Byes(total)) => self.byes = total,
            Some(Extra::LegByes(total)) => self.leg_byes = total,
            Some(Extra::NoBalls(total)) => self.no_balls = total,
            Some(Extra::Wides(total)) => self.wides = total,
            None => {}
        }

        if delivery.rotates_strike() {
            self.swap_strike();
        }

        Ok(())
    }

    /// Exchange the striker and non-striker.
    pub fn swap_strike(&mut self) {
        std::mem::swap(&mut self.batter_on_strike, &mut self.batter_off_strike);
    }

    /// Exchange the bowling ends.
    pub fn swap_bowlers(&mut self) {
        std::mem::swap(&mut self.bowler_current, &mut self.bowler_previous);
    }

    /// End-of-over rotation: batters change ends and bowlers alternate.
    pub fn end_over(&mut self) {
        self.swap_strike();
        self.swap_bowlers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::delivery::RunType;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    fn make_inning() -> Inning {
        let mut inning = Inning::new(Some(20));
        inning.set_batters(id("a"), id("b"));
        inning.set_bowlers(id("x"), Some(id("y")));
        inning
    }

    #[test]
    fn test_inning_new() {
        let inning = Inning::new(None);
        assert_eq!(inning.extras(), 0);
        assert_eq!(inning.total(), 0);
        assert!(inning.batter_on_strike.is_none());
        assert!(inning.batting_order().is_empty());
    }

    #[test]
    fn test_add_batter_is_idempotent() {
        let mut inning = Inning::new(None);
        inning.add_batter(id("a")).runs = 12;
        inning.add_batter(id("b"));
        inning.add_batter(id("a"));

        assert_eq!(inning.batting_order(), &[id("a"), id("b")]);
        assert_eq!(inning.batter(&id("a")).unwrap().runs, 12);
    }

    #[test]
    fn test_record_delivery_single() {
        let mut inning = make_inning();
        inning.record_delivery(&Delivery::legal(1), true).unwrap();

        let a = inning.batter(&id("a")).unwrap();
        assert_eq!((a.runs, a.balls_faced), (1, 1));
        let x = inning.bowler(&id("x")).unwrap();
        assert_eq!((x.balls, x.runs), (1, 1));
        assert_eq!(inning.batter_on_strike, Some(id("b")));
        assert_eq!(inning.batter_off_strike, Some(id("a")));
        assert_eq!(inning.extras(), 0);
    }

    #[test]
    fn test_record_delivery_without_striker_is_rejected() {
        let mut inning = Inning::new(None);
        inning.set_bowlers(id("x"), None);
        let err = inning.record_delivery(&Delivery::legal(2), true).unwrap_err();
        assert!(matches!(err, MatchError::NoStriker));
        assert_eq!(inning.bowler(&id("x")).unwrap(), &Bowler::new());
    }

    #[test]
    fn test_record_delivery_unknown_bowler_leaves_batter_untouched() {
        let mut inning = make_inning();
        inning.bowler_current = Some(id("ghost"));
        let before = inning.clone();

        let err = inning.record_delivery(&Delivery::four(), true).unwrap_err();
        assert!(matches!(err, MatchError::UnknownBowler(ref p) if p == &id("ghost")));
        assert_eq!(inning, before);
    }

    #[test]
    fn test_record_delivery_striker_without_figures_is_rejected() {
        let mut inning = make_inning();
        inning.batter_on_strike = Some(id("ghost"));
        let before = inning.clone();

        let err = inning.record_delivery(&Delivery::legal(1), true).unwrap_err();
        assert!(matches!(err, MatchError::UnknownBatter(ref p) if p == &id("ghost")));
        assert_eq!(inning, before);
    }

    #[test]
    fn test_record_delivery_overflowing_no_ball_leaves_inning_untouched() {
        let mut inning = make_inning();
        let before = inning.clone();

        let d = Delivery::new(BallType::NoBall, false, RunType::Bat, u32::MAX);
        let err = inning.record_delivery(&d, true).unwrap_err();
        assert!(matches!(err, MatchError::RunsOverflow));
        assert_eq!(inning, before);
    }

    #[test]
    fn test_record_delivery_overflowing_tally_leaves_inning_untouched() {
        let mut inning = make_inning();
        inning.bowler_mut(&id("x")).unwrap().runs = u32::MAX - 2;
        let before = inning.clone();

        // Striker can take the runs, the bowler's figures cannot
        let err = inning.record_delivery(&Delivery::four(), true).unwrap_err();
        assert!(matches!(err, MatchError::RunsOverflow));
        assert_eq!(inning, before);
    }

    #[test]
    fn test_wide_off_bat_counted_by_batter_and_wides() {
        let mut inning = make_inning();
        let d = Delivery::new(BallType::Wide, false, RunType::Bat, 1);
        inning.record_delivery(&d, false).unwrap();

        assert_eq!(inning.batter(&id("a")).unwrap().runs, 1);
        assert_eq!(inning.wides, 2);
        assert_eq!(inning.bowler(&id("x")).unwrap().runs, 2);
        assert_eq!(inning.total(), 3);
        assert_eq!(inning.total(), d.total_runs());
    }

    #[test]
    fn test_no_ball_byes_extras() {
        let mut inning = make_inning();
        let d = Delivery::new(BallType::NoBall, false, RunType::Byes, 2);
        inning.record_delivery(&d, true).unwrap();

        assert_eq!(inning.no_balls, 3);
        assert_eq!(inning.bowler(&id("x")).unwrap().runs, 3);
        assert_eq!(inning.bowler(&id("x")).unwrap().no_balls, 1);
        assert_eq!(inning.bowler(&id("x")).unwrap().balls, 0);
        assert_eq!(inning.total(), 3);
    }

    #[test]
    fn test_end_over_twice_is_identity() {
        let mut inning = make_inning();
        let before = inning.clone();
        inning.end_over();
        assert_eq!(inning.batter_on_strike, Some(id("b")));
        assert_eq!(inning.bowler_current, Some(id("y")));
        inning.end_over();
        assert_eq!(inning, before);
    }

    #[test]
    fn test_orders_are_display_order() {
        let mut inning = Inning::new(None);
        for p in ["opener2", "opener1", "three", "four"] {
            inning.add_batter(id(p));
        }
        let order: Vec<&str> = inning.batters_in_order().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, vec!["opener2", "opener1", "three", "four"]);
    }

    #[test]
    fn test_wickets_and_fall_of_wickets() {
        let mut inning = make_inning();
        inning.batter_mut(&id("a")).unwrap().how_out = HowOut::Caught;
        inning.batter_mut(&id("b")).unwrap().how_out = HowOut::RetiredHurt;
        inning.record_fall_of_wicket(FallOfWicket {
            batter: id("a"),
            over: "4.3".to_string(),
            score: 27,
            wicket: 1,
        });

        assert_eq!(inning.wickets(), 1);
        assert_eq!(inning.fall_of_wickets().len(), 1);
        assert_eq!(inning.fall_of_wickets()[0].over, "4.3");
    }

    #[test]
    fn test_overs_notation() {
        assert_eq!(overs_notation(0, 6), "0");
        assert_eq!(overs_notation(20, 6), "3.2");
        assert_eq!(overs_notation(24, 6), "4");
        assert_eq!(overs_notation(9, 8), "1.1");
    }

    #[test]
    fn test_batter_and_bowler_rates() {
        let batter = Batter {
            runs: 45,
            balls_faced: 30,
            ..Batter::new()
        };
        assert_eq!(batter.strike_rate(), Some(150.0));
        assert_eq!(Batter::new().strike_rate(), None);

        let bowler = Bowler {
            balls: 24,
            runs: 30,
            ..Bowler::new()
        };
        assert_eq!(bowler.economy(6), Some(7.5));
        assert_eq!(bowler.overs(6), "4");
        assert_eq!(Bowler::new().economy(6), None);
    }

    #[test]
    fn test_how_out_wire_names() {
        let json = serde_json::to_value(HowOut::ObstructingTheField).unwrap();
        assert_eq!(json, serde_json::json!("obstructing the field"));
        let parsed: HowOut = serde_json::from_value(serde_json::json!("not out")).unwrap();
        assert_eq!(parsed, HowOut::NotOut);
    }
}
