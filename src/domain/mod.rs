use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How home/away orientation was decided for a normalized batch.
///
/// The schedule page usually carries an at-marker column that says, row by row,
/// whether the "Winner/tie" competitor played on the road. Some renderings of
/// the page drop that column entirely; we then fall back to assuming the loser
/// was away, which is wrong for ties and reordered layouts. The flag makes the
/// lossy path observable instead of silently guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Derived per row from the at-marker column.
    Marker,
    /// No marker column in the source; assumed loser-away, winner-home.
    LoserAwayFallback,
}

/// One regular-season game, fully typed.
///
/// `away_pts`/`home_pts` are `None` until the game has been played; they are
/// always both present or both absent. `game_id` is unique within a
/// (season, week) batch and deterministic given the matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGame {
    pub season: i32,
    pub week: u32,
    pub game_date: NaiveDate,
    pub kickoff_et: Option<NaiveTime>,
    pub away_team: String,
    pub home_team: String,
    pub away_pts: Option<f64>,
    pub home_pts: Option<f64>,
    pub ot: bool,
    pub game_id: String,
}

/// A normalized season batch: games sorted by (week, home_team, away_team).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSchedule {
    pub season: i32,
    pub orientation: Orientation,
    pub games: Vec<NormalizedGame>,
}

/// One final score from the ESPN scoreboard API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardGame {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i64,
    pub away_score: i64,
}
