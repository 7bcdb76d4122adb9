use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use tracing::debug;

use crate::common::error::{Result, ScraperError};
use crate::domain::{NormalizedGame, NormalizedSchedule, Orientation};
use crate::pipeline::raw_table::{ColumnLayout, RawTable};

/// Value of the marker cell that flags the "Winner/tie" competitor as away.
const AWAY_MARKER: &str = "@";
/// Value of the OT cell (upper-cased) that flags an overtime game.
const OVERTIME_MARKER: &str = "OT";

/// Regular-season weeks; anything outside is preseason or playoffs.
const WEEK_RANGE: std::ops::RangeInclusive<u32> = 1..=22;

/// Normalize a raw schedule table into a typed, uniquely-keyed season batch.
///
/// Pure and deterministic: no I/O, no mutation of the input, byte-identical
/// output for identical input. Row policy:
///
/// 1. keep only rows whose week label is a pure integer in 1..=22 (drops
///    repeated header rows and pre/post-season tags);
/// 2. dates are load-bearing — an unparseable date fails the whole batch;
/// 3. kickoff time, points and the OT cell degrade to absent/false instead.
///
/// Home/away comes from the at-marker column when the table has one: a marker
/// cell equal to "@" means the "Winner/tie" competitor was away. The column
/// must be consulted per row; the winner/loser columns alone say nothing about
/// venue. Tables without any marker column fall back to loser-away, which is
/// documented as lossy via [`Orientation::LoserAwayFallback`].
pub fn normalize(table: &RawTable, season: i32) -> Result<NormalizedSchedule> {
    let layout = ColumnLayout::resolve(table)?;
    let orientation = if layout.at_marker.is_some() {
        Orientation::Marker
    } else {
        Orientation::LoserAwayFallback
    };

    let week_re = Regex::new(r"^\d+$").unwrap();
    let mut games = Vec::new();

    for row in table.game_rows(&layout) {
        if !week_re.is_match(&row.week) {
            continue;
        }
        let week: u32 = match row.week.parse() {
            Ok(week) => week,
            Err(_) => continue,
        };
        if !WEEK_RANGE.contains(&week) {
            continue;
        }

        let game_date = parse_game_date(&row.date, season)?;
        let kickoff_et = parse_kickoff(row.time.as_deref());

        // Points follow the winner/loser columns until this remapping, then
        // travel with the team they belong to.
        let winner_is_away = row.at_marker.as_deref().map(str::trim) == Some(AWAY_MARKER);
        let (away_team, home_team, away_raw, home_raw) = if winner_is_away {
            (row.winner, row.loser, row.pts_winner, row.pts_loser)
        } else {
            (row.loser, row.winner, row.pts_loser, row.pts_winner)
        };

        let mut away_pts = parse_points(away_raw.as_deref());
        let mut home_pts = parse_points(home_raw.as_deref());
        // A game is either wholly scored or wholly unplayed.
        if away_pts.is_none() || home_pts.is_none() {
            away_pts = None;
            home_pts = None;
        }

        let ot = row
            .ot
            .as_deref()
            .map(|cell| cell.trim().to_uppercase() == OVERTIME_MARKER)
            .unwrap_or(false);

        let game_id = format!("{week}-{}@{}", team_slug(&away_team), team_slug(&home_team));

        games.push(NormalizedGame {
            season,
            week,
            game_date,
            kickoff_et,
            away_team,
            home_team,
            away_pts,
            home_pts,
            ot,
            game_id,
        });
    }

    games.sort_by(|a, b| {
        (a.week, a.home_team.as_str(), a.away_team.as_str())
            .cmp(&(b.week, b.home_team.as_str(), b.away_team.as_str()))
    });

    debug!(
        season,
        games = games.len(),
        ?orientation,
        "normalized schedule batch"
    );

    Ok(NormalizedSchedule {
        season,
        orientation,
        games,
    })
}

/// Identifier slug for a team name: lowercase, spaces to underscores, "&" to
/// "and". Used only inside `game_id`.
pub fn team_slug(team: &str) -> String {
    team.to_lowercase().replace(' ', "_").replace('&', "and")
}

/// The source date cell omits the year ("September 7"); append the season
/// year and parse. The season year is appended verbatim even for January
/// dates — regular-season rows keep this within the right year in practice.
fn parse_game_date(raw: &str, season: i32) -> Result<NaiveDate> {
    let value = format!("{} {}", raw.trim(), season);
    NaiveDate::parse_from_str(&value, "%B %d %Y")
        .map_err(|_| ScraperError::DateParse { value })
}

/// 12-hour kickoff like "1:00PM". Flexed and TBD slots have no parseable
/// time; those yield `None` rather than an error.
fn parse_kickoff(raw: Option<&str>) -> Option<NaiveTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(&raw.to_uppercase(), "%I:%M%p").ok()
}

fn parse_points(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const FULL_COLUMNS: &[&str] = &[
        "Week", "Day", "Date", "Time", "Winner/tie", "@", "Loser/tie", "PtsW", "PtsL", "OT",
    ];

    fn table(columns: &[&str], rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn row<'a>(
        week: &'a str,
        date: &'a str,
        time: &'a str,
        winner: &'a str,
        at: &'a str,
        loser: &'a str,
        pts_w: &'a str,
        pts_l: &'a str,
        ot: &'a str,
    ) -> Vec<&'a str> {
        vec![week, "Sun", date, time, winner, at, loser, pts_w, pts_l, ot]
    }

    #[test]
    fn test_worked_example_marker_row() {
        let table = table(
            FULL_COLUMNS,
            vec![row(
                "1",
                "September 7",
                "1:00PM",
                "Kansas City Chiefs",
                "@",
                "Baltimore Ravens",
                "27",
                "20",
                "",
            )],
        );
        let schedule = normalize(&table, 2023).unwrap();
        assert_eq!(schedule.orientation, Orientation::Marker);
        assert_eq!(schedule.games.len(), 1);

        let game = &schedule.games[0];
        assert_eq!(game.season, 2023);
        assert_eq!(game.week, 1);
        assert_eq!(game.game_date, NaiveDate::from_ymd_opt(2023, 9, 7).unwrap());
        assert_eq!(game.kickoff_et, NaiveTime::from_hms_opt(13, 0, 0));
        assert_eq!(game.away_team, "Kansas City Chiefs");
        assert_eq!(game.home_team, "Baltimore Ravens");
        assert_eq!(game.away_pts, Some(27.0));
        assert_eq!(game.home_pts, Some(20.0));
        assert!(!game.ot);
        assert_eq!(game.game_id, "1-kansas_city_chiefs@baltimore_ravens");
    }

    #[test]
    fn test_marker_absent_on_row_means_winner_home() {
        let table = table(
            FULL_COLUMNS,
            vec![row(
                "2",
                "September 14",
                "4:25PM",
                "Detroit Lions",
                "",
                "Chicago Bears",
                "31",
                "17",
                "",
            )],
        );
        let game = &normalize(&table, 2023).unwrap().games[0];
        assert_eq!(game.home_team, "Detroit Lions");
        assert_eq!(game.away_team, "Chicago Bears");
        assert_eq!(game.home_pts, Some(31.0));
        assert_eq!(game.away_pts, Some(17.0));
    }

    #[test]
    fn test_fallback_orientation_without_marker_column() {
        let table = table(
            &["Week", "Date", "Time", "Winner/tie", "Loser/tie", "PtsW", "PtsL", "OT"],
            vec![vec![
                "3",
                "September 21",
                "8:20PM",
                "Buffalo Bills",
                "Miami Dolphins",
                "24",
                "21",
                "OT",
            ]],
        );
        let schedule = normalize(&table, 2023).unwrap();
        assert_eq!(schedule.orientation, Orientation::LoserAwayFallback);

        let game = &schedule.games[0];
        assert_eq!(game.home_team, "Buffalo Bills");
        assert_eq!(game.away_team, "Miami Dolphins");
        assert_eq!(game.home_pts, Some(24.0));
        assert_eq!(game.away_pts, Some(21.0));
        assert!(game.ot);
    }

    #[test]
    fn test_week_filtering_drops_headers_and_playoffs() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("Week", "Date", "Time", "Winner/tie", "@", "Loser/tie", "PtsW", "PtsL", "OT"),
                row("1", "September 7", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("WildCard", "January 13", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("Division", "January 20", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("ConfChamp", "January 28", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("SuperBowl", "February 11", "6:30PM", "A Team", "", "B Team", "20", "10", ""),
                row("23", "February 18", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("0", "August 1", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
            ],
        );
        let schedule = normalize(&table, 2023).unwrap();
        assert_eq!(schedule.games.len(), 1);
        assert_eq!(schedule.games[0].week, 1);
    }

    #[test]
    fn test_unplayed_game_has_no_points() {
        let table = table(
            FULL_COLUMNS,
            vec![row(
                "5",
                "October 5",
                "1:00PM",
                "New York Giants",
                "@",
                "Dallas Cowboys",
                "",
                "",
                "",
            )],
        );
        let game = &normalize(&table, 2025).unwrap().games[0];
        assert_eq!(game.away_pts, None);
        assert_eq!(game.home_pts, None);
    }

    #[test]
    fn test_one_sided_points_become_absent_pair() {
        let table = table(
            FULL_COLUMNS,
            vec![row(
                "5",
                "October 5",
                "1:00PM",
                "New York Giants",
                "",
                "Dallas Cowboys",
                "21",
                "n/a",
                "",
            )],
        );
        let game = &normalize(&table, 2025).unwrap().games[0];
        assert_eq!(game.away_pts, None);
        assert_eq!(game.home_pts, None);
    }

    #[test]
    fn test_tbd_and_blank_time_yield_absent_kickoff() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("6", "October 12", "TBD", "A Team", "", "B Team", "", "", ""),
                row("6", "October 13", "", "C Team", "", "D Team", "", "", ""),
            ],
        );
        let schedule = normalize(&table, 2025).unwrap();
        assert!(schedule.games.iter().all(|g| g.kickoff_et.is_none()));
    }

    #[test]
    fn test_unparseable_date_fails_the_batch() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("1", "September 7", "1:00PM", "A Team", "", "B Team", "20", "10", ""),
                row("2", "Sometime", "1:00PM", "C Team", "", "D Team", "20", "10", ""),
            ],
        );
        let err = normalize(&table, 2023).unwrap_err();
        assert!(matches!(err, ScraperError::DateParse { .. }));
    }

    #[test]
    fn test_sorted_by_week_then_home_then_away() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("2", "September 14", "1:00PM", "Zeta FC", "", "Alpha FC", "", "", ""),
                row("1", "September 7", "1:00PM", "Beta FC", "@", "Gamma FC", "", "", ""),
                row("1", "September 7", "1:00PM", "Beta FC", "", "Gamma FC", "", "", ""),
            ],
        );
        let games = normalize(&table, 2023).unwrap().games;
        let order: Vec<(u32, &str, &str)> = games
            .iter()
            .map(|g| (g.week, g.home_team.as_str(), g.away_team.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "Beta FC", "Gamma FC"),
                (1, "Gamma FC", "Beta FC"),
                (2, "Zeta FC", "Alpha FC"),
            ]
        );
    }

    #[test]
    fn test_game_ids_unique_and_idempotent() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("1", "September 7", "1:00PM", "Kansas City Chiefs", "@", "Baltimore Ravens", "27", "20", ""),
                row("1", "September 7", "4:25PM", "Green Bay Packers", "", "Chicago Bears", "24", "10", ""),
                row("2", "September 14", "1:00PM", "Baltimore Ravens", "", "Kansas City Chiefs", "", "", ""),
            ],
        );
        let first = normalize(&table, 2023).unwrap();
        let second = normalize(&table, 2023).unwrap();
        assert_eq!(first, second);

        let ids: HashSet<&str> = first.games.iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(ids.len(), first.games.len());
    }

    #[test]
    fn test_ot_flag_is_case_insensitive() {
        let table = table(
            FULL_COLUMNS,
            vec![
                row("1", "September 7", "1:00PM", "A Team", "", "B Team", "23", "20", "ot"),
                row("1", "September 7", "1:00PM", "C Team", "", "D Team", "23", "20", ""),
            ],
        );
        let games = normalize(&table, 2023).unwrap().games;
        assert!(games.iter().any(|g| g.ot));
        assert!(games.iter().any(|g| !g.ot));
    }

    #[test]
    fn test_team_slug() {
        assert_eq!(team_slug("Kansas City Chiefs"), "kansas_city_chiefs");
        assert_eq!(team_slug("Oakland & LA Raiders"), "oakland_and_la_raiders");
    }
}
