//! ESPN scoreboard API client: a thin JSON-to-record mapper. One request per
//! date; loop over weekly dates upstream to build a season's results.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::common::error::{Result, ScraperError};
use crate::domain::ScoreboardGame;

const SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetch all NFL games ESPN lists for one date.
pub async fn fetch_scoreboard(date: NaiveDate) -> Result<Vec<ScoreboardGame>> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let resp = client
        .get(SCOREBOARD_URL)
        .query(&[("dates", date.format("%Y%m%d").to_string())])
        .header("User-Agent", "Mozilla/5.0")
        .send()
        .await?
        .error_for_status()?;
    let payload: Value = resp.json().await?;
    let games = parse_scoreboard(&payload)?;
    info!("scoreboard for {}: {} games", date, games.len());
    Ok(games)
}

/// Map the scoreboard payload to records. A payload that breaks the API
/// contract (missing competitors, sides, or scores) is an error, not a
/// degradable condition — there is no "not played yet" reading of it.
pub fn parse_scoreboard(payload: &Value) -> Result<Vec<ScoreboardGame>> {
    let events = payload
        .get("events")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut games = Vec::new();
    for event in events {
        let competition = event["competitions"]
            .get(0)
            .ok_or_else(|| ScraperError::MissingField("competitions".into()))?;
        let competitors = competition["competitors"]
            .as_array()
            .ok_or_else(|| ScraperError::MissingField("competitors".into()))?;
        let home = find_side(competitors, "home")?;
        let away = find_side(competitors, "away")?;
        let date_str = event["date"]
            .as_str()
            .ok_or_else(|| ScraperError::MissingField("event date".into()))?;

        games.push(ScoreboardGame {
            date: parse_event_date(date_str)?,
            home_team: team_abbreviation(home)?,
            away_team: team_abbreviation(away)?,
            home_score: competitor_score(home)?,
            away_score: competitor_score(away)?,
        });
    }
    Ok(games)
}

fn find_side<'a>(competitors: &'a [Value], side: &str) -> Result<&'a Value> {
    competitors
        .iter()
        .find(|c| c["homeAway"].as_str() == Some(side))
        .ok_or_else(|| ScraperError::MissingField(format!("{side} competitor")))
}

fn team_abbreviation(competitor: &Value) -> Result<String> {
    competitor["team"]["abbreviation"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScraperError::MissingField("team abbreviation".into()))
}

/// ESPN serializes scores as strings ("27"); tolerate bare numbers too.
fn competitor_score(competitor: &Value) -> Result<i64> {
    match &competitor["score"] {
        Value::String(s) => s.parse().map_err(|e| ScraperError::Api {
            message: format!("non-numeric score '{s}': {e}"),
        }),
        Value::Number(n) => n.as_i64().ok_or_else(|| ScraperError::Api {
            message: format!("non-integer score {n}"),
        }),
        _ => Err(ScraperError::MissingField("score".into())),
    }
}

/// Event timestamps come back like "2024-09-10T17:00Z" — ISO-ish but without
/// seconds, so RFC 3339 parsing alone is not enough.
fn parse_event_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .map(|dt| dt.date())
        .map_err(|e| ScraperError::Api {
            message: format!("unparseable event date '{raw}': {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "events": [{
                "date": "2024-09-10T17:00Z",
                "competitions": [{
                    "competitors": [
                        {"homeAway": "home", "score": "20", "team": {"abbreviation": "NYJ"}},
                        {"homeAway": "away", "score": "27", "team": {"abbreviation": "BUF"}}
                    ]
                }]
            }]
        })
    }

    #[test]
    fn test_parse_scoreboard() {
        let games = parse_scoreboard(&fixture()).unwrap();
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2024, 9, 10).unwrap());
        assert_eq!(game.home_team, "NYJ");
        assert_eq!(game.away_team, "BUF");
        assert_eq!(game.home_score, 20);
        assert_eq!(game.away_score, 27);
    }

    #[test]
    fn test_parse_scoreboard_empty_payload() {
        let games = parse_scoreboard(&json!({})).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn test_missing_side_is_an_error() {
        let payload = json!({
            "events": [{
                "date": "2024-09-10T17:00Z",
                "competitions": [{
                    "competitors": [
                        {"homeAway": "home", "score": "20", "team": {"abbreviation": "NYJ"}}
                    ]
                }]
            }]
        });
        let err = parse_scoreboard(&payload).unwrap_err();
        assert!(matches!(err, ScraperError::MissingField(_)));
    }

    #[test]
    fn test_rfc3339_event_date() {
        assert_eq!(
            parse_event_date("2024-09-10T17:00:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 10).unwrap()
        );
    }
}
