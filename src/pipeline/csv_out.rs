use std::path::Path;

use crate::common::error::Result;
use crate::domain::NormalizedSchedule;

/// Column order matches the normalized schema; absent values render as empty
/// cells so downstream loaders see missing, not zero.
const HEADER: [&str; 10] = [
    "season",
    "week",
    "game_date",
    "kickoff_et",
    "away_team",
    "home_team",
    "away_pts",
    "home_pts",
    "ot",
    "game_id",
];

pub fn write_csv<P: AsRef<Path>>(schedule: &NormalizedSchedule, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for game in &schedule.games {
        writer.write_record([
            game.season.to_string(),
            game.week.to_string(),
            game.game_date.format("%Y-%m-%d").to_string(),
            game.kickoff_et
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            game.away_team.clone(),
            game.home_team.clone(),
            game.away_pts.map(|p| p.to_string()).unwrap_or_default(),
            game.home_pts.map(|p| p.to_string()).unwrap_or_default(),
            game.ot.to_string(),
            game.game_id.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
