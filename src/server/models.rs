use serde::{Deserialize, Serialize};

pub const MODEL_VERSION: &str = "0.1.0-stub";

/// The exact feature set the scoring stub expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Features {
    pub home_offense: f64,
    pub away_offense: f64,
    pub home_defense: f64,
    pub away_defense: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Home team code, e.g. "KC".
    pub home_team: String,
    /// Away team code, e.g. "BUF".
    pub away_team: String,
    pub week: u32,
    pub season: i32,
    pub features: Features,
}

impl PredictRequest {
    /// Bounds the API contract promises. The week range mirrors the schedule
    /// normalizer's regular-season window.
    pub fn validate(&self) -> Result<(), String> {
        if self.home_team.trim().len() < 2 {
            return Err("home_team must be at least 2 characters".into());
        }
        if self.away_team.trim().len() < 2 {
            return Err("away_team must be at least 2 characters".into());
        }
        if !(1..=22).contains(&self.week) {
            return Err(format!("week {} outside 1..=22", self.week));
        }
        if !(2003..=2025).contains(&self.season) {
            return Err(format!("season {} outside 2003..=2025", self.season));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted home_points - away_points.
    pub point_diff: f64,
    /// Home win probability in [0, 1].
    pub win_prob_home: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
    pub model_version: String,
    pub latency_ms: f64,
}
