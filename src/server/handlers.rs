use std::time::Instant;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

use crate::server::models::{Features, PredictRequest, PredictResponse, Prediction, MODEL_VERSION};

/// Flat home-field edge in points, folded into the stub formula.
const HOME_FIELD_EDGE: f64 = 2.5;

/// Lightweight health endpoint to test the wire.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn predict(Json(req): Json<PredictRequest>) -> Response {
    let started = Instant::now();

    if let Err(message) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": message })),
        )
            .into_response();
    }

    let prediction = score(&req.features);
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    Json(PredictResponse {
        prediction,
        model_version: MODEL_VERSION.to_string(),
        latency_ms,
    })
    .into_response()
}

/// Placeholder scoring formula until a trained model lands: each offense
/// against the opposing defense, plus the home-field edge, squashed through a
/// logistic to get a probability. Negative diff means away-favored.
pub fn score(features: &Features) -> Prediction {
    let point_diff = (features.home_offense - features.away_defense)
        - (features.away_offense - features.home_defense)
        + HOME_FIELD_EDGE;
    let win_prob_home = 1.0 / (1.0 + (-0.25 * point_diff).exp());
    Prediction {
        point_diff,
        win_prob_home,
    }
}
