//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, HourRecord, HoursQuery, SummaryResponse};

/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        config: state.config.clone(),
        summary: state.simulation.summary.clone(),
        final_charge_kwh: state.simulation.final_charge_kwh,
    })
}

/// Returns hourly records, optionally filtered by hour range.
///
/// `GET /hours` → 200 + all 24 records
/// `GET /hours?from=N&to=M` → filtered range (inclusive)
/// `GET /hours?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoursQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<HourRecord> = state
        .simulation
        .hours
        .iter()
        .filter(|r| (from..=to).contains(&r.hour))
        .map(HourRecord::from)
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sim::{DispatchConfig, HourlyProfile, simulate};

    fn make_test_state() -> Arc<AppState> {
        let config = DispatchConfig::default();
        let simulation = simulate(HourlyProfile::home().as_ref(), &config).unwrap();
        Arc::new(AppState { config, simulation })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn summary_returns_200() {
        let (status, json) = get_json("/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("config").is_some());
        assert!(json["summary"].get("saved_yen").is_some());
        assert!(json.get("final_charge_kwh").is_some());
    }

    #[tokio::test]
    async fn hours_returns_full_day() {
        let (status, json) = get_json("/hours").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(24));
    }

    #[tokio::test]
    async fn hours_range_query() {
        let (status, json) = get_json("/hours?from=5&to=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(6)); // hours 5..=10
        assert_eq!(json[0]["hour"], 5);
        assert_eq!(json[5]["time_slot"], "10:00-11:00");
    }

    #[tokio::test]
    async fn hours_invalid_range_returns_400() {
        let (status, json) = get_json("/hours?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
