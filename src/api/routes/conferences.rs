use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::WeightedCredit;

#[derive(Debug, Serialize)]
pub struct ConferencesResponse {
    pub season: i32,
    pub conferences: Vec<String>,
}

pub async fn list_conferences(State(state): State<AppState>) -> Json<ConferencesResponse> {
    Json(ConferencesResponse {
        season: state.season,
        conferences: calculate::list_conferences(&state.games),
    })
}

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    /// Include per-team win records
    pub details: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub season: i32,
    pub conference: String,
    pub games_considered: usize,
    pub undecided_games: usize,
    pub rankings: Vec<WeightedCredit>,
}

pub async fn conference_rankings(
    State(state): State<AppState>,
    Path(conference): Path<String>,
    Query(params): Query<RankingParams>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let conference = conference.trim();
    if conference.is_empty() {
        return Err(ApiError::BadRequest("conference name is empty".to_string()));
    }

    let report = calculate::analyze_report(&state.games, conference);
    debug!(
        "Served {} rankings for {}",
        report.rankings.len(),
        report.conference
    );

    let rankings = if params.details.unwrap_or(false) {
        report.rankings
    } else {
        report
            .rankings
            .into_iter()
            .map(WeightedCredit::without_details)
            .collect()
    };

    Ok(Json(RankingsResponse {
        season: state.season,
        conference: report.conference,
        games_considered: report.games_considered,
        undecided_games: report.undecided_games,
        rankings,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::ServerConfig;
    use crate::models::GameRecord;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn setup_app() -> axum::Router {
        let games = vec![
            GameRecord::conference_result("Big Ten", "A", "B", 45, 10, "2024-10-05T19:30:00.000Z"),
            GameRecord::conference_result("Big Ten", "B", "C", 20, 17, "2024-10-12T19:30:00.000Z"),
            GameRecord::conference_result("Big Ten", "A", "C", 30, 0, "2024-10-19T19:30:00.000Z"),
            GameRecord::conference_result("SEC", "D", "E", 21, 14, "2024-10-19T19:30:00.000Z"),
        ];
        build_router(AppState::new(games, 2024), &ServerConfig::default())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(setup_app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["games"], 4);
        assert_eq!(json["season"], 2024);
    }

    #[tokio::test]
    async fn test_list_conferences() {
        let (status, json) = get_json(setup_app(), "/api/conferences").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["conferences"], serde_json::json!(["Big Ten", "SEC"]));
    }

    #[tokio::test]
    async fn test_rankings() {
        let (status, json) = get_json(setup_app(), "/api/conferences/Big%20Ten/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["conference"], "Big Ten");
        assert_eq!(json["games_considered"], 3);

        let rankings = json["rankings"].as_array().unwrap();
        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0]["team"], "A");
        assert_eq!(rankings[0]["total_credit"], 4.5);
        assert_eq!(rankings[0]["dominance_ranking"], 100.0);
        assert_eq!(rankings[2]["team"], "C");
        assert!(rankings[0].get("details").is_none());
    }

    #[tokio::test]
    async fn test_rankings_with_details() {
        let (status, json) =
            get_json(setup_app(), "/api/conferences/Big%20Ten/rankings?details=true").await;

        assert_eq!(status, StatusCode::OK);
        let details = &json["rankings"][0]["details"];
        assert_eq!(details["wins"], 2);
        assert_eq!(details["defeated"], serde_json::json!(["B", "C"]));
        assert_eq!(details["games"][0]["score"], "45-10");
    }

    #[tokio::test]
    async fn test_defeated_in_first_win_order() {
        let games = vec![
            GameRecord::conference_result("ACC", "A", "Z", 14, 3, "2024-09-07T16:00:00.000Z"),
            GameRecord::conference_result("ACC", "A", "M", 21, 17, "2024-09-14T16:00:00.000Z"),
        ];
        let app = build_router(AppState::new(games, 2024), &ServerConfig::default());

        let (status, json) = get_json(app, "/api/conferences/ACC/rankings?details=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rankings"][0]["team"], "A");
        assert_eq!(json["rankings"][0]["details"]["defeated"], serde_json::json!(["Z", "M"]));
    }

    #[tokio::test]
    async fn test_rankings_unknown_conference() {
        let (status, json) = get_json(setup_app(), "/api/conferences/Pac-12/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rankings"], serde_json::json!([]));
        assert_eq!(json["games_considered"], 0);
    }

    #[tokio::test]
    async fn test_rankings_blank_conference() {
        let (status, json) = get_json(setup_app(), "/api/conferences/%20/rankings").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, json) = get_json(setup_app(), "/api/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
