//! HTTP surface for the habit service.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use habit_core::{HabitError, HabitId, HabitService, HabitView};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub type AppState = Arc<HabitService>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/habits", get(list_habits).post(create_habit))
        .route(
            "/api/habits/{id}",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
        .route("/api/habits/{id}/toggle", post(toggle_habit))
        .route("/api/reset", post(reset))
        .fallback(route_not_found)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    info!(method = %request.method(), path = %request.uri().path(), "request");
    next.run(request).await
}

/// Error body shared by every failing endpoint.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Habit not found",
        }
    }
}

impl From<HabitError> for ApiError {
    fn from(err: HabitError) -> Self {
        match err {
            HabitError::NotFound(_) | HabitError::InvalidId { .. } => Self::not_found(),
            HabitError::EmptyName => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Name is required",
            },
            HabitError::InvalidDate { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid date, expected YYYY-MM-DD",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct HabitPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TogglePayload {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

fn parse_id(raw: &str) -> ApiResult<HabitId> {
    raw.parse::<HabitId>().map_err(ApiError::from)
}

/// Decode a JSON body; an empty body yields the payload's defaults.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        warn!(%err, "malformed request body");
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "Malformed request body",
        }
    })
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn list_habits(State(service): State<AppState>) -> Json<Vec<HabitView>> {
    Json(service.snapshot().habits)
}

async fn get_habit(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HabitView>> {
    let habit = service.get(parse_id(&id)?)?;
    Ok(Json(habit.view()))
}

async fn create_habit(
    State(service): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<HabitView>)> {
    let payload: HabitPayload = parse_body(&body)?;
    let habit = service.create(
        payload.name.as_deref().unwrap_or_default(),
        payload.description.as_deref(),
    )?;
    Ok((StatusCode::CREATED, Json(habit.view())))
}

async fn update_habit(
    State(service): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<HabitView>> {
    let payload: HabitPayload = parse_body(&body)?;
    let name = payload.name.as_deref().unwrap_or_default();
    // Validation runs before lookup, so a blank name is a 400 even for unknown ids.
    if name.trim().is_empty() {
        return Err(HabitError::EmptyName.into());
    }
    let habit = service.update(parse_id(&id)?, name, payload.description.as_deref())?;
    Ok(Json(habit.view()))
}

async fn delete_habit(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.delete(parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The body is optional; without one the toggle applies to today.
async fn toggle_habit(
    State(service): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<HabitView>> {
    let id = parse_id(&id)?;
    let date = parse_body::<TogglePayload>(&body)?.date;
    let habit = service.toggle_str(id, date.as_deref()).inspect_err(|err| {
        if matches!(err, HabitError::InvalidDate { .. }) {
            warn!(%id, %err, "rejected toggle");
        }
    })?;
    Ok(Json(habit.view()))
}

async fn reset(State(service): State<AppState>) -> Json<MessageResponse> {
    service.reset();
    Json(MessageResponse {
        message: "Database reset successfully",
    })
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use habit_core::{BadgeTier, FixedClock};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 7).unwrap()
    }

    fn state(seed: bool) -> AppState {
        Arc::new(
            HabitService::builder()
                .with_clock(Arc::new(FixedClock::new(today())))
                .seed_demo_data(seed)
                .build(),
        )
    }

    fn payload(name: &str) -> Bytes {
        Bytes::from(json!({ "name": name }).to_string())
    }

    #[tokio::test]
    async fn lists_seeded_habits_with_badges() {
        let Json(habits) = list_habits(State(state(true))).await;
        assert_eq!(habits.len(), 4);
        assert_eq!(habits[2].record.name, "Meditation");
        assert_eq!(habits[2].badge, Some(BadgeTier::Golden));
    }

    #[tokio::test]
    async fn create_then_toggle_today() {
        let state = state(false);
        let (status, Json(created)) = create_habit(State(state.clone()), payload("Floss"))
            .await
            .expect("created");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.record.streak, 0);

        let Json(toggled) = toggle_habit(
            State(state.clone()),
            Path(created.record.id.to_string()),
            Bytes::new(),
        )
        .await
        .expect("toggled");
        assert_eq!(toggled.record.completed_dates, vec![today()]);
        assert_eq!(toggled.record.streak, 1);
    }

    #[tokio::test]
    async fn toggle_accepts_explicit_dates_and_rejects_bad_ones() {
        let state = state(false);
        let id = state.create("Walk", None).expect("create").id().to_string();

        let body = Bytes::from_static(br#"{"date":"2025-11-06"}"#);
        let Json(view) = toggle_habit(State(state.clone()), Path(id.clone()), body)
            .await
            .expect("toggled");
        assert_eq!(view.record.streak, 1);

        let body = Bytes::from_static(br#"{}"#);
        let Json(view) = toggle_habit(State(state.clone()), Path(id.clone()), body)
            .await
            .expect("toggled today");
        assert_eq!(view.record.streak, 2);

        for bad in [&br#"{"date":"06/11/2025"}"#[..], &b"not json"[..]] {
            let err = toggle_habit(State(state.clone()), Path(id.clone()), Bytes::from(bad))
                .await
                .expect_err("bad body");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let state = state(true);
        let err = create_habit(State(state.clone()), payload("  "))
            .await
            .expect_err("blank name");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Name is required");

        let err = update_habit(State(state), Path("1".into()), Bytes::new())
            .await
            .expect_err("missing name");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_bodies_get_a_json_error() {
        let state = state(true);
        for body in [&b"{not json"[..], &br#"{"name": 5}"#[..]] {
            let err = create_habit(State(state.clone()), Bytes::from(body))
                .await
                .expect_err("malformed create");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "Malformed request body");

            let err = update_habit(State(state.clone()), Path("1".into()), Bytes::from(body))
                .await
                .expect_err("malformed update");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);

            let response = err.into_response();
            let content_type = response
                .headers()
                .get(axum::http::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok());
            assert_eq!(content_type, Some("application/json"));
        }
        let err = create_habit(State(state), Bytes::new())
            .await
            .expect_err("empty create");
        assert_eq!(err.message, "Name is required");
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let state = state(true);
        for id in ["99", "abc"] {
            let err = get_habit(State(state.clone()), Path(id.into()))
                .await
                .expect_err("missing");
            assert_eq!(err.status, StatusCode::NOT_FOUND);
            let err = delete_habit(State(state.clone()), Path(id.into()))
                .await
                .expect_err("missing");
            assert_eq!(err.status, StatusCode::NOT_FOUND);
            let err = toggle_habit(State(state.clone()), Path(id.into()), Bytes::new())
                .await
                .expect_err("missing");
            assert_eq!(err.status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn update_delete_and_reset() {
        let state = state(true);
        let Json(updated) = update_habit(
            State(state.clone()),
            Path("4".into()),
            Bytes::from(
                json!({ "name": "Drink more water", "description": "Ten glasses" }).to_string(),
            ),
        )
        .await
        .expect("updated");
        assert_eq!(updated.record.name, "Drink more water");
        assert_eq!(updated.record.streak, 0);

        let status = delete_habit(State(state.clone()), Path("1".into()))
            .await
            .expect("deleted");
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.list().len(), 3);

        let Json(message) = reset(State(state.clone())).await;
        assert_eq!(message.message, "Database reset successfully");
        assert_eq!(state.list().len(), 4);
        let water = state.get(HabitId::new(4)).expect("reseeded");
        assert_eq!(water.name(), "Drink Water");
    }
}
