//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{GestureResponse, HealthResponse, IntervalRequest, StatusResponse};

/// Handle POST /press - Start repeating the gesture action
pub async fn press_handler(State(state): State<Arc<AppState>>) -> Result<Json<GestureResponse>, StatusCode> {
    match state.press() {
        Ok(true) => {
            info!("Press endpoint called - hold started");
            Ok(Json(GestureResponse::active(
                "Gesture pressed".to_string(),
                state.get_timer_state(),
            )))
        }
        Ok(false) => {
            info!("Press endpoint called - hold already in flight");
            Ok(Json(GestureResponse::active(
                "Gesture already held".to_string(),
                state.get_timer_state(),
            )))
        }
        Err(e) => {
            error!("Failed to press gesture: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /release - Stop repeating the gesture action
pub async fn release_handler(State(state): State<Arc<AppState>>) -> Result<Json<GestureResponse>, StatusCode> {
    match state.release("release") {
        Ok(held) => {
            let message = match held {
                Some(_) => "Gesture released",
                None => "No gesture was held",
            };
            info!("Release endpoint called - {}", message);
            let held_ms = held.map(|held| u64::try_from(held.as_millis()).unwrap_or(u64::MAX));
            Ok(Json(
                GestureResponse::inactive(message.to_string(), state.get_timer_state())
                    .with_held_ms(held_ms),
            ))
        }
        Err(e) => {
            error!("Failed to release gesture: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /interval - Change the repeat interval for the next hold
pub async fn interval_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntervalRequest>,
) -> Result<Json<GestureResponse>, StatusCode> {
    if let Err(e) = state.set_repeat_interval(Duration::from_millis(request.ms)) {
        warn!("Rejected repeat interval {}ms: {}", request.ms, e);
        return Err(StatusCode::BAD_REQUEST);
    }

    let timer = state.get_timer_state();
    let message = format!("Repeat interval set to {}ms", request.ms);
    Ok(Json(if timer.is_active() {
        GestureResponse::active(message, timer)
    } else {
        GestureResponse::inactive(message, timer)
    }))
}

/// Handle GET /status - Get current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let ticks = state.tick_count().map_err(|e| {
        error!("Failed to read tick count: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.get_timer_state(),
        ticks,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::create_router;
    use super::*;

    fn test_app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Duration::from_millis(100),
            None,
        ));
        (Arc::clone(&state), create_router(state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test(start_paused = true)]
    async fn press_then_release() {
        let (_state, app) = test_app();

        let (status, body) = send(&app, "POST", "/press", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
        assert_eq!(body["timer"]["active"], true);

        tokio::time::sleep(Duration::from_millis(250)).await;

        let (status, body) = send(&app, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ticks"], 3);
        assert_eq!(body["last_action"], "press");

        let (status, body) = send(&app, "POST", "/release", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "inactive");
        assert_eq!(body["timer"]["active"], false);
        assert!(body["held_ms"].as_u64().unwrap() >= 250);
    }

    #[tokio::test(start_paused = true)]
    async fn double_press_keeps_single_hold() {
        let (state, app) = test_app();

        send(&app, "POST", "/press", None).await;
        let (status, body) = send(&app, "POST", "/press", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Gesture already held");
        tokio::task::yield_now().await;
        assert_eq!(state.tick_count(), Ok(1));

        state.release("release").unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn release_without_hold() {
        let (_state, app) = test_app();

        let (status, body) = send(&app, "POST", "/release", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No gesture was held");
        assert!(body.get("held_ms").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn interval_validation() {
        let (state, app) = test_app();

        let (status, _) = send(&app, "POST", "/interval", Some(r#"{"ms": 0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "POST", "/interval", Some(r#"{"ms": 250}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["repeat_interval_ms"], 250);
        assert_eq!(state.timer().repeat_interval(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_state, app) = test_app();

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
