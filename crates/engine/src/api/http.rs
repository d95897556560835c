//! HTTP routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use gamecraft_domain::SessionId;
use gamecraft_shared::{
    ChatRequest, ChatResponse, GamesResponse, SessionView, UndoRequest, UndoResponse,
};

use super::ApiError;
use crate::app::App;
use crate::use_cases::conversation::{MessageHandled, UndoApplied};
use crate::use_cases::session::SessionDetails;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/undo", post(undo))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/reset", post(reset_session))
        .route("/api/games", get(list_games))
}

async fn health() -> &'static str {
    "OK"
}

fn session_id(raw: String) -> Result<SessionId, ApiError> {
    Ok(SessionId::new(raw)?)
}

// =============================================================================
// Conversation
// =============================================================================

async fn chat(
    State(app): State<Arc<App>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let id = session_id(request.session_id)?;
    let handled = app
        .use_cases
        .conversation
        .handle_message
        .execute(&id, &request.message)
        .await?;
    Ok(Json(chat_response(handled)))
}

fn chat_response(handled: MessageHandled) -> ChatResponse {
    let game_ready = handled.game_ready();
    ChatResponse {
        message: handled.reply,
        state: handled.state,
        intent: handled.intent,
        spec: Arc::unwrap_or_clone(handled.spec),
        suggestions: handled.suggestions,
        can_undo: handled.can_undo,
        game_ready,
        project_path: handled
            .project
            .map(|project| project.path.display().to_string()),
    }
}

async fn undo(
    State(app): State<Arc<App>>,
    Json(request): Json<UndoRequest>,
) -> Result<Json<UndoResponse>, ApiError> {
    let id = session_id(request.session_id)?;
    let applied = app.use_cases.conversation.handle_undo.execute(&id).await?;
    Ok(Json(undo_response(applied)))
}

fn undo_response(applied: UndoApplied) -> UndoResponse {
    UndoResponse {
        message: applied.reply,
        undone: applied.undone,
        state: applied.state,
        spec: Arc::unwrap_or_clone(applied.spec),
        suggestions: applied.suggestions,
        can_undo: applied.can_undo,
    }
}

// =============================================================================
// Sessions
// =============================================================================

async fn get_session(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let id = session_id(id)?;
    let details = app.use_cases.session.get.execute(&id).await?;
    Ok(Json(session_view(details)))
}

async fn reset_session(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let id = session_id(id)?;
    let details = app.use_cases.session.reset.execute(&id).await?;
    Ok(Json(session_view(details)))
}

fn session_view(details: SessionDetails) -> SessionView {
    SessionView {
        session_id: details.session_id.into_inner(),
        state: details.state,
        spec: Arc::unwrap_or_clone(details.spec),
        suggestions: details.suggestions,
        can_undo: details.can_undo,
        history: details.history,
        help: details.help,
    }
}

// =============================================================================
// Projects
// =============================================================================

async fn list_games(State(app): State<Arc<App>>) -> Result<Json<GamesResponse>, ApiError> {
    let games = app.use_cases.games.list.execute().await?;
    Ok(Json(GamesResponse { games }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::extraction::RuleBasedExtractor;
    use crate::infrastructure::generator::FsProjectGenerator;
    use crate::infrastructure::session_store::InMemorySessionStore;
    use crate::infrastructure::templates::TemplateRenderer;
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use gamecraft_domain::{ConversationState, Genre, Intent};
    use gamecraft_shared::ErrorResponse;
    use serde::de::DeserializeOwned;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn router(games_dir: &TempDir) -> Router {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()));
        let app = App::new(
            Arc::new(InMemorySessionStore::new(clock.clone())),
            Arc::new(RuleBasedExtractor::new()),
            Arc::new(TemplateRenderer::new()),
            Arc::new(FsProjectGenerator::new(games_dir.path())),
            clock,
            6,
        );
        routes().with_state(Arc::new(app))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn chat(app: &Router, message: &str) -> ChatResponse {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"session_id": "web-1", "message": message}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        read(response).await
    }

    #[tokio::test]
    async fn health_check() {
        let dir = TempDir::new().unwrap();
        let response = router(&dir).oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn chat_to_generated_game() {
        let dir = TempDir::new().unwrap();
        let app = router(&dir);

        let first = chat(&app, "I want a dark fantasy platformer with no enemies").await;
        assert_eq!(first.state, ConversationState::DetailGathering);
        assert_eq!(first.intent, Intent::DescribeGame);
        assert_eq!(first.spec.genre, Genre::Platformer);
        assert!(first.can_undo);
        assert!(!first.game_ready);

        let second = chat(&app, "ready").await;
        assert_eq!(second.state, ConversationState::Confirming);

        let third = chat(&app, "yes").await;
        assert_eq!(third.state, ConversationState::Complete);
        assert!(third.game_ready);
        let path = third.project_path.expect("project path");
        assert!(std::path::Path::new(&path).join("project.godot").is_file());

        let response = app.clone().oneshot(get("/api/games")).await.unwrap();
        let games: GamesResponse = read(response).await;
        assert_eq!(games.games, vec!["My_Game".to_string()]);
    }

    #[tokio::test]
    async fn undo_round_trip() {
        let dir = TempDir::new().unwrap();
        let app = router(&dir);

        let undo = || {
            app.clone().oneshot(post_json(
                "/api/undo",
                serde_json::json!({"session_id": "web-1"}),
            ))
        };

        let nothing: UndoResponse = read(undo().await.unwrap()).await;
        assert!(!nothing.undone);
        assert_eq!(nothing.message, "Nothing to undo.");

        chat(&app, "a racing game").await;
        let undone: UndoResponse = read(undo().await.unwrap()).await;
        assert!(undone.undone);
        assert_eq!(undone.state, ConversationState::Greeting);
        assert_eq!(undone.spec.genre, Genre::Platformer);
        assert!(!undone.can_undo);
    }

    #[tokio::test]
    async fn session_view_and_reset() {
        let dir = TempDir::new().unwrap();
        let app = router(&dir);
        chat(&app, "a racing game").await;

        let response = app.clone().oneshot(get("/api/sessions/web-1")).await.unwrap();
        let view: SessionView = read(response).await;
        assert_eq!(view.session_id, "web-1");
        assert_eq!(view.spec.genre, Genre::Racing);
        assert_eq!(view.history.len(), 2);

        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/api/sessions/web-1/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let view: SessionView = read(response).await;
        assert_eq!(view.state, ConversationState::Greeting);
        assert!(view.history.is_empty());
        assert!(view.help.contains("Getting Started"));
    }

    #[tokio::test]
    async fn blank_session_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let response = router(&dir)
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"session_id": "   ", "message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read(response).await;
        assert!(!error.error.is_empty());
    }

    #[tokio::test]
    async fn no_games_yet() {
        let dir = TempDir::new().unwrap();
        let response = router(&dir).oneshot(get("/api/games")).await.unwrap();
        let games: GamesResponse = read(response).await;
        assert!(games.games.is_empty());
    }
}
