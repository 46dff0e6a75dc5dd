// websocket chat server - one socket per client, one reply per frame

use axum::{
    Json, Router,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{Db, Error, Gemini, session};

struct AppState {
    gemini: Gemini,
    db: Db,
}

// caller identity rides in on the upgrade request; order-scoped queries
// are impossible without it
#[derive(Deserialize)]
struct WsParams {
    user_id: Option<i64>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub struct Server;

impl Server {
    pub async fn run(
        db_url: &str,
        api_key: Option<String>,
        host: &str,
        port: u16,
    ) -> Result<(), Error> {
        let db = Db::connect(db_url).await?;
        info!(dialect = db.dialect_name(), "connected to database");

        let gemini = Gemini::new(api_key)?;

        let state = Arc::new(AppState { gemini, db });

        let app = Router::new()
            .route("/health", get(health))
            .route("/ws", get(ws_upgrade))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("{host}:{port}");
        info!("chat server running at ws://{addr}/ws");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| chat(socket, state, params.user_id))
}

async fn chat(mut socket: WebSocket, state: Arc<AppState>, user_id: Option<i64>) {
    info!(?user_id, "chat session opened");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(_) => break,
        };

        match msg {
            Message::Text(text) => {
                let reply =
                    session::handle_message(&state.gemini, &state.db, user_id, text.as_str())
                        .await;

                if socket.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            // pings are answered by axum itself
            _ => {}
        }
    }

    info!(?user_id, "chat session closed");
}
