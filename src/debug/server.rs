//! Debug dashboard server.
//!
//! Serves a browser view of the network log over HTTP and streams log events
//! over a WebSocket.

use std::net::SocketAddr;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use super::context::NetworkDebug;
use super::html::DASHBOARD_HTML;
use super::viewer::build_export;

/// Default dashboard port.
pub const DEFAULT_DASHBOARD_PORT: u16 = 3031;

#[derive(Debug, Serialize)]
struct DebugFlag {
    enabled: bool,
}

/// Build the dashboard router over a network debug context.
pub fn dashboard_router(ctx: NetworkDebug) -> Router {
    // Open CORS for local tooling
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/ws", get(websocket_handler))
        .route("/logs", get(logs_handler).delete(clear_handler))
        .route("/logs/export", get(export_handler))
        .route("/debug", get(debug_flag_handler))
        .route("/debug/toggle", post(toggle_handler))
        .layer(cors)
        .with_state(ctx)
}

/// Start the dashboard on localhost at `port`.
pub async fn start_dashboard(
    port: u16,
    ctx: NetworkDebug,
) -> color_eyre::Result<(JoinHandle<()>, SocketAddr)> {
    start_dashboard_on(SocketAddr::from(([127, 0, 0, 1], port)), ctx).await
}

/// Start the dashboard on a specific address.
///
/// Binding port 0 picks a free port; the bound address is returned.
pub async fn start_dashboard_on(
    addr: SocketAddr,
    ctx: NetworkDebug,
) -> color_eyre::Result<(JoinHandle<()>, SocketAddr)> {
    let app = dashboard_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Debug dashboard listening on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Debug dashboard error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

async fn dashboard_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

async fn logs_handler(State(ctx): State<NetworkDebug>) -> impl IntoResponse {
    Json(ctx.log.snapshot())
}

async fn clear_handler(State(ctx): State<NetworkDebug>) -> impl IntoResponse {
    ctx.log.clear();
    StatusCode::NO_CONTENT
}

async fn export_handler(State(ctx): State<NetworkDebug>) -> Response {
    match build_export(&ctx.log.snapshot()) {
        Ok(document) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.filename),
                ),
            ],
            document.contents,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Failed to export network log: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn debug_flag_handler(State(ctx): State<NetworkDebug>) -> impl IntoResponse {
    Json(DebugFlag {
        enabled: ctx.state.is_enabled(),
    })
}

async fn toggle_handler(State(ctx): State<NetworkDebug>) -> impl IntoResponse {
    Json(DebugFlag {
        enabled: ctx.state.toggle(),
    })
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(ctx): State<NetworkDebug>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, ctx))
}

/// Forward log events to one WebSocket client until either side closes.
async fn handle_websocket(socket: WebSocket, ctx: NetworkDebug) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = ctx.log.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to serialize log event: {}", e);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // The page reloads /logs when it sees this
                    tracing::warn!("Dashboard client lagged, missed {} events", n);
                    let notice = serde_json::json!({ "type": "lagged", "missed": n });
                    if sender.send(Message::Text(notice.to_string())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
}
