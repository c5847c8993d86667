mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::dashboard::Dashboard;
use crate::observer::NotificationLog;

/// Shared state behind every handler.
///
/// The dashboard is a single-writer context, so requests are serialized on
/// its lock. `log` is the observer the dashboard reports to; handlers drain
/// it into their responses.
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    log: Arc<NotificationLog>,
}

pub fn create_router(dashboard: Dashboard, log: Arc<NotificationLog>) -> Router {
    // Startup messages were already traced; don't replay them to the first caller.
    log.drain();

    let state = AppState {
        dashboard: Arc::new(Mutex::new(dashboard)),
        log,
    };

    let api = Router::new()
        .route("/projects", get(handlers::list_projects))
        .route("/projects", post(handlers::create_project))
        .route("/projects/{id}", get(handlers::get_project))
        .route("/projects/{id}/open", post(handlers::open_project))
        .route("/cards", get(handlers::list_cards))
        .route("/stats", get(handlers::get_stats))
        .route("/current", get(handlers::get_current_project))
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
