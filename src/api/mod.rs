//! HTTP routes
//!
//! - `POST /slack/events`: Events API webhook
//! - `GET /health`: liveness

mod events;
mod health;

pub use events::{events_routes, EventsState};
pub use health::health_routes;

use axum::Router;
use std::sync::Arc;

/// Create the application router
pub fn router(state: Arc<EventsState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(events_routes(state))
}
