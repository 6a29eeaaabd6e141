pub mod auth;
pub mod health;
pub mod species;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user (requires auth)
///
/// /species                       list (public), create (requires auth)
/// /species/cards                 gallery cards (public)
/// /species/{id}                  get (public), update (author only)
/// /species/{id}/detail           read-only detail rows (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/species", species::router())
}
