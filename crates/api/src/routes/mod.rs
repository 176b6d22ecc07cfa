//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;

/// Creates the API router. Everything under `/dashboard` requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(dashboard::routes())
        .merge(invoices::routes())
        .merge(customers::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{Router, body::Body, http::Request};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use uuid::Uuid;

    use invoicer_shared::{JwtConfig, JwtService};

    use crate::{AppState, cache::ListingCache, create_router};

    /// State with no database behind it; only routes that fail before a query work.
    pub fn state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            listing_cache: ListingCache::new(10, 60),
        }
    }

    pub fn app() -> (Router, AppState) {
        let state = state();
        (create_router(state.clone()), state)
    }

    pub fn bearer(state: &AppState) -> String {
        let token = state
            .jwt_service
            .generate_access_token(Uuid::new_v4(), "user@nextmail.com")
            .unwrap();
        format!("Bearer {token}")
    }

    pub fn authed(state: &AppState, method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", bearer(state))
    }

    pub fn form_request(state: &AppState, uri: &str, body: &str) -> Request<Body> {
        authed(state, "POST", uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
