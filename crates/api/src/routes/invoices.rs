//! Invoice listing, edit lookup, and mutation routes.
//!
//! Mutations take `application/x-www-form-urlencoded` bodies, the same shape
//! an HTML form posts. Success answers `303 See Other` back to the listing;
//! failure answers the `{ message, errors }` state for the form to render.

use std::str::FromStr;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, cache::InvoiceListing, error::ApiError, middleware::AuthUser};
use invoicer_core::invoice::{ActionResult, FormFields, InvoiceActions};
use invoicer_db::{InvoiceRepository, repositories::InvoiceForEdit};
use invoicer_shared::types::{InvoiceId, PageRequest, generate_pagination};

/// Creates the invoice routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/dashboard/invoices/{id}",
            get(get_invoice).post(update_invoice).delete(delete_invoice),
        )
}

/// Query parameters for the invoice listing.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    /// Search text.
    #[serde(default)]
    pub query: String,
    /// Page number; anything that is not a positive integer means page 1.
    pub page: Option<String>,
}

impl InvoiceListQuery {
    fn page(&self) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(1);
        PageRequest::new(page)
    }
}

fn actions(state: &AppState) -> InvoiceActions<InvoiceRepository, crate::cache::ListingCache> {
    InvoiceActions::new(
        InvoiceRepository::new((*state.db).clone()),
        state.listing_cache.clone(),
    )
}

fn parse_id(raw: &str) -> Result<InvoiceId, ApiError> {
    InvoiceId::from_str(raw).map_err(|_| ApiError::not_found("Invoice not found."))
}

fn action_response(result: ActionResult) -> Response {
    match result {
        Ok(redirect) => Redirect::to(redirect.location).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(e.state())).into_response()
        }
    }
}

/// GET /dashboard/invoices?query=&page=
async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<InvoiceListQuery>,
) -> Result<Json<InvoiceListing>, ApiError> {
    let page = params.page();
    let current_page = page.current();
    let generation = state.listing_cache.generation();

    if let Some(listing) = state.listing_cache.get(&params.query, current_page).await {
        debug!(query = %params.query, page = current_page, "Invoice listing cache hit");
        return Ok(Json(listing));
    }

    let repo = InvoiceRepository::new((*state.db).clone());
    let invoices = repo.fetch_filtered_invoices(&params.query, page).await?;
    let total_pages = repo.fetch_invoices_pages(&params.query).await?;

    let listing = InvoiceListing {
        invoices,
        current_page,
        total_pages,
        pagination: generate_pagination(current_page, total_pages),
    };
    state
        .listing_cache
        .insert(generation, &params.query, current_page, listing.clone())
        .await;

    Ok(Json(listing))
}

/// GET /dashboard/invoices/{id}
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceForEdit>, ApiError> {
    let id = parse_id(&id)?;
    let repo = InvoiceRepository::new((*state.db).clone());

    repo.fetch_invoice_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Invoice not found."))
}

/// POST /dashboard/invoices
async fn create_invoice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Form(fields): Form<FormFields>,
) -> Response {
    debug!(user_id = %auth_user.user_id(), "Create invoice requested");
    action_response(actions(&state).create_invoice(&fields).await)
}

/// POST /dashboard/invoices/{id}
async fn update_invoice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Form(fields): Form<FormFields>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    debug!(user_id = %auth_user.user_id(), invoice_id = %id, "Update invoice requested");
    Ok(action_response(actions(&state).update_invoice(id, &fields).await))
}

/// DELETE /dashboard/invoices/{id}
async fn delete_invoice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    debug!(user_id = %auth_user.user_id(), invoice_id = %id, "Delete invoice requested");
    Ok(action_response(actions(&state).delete_invoice(id)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{app, authed, form_request, json_body};

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3"), 3)]
    #[case(Some("0"), 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("-2"), 1)]
    fn test_page_param_is_lenient(#[case] raw: Option<&str>, #[case] expected: u64) {
        let params = InvoiceListQuery {
            query: String::new(),
            page: raw.map(str::to_string),
        };
        assert_eq!(params.page().current(), expected);
    }

    #[tokio::test]
    async fn test_listing_served_from_cache() {
        let (app, state) = app();
        let cached = InvoiceListing {
            invoices: Vec::new(),
            current_page: 2,
            total_pages: 4,
            pagination: generate_pagination(2, 4),
        };
        let generation = state.listing_cache.generation();
        state.listing_cache.insert(generation, "lee", 2, cached).await;

        let response = app
            .oneshot(
                authed(&state, "GET", "/api/v1/dashboard/invoices?query=lee&page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_pages"], 4);
        assert_eq!(body["current_page"], 2);
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_returns_state() {
        let (app, state) = app();

        let response = app
            .oneshot(form_request(&state, "/api/v1/dashboard/invoices", "amount=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
        assert_eq!(body["errors"]["amount"][0], "Please enter a valid amount.");
        assert_eq!(body["errors"]["customerId"][0], "Please select a customer.");
        assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
    }

    #[tokio::test]
    async fn test_create_database_fault_returns_message() {
        let (app, state) = app();
        let body = "customerId=3958dc9e-712f-4377-85e9-fec4b6a6442a&amount=12.50&status=paid";

        let response = app
            .oneshot(form_request(&state, "/api/v1/dashboard/invoices", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Database Error: Failed to Create Invoice.");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_delete_always_fails() {
        let (app, state) = app();
        let uri = format!("/api/v1/dashboard/invoices/{}", InvoiceId::new());

        let response = app
            .oneshot(authed(&state, "DELETE", &uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "Failed to Delete Invoice");
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let (app, state) = app();

        let response = app
            .oneshot(
                authed(&state, "GET", "/api/v1/dashboard/invoices/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
