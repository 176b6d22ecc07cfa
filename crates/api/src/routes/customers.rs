//! Customer routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};
use invoicer_db::{
    CustomerRepository,
    repositories::{CustomerField, FilteredCustomer},
};

/// Creates the customer routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/customers", get(list_customers))
        .route("/dashboard/customers/table", get(customer_table))
}

/// Query parameters for the customer table.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerTableQuery {
    /// Search text matched against name and email.
    #[serde(default)]
    pub query: String,
}

/// GET /dashboard/customers
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<CustomerField>>, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    Ok(Json(repo.fetch_customers().await?))
}

/// GET /dashboard/customers/table?query=
async fn customer_table(
    State(state): State<AppState>,
    Query(params): Query<CustomerTableQuery>,
) -> Result<Json<Vec<FilteredCustomer>>, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    Ok(Json(repo.fetch_filtered_customers(&params.query).await?))
}
