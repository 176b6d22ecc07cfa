//! Dashboard overview routes: revenue chart, latest invoices, summary cards.

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::ApiError};
use invoicer_db::{
    DashboardRepository, InvoiceRepository, RevenueRepository,
    repositories::{CardData, LatestInvoice, MonthlyRevenue},
};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/revenue", get(get_revenue))
        .route("/dashboard/latest-invoices", get(get_latest_invoices))
        .route("/dashboard/cards", get(get_cards))
}

/// GET /dashboard/revenue
async fn get_revenue(State(state): State<AppState>) -> Result<Json<Vec<MonthlyRevenue>>, ApiError> {
    let repo = RevenueRepository::new((*state.db).clone());
    Ok(Json(repo.fetch_revenue().await?))
}

/// GET /dashboard/latest-invoices
async fn get_latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestInvoice>>, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    Ok(Json(repo.fetch_latest_invoices().await?))
}

/// GET /dashboard/cards
async fn get_cards(State(state): State<AppState>) -> Result<Json<CardData>, ApiError> {
    let repo = DashboardRepository::new((*state.db).clone());
    Ok(Json(repo.fetch_card_data().await?))
}
