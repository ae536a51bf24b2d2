// Sales Insights - REST API with Axum
// Thin HTTP layer: parse `month`, ask the composer, serialize the answer

use crate::error::AnalyticsError;
use crate::month::MonthOfYear;
use crate::report::{
    BarChartData, CombinedReport, MonthTransactions, PieChartData, ReportComposer,
    TotalNotSoldItems, TotalSaleAmount, TotalSoldItems,
};
use crate::store::TransactionStore;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TransactionStore>,
}

impl AppState {
    pub fn new(store: Arc<TransactionStore>) -> Self {
        AppState { store }
    }
}

/// Raw query pairs, so every malformed `?month=` ends up as our own error body
type MonthQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// The single `month` value; a repeated `month` is ambiguous and rejected
fn requested_month(query: MonthQuery) -> Result<MonthOfYear, AnalyticsError> {
    let Query(pairs) = query.map_err(|rejection| AnalyticsError::InvalidMonth(rejection.body_text()))?;

    let values: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| key == "month")
        .map(|(_, value)| value)
        .collect();

    match values.as_slice() {
        [] => Err(AnalyticsError::MissingMonth),
        [single] => single.parse(),
        many => Err(AnalyticsError::InvalidMonth(many.join(","))),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Query failure rendered as `{ success: false, error }`
#[derive(Debug)]
pub struct ApiError(AnalyticsError);

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AnalyticsError::UninitializedStore => StatusCode::SERVICE_UNAVAILABLE,
            AnalyticsError::MissingMonth | AnalyticsError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
        };
        warn!(status = status.as_u16(), error = %self.0, "query rejected");

        let body = ErrorBody {
            success: false,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ============================================================================
// API Handlers
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    loaded: bool,
    records: usize,
}

/// GET /api/health
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        loaded: state.store.is_loaded(),
        records: state.store.len(),
    })
}

/// GET /api/total-sale-amount?month=N
async fn total_sale_amount(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<TotalSaleAmount> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).total_sale_amount(month)?))
}

/// GET /api/total-sold-items?month=N
async fn total_sold_items(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<TotalSoldItems> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).total_sold_items(month)?))
}

/// GET /api/total-not-sold-items?month=N
async fn total_not_sold_items(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<TotalNotSoldItems> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).total_not_sold_items(month)?))
}

/// GET /api/bar-chart-data?month=N
async fn bar_chart_data(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<BarChartData> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).bar_chart(month)?))
}

/// GET /api/pie-chart-data?month=N
async fn pie_chart_data(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<PieChartData> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).pie_chart(month)?))
}

/// GET /api/combined-data?month=N
async fn combined_data(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<CombinedReport> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).compose(month)?))
}

/// GET /api/transactions?month=N
async fn month_transactions(
    State(state): State<AppState>,
    query: MonthQuery,
) -> ApiResult<MonthTransactions> {
    let month = requested_month(query)?;
    Ok(Json(ReportComposer::new(&state.store).transactions(month)?))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/total-sale-amount", get(total_sale_amount))
        .route("/total-sold-items", get(total_sold_items))
        .route("/total-not-sold-items", get(total_not_sold_items))
        .route("/bar-chart-data", get(bar_chart_data))
        .route("/pie-chart-data", get(pie_chart_data))
        .route("/combined-data", get(combined_data))
        .route("/transactions", get(month_transactions))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
