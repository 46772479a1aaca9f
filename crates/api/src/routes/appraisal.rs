//! Appraisal routes.
//!
//! The input boundary of the system: accepts one appraisal snapshot as JSON,
//! rejects obviously bad figures, runs the engine, and formats the result for
//! display. All formatting and chart aggregation lives here; the engine
//! returns raw decimals only.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use weilao_core::appraisal::{AppraisalInput, AppraisalResult, CostSchedule};
use weilao_shared::AppError;

use crate::AppState;

/// Creates the appraisal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/appraisals/run", post(run_appraisal))
        .route("/appraisals/demo", get(demo_appraisal))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for one appraisal run.
///
/// All figures are pre-formatted strings so clients render them verbatim.
#[derive(Debug, Serialize)]
pub struct AppraisalResponse {
    /// Whether the owner reaches a full one-for-one exchange.
    pub one_for_one: bool,
    /// Headline ping-exchange ratio.
    pub ping_exchange: String,
    /// Floor-area schedule.
    pub areas: AreasResponse,
    /// Sellable-area breakdown.
    pub sales: SalesResponse,
    /// Construction cost schedule.
    pub costs: CostsResponse,
    /// Revenue per sale category.
    pub revenue: RevenueResponse,
    /// Owner equity outcome.
    pub equity: EquityResponse,
    /// Cost composition for the distribution chart. Five slices at most
    /// (rebuild / management / interest / design / other); zero-valued
    /// slices are filtered out.
    pub cost_composition: Vec<CostSliceResponse>,
}

/// Floor-area figures (m² except the ping total).
#[derive(Debug, Serialize)]
pub struct AreasResponse {
    /// Legal building-coverage footprint.
    pub max_build_area: String,
    /// Legal gross floor area.
    pub legal_far: String,
    /// Bonus-incentive floor area.
    pub bonus_far: String,
    /// Mechanical floor area.
    pub mech_area: String,
    /// Stairwell and fire-evacuation area.
    pub stair_area: String,
    /// Balcony area.
    pub balcony_area: String,
    /// Rooftop structure area.
    pub roof_area: String,
    /// Excavated area.
    pub excavate_area: String,
    /// Total basement floor area.
    pub basement_area: String,
    /// Total floor area in m².
    pub total_m2: String,
    /// Total floor area in ping.
    pub total_ping: String,
}

/// Sellable-area figures (ping).
#[derive(Debug, Serialize)]
pub struct SalesResponse {
    /// Basement parking area.
    pub park_area_ping: String,
    /// Number of parking spaces.
    pub total_parks: String,
    /// Ground-floor sellable area.
    pub first_floor_sale: String,
    /// Upper-floor sellable area.
    pub upper_floor_sale: String,
    /// Total sellable area.
    pub total_sale_ping: String,
    /// Sellable area over site area.
    pub land_efficiency: String,
}

/// Cost schedule figures.
#[derive(Debug, Serialize)]
pub struct CostsResponse {
    /// Reconstruction cost.
    pub rebuild_cost: String,
    /// Design fee.
    pub design_fee: String,
    /// Construction loan interest.
    pub loan_interest: String,
    /// Management overhead.
    pub full_mgmt_fee: String,
    /// Construction and sales timeline in years.
    pub loan_years: String,
    /// Total project cost.
    pub total_cost: String,
    /// Residual fee bucket.
    pub other_fees: String,
    /// Nine-item detail breakdown.
    pub breakdown: FeeBreakdownResponse,
}

/// Nine-item detail breakdown of the smaller cost lines.
#[derive(Debug, Serialize)]
pub struct FeeBreakdownResponse {
    /// Construction fund levy.
    pub fund: String,
    /// Building license fee.
    pub license_fee: String,
    /// Plan review fee.
    pub review_fee: String,
    /// Bonus-application fee.
    pub bonus_app_fee: String,
    /// Utility pipe connection fees.
    pub pipe_fee: String,
    /// Cadastral registration fees.
    pub cadastral_fee: String,
    /// Rights-related fees.
    pub rights_fees: String,
    /// Stamp tax.
    pub stamp_tax: String,
    /// Construction trust fee.
    pub trust_fee: String,
}

/// Revenue figures.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// Revenue from parking-space sales.
    pub park_revenue: String,
    /// Revenue from ground-floor sales.
    pub first_revenue: String,
    /// Revenue from upper-floor sales.
    pub upper_revenue: String,
    /// Total projected revenue.
    pub total_revenue: String,
    /// Total cost as a percentage of total revenue.
    pub common_burden_pct: String,
}

/// Owner equity figures.
#[derive(Debug, Serialize)]
pub struct EquityResponse {
    /// Parking spaces available for sale.
    pub sell_parks: String,
    /// Upper-floor ping sold.
    pub sell_upper_ping: String,
    /// Cash returned from surplus sales.
    pub cash_back: String,
    /// Upper-floor ping retained.
    pub remain_upper: String,
    /// Net indoor return area.
    pub return_indoor: String,
    /// Ping-exchange ratio.
    pub ping_exchange: String,
    /// Indoor return over total sellable area.
    pub return_ratio: String,
}

/// One slice of the cost-composition chart.
#[derive(Debug, Serialize)]
pub struct CostSliceResponse {
    /// Slice label.
    pub label: &'static str,
    /// Slice amount.
    pub amount: String,
}

/// Response for the demo scenario.
#[derive(Debug, Serialize)]
pub struct DemoResponse {
    /// The built-in demo input snapshot.
    pub input: AppraisalInput,
    /// Its computed result.
    pub result: AppraisalResponse,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats an area or monetary amount with 2 decimal places.
fn format_amount(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Formats a ratio with 4 decimal places.
fn format_ratio(value: Decimal) -> String {
    format!("{value:.4}")
}

/// Formats a percentage with 2 decimal places.
fn format_percent(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Formats a count without decimal places.
fn format_count(value: Decimal) -> String {
    format!("{value:.0}")
}

/// Builds the cost-composition chart slices, dropping zero-valued ones.
fn cost_composition(costs: &CostSchedule) -> Vec<CostSliceResponse> {
    [
        ("rebuild", costs.rebuild_cost),
        ("management", costs.full_mgmt_fee),
        ("interest", costs.loan_interest),
        ("design", costs.design_fee),
        ("other", costs.other_fees),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > Decimal::ZERO)
    .map(|(label, amount)| CostSliceResponse {
        label,
        amount: format_amount(amount),
    })
    .collect()
}

/// Formats a full appraisal result for display.
fn build_response(result: &AppraisalResult) -> AppraisalResponse {
    AppraisalResponse {
        one_for_one: result.equity.ping_exchange >= Decimal::ONE,
        ping_exchange: format_ratio(result.equity.ping_exchange),
        areas: AreasResponse {
            max_build_area: format_amount(result.areas.max_build_area),
            legal_far: format_amount(result.areas.legal_far),
            bonus_far: format_amount(result.areas.bonus_far),
            mech_area: format_amount(result.areas.mech_area),
            stair_area: format_amount(result.areas.stair_area),
            balcony_area: format_amount(result.areas.balcony_area),
            roof_area: format_amount(result.areas.roof_area),
            excavate_area: format_amount(result.areas.excavate_area),
            basement_area: format_amount(result.areas.basement_area),
            total_m2: format_amount(result.areas.total_m2),
            total_ping: format_amount(result.areas.total_ping),
        },
        sales: SalesResponse {
            park_area_ping: format_amount(result.sales.park_area_ping),
            total_parks: format_count(result.sales.total_parks),
            first_floor_sale: format_amount(result.sales.first_floor_sale),
            upper_floor_sale: format_amount(result.sales.upper_floor_sale),
            total_sale_ping: format_amount(result.sales.total_sale_ping),
            land_efficiency: format_ratio(result.sales.land_efficiency),
        },
        costs: CostsResponse {
            rebuild_cost: format_amount(result.costs.rebuild_cost),
            design_fee: format_amount(result.costs.design_fee),
            loan_interest: format_amount(result.costs.loan_interest),
            full_mgmt_fee: format_amount(result.costs.full_mgmt_fee),
            loan_years: format_percent(result.costs.loan_years),
            total_cost: format_amount(result.costs.total_cost),
            other_fees: format_amount(result.costs.other_fees),
            breakdown: FeeBreakdownResponse {
                fund: format_amount(result.costs.breakdown.fund),
                license_fee: format_amount(result.costs.breakdown.license_fee),
                review_fee: format_amount(result.costs.breakdown.review_fee),
                bonus_app_fee: format_amount(result.costs.breakdown.bonus_app_fee),
                pipe_fee: format_amount(result.costs.breakdown.pipe_fee),
                cadastral_fee: format_amount(result.costs.breakdown.cadastral_fee),
                rights_fees: format_amount(result.costs.breakdown.rights_fees),
                stamp_tax: format_amount(result.costs.breakdown.stamp_tax),
                trust_fee: format_amount(result.costs.breakdown.trust_fee),
            },
        },
        revenue: RevenueResponse {
            park_revenue: format_amount(result.revenue.park_revenue),
            first_revenue: format_amount(result.revenue.first_revenue),
            upper_revenue: format_amount(result.revenue.upper_revenue),
            total_revenue: format_amount(result.revenue.total_revenue),
            common_burden_pct: format_percent(result.revenue.common_burden_pct),
        },
        equity: EquityResponse {
            sell_parks: format_count(result.equity.sell_parks),
            sell_upper_ping: format_amount(result.equity.sell_upper_ping),
            cash_back: format_amount(result.equity.cash_back),
            remain_upper: format_amount(result.equity.remain_upper),
            return_indoor: format_amount(result.equity.return_indoor),
            ping_exchange: format_ratio(result.equity.ping_exchange),
            return_ratio: format_ratio(result.equity.return_ratio),
        },
        cost_composition: cost_composition(&result.costs),
    }
}

/// Input-boundary validation: every numeric figure must be non-negative.
///
/// The engine does not rely on this check; it applies its own sanitation
/// independently.
fn validate(input: &AppraisalInput) -> Result<(), AppError> {
    let fields = [
        ("area", input.area),
        ("road_width", input.road_width),
        ("height", input.height),
        ("bc_ratio", input.bc_ratio),
        ("far", input.far),
        ("excavate", input.excavate),
        ("mech", input.mech),
        ("stair", input.stair),
        ("balcony", input.balcony),
        ("roof", input.roof),
        ("common", input.common),
        ("park_size", input.park_size),
        ("build_cost", input.build_cost),
        ("legal_cost", input.legal_cost),
        ("plan_fee", input.plan_fee),
        ("eval_fee", input.eval_fee),
        ("boundary_fee", input.boundary_fee),
        ("drill_fee", input.drill_fee),
        ("neighbor_fee", input.neighbor_fee),
        ("park_price", input.park_price),
        ("price_1f", input.price_1f),
        ("price_2f", input.price_2f),
        ("old_ping", input.old_ping),
        ("sell_percent", input.sell_percent),
    ];

    for (name, value) in fields {
        if value < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "field '{name}' must not be negative"
            )));
        }
    }

    Ok(())
}

/// Maps an [`AppError`] to its JSON rejection response.
fn reject(error: &AppError) -> axum::response::Response {
    tracing::warn!(error = %error, "Rejected appraisal input");
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string(),
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /appraisals/run
async fn run_appraisal(
    State(state): State<AppState>,
    Json(input): Json<AppraisalInput>,
) -> impl IntoResponse {
    if let Err(error) = validate(&input) {
        return reject(&error);
    }

    let result = state.engine.run(&input);
    (StatusCode::OK, Json(build_response(&result))).into_response()
}

/// GET /appraisals/demo
async fn demo_appraisal(State(state): State<AppState>) -> Json<DemoResponse> {
    let input = AppraisalInput::demo();
    let result = state.engine.run(&input);
    Json(DemoResponse {
        result: build_response(&result),
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::create_router;

    fn app() -> Router {
        create_router(AppState::new())
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_run(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/appraisals/run")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_returns_formatted_result() {
        let body = serde_json::to_string(&AppraisalInput::demo()).unwrap();
        let response = app().oneshot(post_run(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["one_for_one"], true);
        assert_eq!(json["ping_exchange"], "8.8854");
        assert_eq!(json["areas"]["legal_far"], "1125.00");
        assert_eq!(json["sales"]["total_parks"], "22");
        assert_eq!(json["equity"]["sell_parks"], "10");
        assert_eq!(json["cost_composition"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_run_rejects_negative_fields() {
        let input = AppraisalInput {
            area: Decimal::from(-10),
            ..AppraisalInput::demo()
        };
        let body = serde_json::to_string(&input).unwrap();
        let response = app().oneshot(post_run(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_run_defaults_missing_fields_to_zero() {
        let response = app().oneshot(post_run("{}".to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["one_for_one"], false);
        assert_eq!(json["costs"]["total_cost"], "0.00");
        assert_eq!(json["cost_composition"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_demo_returns_input_and_result() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/appraisals/demo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["input"]["area"], "500");
        assert_eq!(json["result"]["areas"]["max_build_area"], "225.00");
    }

    #[tokio::test]
    async fn test_health_route_is_healthy() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "weilao");
    }
}
