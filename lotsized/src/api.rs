//! HTTP API for the lotsize daemon.
//!
//! Provides REST endpoints for:
//! - Health check
//! - Pair catalogue and per-pair pip values
//! - Position sizing
//! - Price levels, margin and account health
//! - Full trade plan

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use lotsize_domain::{
    default_entry_price, get_currency_pairs_by_category, get_pair_info, Leverage, PairCategory,
    PairSymbol, TradeDirection,
};
use lotsize_engine::calculator::risk_amount_from_percentage;
use lotsize_engine::{
    AccountHealth, PipValueInfo, PlanError, PositionSizes, PriceLevels, RiskMode, TradePlan,
    TradePlanner, TradeRequest, ValidationInput,
};

use crate::config::Config;
use crate::error::{DaemonError, DaemonResult};

// =============================================================================
// API State
// =============================================================================

/// Shared state for API handlers.
pub struct ApiState {
    pub planner: TradePlanner,
    pub config: Config,
}

impl ApiState {
    /// Create state with a fresh planner.
    pub fn new(config: Config) -> Self {
        Self {
            planner: TradePlanner::default(),
            config,
        }
    }

    /// Pick the risk mode from whichever fields the request supplied.
    ///
    /// A fixed amount wins over a balance; a balance without a percentage
    /// uses the configured default percentage.
    fn risk_mode(
        &self,
        account_balance: Option<Decimal>,
        risk_percentage: Option<Decimal>,
        risk_amount: Option<Decimal>,
    ) -> DaemonResult<RiskMode> {
        match (risk_amount, account_balance) {
            (Some(risk_amount), _) => Ok(RiskMode::FixedAmount { risk_amount }),
            (None, Some(account_balance)) => Ok(RiskMode::Percentage {
                account_balance,
                risk_percentage: risk_percentage.unwrap_or(self.config.defaults.risk_percent),
            }),
            (None, None) => Err(DaemonError::InvalidInput(
                "Either risk_amount or account_balance is required".to_string(),
            )),
        }
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Pairs of one category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: PairCategory,
    pub pairs: Vec<String>,
}

/// Pair catalogue response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PairsResponse {
    pub categories: Vec<CategoryGroup>,
}

/// Reference data and pip values for one pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct PairDetailResponse {
    pub pair: String,
    pub category: PairCategory,
    pub decimals: u32,
    pub pip_value_per_standard_lot: Decimal,
    pub pip_values: PipValueInfo,
    pub default_entry_price: Decimal,
}

/// Request to size a position.
///
/// Send `risk_amount` for a fixed dollar risk, or `account_balance` (and
/// optionally `risk_percentage`) for percentage risk.
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionSizeRequest {
    pub pair: String,
    pub stop_loss_pips: Decimal,
    #[serde(default)]
    pub account_balance: Option<Decimal>,
    #[serde(default)]
    pub risk_percentage: Option<Decimal>,
    #[serde(default)]
    pub risk_amount: Option<Decimal>,
}

/// Position size response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionSizeResponse {
    pub pair: String,
    pub risk_amount: Decimal,
    pub position_sizes: PositionSizes,
}

/// Request for stop-loss and take-profit prices.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceLevelsRequest {
    pub pair: String,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    pub stop_loss_pips: Decimal,
    pub take_profit_pips: Decimal,
    pub direction: TradeDirection,
}

/// Request for margin required.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarginRequest {
    pub pair: String,
    pub lot_size: Decimal,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
}

/// Margin response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarginResponse {
    pub pair: String,
    pub leverage: Decimal,
    pub margin_required: Decimal,
}

/// Request for an account health check.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountHealthRequest {
    pub risk_percentage: Decimal,
}

/// Request for a full trade plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct TradePlanRequest {
    pub pair: String,
    #[serde(default)]
    pub account_balance: Option<Decimal>,
    #[serde(default)]
    pub risk_percentage: Option<Decimal>,
    #[serde(default)]
    pub risk_amount: Option<Decimal>,
    pub stop_loss_pips: Decimal,
    pub take_profit_pips: Decimal,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    pub direction: TradeDirection,
    #[serde(default)]
    pub leverage: Option<Decimal>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

// =============================================================================
// Router
// =============================================================================

/// Create the API router.
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/pairs", get(pairs_handler))
        .route("/pairs/:base/:quote", get(pair_detail_handler))
        .route("/position-size", post(position_size_handler))
        .route("/price-levels", post(price_levels_handler))
        .route("/margin", post(margin_handler))
        .route("/account-health", post(account_health_handler))
        .route("/trade-plan", post(trade_plan_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List pairs grouped by category.
async fn pairs_handler() -> Json<PairsResponse> {
    let categories = get_currency_pairs_by_category()
        .into_iter()
        .map(|(category, pairs)| CategoryGroup {
            category,
            pairs: pairs.into_iter().map(str::to_string).collect(),
        })
        .collect();

    Json(PairsResponse { categories })
}

/// Reference data for one pair.
async fn pair_detail_handler(
    State(state): State<Arc<ApiState>>,
    Path((base, quote)): Path<(String, String)>,
) -> ApiResult<PairDetailResponse> {
    let pair = resolve_pair(&format!("{}/{}", base, quote)).map_err(to_error_response)?;

    let info = get_pair_info(&pair)
        .ok_or_else(|| to_error_response(DaemonError::UnknownPair(pair.clone())))?;
    let pip_values = state
        .planner
        .calculator()
        .calculate_pip_value_info(&pair)
        .ok_or_else(|| to_error_response(PlanError::Uncomputable("pip values").into()))?;

    Ok(Json(PairDetailResponse {
        default_entry_price: default_entry_price(&pair),
        category: info.category,
        decimals: info.decimals,
        pip_value_per_standard_lot: info.pip_value_per_standard_lot,
        pip_values,
        pair,
    }))
}

/// Size a position by percentage or fixed dollar risk.
async fn position_size_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<PositionSizeRequest>,
) -> ApiResult<PositionSizeResponse> {
    let calc = state.planner.calculator();
    let mode = state
        .risk_mode(req.account_balance, req.risk_percentage, req.risk_amount)
        .map_err(to_error_response)?;

    let (account_balance, risk_percentage, risk_amount) = match mode {
        RiskMode::Percentage {
            account_balance,
            risk_percentage,
        } => (
            Some(account_balance),
            Some(risk_percentage),
            risk_amount_from_percentage(account_balance, risk_percentage),
        ),
        RiskMode::FixedAmount { risk_amount } => (None, None, Some(risk_amount)),
    };
    let risk_amount = risk_amount
        .ok_or_else(|| to_error_response(PlanError::Uncomputable("risk amount").into()))?;

    check_inputs(
        &state,
        ValidationInput {
            account_balance,
            risk_percentage,
            risk_amount: Some(risk_amount),
            stop_loss_pips: Some(req.stop_loss_pips),
            ..Default::default()
        },
    )
    .map_err(to_error_response)?;

    let pair = resolve_pair(&req.pair).map_err(to_error_response)?;

    let position_sizes = match mode {
        RiskMode::Percentage {
            account_balance,
            risk_percentage,
        } => calc.calculate_position_size_by_risk_percentage(
            account_balance,
            risk_percentage,
            req.stop_loss_pips,
            &pair,
        ),
        RiskMode::FixedAmount { risk_amount } => {
            calc.calculate_position_size_by_dollar_amount(risk_amount, req.stop_loss_pips, &pair)
        },
    }
    .ok_or_else(|| to_error_response(PlanError::Uncomputable("position size").into()))?;

    debug!(pair = %pair, %risk_amount, "Position size served");

    Ok(Json(PositionSizeResponse {
        pair,
        risk_amount,
        position_sizes,
    }))
}

/// Stop-loss and take-profit prices.
async fn price_levels_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<PriceLevelsRequest>,
) -> ApiResult<PriceLevels> {
    let pair = resolve_pair(&req.pair).map_err(to_error_response)?;
    let entry_price = req.entry_price.unwrap_or_else(|| default_entry_price(&pair));

    check_inputs(
        &state,
        ValidationInput {
            stop_loss_pips: Some(req.stop_loss_pips),
            take_profit_pips: Some(req.take_profit_pips),
            entry_price: Some(entry_price),
            ..Default::default()
        },
    )
    .map_err(to_error_response)?;

    state
        .planner
        .calculator()
        .calculate_price_levels(
            entry_price,
            req.stop_loss_pips,
            req.take_profit_pips,
            req.direction,
            &pair,
        )
        .map(Json)
        .ok_or_else(|| to_error_response(PlanError::Uncomputable("price levels").into()))
}

/// Margin required for a lot size.
async fn margin_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<MarginRequest>,
) -> ApiResult<MarginResponse> {
    let pair = resolve_pair(&req.pair).map_err(to_error_response)?;
    let leverage = Leverage::new(req.leverage.unwrap_or(state.config.defaults.leverage))
        .map_err(|e| to_error_response(e.into()))?;
    let entry_price = req.entry_price.unwrap_or_else(|| default_entry_price(&pair));

    check_inputs(
        &state,
        ValidationInput {
            entry_price: Some(entry_price),
            ..Default::default()
        },
    )
    .map_err(to_error_response)?;

    let margin_required = state
        .planner
        .calculator()
        .calculate_margin_required(req.lot_size, entry_price, leverage.as_decimal(), &pair)
        .ok_or_else(|| to_error_response(PlanError::Uncomputable("margin").into()))?;

    Ok(Json(MarginResponse {
        pair,
        leverage: leverage.as_decimal(),
        margin_required,
    }))
}

/// Health band for a risk percentage.
async fn account_health_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<AccountHealthRequest>,
) -> ApiResult<AccountHealth> {
    check_inputs(
        &state,
        ValidationInput {
            risk_percentage: Some(req.risk_percentage),
            ..Default::default()
        },
    )
    .map_err(to_error_response)?;

    Ok(Json(
        state
            .planner
            .calculator()
            .check_account_health(req.risk_percentage),
    ))
}

/// Full trade plan.
async fn trade_plan_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<TradePlanRequest>,
) -> ApiResult<TradePlan> {
    let risk = state
        .risk_mode(req.account_balance, req.risk_percentage, req.risk_amount)
        .map_err(to_error_response)?;

    let pair = normalize_pair(&req.pair).map_err(to_error_response)?;

    let request = TradeRequest {
        entry_price: req.entry_price.unwrap_or_else(|| default_entry_price(&pair)),
        leverage: req.leverage.unwrap_or(state.config.defaults.leverage),
        pair,
        risk,
        stop_loss_pips: req.stop_loss_pips,
        take_profit_pips: req.take_profit_pips,
        direction: req.direction,
    };

    state
        .planner
        .plan(&request)
        .map(Json)
        .map_err(|e| to_error_response(e.into()))
}

// =============================================================================
// Helpers
// =============================================================================

/// Normalise a `BASE/QUOTE` symbol.
///
/// A symbol that is not a pair at all can never be in the reference table,
/// so it is reported as an unknown pair.
fn normalize_pair(raw: &str) -> DaemonResult<String> {
    PairSymbol::parse(raw)
        .map(|symbol| symbol.as_pair())
        .map_err(|_| DaemonError::UnknownPair(raw.to_string()))
}

/// Normalise a symbol and check it is in the reference table.
fn resolve_pair(raw: &str) -> DaemonResult<String> {
    let pair = normalize_pair(raw)?;

    if get_pair_info(&pair).is_none() {
        return Err(DaemonError::UnknownPair(pair));
    }

    Ok(pair)
}

fn check_inputs(state: &ApiState, input: ValidationInput) -> DaemonResult<()> {
    let result = state.planner.calculator().validate_inputs(&input);
    if result.is_valid() {
        Ok(())
    } else {
        Err(DaemonError::InvalidInput(result.message()))
    }
}

fn to_error_response(error: DaemonError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        DaemonError::UnknownPair(_) | DaemonError::Plan(PlanError::UnknownPair(_)) => {
            StatusCode::NOT_FOUND
        },
        DaemonError::Config(_) | DaemonError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };

    warn!(error = %error, status = status.as_u16(), "Request rejected");

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}
