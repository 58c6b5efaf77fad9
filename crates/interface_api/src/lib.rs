//! HTTP API Layer
//!
//! This crate exposes the PMB evaluator over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Eligibility, DTP evaluation, claim protection, and reference listings
//! - **Middleware**: Authentication, request audit logging, tracing, request ids
//! - **DTOs**: Request shapes with validation
//! - **Extractors**: JSON bodies whose rejections use the API error shape
//! - **Audit**: Tracing-backed audit sink for the evaluator
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(evaluator, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod extract;
pub mod auth;
pub mod audit;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_pmb::PmbEvaluator;

use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, auth_middleware};
use crate::handlers::{health, pmb};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub evaluator: PmbEvaluator,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `evaluator` - PMB evaluator wired to an audit sink
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(evaluator: PmbEvaluator, config: ApiConfig) -> Router {
    let state = AppState { evaluator, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // PMB routes
    let pmb_routes = Router::new()
        .route("/check-eligibility", post(pmb::check_eligibility))
        .route("/evaluate-dtp", post(pmb::evaluate_dtp))
        .route("/apply-protection", post(pmb::apply_protection))
        .route("/cdl-conditions", get(pmb::list_cdl_conditions))
        .route("/dtps", get(pmb::list_dtps))
        .route("/coverage-rules", get(pmb::get_coverage_rules))
        .route("/emergency-conditions", get(pmb::list_emergency_conditions));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/pmb", pmb_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
