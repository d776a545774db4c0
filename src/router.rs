use crate::handlers::{
    forecast::get_availability_forecast,
    health::health_check,
    map::{get_availability_map, get_available_dates},
    neighbourhoods::get_neighbourhood_ranking,
    trend::get_availability_trend,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Availability views
        .route("/api/v1/availability/trend", get(get_availability_trend))
        .route(
            "/api/v1/availability/neighbourhoods",
            get(get_neighbourhood_ranking),
        )
        .route(
            "/api/v1/availability/forecast",
            get(get_availability_forecast),
        )
        // Map views
        .route("/api/v1/availability/map", get(get_availability_map))
        .route("/api/v1/availability/dates", get(get_available_dates))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
