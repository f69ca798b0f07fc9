use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue};
use std::sync::Arc;
use std::time::Instant;
use survey_core::FormValidator;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

pub use config::{ApiConfig, CorsConfig};
pub use error::ApiError;
pub use server::ApiServer;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub validator: FormValidator,
    pub config: Arc<ApiConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(validator: FormValidator, config: ApiConfig) -> Self {
        Self {
            validator,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::submit::submit_form,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::submit::SubmissionForm,
            survey_core::ValidatedSubmission,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "submissions", description = "Survey form submission")
    )
)]
pub struct ApiDoc;

/// Build API application
pub fn build_app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let mut router = Router::new().merge(routes::routes());
    if config.enable_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allow_any_origin {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
