use askama::Template;
use axum::Router;
use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;
use axum_extra::extract::cookie::Key;
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::event::EventServiceError;
use crate::event::web::create_event_router;
use crate::task::TaskServiceError;
use crate::task::web::create_task_router;
use crate::validation::ValidationError;

pub mod dashboard;
pub mod flash;

use dashboard::create_dashboard_router;

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Per-process context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<sea_orm::DatabaseConnection>,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(db: sea_orm::DatabaseConnection, cookie_key: Key) -> Self {
        Self {
            db: Arc::new(db),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Custom error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// The submitted form could not be turned into a record.
    #[error("Invalid form input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Task store error")]
    Task(#[from] TaskServiceError),
    #[error("Event store error")]
    Event(#[from] EventServiceError),
}

const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing your request. Please try again later.";

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, user_facing_error_message) = match &self {
            WebError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            _ => {
                tracing::error!(error = ?self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UNEXPECTED_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let error_template = ErrorTemplate::new(status_code, user_facing_error_message);
        let Ok(rendered) = error_template.render() else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };
        (status_code, Html(rendered)).into_response()
    }
}

/// Connects to the store, applies migrations and serves until interrupted.
#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let cookie_key = config.cookie_key();

    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let app = create_app_router(AppState::new(db, cookie_key));

    let server_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

/// Builds the full application router.
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect_handler))
        .route("/tasks-events", get(tasks_events_redirect_handler))
        .route("/health", get(health_check_handler))
        .route("/routines", get(routines_handler))
        .route("/finances", get(finances_handler))
        .merge(create_dashboard_router(state.clone()))
        .merge(create_task_router(state.clone()))
        .merge(create_event_router(state))
        .layer(TraceLayer::new_for_http())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn root_redirect_handler() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

/// Old bookmarks pointed here before the dashboard existed.
#[tracing::instrument]
pub async fn tasks_events_redirect_handler() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

#[tracing::instrument]
pub async fn routines_handler() -> Result<Html<String>, WebError> {
    let template = RoutinesTemplate;
    template.render().map(Html).map_err(WebError::from)
}

#[tracing::instrument]
pub async fn finances_handler() -> Result<Html<String>, WebError> {
    let template = FinancesTemplate;
    template.render().map(Html).map_err(WebError::from)
}

#[derive(Template)]
#[template(path = "routines.html")]
struct RoutinesTemplate;

#[derive(Template)]
#[template(path = "finances.html")]
struct FinancesTemplate;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    reason: &'static str,
    message: String,
}

impl ErrorTemplate {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status: status_code.as_u16(),
            reason: status_code.canonical_reason().unwrap_or("Error"),
            message,
        }
    }
}
