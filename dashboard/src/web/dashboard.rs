use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::event::{Event, EventService};
use crate::task::{Task, TaskService};
use crate::web::flash::{self, Flash};
use crate::web::{AppState, DASHBOARD_PATH, WebError};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    tasks: Vec<Task>,
    events: Vec<Event>,
    flash: Option<&'static str>,
}

impl DashboardTemplate {
    pub fn new(tasks: Vec<Task>, events: Vec<Event>, flash: Option<Flash>) -> Self {
        Self {
            tasks,
            events,
            flash: flash.map(Flash::message),
        }
    }
}

/// Handler for GET /dashboard listing tasks newest first and events soonest first.
///
/// The two lists are read independently; no snapshot spans both queries.
#[tracing::instrument(skip(state, jar))]
pub async fn dashboard_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), WebError> {
    let tasks = TaskService::new(&state.db).get_tasks_newest_first().await?;
    let events = EventService::new(&state.db)
        .get_events_soonest_first()
        .await?;

    let (jar, flash) = flash::take_flash(jar);
    let template = DashboardTemplate::new(tasks, events, flash);
    let html = template.render()?;
    Ok((jar, Html(html)))
}

pub fn create_dashboard_router(state: AppState) -> Router {
    Router::new()
        .route(DASHBOARD_PATH, get(dashboard_handler))
        .with_state(state)
}
