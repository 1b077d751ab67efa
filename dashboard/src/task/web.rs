use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::post,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::task::{TaskForm, TaskService};
use crate::web::flash::{self, Flash};
use crate::web::{AppState, DASHBOARD_PATH, WebError};

/// Handler for POST /add-task.
///
/// Redirects back to the dashboard so a reload never resubmits the form.
#[tracing::instrument(skip(state, jar))]
async fn add_task_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<TaskForm>,
) -> Result<(SignedCookieJar, Redirect), WebError> {
    let new_task = form.parse()?;
    TaskService::new(&state.db).create_task(new_task).await?;
    Ok((
        flash::set_flash(jar, Flash::TaskAdded),
        Redirect::to(DASHBOARD_PATH),
    ))
}

pub fn create_task_router(state: AppState) -> Router {
    Router::new()
        .route("/add-task", post(add_task_handler))
        .with_state(state)
}
