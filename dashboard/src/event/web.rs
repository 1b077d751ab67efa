use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::post,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::event::{EventForm, EventService};
use crate::web::flash::{self, Flash};
use crate::web::{AppState, DASHBOARD_PATH, WebError};

/// Handler for POST /add-event.
#[tracing::instrument(skip(state, jar))]
async fn add_event_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<EventForm>,
) -> Result<(SignedCookieJar, Redirect), WebError> {
    let new_event = form.parse()?;
    EventService::new(&state.db).create_event(new_event).await?;
    Ok((
        flash::set_flash(jar, Flash::EventAdded),
        Redirect::to(DASHBOARD_PATH),
    ))
}

pub fn create_event_router(state: AppState) -> Router {
    Router::new()
        .route("/add-event", post(add_event_handler))
        .with_state(state)
}
