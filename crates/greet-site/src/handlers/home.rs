//! Home Page Handlers
//!
//! The one page: GET renders the empty form, POST validates the submission
//! and greets. The state machine is request-local: a captured name populates
//! the greeting of that response only, then is discarded.

use axum::{Form, extract::State};
use serde::Deserialize;

use crate::{
    SiteState,
    error::SiteError,
    form::NameForm,
    templates::HomeTemplate,
};

/// Form-encoded POST body for the name form.
#[derive(Debug, Deserialize)]
pub struct NameSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Handler for GET / - empty form, no greeting.
pub async fn index(State(state): State<SiteState>) -> HomeTemplate {
    HomeTemplate::new(None, NameForm::empty(), state.csrf.mint())
}

/// Handler for POST / - validate the submission and greet.
///
/// An invalid or missing CSRF token is rejected with a 400 before the field
/// is even looked at. A failed validation re-renders the form with an inline
/// message and a 200. A valid submission captures the name for this one
/// response and clears the input so the value never redisplays.
pub async fn submit(
    State(state): State<SiteState>,
    Form(submission): Form<NameSubmission>,
) -> Result<HomeTemplate, SiteError> {
    state.csrf.verify(&submission.csrf_token)?;

    let mut form = NameForm::bind(submission.name);

    let name = if form.validate() {
        Some(form.take_value())
    } else {
        None
    };

    Ok(HomeTemplate::new(name, form, state.csrf.mint()))
}
