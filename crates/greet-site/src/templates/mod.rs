//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::form::NameForm;

/// Home page template: greeting plus the name form.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    /// Greeting target; absent until a submission validates.
    pub name: Option<String>,
    pub form: NameForm,
    /// Anti-forgery token embedded as a hidden field.
    pub csrf_token: String,
}

impl HomeTemplate {
    pub fn new(name: Option<String>, form: NameForm, csrf_token: String) -> Self {
        Self {
            title: "Greet".to_string(),
            name,
            form,
            csrf_token,
        }
    }
}
