// Server-rendered pages
// Handlers build Askama templates; the session travels in a signed cookie

mod articles;
mod auth;
pub mod context;
pub mod error;
pub mod forms;
mod templates;

use askama::Template;
use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use context::RequestContext;
pub use error::{ErrorCode, WebError};
pub use templates::*;

// Helper to render templates and handle errors
pub(crate) fn render_template<T: Template>(template: T) -> Response {
    render_with_status(StatusCode::OK, template)
}

pub(crate) fn render_with_status<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => WebError::from(e).into_response(),
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(auth::home).post(auth::login_submit))
        .route("/about/", get(about))
        .route("/success/", get(success).post(success))
        .route("/register/", get(auth::register_page).post(auth::register_submit))
        .route("/logout/", get(auth::logout))
        .route("/edit/", get(articles::edit_page).post(articles::edit_submit))
        .route("/read/:article_id/", get(articles::read))
        .route("/health", get(health_check))
        .route("/about", any(add_trailing_slash))
        .route("/success", any(add_trailing_slash))
        .route("/register", any(add_trailing_slash))
        .route("/logout", any(add_trailing_slash))
        .route("/edit", any(add_trailing_slash))
        .route("/read/:article_id", any(add_trailing_slash))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn about() -> Response {
    render_template(AboutTemplate)
}

async fn success() -> Response {
    render_template(SuccessTemplate)
}

/// Pages live under their slash-terminated path; send the bare path there.
/// 308 keeps the method and body of a form POST.
async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

async fn health_check() -> &'static str {
    "OK"
}
