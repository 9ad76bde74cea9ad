//! Login, registration and logout pages.

use axum::{
    extract::rejection::FormRejection,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, info, warn};

use super::articles::render_dashboard;
use super::context::RequestContext;
use super::error::WebError;
use super::forms::{self, CredentialsForm};
use super::render_template;
use super::templates::{LoginTemplate, RegisterTemplate};
use crate::db::{StoreError, User};

/// Home page: the user's dashboard when logged in, the login form otherwise
pub async fn home(ctx: RequestContext) -> Result<Response, WebError> {
    if let Some(user) = ctx.session.current_user() {
        return render_dashboard(&ctx.db, &user).await;
    }
    Ok(render_template(LoginTemplate::default()))
}

/// Login form submission
pub async fn login_submit(
    ctx: RequestContext,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, WebError> {
    if let Some(user) = ctx.session.current_user() {
        return render_dashboard(&ctx.db, &user).await;
    }

    let form = forms::submitted(form).normalized();

    if let Err(errors) = form.validate() {
        debug!("Login form rejected: {}", errors);
        return Ok(render_template(LoginTemplate {
            name: form.name,
            invalid: true,
            failed: false,
        }));
    }

    match User::authenticate(&ctx.db, &form.name, &form.password).await? {
        Some(user) => {
            info!(user_id = user.id, "User logged in: {}", user.name);
            let session = ctx.session.login(&user.name, user.id);
            Ok((session.into_jar(), Redirect::to("/")).into_response())
        }
        None => {
            warn!("Failed login attempt for {}", form.name);
            Ok(render_template(LoginTemplate {
                name: form.name,
                invalid: false,
                failed: true,
            }))
        }
    }
}

pub async fn register_page() -> Response {
    render_template(RegisterTemplate::default())
}

/// Registration form submission. A new account is logged in straight away.
pub async fn register_submit(
    ctx: RequestContext,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = forms::submitted(form).normalized();

    if let Err(errors) = form.validate() {
        debug!("Registration form rejected: {}", errors);
        return Ok(render_template(RegisterTemplate {
            name: form.name,
            invalid: true,
            name_taken: false,
        }));
    }

    match User::create(&ctx.db, &form.name, &form.password).await {
        Ok(user) => {
            info!(user_id = user.id, "Registered user: {}", user.name);
            let session = ctx.session.login(&user.name, user.id);
            Ok((session.into_jar(), Redirect::to("/")).into_response())
        }
        Err(StoreError::DuplicateName(name)) => {
            info!("Registration rejected, name already taken: {}", name);
            Ok(render_template(RegisterTemplate {
                name: form.name,
                invalid: false,
                name_taken: true,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// Clear the session. Safe to call without one.
pub async fn logout(ctx: RequestContext) -> impl IntoResponse {
    if let Some(user) = ctx.session.current_user() {
        info!(user_id = user.user_id, "User logged out: {}", user.username);
    }
    (ctx.session.logout().into_jar(), Redirect::to("/"))
}
