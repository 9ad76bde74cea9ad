//! Writing and reading articles.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Response},
    Form,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::context::RequestContext;
use super::error::{ErrorCode, WebError};
use super::forms::{self, ArticleForm};
use super::templates::{DashboardTemplate, EditTemplate, ReadTemplate};
use super::{render_template, render_with_status};
use crate::db::{Article, StoreError};
use crate::session::SessionUser;
use crate::{AppState, DbPool};

/// Render the logged-in user's own article list
pub(super) async fn render_dashboard(db: &DbPool, user: &SessionUser) -> Result<Response, WebError> {
    let articles = Article::list_by_user(db, user.user_id).await?;
    Ok(render_template(DashboardTemplate {
        name: user.username.clone(),
        user_id: user.user_id,
        articles,
    }))
}

fn article_form(form: ArticleForm, invalid: bool, auth_required: bool) -> EditTemplate {
    EditTemplate {
        title: form.title,
        subtitle: form.subtitle,
        content: form.content,
        invalid,
        auth_required,
    }
}

/// The article form again, flagged as needing a login
fn login_required(form: ArticleForm) -> Response {
    render_with_status(
        ErrorCode::Unauthorized.status_code(),
        article_form(form, false, true),
    )
}

pub async fn edit_page() -> Response {
    render_template(EditTemplate::default())
}

/// Article form submission. Only a logged-in user can publish.
pub async fn edit_submit(
    ctx: RequestContext,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = forms::submitted(form);

    let Some(user) = ctx.session.current_user() else {
        warn!("Rejected article submission without a session");
        return Ok(login_required(form));
    };

    if let Err(errors) = form.validate() {
        debug!("Article form rejected: {}", errors);
        return Ok(render_template(article_form(form, true, false)));
    }

    match Article::create(&ctx.db, &form.title, &form.subtitle, &form.content, user.user_id).await {
        Ok(article) => {
            info!(
                article_id = article.id,
                user_id = user.user_id,
                "Article created: {}",
                article.title
            );
        }
        Err(StoreError::ForeignKey(user_id)) => {
            // Signed session for a user that is no longer in the store
            warn!(user_id, "Session refers to a missing user, logging out");
            let session = ctx.session.logout();
            return Ok((session.into_jar(), login_required(form)).into_response());
        }
        Err(e) => return Err(e.into()),
    }

    render_dashboard(&ctx.db, &user).await
}

/// Show a single article
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
) -> Result<Response, WebError> {
    let id: i64 = article_id
        .parse()
        .map_err(|_| WebError::not_found("Article not found"))?;

    let article = Article::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| WebError::not_found("Article not found"))?;

    Ok(render_template(ReadTemplate { article }))
}
