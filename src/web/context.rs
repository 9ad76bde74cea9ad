//! Per-request context handed to every page handler.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::SignedCookieJar;
use std::convert::Infallible;
use std::sync::Arc;

use crate::session::Session;
use crate::{AppState, DbPool};

/// The current session plus a handle to the store
pub struct RequestContext {
    pub db: DbPool,
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        Ok(Self {
            db: state.db.clone(),
            session: Session::new(jar, &state.config.session),
        })
    }
}
