//! Cookie-backed session state.
//!
//! The logged-in identity lives in a single signed cookie whose value is the
//! base64url-encoded JSON `{"username": ..., "id": ...}`. A cookie that fails
//! signature verification or does not decode is treated as no session.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(rename = "id")]
    pub user_id: i64,
}

impl SessionUser {
    fn encode(&self) -> String {
        // Serializing two plain fields cannot fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    fn decode(value: &str) -> Option<Self> {
        let json = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Per-client session, read from and written back to the request's cookies.
///
/// `login` and `logout` return the updated session; hand [`Session::into_jar`]
/// to the response so the change reaches the client.
pub struct Session {
    jar: SignedCookieJar,
    cookie_name: String,
    secure: bool,
}

impl Session {
    pub fn new(jar: SignedCookieJar, config: &SessionConfig) -> Self {
        Self {
            jar,
            cookie_name: config.cookie_name.clone(),
            secure: config.secure,
        }
    }

    /// The logged-in user, if any
    pub fn current_user(&self) -> Option<SessionUser> {
        self.jar
            .get(&self.cookie_name)
            .and_then(|cookie| SessionUser::decode(cookie.value()))
    }

    /// Record `username`/`user_id` as the logged-in user
    pub fn login(mut self, username: &str, user_id: i64) -> Self {
        let user = SessionUser {
            username: username.to_string(),
            user_id,
        };
        let cookie = Cookie::build((self.cookie_name.clone(), user.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        self.jar = self.jar.add(cookie);
        self
    }

    /// Forget the logged-in user. Logging out without a session is a no-op.
    pub fn logout(mut self) -> Self {
        let cookie = Cookie::build((self.cookie_name.clone(), "")).path("/").build();
        self.jar = self.jar.remove(cookie);
        self
    }

    pub fn into_jar(self) -> SignedCookieJar {
        self.jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn empty_session() -> Session {
        Session::new(SignedCookieJar::new(Key::generate()), &SessionConfig::default())
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = empty_session();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_login_sets_user() {
        let session = empty_session().login("alice", 7);
        assert_eq!(
            session.current_user(),
            Some(SessionUser {
                username: "alice".to_string(),
                user_id: 7,
            })
        );
    }

    #[test]
    fn test_logout_is_idempotent() {
        let session = empty_session().login("alice", 7).logout();
        assert_eq!(session.current_user(), None);

        let session = session.logout().logout();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_logout_without_login() {
        let session = empty_session().logout();
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let config = SessionConfig {
            cookie_name: "sid".to_string(),
            secure: true,
        };
        let jar = Session::new(SignedCookieJar::new(Key::generate()), &config)
            .login("alice", 1)
            .into_jar();

        let cookie = jar.get("sid").unwrap();
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_names_with_cookie_delimiters_survive() {
        let session = empty_session().login("a; b=c \"d\"", 3);
        let user = session.current_user().unwrap();
        assert_eq!(user.username, "a; b=c \"d\"");
        assert_eq!(user.user_id, 3);
    }

    #[test]
    fn test_encoding_round_trip_rejects_garbage() {
        assert_eq!(SessionUser::decode("not base64!"), None);
        assert_eq!(SessionUser::decode(&URL_SAFE_NO_PAD.encode(b"{}")), None);
    }
}
