//! Cookie-backed session state: the signed session cookie identifying the
//! current principal, one-shot flash messages, and the request extractors
//! that resolve them.
//!
//! Resolution is per request and never ambient: handlers receive an
//! [`AuthSession`] value (or a [`RequireAuth`] principal) instead of
//! consulting shared mutable state.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::routes::AppState;
use crate::services::users::UserService;

const SESSION_COOKIE: &str = "session";
const FLASH_COOKIE: &str = "flash";

/// One-shot notice rendered on the next page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: String,
    pub message: String,
}

impl FlashMessage {
    pub fn new(category: &str, message: &str) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Queue a flash for the next rendered page.
pub fn flash(jar: SignedCookieJar, category: &str, message: &str) -> SignedCookieJar {
    let mut pending = peek_flashes(&jar);
    pending.push(FlashMessage::new(category, message));
    let value = serde_json::to_string(&pending).unwrap_or_default();
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .build(),
    )
}

fn peek_flashes(jar: &SignedCookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}

/// Consume pending flashes; the returned jar clears the cookie so each
/// message is shown exactly once.
pub fn take_flashes(jar: SignedCookieJar) -> (SignedCookieJar, Vec<FlashMessage>) {
    let pending = peek_flashes(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, pending)
}

/// Transition to Authenticated: the session cookie carries the principal's
/// id, signed against tampering.
pub fn sign_in(jar: SignedCookieJar, user_id: ObjectId) -> SignedCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, user_id.to_hex()))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Transition back to Anonymous.
pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

async fn resolve<S>(parts: &Parts, state: &AppState<S>) -> (SignedCookieJar, Option<User>)
where
    S: UserService + Clone + Send + Sync + 'static,
{
    let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| ObjectId::parse_str(cookie.value()).ok());
    let user = match id {
        // a failed lookup (user gone, store down) degrades to Anonymous
        Some(id) => state.store.find_user_by_id(id).await.ok().flatten(),
        None => None,
    };
    (jar, user)
}

/// Request-scoped authentication state: the resolved principal, if any.
/// Extraction never fails; an unreadable session is simply Anonymous.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: Option<User>,
}

#[async_trait]
impl<S> FromRequestParts<AppState<S>> for AuthSession
where
    S: UserService + Clone + Send + Sync + 'static,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let (_, user) = resolve(parts, state).await;
        Ok(Self { user })
    }
}

/// The authenticated principal; anonymous requests are redirected to the
/// login page before the handler runs.
pub struct RequireAuth(pub User);

#[async_trait]
impl<S> FromRequestParts<AppState<S>> for RequireAuth
where
    S: UserService + Clone + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let (jar, user) = resolve(parts, state).await;
        match user {
            Some(user) => Ok(Self(user)),
            None => {
                let jar = flash(jar, "info", "Please log in to access this page.");
                Err((jar, Redirect::to("/login")).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum_extra::extract::cookie::Key;
    use pretty_assertions::assert_eq;

    use super::*;

    fn empty_jar() -> SignedCookieJar {
        let key = Key::derive_from(b"a unit test signing key with enough bytes in it");
        SignedCookieJar::from_headers(&HeaderMap::new(), key)
    }

    #[test]
    fn flashes_accumulate_and_consume_once() {
        let jar = empty_jar();
        let jar = flash(jar, "success", "first");
        let jar = flash(jar, "danger", "second");

        let (jar, messages) = take_flashes(jar);
        assert_eq!(
            messages,
            vec![
                FlashMessage::new("success", "first"),
                FlashMessage::new("danger", "second"),
            ]
        );

        let (_, messages) = take_flashes(jar);
        assert_eq!(messages, vec![]);
    }

    #[test]
    fn session_cookie_round_trips_the_principal_id() {
        let id = ObjectId::new();
        let jar = sign_in(empty_jar(), id);
        let value = jar.get(SESSION_COOKIE).unwrap().value().to_owned();
        assert_eq!(ObjectId::parse_str(&value).unwrap(), id);

        let jar = sign_out(jar);
        assert!(jar.get(SESSION_COOKIE).is_none());
    }
}
