pub mod auth;
pub mod posts;

use axum::extract::FromRef;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::Key;
use tera::{Context, Tera};

use crate::error::AppError;
use crate::models::user::{User, UserView};
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::session::FlashMessage;

/// Shared application state: the store, the template engine, and the
/// cookie-signing key. Generic over the store so the routes can be
/// exercised against an in-memory implementation.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub tera: Tera,
    pub key: Key,
}

impl<S: Clone> FromRef<AppState<S>> for Key {
    fn from_ref(state: &AppState<S>) -> Self {
        state.key.clone()
    }
}

/// Base template context shared by every page: the optional current
/// principal and the pending flash messages.
pub(crate) fn page_context(user: Option<&User>, flashes: &[FlashMessage]) -> Context {
    let mut ctx = Context::new();
    ctx.insert("current_user", &user.map(UserView::from));
    ctx.insert("flashes", flashes);
    ctx
}

pub(crate) fn render_page(
    tera: &Tera,
    template: &str,
    ctx: &Context,
) -> Result<Html<String>, AppError> {
    Ok(Html(tera.render(template, ctx)?))
}

pub fn router<S>() -> Router<AppState<S>>
where
    S: UserService + PostService + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(posts::index::<S>))
        .route(
            "/register",
            get(auth::register_page::<S>).post(auth::register::<S>),
        )
        .route("/login", get(auth::login_page::<S>).post(auth::login::<S>))
        .route("/logout", get(auth::logout))
        .route(
            "/create_post",
            get(posts::create_post_page::<S>).post(posts::create_post::<S>),
        )
        .route("/post/:id", get(posts::view_post::<S>))
}
