//! Registration, login, and logout pages.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;
use tracing::info;

use crate::error::AppError;
use crate::forms::{LoginForm, RegistrationForm};
use crate::models::user::NewUser;
use crate::password;
use crate::services::users::UserService;
use crate::session::{
    flash, sign_in, sign_out, take_flashes, AuthSession, FlashMessage, RequireAuth,
};

use super::{page_context, render_page, AppState};

fn registration_values(form: &RegistrationForm) -> serde_json::Value {
    // passwords are never echoed back into the form
    json!({ "username": form.username, "email": form.email })
}

pub async fn register_page<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
) -> Result<Response, AppError>
where
    S: UserService + Clone + Send + Sync + 'static,
{
    let (jar, flashes) = take_flashes(jar);
    let mut ctx = page_context(auth.user.as_ref(), &flashes);
    ctx.insert("errors", &RegistrationForm::empty_errors());
    ctx.insert("form", &registration_values(&RegistrationForm::default()));
    Ok((jar, render_page(&state.tera, "register.html", &ctx)?).into_response())
}

pub async fn register<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError>
where
    S: UserService + Clone + Send + Sync + 'static,
{
    if let Err(errors) = form.validate() {
        let (jar, flashes) = take_flashes(jar);
        let mut ctx = page_context(auth.user.as_ref(), &flashes);
        ctx.insert("errors", &errors);
        ctx.insert("form", &registration_values(&form));
        return Ok((jar, render_page(&state.tera, "register.html", &ctx)?).into_response());
    }

    // application-level uniqueness check only; two concurrent registrations
    // with the same email can still race
    if state.store.find_user_by_email(&form.email).await?.is_some() {
        let jar = flash(jar, "danger", "Email address already exists.");
        return Ok((jar, Redirect::to("/register")).into_response());
    }

    let password_hash = password::hash(&form.password)?;
    let user = state
        .store
        .create_user(&NewUser {
            username: form.username,
            email: form.email,
            password_hash,
        })
        .await?;
    info!(username = %user.username, "registered new user");

    let jar = flash(jar, "success", "Registration successful! You can now log in.");
    Ok((jar, Redirect::to("/login")).into_response())
}

pub async fn login_page<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
) -> Result<Response, AppError>
where
    S: UserService + Clone + Send + Sync + 'static,
{
    let (jar, flashes) = take_flashes(jar);
    let mut ctx = page_context(auth.user.as_ref(), &flashes);
    ctx.insert("errors", &LoginForm::empty_errors());
    ctx.insert("form", &json!({ "email": "" }));
    Ok((jar, render_page(&state.tera, "login.html", &ctx)?).into_response())
}

pub async fn login<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError>
where
    S: UserService + Clone + Send + Sync + 'static,
{
    match form.validate() {
        Ok(()) => {
            let user = state.store.find_user_by_email(&form.email).await?;
            if let Some(user) = user.filter(|u| password::verify(&form.password, &u.password_hash))
            {
                let jar = sign_in(jar, user.id);
                let jar = flash(jar, "success", "Login successful!");
                return Ok((jar, Redirect::to("/")).into_response());
            }

            // bad credentials re-render the form, they do not redirect
            let (jar, mut flashes) = take_flashes(jar);
            flashes.push(FlashMessage::new(
                "danger",
                "Login unsuccessful. Check email and password.",
            ));
            let mut ctx = page_context(auth.user.as_ref(), &flashes);
            ctx.insert("errors", &LoginForm::empty_errors());
            ctx.insert("form", &json!({ "email": form.email }));
            Ok((jar, render_page(&state.tera, "login.html", &ctx)?).into_response())
        }
        Err(errors) => {
            let (jar, flashes) = take_flashes(jar);
            let mut ctx = page_context(auth.user.as_ref(), &flashes);
            ctx.insert("errors", &errors);
            ctx.insert("form", &json!({ "email": form.email }));
            Ok((jar, render_page(&state.tera, "login.html", &ctx)?).into_response())
        }
    }
}

pub async fn logout(RequireAuth(user): RequireAuth, jar: SignedCookieJar) -> impl IntoResponse {
    info!(username = %user.username, "user logged out");
    let jar = sign_out(jar);
    let jar = flash(jar, "info", "You have been logged out.");
    (jar, Redirect::to("/"))
}
