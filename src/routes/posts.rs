//! The public feed, single-post pages, and post creation.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tracing::{info, warn};

use crate::error::AppError;
use crate::forms::PostForm;
use crate::markdown;
use crate::models::post::{NewPost, PostView};
use crate::models::user::UserView;
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::session::{flash, take_flashes, AuthSession, FlashMessage, RequireAuth};

use super::{page_context, render_page, AppState};

pub async fn index<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
) -> Result<Response, AppError>
where
    S: UserService + PostService + Clone + Send + Sync + 'static,
{
    let (jar, mut flashes) = take_flashes(jar);

    // a dead store degrades to an empty feed with a warning, not a 500
    let posts = match state.store.list_posts().await {
        Ok(posts) => posts,
        Err(error) => {
            warn!(%error, "failed to load the post feed");
            flashes.push(FlashMessage::new(
                "danger",
                "An error occurred while retrieving posts.",
            ));
            Vec::new()
        }
    };
    let posts: Vec<PostView> = posts.iter().map(PostView::from).collect();

    let mut ctx = page_context(auth.user.as_ref(), &flashes);
    ctx.insert("posts", &posts);
    Ok((jar, render_page(&state.tera, "index.html", &ctx)?).into_response())
}

pub async fn create_post_page<S>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
    jar: SignedCookieJar,
) -> Result<Response, AppError>
where
    S: UserService + Clone + Send + Sync + 'static,
{
    let (jar, flashes) = take_flashes(jar);
    let mut ctx = page_context(Some(&user), &flashes);
    ctx.insert("errors", &PostForm::empty_errors());
    ctx.insert("form", &json!({ "title": "", "content": "", "tags": "" }));
    Ok((jar, render_page(&state.tera, "create_post.html", &ctx)?).into_response())
}

pub async fn create_post<S>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
    jar: SignedCookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError>
where
    S: UserService + PostService + Clone + Send + Sync + 'static,
{
    if let Err(errors) = form.validate() {
        let (jar, flashes) = take_flashes(jar);
        let mut ctx = page_context(Some(&user), &flashes);
        ctx.insert("errors", &errors);
        ctx.insert(
            "form",
            &json!({ "title": form.title, "content": form.content, "tags": form.tags }),
        );
        return Ok((jar, render_page(&state.tera, "create_post.html", &ctx)?).into_response());
    }

    let tags = form.split_tags();
    let post = state
        .store
        .create_post(&NewPost {
            title: form.title,
            content: form.content,
            user_id: user.id,
            tags,
        })
        .await?;
    info!(post_id = %post.id, username = %user.username, "created post");

    let jar = flash(jar, "success", "Post created successfully!");
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn view_post<S>(
    State(state): State<AppState<S>>,
    auth: AuthSession,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    S: UserService + PostService + Clone + Send + Sync + 'static,
{
    // a malformed id, a store failure, and an unknown id all land on the
    // same not-found path
    let post = match ObjectId::parse_str(&id) {
        Ok(oid) => match state.store.find_post_by_id(oid).await {
            Ok(post) => post,
            Err(error) => {
                warn!(%error, "failed to load post");
                None
            }
        },
        Err(_) => None,
    };
    let Some(post) = post else {
        let jar = flash(jar, "danger", "Post not found.");
        return Ok((jar, Redirect::to("/")).into_response());
    };

    // the author may have been deleted since the post was written; the
    // page then renders without an author block
    let author = state.store.find_user_by_id(post.user_id).await.ok().flatten();

    let (jar, flashes) = take_flashes(jar);
    let mut ctx = page_context(auth.user.as_ref(), &flashes);
    ctx.insert("post", &PostView::from(&post));
    ctx.insert("content_html", &markdown::render(&post.content));
    ctx.insert("author", &author.as_ref().map(UserView::from));
    Ok((jar, render_page(&state.tera, "view_post.html", &ctx)?).into_response())
}
