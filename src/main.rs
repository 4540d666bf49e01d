mod config;
mod error;
mod forms;
mod markdown;
mod middleware;
mod models;
mod password;
mod routes;
mod services;
mod session;

use anyhow::ensure;
use axum::http::header;
use axum::Router;

use axum_extra::extract::cookie::Key;

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;

use mongodb::Client;
use tera::Tera;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::*;
use tracing_forest::ForestLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::middleware::logging::HttpLoggingExt;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: config::AppCfg = Figment::from(Serialized::defaults(config::AppCfg::default()))
        .merge(Json::file("appsettings.json"))
        .merge(
            Env::raw()
                .only(&["MONGO_URI", "SECRET_KEY", "PORT"])
                .map(|key| key.as_str().to_ascii_lowercase().into()),
        )
        .extract()?;

    // initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(ForestLayer::default())
        .init();

    ensure!(
        cfg.secret_key.len() >= 32,
        "SECRET_KEY must be at least 32 bytes"
    );
    let key = Key::derive_from(cfg.secret_key.as_bytes());

    info!("connecting to the document store");
    let client = Client::with_uri_str(&cfg.mongo_uri).await?;
    let db = client
        .default_database()
        .unwrap_or_else(|| client.database("blog"));
    let store = services::Store::new(db);

    let tera = Tera::new("src/templates/**/*")?;

    let state = AppState { store, tera, key };

    let app = Router::new()
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    header::HeaderValue::from_static("max-age=13420"),
                ))
                .layer(CompressionLayer::new())
                .service(tower_http::services::ServeDir::new("./static/")),
        )
        .merge(routes::router())
        .with_state(state)
        .with_http_logging();

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("starting listening at {}", addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
