use std::{env, net::SocketAddr, str::FromStr};

use sqlx::sqlite::SqlitePoolOptions;
use tera::Tera;

use quill::{db, generate_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:quill.db?mode=rwc".to_owned());
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_owned());
    let secret = env::var("SESSION_SECRET").expect("SESSION_SECRET is not set");
    let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_owned());

    let pool = SqlitePoolOptions::new().connect(&db_url).await?;
    db::prepare_db(&pool).await?;

    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))?;
    tokio::fs::create_dir_all(&media_root).await?;

    let app = generate_routes(pool, templates, &secret, media_root.into());

    let addr = SocketAddr::from_str(&format!("{host}:{port}"))?;
    tracing::info!("listening on {addr}");
    axum::Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
