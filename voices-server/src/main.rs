use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod media;
mod presentation;
mod server;

use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use media::store::MediaStore;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let media = MediaStore::new(&settings.uploads_dir, settings.upload_max_bytes);
    media.ensure_root().await?;

    let state = AppState::new(pool, media);

    server::run_http(&settings, state).await
}
