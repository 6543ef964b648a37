use actions_backend::serve;
use actions_backend::config::Config;
use actions_backend::store::{MemoryStore, SqliteStore};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let listener = tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.bind_addr, config.port))?;
    log::info!("Listening on {}", listener.local_addr()?);

    match &config.database {
        Some(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("opening item database {}", path.display()))?;
            log::info!("Storing items in {}", path.display());
            serve(listener, store).await?;
        }
        None => {
            log::warn!("ACTIONS_DB is not set; items will be lost on restart");
            serve(listener, MemoryStore::new()).await?;
        }
    }

    Ok(())
}
