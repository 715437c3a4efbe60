use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tasklist_tui::api::ApiClient;
use tasklist_tui::app::App;
use tasklist_tui::config::{Config, StorageLocation};
use tasklist_tui::controller::Controller;
use tasklist_tui::storage::{FileStore, MemoryStore, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // stdout belongs to the terminal UI, so logs only go to a file when asked for.
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }

    let storage = match &config.storage {
        StorageLocation::File(path) => {
            let store = FileStore::open(path)?;
            info!(path = %store.path().display(), "session storage opened");
            Storage::File(store)
        }
        StorageLocation::Memory => Storage::Memory(MemoryStore::new()),
    };

    let client = ApiClient::new(config.api_base.clone())?;
    info!(api_base = %client.base_url(), "starting");
    let mut app = App::new(Controller::new(client, storage));
    app.run().await
}
