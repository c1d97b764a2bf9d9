//! Console front end: plays the menu chat in a terminal.
//!
//! Answer with the number shown next to a card or option, or type an
//! option value directly.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use pizzeria_chat::adapters::{
    CachedCatalogSource, ConsolePresenter, FileCatalogSource, StaticCatalogSource,
};
use pizzeria_chat::application::{load_catalog, ChatWidget};
use pizzeria_chat::config::{AppConfig, CatalogConfig, CatalogSourceKind, LoggingConfig};
use pizzeria_chat::domain::conversation::FlowHandler;
use pizzeria_chat::ports::CatalogSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let source = catalog_source(&config.catalog);
    let catalog = load_catalog(source.as_ref()).await;

    let presenter = Arc::new(ConsolePresenter::stdout());
    let widget = ChatWidget::new(
        FlowHandler::new(catalog),
        presenter.clone(),
        None,
        &config.chat,
    );

    widget.open().await;
    widget.wait_idle().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let value = input
            .parse::<usize>()
            .ok()
            .and_then(|n| presenter.choice(n))
            .unwrap_or_else(|| input.to_string());
        widget.submit(&value).await;
        widget.wait_idle().await;
    }

    info!("Input closed");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn catalog_source(config: &CatalogConfig) -> Arc<dyn CatalogSource> {
    let ttl = config.cache_ttl();
    match (config.source, &config.path) {
        (CatalogSourceKind::File, Some(path)) => {
            Arc::new(CachedCatalogSource::new(FileCatalogSource::new(path), ttl))
        }
        _ => Arc::new(CachedCatalogSource::new(StaticCatalogSource::new(), ttl)),
    }
}
