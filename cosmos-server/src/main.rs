use std::sync::Arc;

use cosmos_server::config::AppConfig;
use cosmos_server::feed::{FeedClient, FeedConfig, FeedSource, MockFeed};
use cosmos_server::service::TravelService;
use cosmos_server::store::FileStore;
use cosmos_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmos_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Use canned price lists when configured, otherwise the live API
    let feed = match &config.mock_feed_path {
        Some(path) => FeedSource::Mock(MockFeed::from_file(path).expect("Failed to load mock feed")),
        None => {
            let feed_config = FeedConfig::new(&config.feed_url).with_timeout(config.feed_timeout);
            FeedSource::Live(FeedClient::new(feed_config).expect("Failed to create feed client"))
        }
    };
    info!(feed = %feed.describe(), data_dir = %config.data_dir.display(), "Starting");

    let store = Arc::new(FileStore::new(&config.data_dir));
    let service = Arc::new(TravelService::new(feed, store));

    // Initial fetch; cached lists stay usable if it fails
    match service.refresh().await {
        Ok(outcome) => info!(price_list = %outcome.price_list_id, "Initial price list loaded"),
        Err(e) => warn!(error = %e, "Initial refresh failed"),
    }

    // Spawn background task to refresh price lists
    let refresher = service.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = refresher.refresh().await {
                error!(error = %e, "Scheduled refresh failed");
            }
        }
    });

    let app = create_router(AppState::from_shared(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!("Cosmos route planner listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health");
    info!("  GET  /planets, /companies, /destinations?origin=");
    info!("  GET  /routes?origin=&destination=&company=&sort=price|distance|time");
    info!("  GET  /price-lists    POST /price-lists/refresh");
    info!("  GET  /reservations   POST /reservations");

    axum::serve(listener, app).await.expect("Server error");
}
