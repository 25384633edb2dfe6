use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peerstream_core::{
    load_config, validate_config, CandidateSearch, CombinedMetadataResolver, HttpTrackerSource,
    JackettSearcher, MemoryResultCache, OmdbClient, SearcherBackend, StreamRanker, TmdbClient,
};

use peerstream_server::api::create_router;
use peerstream_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PEERSTREAM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded successfully");

    // Create metadata resolver from whichever upstreams are configured
    let tmdb = config
        .metadata
        .tmdb
        .as_ref()
        .map(|cfg| {
            info!("Initializing TMDB client");
            TmdbClient::new(cfg.clone())
        })
        .transpose()
        .map_err(|e| error!("Failed to create TMDB client: {}", e))
        .ok()
        .flatten();

    let omdb = config
        .metadata
        .omdb
        .as_ref()
        .map(|cfg| {
            info!("Initializing OMDb client");
            OmdbClient::new(cfg.clone())
        })
        .transpose()
        .map_err(|e| error!("Failed to create OMDb client: {}", e))
        .ok()
        .flatten();

    let resolver = CombinedMetadataResolver::new(tmdb, omdb);
    if !resolver.has_upstream() {
        warn!("No metadata upstream configured; stream requests will return empty results");
    }

    // Create searcher if configured
    let searcher: Option<Arc<dyn CandidateSearch>> = match &config.searcher {
        Some(searcher_config) => match searcher_config.backend {
            SearcherBackend::Jackett => {
                if let Some(jackett_config) = &searcher_config.jackett {
                    info!("Initializing Jackett searcher at {}", jackett_config.url);
                    Some(Arc::new(JackettSearcher::new(jackett_config.clone())))
                } else {
                    error!("Jackett backend selected but no jackett config provided");
                    None
                }
            }
        },
        None => {
            warn!("No searcher configured; stream requests will return empty results");
            None
        }
    };

    // Assemble the ranking pipeline when a search backend is available
    let ranker = searcher.map(|search| {
        let trackers = HttpTrackerSource::new(config.trackers.url.clone(), config.trackers.ttl());
        Arc::new(StreamRanker::new(
            Arc::new(resolver),
            search,
            Arc::new(trackers),
            Arc::new(MemoryResultCache::new()),
            config.ranking.clone(),
        ))
    });

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), ranker));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
