use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use shopping::{
    IdGenerator, InMemorySessionStore, Seed, SessionStore, build_router, config::AppConfig,
    web::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let seed = match &config.seed_path {
        Some(path) => {
            info!(path = %path.display(), "loading seed lists");
            Seed::from_path(path)
                .with_context(|| format!("failed to load seed file {}", path.display()))?
        }
        None => Seed::builtin(),
    };

    let ids = IdGenerator::global();
    let sessions = Arc::new(
        InMemorySessionStore::new(seed, Arc::clone(&ids))
            .with_idle_timeout(config.session_idle_timeout)
            .with_max_sessions(config.max_sessions),
    );
    spawn_session_sweeper(Arc::clone(&sessions));

    let state = AppState::new(sessions, ids).with_session_cookie(config.session_cookie.clone());
    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "shopping is listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn spawn_session_sweeper(sessions: Arc<InMemorySessionStore>) {
    let period = sessions.idle_timeout().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.expire_idle().await;
        }
    });
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shopping=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
