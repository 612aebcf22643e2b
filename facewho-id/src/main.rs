//! facewho-id - face identification microservice
//!
//! Accepts an image on `POST /api/identify`, asks the Face API who is in it
//! and answers with the resolved names.

use anyhow::{Context, Result};
use clap::Parser;
use facewho_common::config::{load_toml_config, resolve_config_path};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facewho_id::config::{CliArgs, ServiceConfig, TomlConfig, MODULE_NAME};
use facewho_id::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // TOML first: it carries the fallback log level
    let config_path = resolve_config_path(args.config.as_deref(), MODULE_NAME);
    let toml: TomlConfig =
        load_toml_config(config_path.as_deref()).context("Failed to load config file")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("facewho_id={0},facewho_common={0},tower_http=info", toml.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting facewho-id v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) if path.exists() => info!("Config file: {}", path.display()),
        _ => info!("No config file, using flags, environment and defaults"),
    }

    let config = ServiceConfig::resolve(&args, &toml).context("Invalid configuration")?;
    info!(
        endpoint = %config.endpoint,
        person_group = %config.person_group_id,
        unrecognized_face = %config.policy.unrecognized_face,
        provider_failure = %config.policy.provider_failure,
        "Configuration resolved"
    );

    let state = AppState::from_config(&config).context("Failed to create Face API client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("facewho-id stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
