//! cardhub CLI and HTTP server entry point.
//!
//! Binary name: `cardhub`
//!
//! Parses CLI arguments, loads configuration and access keys once, builds the
//! application state, then dispatches to a command or starts the server.

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardhub_infra::config::{access_keys_from_env, default_config_path, load_server_config};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_server_config(&config_path).await;
    if let Some(url) = cli.database_url.clone() {
        config.database_url = Some(url);
    }

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }

            let state = AppState::init(config, access_keys_from_env()).await?;
            let addr = format!("{}:{}", state.config.host, state.config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, config = %config_path.display(), "cardhub listening");
            if !cli.quiet {
                println!(
                    "  {} cardhub listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}/api/cards.json")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Import { kind, file } => {
            let state = AppState::init(config, access_keys_from_env()).await?;
            cli::content::import_file(&state, kind, &file, cli.json).await?;
        }

        Commands::List { kind } => {
            let state = AppState::init(config, access_keys_from_env()).await?;
            cli::content::list_contents(&state, kind, cli.json).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
