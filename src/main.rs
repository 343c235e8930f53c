// drawio-batch - draw.io page exporter
// Copyright (c) 2025 drawio-batch Contributors
// Licensed under the MIT License

use clap::Parser;
use drawio_batch::cli::commands::export::{self, EXIT_FAILURE, EXIT_INTERRUPTED};
use drawio_batch::cli::Cli;
use drawio_batch::config::load_config;
use drawio_batch::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(EXIT_FAILURE);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());
    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "drawio-batch");

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        eprintln!("Shutdown signal received, closing the browser...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = match export::execute(&cli, config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    };

    if exit_code == EXIT_INTERRUPTED {
        tracing::info!("Exiting after interruption");
    }

    // Flush file logs before exiting
    drop(logging_guard);
    process::exit(exit_code);
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, initiating graceful shutdown");
                    }
                }
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
