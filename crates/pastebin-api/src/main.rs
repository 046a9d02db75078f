//! Pastebin CLI and REST API entry point.
//!
//! Binary name: `pastebin`
//!
//! Parses CLI arguments, loads `config.toml`, initializes tracing, database
//! and services, then dispatches to the appropriate command handler or starts
//! the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use pastebin_infra::config::load_server_config;
use pastebin_infra::filesystem::resolve_data_dir;
use pastebin_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SnippetCommand, UserCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pastebin", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let config = load_server_config(&data_dir).await;

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if matches!(cli.command, Commands::Serve { .. }) => "info",
        0 => "warn",
        1 => "info,pastebin=debug",
        _ => "trace",
    };
    init_tracing(filter, config.log_format, config.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, data_dir, config).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: std::path::PathBuf,
    config: pastebin_types::config::ServerConfig,
) -> anyhow::Result<()> {
    let state = AppState::init(data_dir, config).await?;

    match cli.command {
        Commands::User { command } => match command {
            UserCommand::Create {
                username,
                email,
                password,
            } => {
                cli::user::create_user(&state, username, email, password, cli.json).await?;
            }
            UserCommand::List => {
                cli::user::list_users(&state, cli.json).await?;
            }
        },

        Commands::Snippet { command } => match command {
            SnippetCommand::List => {
                cli::snippet::list_snippets(&state, cli.json).await?;
            }
            SnippetCommand::Show { id } => {
                cli::snippet::show_snippet(&state, id, cli.json).await?;
            }
            SnippetCommand::Create {
                file,
                title,
                language,
                style,
                linenos,
                owner,
            } => {
                cli::snippet::create_snippet(
                    &state, file, title, language, style, linenos, owner, cli.json,
                )
                .await?;
            }
            SnippetCommand::Delete { id, force } => {
                cli::snippet::delete_snippet(&state, id, force, cli.json).await?;
            }
        },

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Pastebin API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if !state.config.pastebin_routes {
                    println!(
                        "  {}",
                        console::style("Open /pastebin/ routes disabled").dim()
                    );
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, pastebin_routes = state.config.pastebin_routes, "Server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
