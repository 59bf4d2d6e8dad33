//! fyyur-web - Venue/artist/show booking service
//!
//! Startup: parse arguments, resolve configuration (CLI/env, TOML file,
//! compiled defaults), initialize tracing, open the database, serve.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{Overrides, ServerConfig, TomlConfig};
use fyyur_web::api::status::BuildInfo;
use fyyur_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fyyur-web
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue and artist booking service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "FYYUR_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "FYYUR_BIND")]
    bind: Option<String>,

    /// SQLite database file (created if missing)
    #[arg(short, long, env = "FYYUR_DATABASE")]
    database: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "FYYUR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FYYUR_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    /// Values that take priority over the TOML file
    fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port,
            bind_address: self.bind.clone(),
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration file")?;
    let config = ServerConfig::resolve(args.overrides(), file_config);

    // RUST_LOG wins over the configured level
    let default_filter = format!(
        "fyyur_web={level},fyyur_common={level},tower_http={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting Fyyur ({}) v{} [{}] built {} ({})",
        build.module, build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Database path: {}", config.database_path.display());

    let pool = match fyyur_common::db::init_database(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    let app = build_router(AppState::new(pool.clone()));

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("fyyur-web listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_KEYS: &[&str] = &[
        "FYYUR_PORT",
        "FYYUR_BIND",
        "FYYUR_DATABASE",
        "FYYUR_CONFIG",
        "FYYUR_LOG_LEVEL",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_env_values_fill_unset_flags() {
        clear_env();
        std::env::set_var("FYYUR_PORT", "6123");
        std::env::set_var("FYYUR_DATABASE", "/tmp/fyyur-env.db");
        std::env::set_var("FYYUR_LOG_LEVEL", "debug");

        let args = Args::try_parse_from(["fyyur-web"]).unwrap();
        let overrides = args.overrides();
        clear_env();

        assert_eq!(overrides.port, Some(6123));
        assert_eq!(overrides.database_path, Some(PathBuf::from("/tmp/fyyur-env.db")));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert!(overrides.bind_address.is_none());
    }

    #[test]
    #[serial]
    fn test_flag_beats_env() {
        clear_env();
        std::env::set_var("FYYUR_PORT", "6123");

        let args = Args::try_parse_from(["fyyur-web", "--port", "7001", "--bind", "0.0.0.0"]).unwrap();
        clear_env();

        let config = ServerConfig::resolve(args.overrides(), TomlConfig::default());
        assert_eq!(config.listen_address(), "0.0.0.0:7001");
    }

    #[test]
    #[serial]
    fn test_env_beats_config_file() {
        clear_env();
        std::env::set_var("FYYUR_BIND", "10.1.2.3");

        let args = Args::try_parse_from(["fyyur-web"]).unwrap();
        clear_env();

        let file = TomlConfig::from_toml_str("bind_address = \"192.168.0.9\"\nport = 8088").unwrap();
        let config = ServerConfig::resolve(args.overrides(), file);
        assert_eq!(config.listen_address(), "10.1.2.3:8088");
    }
}
