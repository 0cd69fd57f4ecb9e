//! https-redirect
//!
//! Answers every request with a redirect looked up by host and path in a
//! YAML mapping file.
//!
//! ```text
//!     Client Request ──▶ listener ──▶ redirect handler ──▶ MappingStore snapshot
//!                                            │                   ▲
//!     Client ◀── 3xx Location / 404 ◀───────┘                   │ SIGHUP reload
//!                                                           mapping.yaml
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use std::sync::Arc;

use axum::http::StatusCode;
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;

use https_redirect::config::validation::{validate_config, ConfigValidationError};
use https_redirect::config::{read_config, ServiceConfig};
use https_redirect::lifecycle::{shutdown_signal, spawn_reload_on_hangup, ExitCode};
use https_redirect::mapping::{load_mapping_file, MappingStore};
use https_redirect::observability::{logging, metrics};
use https_redirect::HttpServer;

#[derive(Parser)]
#[command(name = "https-redirect", version)]
#[command(about = "Serve HTTPS redirects selected by host and path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve redirects over HTTP
    Serve(ServeArgs),
    /// Validate a mapping file
    Check {
        /// Path of the YAML mapping file
        mapping: PathBuf,
    },
    /// Resolve a host and path against a mapping file
    Lookup {
        /// Path of the YAML mapping file
        mapping: PathBuf,
        host: String,
        path: String,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Service configuration file (TOML); defaults apply when it is missing
    #[arg(short, long, default_value = "https-redirect.toml")]
    config: PathBuf,

    /// Overrides `mapping_file`
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Overrides `listener.bind_address`
    #[arg(short, long)]
    bind: Option<String>,

    /// Overrides `observability.log_level`
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ProcessExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::AppDevError
            } else {
                ExitCode::Success
            };
            return code.into();
        }
    };

    let result = match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Check { mapping } => check(&mapping),
        Commands::Lookup {
            mapping,
            host,
            path,
        } => lookup(&mapping, &host, &path),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(code) => code.into(),
    }
}

async fn serve(args: ServeArgs) -> Result<(), ExitCode> {
    // 1. Load config
    let config_found = args.config.exists();
    let mut config = if config_found {
        read_config(&args.config).map_err(|e| {
            eprintln!("Failed to load {}: {}", args.config.display(), e);
            ExitCode::ConfigError
        })?
    } else {
        ServiceConfig::default()
    };

    if let Some(mapping) = args.mapping {
        config.mapping_file = mapping;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = args.log_level {
        config.observability.log_level = level;
    }

    validate_config(&config).map_err(|errors| {
        for e in &errors {
            eprintln!("Invalid configuration: {}", e);
        }
        exit_code_for(&errors)
    })?;

    // 2. Setup logging
    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "https-redirect starting");
    if !config_found {
        tracing::info!(path = %args.config.display(), "Config file not found, using defaults.");
    }

    // 3. Metrics
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse().map_err(|_| {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
            ExitCode::MetricsIssue
        })?;
        metrics::init_metrics(addr).map_err(|e| {
            tracing::error!(error = %e, "Failed to install metrics exporter");
            ExitCode::MetricsIssue
        })?;
    }

    // 4. Load mappings
    let store = MappingStore::open(&config.mapping_file).map_err(|e| {
        tracing::error!(error = %e, "Cannot start without a valid mapping file");
        ExitCode::BadMappingFile
    })?;
    let store = Arc::new(store);

    let redirect_status = StatusCode::from_u16(config.listener.redirect_status).map_err(|e| {
        tracing::error!(error = %e, "Invalid redirect status");
        ExitCode::ConfigError
    })?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        redirect_status = redirect_status.as_u16(),
        mapping_file = %config.mapping_file.display(),
        "Configuration loaded"
    );

    // 5. Bind
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|e| {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            ExitCode::BadPort
        })?;

    // 6. Reload on SIGHUP
    let _reloader = spawn_reload_on_hangup(Arc::clone(&store)).map_err(|e| {
        tracing::error!(error = %e, "Failed to install SIGHUP handler");
        ExitCode::ExecutionFailure
    })?;

    // 7. Serve until shutdown
    HttpServer::new(store, redirect_status)
        .run(listener, shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "HTTP server failed");
            ExitCode::ExecutionFailure
        })?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn check(path: &Path) -> Result<(), ExitCode> {
    let file = load_mapping_file(path).map_err(|e| {
        eprintln!("{}: {}", path.display(), e);
        ExitCode::BadMappingFile
    })?;

    println!(
        "{}: ok, {} hosts, {} redirects",
        path.display(),
        file.len(),
        file.entry_count()
    );
    Ok(())
}

fn lookup(path: &Path, host: &str, request_path: &str) -> Result<(), ExitCode> {
    let file = load_mapping_file(path).map_err(|e| {
        eprintln!("{}: {}", path.display(), e);
        ExitCode::BadMappingFile
    })?;

    match file.lookup(host, request_path) {
        Some(target) => {
            println!("{}", target);
            Ok(())
        }
        None => {
            eprintln!("No redirect configured for {}{}", host, request_path);
            Err(ExitCode::NoRedirect)
        }
    }
}

/// A bad log level gets its own code when it is the only problem.
fn exit_code_for(errors: &[ConfigValidationError]) -> ExitCode {
    if errors
        .iter()
        .all(|e| matches!(e, ConfigValidationError::InvalidLogLevel(_)))
    {
        ExitCode::InvalidLogLevel
    } else {
        ExitCode::ConfigError
    }
}
