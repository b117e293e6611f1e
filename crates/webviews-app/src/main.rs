mod cli;

use std::convert::Infallible;
use std::process::ExitCode;

use serde_json::json;
use tracing_subscriber::EnvFilter;
use webviews_common::{ConfigError, WebviewError};
use webviews_config::WebviewsConfig;
use webviews_core::{Webview, WebviewConfig};

const FALLBACK_DIRECTIVE: &str = "webviews=info";

fn load_config(args: &cli::Args) -> Result<WebviewsConfig, ConfigError> {
    match &args.config {
        Some(path) => webviews_config::load_from_path(path),
        None => webviews_config::load_config(),
    }
}

/// Build the log filter from the environment plus a comma-separated
/// directive list. Unparsable parts are skipped.
fn log_filter(directive: &str) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    let mut applied = 0;
    for part in directive.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Ok(d) = part.parse() {
            filter = filter.add_directive(d);
            applied += 1;
        }
    }
    if applied == 0 {
        if let Ok(d) = FALLBACK_DIRECTIVE.parse() {
            filter = filter.add_directive(d);
        }
    }
    filter
}

fn log_directive(args: &cli::Args, config: Option<&WebviewsConfig>) -> String {
    args.log_level
        .clone()
        .or_else(|| config.map(|c| c.logging.directive()))
        .unwrap_or_else(|| FALLBACK_DIRECTIVE.to_string())
}

/// Window settings from the config file with command-line overrides.
fn webview_config(args: &cli::Args, config: &WebviewsConfig) -> std::io::Result<WebviewConfig> {
    let mut webview = WebviewConfig::from_config(config);

    if let Some(title) = &args.title {
        webview = webview.with_title(title.as_str());
    }
    let width = args.width.unwrap_or(webview.width);
    let height = args.height.unwrap_or(webview.height);
    webview = webview.with_size(width, height);
    if args.fixed {
        webview = webview.size_fixed();
    }
    if args.debug {
        webview = webview.with_debug(true);
    }

    if let Some(url) = &args.url {
        webview = webview.with_url(url.as_str());
    } else if let Some(path) = &args.html {
        webview = webview.with_html(std::fs::read_to_string(path)?);
    }

    Ok(webview)
}

fn run(config: WebviewConfig) -> Result<(), WebviewError> {
    let webview = Webview::new(config)?;
    webview.bind("host_info", |(): ()| {
        Ok::<_, Infallible>(json!({
            "name": "webviews",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    })?;
    webview.run()
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read first so its logging section can shape the filter.
    let loaded = load_config(&args);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&log_directive(&args, loaded.as_ref().ok())))
        .init();

    tracing::info!("webviews v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        WebviewsConfig::default()
    });

    let webview_config = match webview_config(&args, &config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to read HTML file: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(webview_config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Webview error: {e}");
            ExitCode::FAILURE
        }
    }
}
