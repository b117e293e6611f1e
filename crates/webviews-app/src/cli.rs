use std::path::PathBuf;

use clap::Parser;

/// webviews — open a page in a native webview window.
#[derive(Parser, Debug)]
#[command(name = "webviews", version, about)]
pub struct Args {
    /// URL to open. Data URIs are accepted.
    pub url: Option<String>,

    /// Load the page from an HTML file instead of a URL.
    #[arg(long, conflicts_with = "url")]
    pub html: Option<PathBuf>,

    /// Window title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// Window width in logical pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in logical pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Prevent the user from resizing the window.
    #[arg(long)]
    pub fixed: bool,

    /// Enable developer tools.
    #[arg(long)]
    pub debug: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `webviews=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
