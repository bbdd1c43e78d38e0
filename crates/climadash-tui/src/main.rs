//! Standalone terminal dashboard.
//!
//! Equivalent to `climadash dashboard`, configured only through the config
//! file and the `CLIMADASH_API_URL` environment variable.

use anyhow::Result;

use climadash_cli::config::{API_URL_ENV, Config};
use climadash_cli::logging;
use climadash_cli::tui::{self, TuiOptions};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_file(false);

    let config = Config::load();
    let api_url = std::env::var(API_URL_ENV).ok();
    let options = TuiOptions::from_config(&config, api_url.as_deref())?;

    tui::run(options).await
}
