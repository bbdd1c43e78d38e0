//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use climadash_core::ApiClient;

/// Build the API client, with a helpful error for malformed URLs.
pub fn build_client(api_url: &str, timeout: Duration) -> Result<ApiClient> {
    ApiClient::with_timeout(api_url, timeout).with_context(|| {
        format!(
            "Cannot use API URL '{}'. Pass --api-url, set CLIMADASH_API_URL, \
             or run 'climadash config set api-url <URL>'",
            api_url
        )
    })
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
