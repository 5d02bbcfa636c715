//! holiday-finder CLI entry point
//!
//! Holiday offers ranked by distance - CLI + HTTP API

use holiday_finder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
