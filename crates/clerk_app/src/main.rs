mod batch;
mod config;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("clerk.ron"));
    batch::run(&config_path)?;
    Ok(())
}
