//! Show the effective configuration.

use std::path::Path;

use facepoint_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, explicit: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    println!();

    match explicit {
        Some(path) => println!("Config file: {}", path.display()),
        None => {
            let path = config_file_path();
            if path.exists() {
                println!("Config file: {}", path.display());
            } else {
                println!("Config file: {} (not present, using defaults)", path.display());
            }
        }
    }

    Ok(())
}
