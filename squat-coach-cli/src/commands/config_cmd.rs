use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub async fn show_config(explicit: Option<&Path>) -> Result<()> {
    let config = Config::load(explicit)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let config_file = Config::resolve_path(explicit)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    config.save(&config_file)?;

    println!("✓ Configuration initialized at: {}", config_file.display());

    Ok(())
}

pub async fn show_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", Config::resolve_path(explicit)?.display());
    Ok(())
}
