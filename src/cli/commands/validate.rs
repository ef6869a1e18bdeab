//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use tracker_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("Product: {}", config.product.url);
    println!("History file: {}", config.history.path);
    println!("Interval: every {} hour(s)", config.schedule.interval_hours);
    println!("Fetch timeout: {}s", config.fetch.timeout_secs);
    if config.fetch.accept_invalid_certs {
        println!("TLS verification: disabled");
    }
    if config.email.enabled {
        println!(
            "Email alerts: {} -> {} via {}:{}",
            config.email.sender, config.email.receiver, config.email.smtp_server, config.email.smtp_port
        );
        if std::env::var(&config.email.password_env).is_err() {
            println!("Warning: {} is not set", config.email.password_env);
        }
    } else {
        println!("Email alerts: disabled");
    }
    println!("Log level: {}", config.logging.level);
    println!();
    println!("Resolved configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
