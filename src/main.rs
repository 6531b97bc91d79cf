use std::process::ExitCode;

use tracing::{error, info};

use delivery::{Config, Database, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = delivery::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        delivery::logging::init_console_only(&config.logging.level);
    }

    info!("Delivery marketplace backend");

    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match WebServer::new(&config, db.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let outcome = server.run().await;
    db.close().await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Web server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
