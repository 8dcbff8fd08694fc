use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect using a [`MongoConfig`] and verify the server answers `ping`
/// against the configured database.
///
/// ```ignore
/// let client = connect_from_config(&MongoConfig::new("mongodb://localhost:27017")).await?;
/// ```
///
/// There is no retry: a failed connect or ping is returned to the caller,
/// which decides whether startup continues.
#[instrument(skip(config), fields(database = %config.database, app_name = ?config.app_name))]
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    ping(&client, &config.database).await?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Liveness round-trip against `database`.
pub async fn ping(client: &Client, database: &str) -> Result<(), MongoError> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))
}
