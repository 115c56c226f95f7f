//! MongoDB connection helpers

use bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_server_selection_timeout_secs() -> u64 {
    5
}

/// MongoDB connection settings (`MONGO_URI`, `MONGO_DATABASE`)
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    #[serde(default = "default_mongo_uri")]
    pub uri: String,
    pub database: String,
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            server_selection_timeout_secs: default_server_selection_timeout_secs(),
        }
    }
}

/// Connect, ping and hand back the service database
pub async fn connect_mongo(config: &MongoConfig, app_name: &str) -> mongodb::error::Result<Database> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(app_name.to_string());
    options.server_selection_timeout = Some(Duration::from_secs(config.server_selection_timeout_secs));

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);
    database.run_command(doc! { "ping": 1 }).await?;

    info!(database = %config.database, app = app_name, "Connected to MongoDB");
    Ok(database)
}

/// Parse a 24-character hex record id
///
/// Returns `None` for anything that is not a valid ObjectId so callers can
/// reject it before touching storage.
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
