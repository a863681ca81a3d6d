use bson::doc;
use mongodb::{Client, Database};
use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "cluster0.zmdlf.mongodb.net";
const DEFAULT_DATABASE: &str = "db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set when MONGODB_URI is not")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

impl DatabaseConfig {
    /// `MONGODB_URI` wins; otherwise the Atlas URI is assembled from
    /// `MONGO_USERNAME`, `MONGO_PASSWORD` and `MONGODB_HOST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri = match env::var("MONGODB_URI") {
            Ok(uri) => uri,
            Err(_) => {
                let username =
                    env::var("MONGO_USERNAME").map_err(|_| ConfigError::MissingVar("MONGO_USERNAME"))?;
                let password =
                    env::var("MONGO_PASSWORD").map_err(|_| ConfigError::MissingVar("MONGO_PASSWORD"))?;
                let host = env::var("MONGODB_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

                atlas_uri(&username, &password, &host)
            }
        };
        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Ok(Self { uri, database })
    }
}

pub fn atlas_uri(username: &str, password: &str, host: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
        urlencoding::encode(username),
        urlencoding::encode(password),
        host
    )
}

/// Connects and pings the server so bad credentials fail before any work starts.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(&config.uri).await?;
    client.database("admin").run_command(doc! { "ping": 1 }).await?;
    tracing::debug!(database = %config.database, "connected to MongoDB");

    Ok(client.database(&config.database))
}
