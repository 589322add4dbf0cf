use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::domain::errors::DomainError;
use crate::domain::ports::DatabasePing;

/// Upper bound for establishing the initial connection at startup.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the MongoDB client and the application database.
///
/// Built once during startup and shared by every request; the driver client
/// is itself a pooled, thread-safe handle.
#[derive(Debug, Clone)]
pub struct DbManager {
    client: Client,
    database: Database,
}

impl DbManager {
    /// Connects and verifies the server answers a ping within
    /// [`CONNECTION_TIMEOUT`].
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, DomainError> {
        log::debug!("Connecting to MongoDB database '{}'", database_name);

        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            log::error!("Invalid MongoDB connection string: {}", e);
            DomainError::from(e)
        })?;
        options.connect_timeout = Some(CONNECTION_TIMEOUT);
        options.server_selection_timeout = Some(CONNECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        let manager = Self {
            database: client.database(database_name),
            client,
        };

        match tokio::time::timeout(CONNECTION_TIMEOUT, manager.ping_admin()).await {
            Ok(Ok(())) => Ok(manager),
            Ok(Err(e)) => {
                log::error!("Connection failed to database: {}", e);
                Err(e)
            }
            Err(_) => {
                log::error!("Connection to database timed out after {:?}", CONNECTION_TIMEOUT);
                Err(DomainError::Storage(format!(
                    "could not connect within {:?}",
                    CONNECTION_TIMEOUT
                )))
            }
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    async fn ping_admin(&self) -> Result<(), DomainError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DatabasePing for DbManager {
    async fn ping(&self) -> Result<(), DomainError> {
        self.ping_admin().await.inspect_err(|e| {
            log::error!("Unable to reach database: {}", e);
        })
    }
}
