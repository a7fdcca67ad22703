use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::Config;

/// Database used when neither `MONGO_DB` nor the URI names one.
const FALLBACK_DATABASE: &str = "test";

/// Builds the client. Fails only on an unusable connection string; the
/// driver connects lazily.
pub async fn init_db(config: &Config) -> mongodb::error::Result<Database> {
    let client = Client::with_uri_str(&config.mongo_uri).await?;

    Ok(match &config.database_name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
    })
}

/// Round-trips a `ping` to confirm the server is reachable.
pub async fn ping(database: &Database) -> mongodb::error::Result<()> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
