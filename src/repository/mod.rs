pub mod dish_repo;
pub mod repository_error;
pub mod user_repo;

use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Database,
};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

/// Builds the shared client (one connection pool for every repository) and
/// returns a handle to the configured database.
pub async fn connect_database(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("DishesBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    let timeout = std::time::Duration::from_secs(config.connection_timeout_secs);
    client_options.connect_timeout = Some(timeout);
    client_options.server_selection_timeout = Some(timeout);

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}
