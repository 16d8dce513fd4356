use crate::config::Config;
use sea_orm::{Database, DatabaseConnection, DbErr};

pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    Database::connect(&config.database_url).await
}
