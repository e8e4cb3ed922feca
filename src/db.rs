use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::config::AppConfig;
use crate::entities;

/// Type alias for a database connection pool.
pub type DbPool = DatabaseConnection;

/// Establishes a connection pool from application configuration.
pub async fn establish_connection(cfg: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opts = ConnectOptions::new(cfg.database_url.clone());
    opts.max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_connections)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    info!(url = %cfg.database_url, "database connection established");
    Ok(db)
}

/// Creates every entity table that does not exist yet.
///
/// Takes the place of a migration project for development and test
/// databases; production schemas are managed externally.
pub async fn init_schema(db: &DbPool) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema.create_table_from_entity(entities::warehouse::Entity),
        schema.create_table_from_entity(entities::location::Entity),
        schema.create_table_from_entity(entities::inventory::Entity),
        schema.create_table_from_entity(entities::inventory_location::Entity),
        schema.create_table_from_entity(entities::stock::Entity),
        schema.create_table_from_entity(entities::order::Entity),
        schema.create_table_from_entity(entities::shipment::Entity),
        schema.create_table_from_entity(entities::transfer::Entity),
        schema.create_table_from_entity(entities::item::Entity),
        schema.create_table_from_entity(entities::item_group::Entity),
        schema.create_table_from_entity(entities::item_line::Entity),
        schema.create_table_from_entity(entities::item_type::Entity),
        schema.create_table_from_entity(entities::client::Entity),
        schema.create_table_from_entity(entities::supplier::Entity),
        schema.create_table_from_entity(entities::contact_person::Entity),
        schema.create_table_from_entity(entities::audit_log::Entity),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    Ok(())
}
