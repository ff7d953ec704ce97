use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::db::store::{Record, Store};
use crate::models::{notification_models::Notification, poll_models::Poll, user_models::User};
use crate::utils::error::{AppError, AppResult};

pub async fn init_store(config: &Config) -> AppResult<Store> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using the in-memory store, data is lost on shutdown");
            Ok(Store::in_memory())
        }
        StoreBackend::Mongo => {
            let db = init_db(config).await?;
            ensure_indexes(&db).await?;
            Ok(Store::Mongo(db))
        }
    }
}

pub async fn init_db(config: &Config) -> AppResult<Database> {
    let mongo_uri = config
        .mongo_uri
        .as_deref()
        .ok_or_else(|| AppError::InternalError("MONGO_URI must be set".to_string()))?;

    let mut client_options = ClientOptions::parse(mongo_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {e}")))?;

    client_options.app_name = Some("DormPortal".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {e}")))?;

    let db = client.database(&config.db_name);
    db.run_command(doc! { "ping": 1 }).await?;

    info!(db = %config.db_name, "Database connection successful");

    Ok(db)
}

async fn ensure_indexes(db: &Database) -> AppResult<()> {
    db.collection::<Notification>(Notification::COLLECTION)
        .create_index(IndexModel::builder().keys(doc! { "date": -1, "_id": -1 }).build())
        .await?;

    db.collection::<Poll>(Poll::COLLECTION)
        .create_index(IndexModel::builder().keys(doc! { "created_at": -1, "_id": -1 }).build())
        .await?;

    db.collection::<User>(User::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    info!("Collection indexes ensured");
    Ok(())
}
