//! # Redis
//!
//! Document storage.
//!
//! Each collection is a single Redis hash keyed by the collection name:
//! field = document id, value = the document serialized as JSON. Collections
//! hold at most a few dozen documents, so equality lookups scan the hash
//! values rather than maintaining secondary indexes.
//!
//! ## Collections
//!
//! - `menuItems`: priced menu items, the authoritative records
//! - `menus`: one document per weekday holding ordered menu item references
//! - `recipes`: recipe cards, written once
//! - `misc`: named settings documents (`FoodPantry`, `TokenKey`)
//! - `openingHours`: one document per weekday

use std::time::Duration;

use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Document;

/// Generic access to the named document collections.
///
/// Absent documents are reported as `None`/`false`, distinct from a store
/// fault, which always surfaces as an error.
#[allow(async_fn_in_trait)]
pub trait Collections {
    async fn find_all<T: Document>(&self) -> Result<Vec<T>, AppError>;

    async fn find_by_id<T: Document>(&self, id: &str) -> Result<Option<T>, AppError>;

    async fn find_one_by_field<T: Document>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<T>, AppError>;

    /// Assigns a fresh id, persists, and returns the stored document.
    async fn insert<T: Document>(&self, doc: T) -> Result<T, AppError>;

    /// Full-field replace. Reports `None` without writing when the id is
    /// absent.
    async fn replace_by_id<T: Document>(&self, id: &str, doc: T) -> Result<Option<T>, AppError>;

    async fn delete_by_id<T: Document>(&self, id: &str) -> Result<bool, AppError>;
}

pub(crate) fn next_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Self {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(100));

        let client = Client::open(redis_url).expect("Invalid Redis URL");
        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .expect("Redis unreachable");

        Self { connection }
    }
}

impl Collections for RedisStore {
    async fn find_all<T: Document>(&self) -> Result<Vec<T>, AppError> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = conn.hvals(T::COLLECTION).await?;

        let mut documents = Vec::with_capacity(raw.len());
        for document in &raw {
            documents.push(serde_json::from_str(document)?);
        }

        Ok(documents)
    }

    async fn find_by_id<T: Document>(&self, id: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.hget(T::COLLECTION, id).await?;

        match raw {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    async fn find_one_by_field<T: Document>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = conn.hvals(T::COLLECTION).await?;

        for document in &raw {
            let json: serde_json::Value = serde_json::from_str(document)?;
            if json.get(field).and_then(serde_json::Value::as_str) == Some(value) {
                return Ok(Some(serde_json::from_value(json)?));
            }
        }

        Ok(None)
    }

    async fn insert<T: Document>(&self, mut doc: T) -> Result<T, AppError> {
        doc.assign_id(next_id());

        let mut conn = self.connection.clone();
        let json = serde_json::to_string(&doc)?;
        let _: () = conn.hset(T::COLLECTION, doc.id(), json).await?;

        Ok(doc)
    }

    async fn replace_by_id<T: Document>(&self, id: &str, mut doc: T) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.hexists(T::COLLECTION, id).await?;

        if !exists {
            return Ok(None);
        }

        doc.assign_id(id.to_string());
        let json = serde_json::to_string(&doc)?;
        let _: () = conn.hset(T::COLLECTION, id, json).await?;

        Ok(Some(doc))
    }

    async fn delete_by_id<T: Document>(&self, id: &str) -> Result<bool, AppError> {
        let mut conn = self.connection.clone();
        let removed: usize = conn.hdel(T::COLLECTION, id).await?;

        Ok(removed > 0)
    }
}
