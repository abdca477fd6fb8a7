//! MongoDB storage backend using the official MongoDB async driver.
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Each `MongoDataService<T>` operates on a collection named after
//! `T::resource_name()` ("users", "courses").
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, so UUIDs and timestamps are stored as
//! strings. The `id` field is mapped to MongoDB's `_id` convention.

use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Database, IndexModel};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON document, renaming `id` to `_id`.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into JSON, renaming `_id` to `id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Filter matching `field` against the string form of `value` and, when the
/// string parses as one, its native BSON scalar.
fn search_filter(field: &str, value: &str) -> Document {
    let mut variants: Vec<Bson> = vec![Bson::String(value.to_string())];

    match value {
        "true" => variants.push(Bson::Boolean(true)),
        "false" => variants.push(Bson::Boolean(false)),
        _ => {
            if let Ok(i) = value.parse::<i64>() {
                variants.push(Bson::Int64(i));
            }
        }
    }

    doc! { field: { "$in": variants } }
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic document store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use catalog::storage::MongoDataService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let courses = MongoDataService::<Course>::new(client.database("catalog"));
/// courses.ensure_index("userId").await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    /// Create an ascending index on `field`.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_index(&self, field: &str) -> Result<()> {
        let index = IndexModel::builder().keys(doc! { field: 1 }).build();

        self.collection().create_index(index).await.map_err(|e| {
            anyhow!(
                "Failed to create index on {}.{}: {}",
                T::resource_name(),
                field,
                e
            )
        })?;

        Ok(())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", T::resource_name_singular(), e))?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(|e| {
            anyhow!(
                "Failed to deserialize {} from document: {}",
                T::resource_name_singular(),
                e
            )
        })
    }

    async fn find_all(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        let mut entities = docs
            .into_iter()
            .map(Self::document_to_entity)
            .collect::<Result<Vec<T>>>()?;
        // Timestamps are stored as strings; order on the parsed values
        entities.sort_by_key(|entity| (entity.created_at(), entity.id()));

        Ok(entities)
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", T::resource_name_singular(), e))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.find_all(doc! {}).await
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update {}: {}", T::resource_name_singular(), e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("{} not found: {}", T::resource_name_singular(), id));
        }

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::resource_name_singular(), e))?;

        Ok(())
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        self.find_all(search_filter(field, value)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Course, CourseInput};
    use serde_json::json;

    fn sample_course() -> Course {
        Course::new(
            CourseInput {
                title: "Databases".to_string(),
                description: "Documents and indexes".to_string(),
                estimated_time: Some("4 hours".to_string()),
                materials_needed: None,
            },
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_json_to_document_moves_id() {
        let doc = json_to_document(json!({"id": "abc", "title": "t"})).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), "abc");
        assert!(!doc.contains_key("id"));
        assert_eq!(doc.get_str("title").unwrap(), "t");
    }

    #[test]
    fn test_json_to_document_rejects_non_object() {
        let err = json_to_document(json!("string")).unwrap_err();
        assert!(err.to_string().contains("non-object"));
    }

    #[test]
    fn test_course_survives_document_conversion() {
        let course = sample_course();
        let doc = MongoDataService::<Course>::entity_to_document(&course).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), course.id.to_string());
        assert_eq!(doc.get_str("userId").unwrap(), course.user_id.to_string());
        assert!(doc.get("materialsNeeded").is_some_and(|b| *b == Bson::Null));

        let back = MongoDataService::<Course>::document_to_entity(doc).unwrap();
        assert_eq!(back, course);
    }

    #[test]
    fn test_search_filter_variants() {
        let filter = search_filter("emailAddress", "a@b.io");
        assert_eq!(
            filter,
            doc! { "emailAddress": { "$in": [Bson::String("a@b.io".to_string())] } }
        );

        let filter = search_filter("count", "3");
        assert_eq!(
            filter,
            doc! { "count": { "$in": [Bson::String("3".to_string()), Bson::Int64(3)] } }
        );
    }
}
