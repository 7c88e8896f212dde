use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::form_response::{FormResponse, ResponseStats},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormResponseRepository: Send + Sync {
    async fn create(&self, response: FormResponse) -> AppResult<FormResponse>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<FormResponse>>;
    /// Newest first.
    async fn find_by_form(&self, form_id: &str) -> AppResult<Vec<FormResponse>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn delete_by_form(&self, form_id: &str) -> AppResult<u64>;
    async fn stats(&self, form_id: &str) -> AppResult<ResponseStats>;
}

pub struct MongoFormResponseRepository {
    collection: Collection<FormResponse>,
}

impl MongoFormResponseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.form_responses();
        Self { collection }
    }
}

/// Mongo returns `$avg` as a double and `$max`/`$min` as whatever width was stored.
fn read_number(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(Bson::Int32(v)) => *v as f64,
        Some(Bson::Int64(v)) => *v as f64,
        Some(Bson::Double(v)) => *v,
        _ => 0.0,
    }
}

fn stats_from_group(group: &Document) -> ResponseStats {
    ResponseStats {
        total_responses: read_number(group, "totalResponses") as i64,
        average_score: read_number(group, "averageScore"),
        max_score: read_number(group, "maxScore") as i32,
        min_score: read_number(group, "minScore") as i32,
        average_completion_time: read_number(group, "averageCompletionTime"),
    }
}

#[async_trait]
impl FormResponseRepository for MongoFormResponseRepository {
    async fn create(&self, response: FormResponse) -> AppResult<FormResponse> {
        self.collection.insert_one(&response).await?;
        Ok(response)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<FormResponse>> {
        let response = self.collection.find_one(doc! { "id": id }).await?;
        Ok(response)
    }

    async fn find_by_form(&self, form_id: &str) -> AppResult<Vec<FormResponse>> {
        let responses = self
            .collection
            .find(doc! { "formId": form_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Response with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn delete_by_form(&self, form_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "formId": form_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn stats(&self, form_id: &str) -> AppResult<ResponseStats> {
        let pipeline = vec![
            doc! { "$match": { "formId": form_id } },
            doc! {
                "$group": {
                    "_id": Bson::Null,
                    "totalResponses": { "$sum": 1 },
                    "averageScore": { "$avg": "$totalScore" },
                    "maxScore": { "$max": "$totalScore" },
                    "minScore": { "$min": "$totalScore" },
                    "averageCompletionTime": { "$avg": "$completionTime" },
                }
            },
        ];

        let groups: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        Ok(groups
            .first()
            .map(stats_from_group)
            .unwrap_or_default())
    }
}
