use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, to_document, Document},
    options::ReturnDocument,
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Form,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormRepository: Send + Sync {
    async fn create(&self, form: Form) -> AppResult<Form>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Form>>;
    async fn find_published_by_link(&self, shareable_link: &str) -> AppResult<Option<Form>>;
    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Form>>;
    /// Writes every field except the question list, and returns the stored form.
    async fn update(&self, form: Form) -> AppResult<Form>;
    /// Appends to the question list without touching concurrent edits.
    async fn push_question(&self, form_id: &str, question_id: &str) -> AppResult<()>;
    async fn pull_question(&self, form_id: &str, question_id: &str) -> AppResult<()>;
    /// Sets the question list only if it still equals `expected`. Returns whether it did.
    async fn reorder_questions(
        &self,
        form_id: &str,
        expected: &[String],
        ordered: &[String],
    ) -> AppResult<bool>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoFormRepository {
    collection: Collection<Form>,
}

impl MongoFormRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.forms();
        Self { collection }
    }

    async fn update_by_id(&self, form_id: &str, update: Document) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": form_id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(not_found(form_id));
        }
        Ok(())
    }
}

fn not_found(form_id: &str) -> AppError {
    AppError::NotFound(format!("Form with id '{}' not found", form_id))
}

#[async_trait]
impl FormRepository for MongoFormRepository {
    async fn create(&self, form: Form) -> AppResult<Form> {
        self.collection.insert_one(&form).await?;
        Ok(form)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Form>> {
        let form = self.collection.find_one(doc! { "id": id }).await?;
        Ok(form)
    }

    async fn find_published_by_link(&self, shareable_link: &str) -> AppResult<Option<Form>> {
        let form = self
            .collection
            .find_one(doc! { "shareableLink": shareable_link, "isPublished": true })
            .await?;
        Ok(form)
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Form>> {
        let forms = self
            .collection
            .find(doc! { "createdBy": owner_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(forms)
    }

    async fn update(&self, form: Form) -> AppResult<Form> {
        let mut fields = to_document(&form)?;
        fields.remove("id");
        fields.remove("questions");

        self.collection
            .find_one_and_update(doc! { "id": &form.id }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| not_found(&form.id))
    }

    async fn push_question(&self, form_id: &str, question_id: &str) -> AppResult<()> {
        let now = to_bson(&Utc::now())?;
        let update = doc! {
            "$push": { "questions": question_id },
            "$set": { "modifiedAt": now },
        };
        self.update_by_id(form_id, update).await
    }

    async fn pull_question(&self, form_id: &str, question_id: &str) -> AppResult<()> {
        let now = to_bson(&Utc::now())?;
        let update = doc! {
            "$pull": { "questions": question_id },
            "$set": { "modifiedAt": now },
        };
        self.update_by_id(form_id, update).await
    }

    async fn reorder_questions(
        &self,
        form_id: &str,
        expected: &[String],
        ordered: &[String],
    ) -> AppResult<bool> {
        let now = to_bson(&Utc::now())?;
        let result = self
            .collection
            .update_one(
                doc! { "id": form_id, "questions": expected.to_vec() },
                doc! {
                    "$set": {
                        "questions": ordered.to_vec(),
                        "modifiedAt": now,
                    }
                },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
