use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionType},
        dto::request::{CreateQuestionRequest, ReorderQuestionsRequest, UpdateQuestionRequest},
    },
    repositories::{FormRepository, QuestionRepository},
    services::form_service::find_owned_form,
};

const REORDER_ATTEMPTS: usize = 3;

/// `ids` sorted by each question's `order`. Ids with no stored question keep their place at the end.
fn ids_by_order(ids: &[String], questions: &[Question]) -> Vec<String> {
    let mut ordered = ids.to_vec();
    ordered.sort_by_key(|id| {
        questions
            .iter()
            .find(|q| q.id == *id)
            .map_or(i32::MAX, |q| q.order)
    });
    ordered
}

pub struct QuestionService {
    forms: Arc<dyn FormRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(forms: Arc<dyn FormRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { forms, questions }
    }

    /// Creates the question and appends it to its form's question list.
    pub async fn create_question(
        &self,
        owner_id: &str,
        request: CreateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let form = find_owned_form(self.forms.as_ref(), &request.form_id, owner_id).await?;

        let now = Utc::now();
        let question = Question {
            id: Uuid::new_v4().to_string(),
            form_id: form.id.clone(),
            question_text: request.question_text,
            question_image: request.question_image,
            points: request.points,
            is_required: request.is_required.unwrap_or(true),
            order: request.order.unwrap_or(form.question_ids.len() as i32),
            kind: request.kind,
            created_at: Some(now),
            modified_at: Some(now),
        };
        question.validate_structure()?;

        let question = self.questions.create(question).await?;

        if let Err(err) = self.forms.push_question(&form.id, &question.id).await {
            if let Err(cleanup) = self.questions.delete(&question.id).await {
                log::warn!(
                    "Question '{}' was stored but not added to form '{}': {}",
                    question.id,
                    form.id,
                    cleanup
                );
            }
            return Err(err);
        }

        log::info!(
            "Question '{}' ({}) added to form '{}'",
            question.id,
            question.question_type(),
            question.form_id
        );
        Ok(question)
    }

    pub async fn list_by_form(&self, owner_id: &str, form_id: &str) -> AppResult<Vec<Question>> {
        let form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        self.questions.find_by_form(&form.id).await
    }

    pub async fn get_question(&self, owner_id: &str, question_id: &str) -> AppResult<Question> {
        let question = self.find_question(question_id).await?;
        find_owned_form(self.forms.as_ref(), &question.form_id, owner_id).await?;
        Ok(question)
    }

    /// Replaces a question's content. Its type, form and id never change.
    pub async fn update_question(
        &self,
        owner_id: &str,
        question_id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let existing = self.get_question(owner_id, question_id).await?;

        if request.kind.question_type() != existing.question_type() {
            return Err(AppError::ValidationError(format!(
                "Question type cannot change from '{}' to '{}'",
                existing.question_type(),
                request.kind.question_type()
            )));
        }

        let question = Question {
            question_text: request.question_text,
            question_image: request.question_image,
            points: request.points,
            is_required: request.is_required.unwrap_or(existing.is_required),
            order: request.order.unwrap_or(existing.order),
            kind: request.kind,
            modified_at: Some(Utc::now()),
            ..existing
        };
        question.validate_structure()?;

        self.questions.update(question).await
    }

    /// Drops the question from its form's question list, then deletes it.
    pub async fn delete_question(&self, owner_id: &str, question_id: &str) -> AppResult<()> {
        let question = self.find_question(question_id).await?;
        let form = find_owned_form(self.forms.as_ref(), &question.form_id, owner_id).await?;

        self.forms.pull_question(&form.id, &question.id).await?;
        self.questions.delete(&question.id).await?;

        log::info!("Question '{}' removed from form '{}'", question.id, question.form_id);
        Ok(())
    }

    /// Questions of one type across every form the caller owns.
    pub async fn list_by_type(
        &self,
        owner_id: &str,
        question_type: &str,
    ) -> AppResult<Vec<Question>> {
        let question_type = QuestionType::parse(question_type).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid question type '{}'", question_type))
        })?;

        let form_ids: Vec<String> = self
            .forms
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .map(|form| form.id)
            .collect();

        self.questions.find_by_type(&form_ids, question_type).await
    }

    /// Applies new `order` values, then mirrors them in the form's question list.
    pub async fn reorder_questions(
        &self,
        owner_id: &str,
        request: ReorderQuestionsRequest,
    ) -> AppResult<Vec<Question>> {
        request.validate()?;

        let form = find_owned_form(self.forms.as_ref(), &request.form_id, owner_id).await?;

        if let Some(stranger) = request
            .question_orders
            .iter()
            .find(|entry| !form.question_ids.contains(&entry.question_id))
        {
            return Err(AppError::ValidationError(format!(
                "Question '{}' does not belong to form '{}'",
                stranger.question_id, form.id
            )));
        }

        for entry in &request.question_orders {
            self.questions
                .update_order(&entry.question_id, entry.order)
                .await?;
        }

        let mut expected = form.question_ids;
        for _ in 0..REORDER_ATTEMPTS {
            let questions = self.questions.find_by_form(&form.id).await?;
            let ordered = ids_by_order(&expected, &questions);

            if self
                .forms
                .reorder_questions(&form.id, &expected, &ordered)
                .await?
            {
                return Ok(questions);
            }

            log::debug!("Question list of form '{}' moved during reorder, retrying", form.id);
            expected = find_owned_form(self.forms.as_ref(), &form.id, owner_id)
                .await?
                .question_ids;
        }

        Err(AppError::Conflict(format!(
            "Questions of form '{}' kept changing, try the reorder again",
            form.id
        )))
    }

    async fn find_question(&self, question_id: &str) -> AppResult<Question> {
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }
}
