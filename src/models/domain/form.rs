use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub header_image: Option<String>,
    /// Question ids in display order.
    #[serde(rename = "questions", default)]
    pub question_ids: Vec<String>,
    pub created_by: String,
    pub is_published: bool,
    pub shareable_link: String, // generated once, never reused
    #[serde(default)]
    pub settings: FormSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub allow_anonymous: bool,
    pub collect_email: bool,
    pub show_results: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            collect_email: false,
            show_results: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Draft,
    Published,
}

impl Form {
    pub fn new_draft(title: &str, created_by: &str) -> Self {
        let now = Utc::now();
        Form {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            header_image: None,
            question_ids: Vec::new(),
            created_by: created_by.to_string(),
            is_published: false,
            shareable_link: Uuid::new_v4().to_string(),
            settings: FormSettings::default(),
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn status(&self) -> FormStatus {
        if self.is_published {
            FormStatus::Published
        } else {
            FormStatus::Draft
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }

    pub fn publish(&mut self) {
        self.is_published = true;
        self.touch();
    }

    pub fn unpublish(&mut self) {
        self.is_published = false;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

/// A published form with its questions resolved in form order.
///
/// Only this snapshot is accepted by the scorer, so draft forms can never be graded.
#[derive(Clone, Debug)]
pub struct PublishedForm {
    form: Form,
    questions: Vec<Question>,
}

impl PublishedForm {
    pub fn new(form: Form, questions: Vec<Question>) -> AppResult<Self> {
        if form.status() != FormStatus::Published {
            return Err(AppError::NotFound(
                "Form not found or not published".to_string(),
            ));
        }
        let questions = order_questions(&form, questions);
        Ok(Self { form, questions })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// Sorts questions by their position in `form.question_ids`, dropping any the form
/// no longer lists.
pub fn order_questions(form: &Form, questions: Vec<Question>) -> Vec<Question> {
    let mut ordered: Vec<(usize, Question)> = questions
        .into_iter()
        .filter_map(|q| {
            form.question_ids
                .iter()
                .position(|id| *id == q.id)
                .map(|idx| (idx, q))
        })
        .collect();
    ordered.sort_by_key(|(idx, _)| *idx);
    ordered.into_iter().map(|(_, q)| q).collect()
}
