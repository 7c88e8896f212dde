use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::form::FormSettings;
use crate::models::domain::form_response::SubmittedAnswer;
use crate::models::domain::question::QuestionKind;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url)]
    pub header_image: Option<String>,

    pub settings: Option<FormSettings>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url)]
    pub header_image: Option<String>,

    pub settings: Option<FormSettings>,

    /// New question ordering; must be a permutation of the form's current questions.
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub form_id: String,

    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,

    #[validate(url)]
    pub question_image: Option<String>,

    #[validate(range(min = 0, max = 1000))]
    pub points: Option<i32>,

    pub is_required: Option<bool>,

    pub order: Option<i32>,

    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Full replacement of a question's editable content. The question type is fixed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,

    #[validate(url)]
    pub question_image: Option<String>,

    #[validate(range(min = 0, max = 1000))]
    pub points: Option<i32>,

    pub is_required: Option<bool>,

    pub order: Option<i32>,

    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderQuestionsRequest {
    #[validate(length(min = 1))]
    pub form_id: String,

    #[validate(length(min = 1))]
    pub question_orders: Vec<QuestionOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOrder {
    pub question_id: String,
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub answers: Vec<SubmittedAnswer>,

    #[validate(email(message = "Invalid email format"))]
    pub respondent_email: Option<String>,

    #[validate(length(max = 100))]
    pub respondent_name: Option<String>,

    #[validate(range(min = 0))]
    pub completion_time: Option<i64>,
}

/// Connection details of the submitting client, captured by the handler.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
