use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Form, FormResponse, ScoredAnswer};

/// Envelope for every successful REST body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub response_id: String,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub percentage: i32,
    /// Only present when the form's `showResults` setting is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<ScoredAnswer>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishFormResult {
    pub shareable_link: String,
    pub form: Form,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub shareable_link: String,
    pub question_count: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Form> for FormSummary {
    fn from(form: &Form) -> Self {
        FormSummary {
            id: form.id.clone(),
            title: form.title.clone(),
            description: form.description.clone(),
            is_published: form.is_published,
            shareable_link: form.shareable_link.clone(),
            question_count: form.question_ids.len() as i32,
            created_at: form.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub id: String,
    pub respondent_name: String,
    pub respondent_email: Option<String>,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub percentage: i32,
    pub correct_answers: i32,
    pub completion_time: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&FormResponse> for ResponseSummary {
    fn from(response: &FormResponse) -> Self {
        ResponseSummary {
            id: response.id.clone(),
            respondent_name: response.respondent_name.clone(),
            respondent_email: response.respondent_email.clone(),
            total_score: response.total_score,
            max_possible_score: response.max_possible_score,
            percentage: response.percentage(),
            correct_answers: response.answers.iter().filter(|a| a.is_correct).count() as i32,
            completion_time: response.completion_time,
            created_at: response.created_at,
        }
    }
}
