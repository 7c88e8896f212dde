use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::QuestionType;

pub const ANONYMOUS_RESPONDENT: &str = "Anonymous";

/// One answer as posted by the form player. `answer` keeps the raw per-type payload.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub answer: serde_json::Value,
    #[serde(default)]
    pub time_spent: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAnswer {
    pub question_id: String,
    pub question_type: QuestionType,
    pub answer: serde_json::Value,
    pub time_spent: i64,
    pub is_correct: bool,
    pub points_earned: i32,
}

impl ScoredAnswer {
    pub fn from_submitted(submitted: &SubmittedAnswer, is_correct: bool, points_earned: i32) -> Self {
        ScoredAnswer {
            question_id: submitted.question_id.clone(),
            question_type: submitted.question_type,
            answer: submitted.answer.clone(),
            time_spent: submitted.time_spent,
            is_correct,
            points_earned,
        }
    }
}

/// Append-only record of a single submission.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub form_id: String,
    pub respondent_email: Option<String>,
    pub respondent_name: String,
    pub answers: Vec<ScoredAnswer>,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub completion_time: i64, // milliseconds
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FormResponse {
    pub fn percentage(&self) -> i32 {
        crate::services::scoring_service::percentage(self.total_score, self.max_possible_score)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NewFormResponse {
    pub form_id: String,
    pub respondent_email: Option<String>,
    pub respondent_name: Option<String>,
    pub answers: Vec<ScoredAnswer>,
    pub total_score: i32,
    pub max_possible_score: i32,
    pub completion_time: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<NewFormResponse> for FormResponse {
    fn from(new: NewFormResponse) -> Self {
        FormResponse {
            id: Uuid::new_v4().to_string(),
            form_id: new.form_id,
            respondent_email: new.respondent_email.filter(|e| !e.trim().is_empty()),
            respondent_name: new
                .respondent_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_RESPONDENT.to_string()),
            answers: new.answers,
            total_score: new.total_score,
            max_possible_score: new.max_possible_score,
            completion_time: new.completion_time.unwrap_or(0).max(0),
            ip_address: new.ip_address,
            user_agent: new.user_agent,
            created_at: Utc::now(),
        }
    }
}

/// Aggregates over all responses of one form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, async_graphql::SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStats {
    pub total_responses: i64,
    pub average_score: f64,
    pub max_score: i32,
    pub min_score: i32,
    pub average_completion_time: f64,
}
