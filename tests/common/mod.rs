#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;

use form_builder_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        form_response::{FormResponse, ResponseStats},
        Form, Question, QuestionType,
    },
    repositories::{FormRepository, FormResponseRepository, QuestionRepository},
};

pub const JWT_SECRET: &str = "integration_test_secret_that_is_long_enough";

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "form-builder-test".to_string(),
        mongo_max_pool_size: 2,
        mongo_timeout_secs: 1,
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 4000,
        jwt_secret: SecretString::from(JWT_SECRET),
        jwt_expiration_hours: 1,
        cors_allowed_origins: vec!["http://localhost:5173".to_string()],
        app_env: "test".to_string(),
    }
}

fn form_not_found(form_id: &str) -> AppError {
    AppError::NotFound(format!("Form with id '{}' not found", form_id))
}

pub struct InMemoryFormRepository {
    forms: Arc<RwLock<HashMap<String, Form>>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self {
            forms: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn create(&self, form: Form) -> AppResult<Form> {
        let mut forms = self.forms.write().await;
        if forms.contains_key(&form.id) {
            return Err(AppError::AlreadyExists(format!("Form '{}' exists", form.id)));
        }
        if forms.values().any(|f| f.shareable_link == form.shareable_link) {
            return Err(AppError::AlreadyExists(format!(
                "Shareable link '{}' is taken",
                form.shareable_link
            )));
        }
        forms.insert(form.id.clone(), form.clone());
        Ok(form)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Form>> {
        Ok(self.forms.read().await.get(id).cloned())
    }

    async fn find_published_by_link(&self, shareable_link: &str) -> AppResult<Option<Form>> {
        let forms = self.forms.read().await;
        Ok(forms
            .values()
            .find(|f| f.shareable_link == shareable_link && f.is_published)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Form>> {
        let forms = self.forms.read().await;
        let mut items: Vec<Form> = forms
            .values()
            .filter(|f| f.created_by == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update(&self, mut form: Form) -> AppResult<Form> {
        let mut forms = self.forms.write().await;
        let existing = forms.get_mut(&form.id).ok_or_else(|| form_not_found(&form.id))?;
        form.question_ids = existing.question_ids.clone();
        *existing = form.clone();
        Ok(form)
    }

    async fn push_question(&self, form_id: &str, question_id: &str) -> AppResult<()> {
        let mut forms = self.forms.write().await;
        let form = forms.get_mut(form_id).ok_or_else(|| form_not_found(form_id))?;
        form.question_ids.push(question_id.to_string());
        form.touch();
        Ok(())
    }

    async fn pull_question(&self, form_id: &str, question_id: &str) -> AppResult<()> {
        let mut forms = self.forms.write().await;
        let form = forms.get_mut(form_id).ok_or_else(|| form_not_found(form_id))?;
        form.question_ids.retain(|id| id != question_id);
        form.touch();
        Ok(())
    }

    async fn reorder_questions(
        &self,
        form_id: &str,
        expected: &[String],
        ordered: &[String],
    ) -> AppResult<bool> {
        let mut forms = self.forms.write().await;
        match forms.get_mut(form_id) {
            Some(form) if form.question_ids == expected => {
                form.question_ids = ordered.to_vec();
                form.touch();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.forms
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| form_not_found(id))
    }
}

pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn by_form_then_order(a: &Question, b: &Question) -> std::cmp::Ordering {
    a.form_id.cmp(&b.form_id).then(a.order.cmp(&b.order))
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        if questions.contains_key(&question.id) {
            return Err(AppError::AlreadyExists(format!(
                "Question '{}' exists",
                question.id
            )));
        }
        questions.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(ids.iter().filter_map(|id| questions.get(id).cloned()).collect())
    }

    async fn find_by_form(&self, form_id: &str) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<Question> = questions
            .values()
            .filter(|q| q.form_id == form_id)
            .cloned()
            .collect();
        items.sort_by(by_form_then_order);
        Ok(items)
    }

    async fn find_by_type(
        &self,
        form_ids: &[String],
        question_type: QuestionType,
    ) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<Question> = questions
            .values()
            .filter(|q| form_ids.contains(&q.form_id) && q.question_type() == question_type)
            .cloned()
            .collect();
        items.sort_by(by_form_then_order);
        Ok(items)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        match questions.get_mut(&question.id) {
            Some(existing) => {
                *existing = question.clone();
                Ok(question)
            }
            None => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            ))),
        }
    }

    async fn update_order(&self, id: &str, order: i32) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        let question = questions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;
        question.order = order;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.questions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    async fn delete_by_form(&self, form_id: &str) -> AppResult<u64> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|_, q| q.form_id != form_id);
        Ok((before - questions.len()) as u64)
    }
}

pub struct InMemoryFormResponseRepository {
    responses: Arc<RwLock<Vec<FormResponse>>>,
}

impl InMemoryFormResponseRepository {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl FormResponseRepository for InMemoryFormResponseRepository {
    async fn create(&self, response: FormResponse) -> AppResult<FormResponse> {
        let mut responses = self.responses.write().await;
        if responses.iter().any(|r| r.id == response.id) {
            return Err(AppError::AlreadyExists(format!(
                "Response '{}' exists",
                response.id
            )));
        }
        responses.push(response.clone());
        Ok(response)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<FormResponse>> {
        let responses = self.responses.read().await;
        Ok(responses.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_form(&self, form_id: &str) -> AppResult<Vec<FormResponse>> {
        let responses = self.responses.read().await;
        let mut items: Vec<FormResponse> = responses
            .iter()
            .filter(|r| r.form_id == form_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut responses = self.responses.write().await;
        let before = responses.len();
        responses.retain(|r| r.id != id);
        if responses.len() == before {
            return Err(AppError::NotFound(format!(
                "Response with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn delete_by_form(&self, form_id: &str) -> AppResult<u64> {
        let mut responses = self.responses.write().await;
        let before = responses.len();
        responses.retain(|r| r.form_id != form_id);
        Ok((before - responses.len()) as u64)
    }

    async fn stats(&self, form_id: &str) -> AppResult<ResponseStats> {
        let responses = self.find_by_form(form_id).await?;
        Ok(stats_of(&responses))
    }
}

/// Same aggregates the Mongo `$group` stage computes.
fn stats_of(responses: &[FormResponse]) -> ResponseStats {
    if responses.is_empty() {
        return ResponseStats::default();
    }
    let count = responses.len() as f64;
    let score_sum: i64 = responses.iter().map(|r| i64::from(r.total_score)).sum();
    let time_sum: i64 = responses.iter().map(|r| r.completion_time).sum();

    ResponseStats {
        total_responses: responses.len() as i64,
        average_score: score_sum as f64 / count,
        max_score: responses.iter().map(|r| r.total_score).max().unwrap_or(0),
        min_score: responses.iter().map(|r| r.total_score).min().unwrap_or(0),
        average_completion_time: time_sum as f64 / count,
    }
}

pub struct TestRepositories {
    pub forms: Arc<InMemoryFormRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub responses: Arc<InMemoryFormResponseRepository>,
}

impl TestRepositories {
    pub fn new() -> Self {
        Self {
            forms: Arc::new(InMemoryFormRepository::new()),
            questions: Arc::new(InMemoryQuestionRepository::new()),
            responses: Arc::new(InMemoryFormResponseRepository::new()),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::from_repositories(
            test_config(),
            self.forms.clone(),
            self.questions.clone(),
            self.responses.clone(),
        )
    }
}

/// Categorize body: `X` belongs in `cat-a`, `Y` in `cat-b`.
pub fn categorize_body() -> serde_json::Value {
    json!({
        "questionType": "categorize",
        "categories": [
            { "categoryId": "cat-a", "categoryName": "Fruit" },
            { "categoryId": "cat-b", "categoryName": "Vegetable" }
        ],
        "items": [
            { "itemId": "X", "itemText": "Apple", "correctCategory": "cat-a" },
            { "itemId": "Y", "itemText": "Carrot", "correctCategory": "cat-b" }
        ]
    })
}

/// Cloze body with one free-text blank `b1` answered "Tokyo".
pub fn cloze_body() -> serde_json::Value {
    json!({
        "questionType": "cloze",
        "passage": "The capital of Japan is [[blank-b1]].",
        "blanks": [
            { "blankId": "b1", "position": 0, "inputType": "text", "correctAnswer": "Tokyo" }
        ]
    })
}

/// Comprehension body: `sq1` mcq "Paris", `sq2` short answer "Seine".
pub fn comprehension_body() -> serde_json::Value {
    json!({
        "questionType": "comprehension",
        "passage": "Paris sits on the Seine.",
        "subQuestions": [
            {
                "subQuestionId": "sq1",
                "questionText": "Which city?",
                "questionType": "mcq",
                "options": [
                    { "optionText": "Paris", "isCorrect": true },
                    { "optionText": "Lyon", "isCorrect": false }
                ],
                "correctAnswer": "Paris",
                "points": 3
            },
            {
                "subQuestionId": "sq2",
                "questionText": "Which river?",
                "questionType": "short-answer",
                "correctAnswer": "Seine",
                "points": 4
            }
        ]
    })
}

/// Merges the common question fields into a type-specific body.
pub fn question_payload(
    form_id: &str,
    text: &str,
    points: i32,
    body: serde_json::Value,
) -> serde_json::Value {
    let mut payload = body;
    payload["formId"] = json!(form_id);
    payload["questionText"] = json!(text);
    payload["points"] = json!(points);
    payload
}

pub fn stored_question(id: &str, form_id: &str, points: i32, body: serde_json::Value) -> Question {
    let mut payload = question_payload(form_id, "Question", points, body);
    payload["id"] = json!(id);
    payload["order"] = json!(0);
    payload["isRequired"] = json!(true);
    serde_json::from_value(payload).expect("question fixture should deserialize")
}
