use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        FormRepository, FormResponseRepository, MongoFormRepository, MongoFormResponseRepository,
        MongoQuestionRepository, QuestionRepository,
    },
    services::{FormService, QuestionService, ResponseService},
};

#[derive(Clone)]
pub struct AppState {
    pub form_service: Arc<FormService>,
    pub question_service: Arc<QuestionService>,
    pub response_service: Arc<ResponseService>,
    pub config: Arc<Config>,
    /// Absent when the state is assembled from in-memory repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        db.ensure_indexes().await?;

        let form_repository = Arc::new(MongoFormRepository::new(&db));
        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        let response_repository = Arc::new(MongoFormResponseRepository::new(&db));

        let mut state = Self::from_repositories(
            config,
            form_repository,
            question_repository,
            response_repository,
        );
        state.db = Some(db);
        Ok(state)
    }

    pub fn from_repositories(
        config: Config,
        forms: Arc<dyn FormRepository>,
        questions: Arc<dyn QuestionRepository>,
        responses: Arc<dyn FormResponseRepository>,
    ) -> Self {
        let form_service = Arc::new(FormService::new(
            forms.clone(),
            questions.clone(),
            responses.clone(),
        ));
        let question_service = Arc::new(QuestionService::new(forms.clone(), questions.clone()));
        let response_service = Arc::new(ResponseService::new(forms, questions, responses));

        Self {
            form_service,
            question_service,
            response_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
