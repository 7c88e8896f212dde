use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            form_response::{NewFormResponse, ResponseStats},
            FormResponse, PublishedForm,
        },
        dto::{
            request::{RequestMeta, SubmitResponseRequest},
            response::SubmissionResult,
        },
    },
    repositories::{FormRepository, FormResponseRepository, QuestionRepository},
    services::{
        form_service::{find_owned_form, load_published_form},
        scoring_service::ScoringService,
    },
};

pub struct ResponseService {
    forms: Arc<dyn FormRepository>,
    questions: Arc<dyn QuestionRepository>,
    responses: Arc<dyn FormResponseRepository>,
}

impl ResponseService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        questions: Arc<dyn QuestionRepository>,
        responses: Arc<dyn FormResponseRepository>,
    ) -> Self {
        Self {
            forms,
            questions,
            responses,
        }
    }

    /// Grades and stores one submission against the published form behind `shareable_link`.
    pub async fn submit(
        &self,
        shareable_link: &str,
        request: SubmitResponseRequest,
        meta: RequestMeta,
    ) -> AppResult<SubmissionResult> {
        request.validate()?;

        let published =
            load_published_form(self.forms.as_ref(), self.questions.as_ref(), shareable_link)
                .await?;

        enforce_settings(&published, &request)?;

        let sheet = ScoringService::score(&published, &request.answers);
        let percentage = sheet.percentage();
        let show_results = published.form().settings.show_results;

        let response = FormResponse::from(NewFormResponse {
            form_id: published.form().id.clone(),
            respondent_email: request.respondent_email,
            respondent_name: request.respondent_name,
            answers: sheet.scored_answers,
            total_score: sheet.total_score,
            max_possible_score: sheet.max_possible_score,
            completion_time: request.completion_time,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        });
        let response = self.responses.create(response).await?;

        log::info!(
            "Response '{}' recorded for form '{}': {}/{}",
            response.id,
            response.form_id,
            response.total_score,
            response.max_possible_score
        );

        Ok(SubmissionResult {
            response_id: response.id,
            total_score: response.total_score,
            max_possible_score: response.max_possible_score,
            percentage,
            answers: show_results.then_some(response.answers),
        })
    }

    pub async fn list_for_form(
        &self,
        owner_id: &str,
        form_id: &str,
    ) -> AppResult<Vec<FormResponse>> {
        let form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        self.responses.find_by_form(&form.id).await
    }

    pub async fn get_response(&self, owner_id: &str, response_id: &str) -> AppResult<FormResponse> {
        let response = self
            .responses
            .find_by_id(response_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Response not found".to_string()))?;

        self.ensure_response_owner(&response, owner_id).await?;
        Ok(response)
    }

    pub async fn delete_response(&self, owner_id: &str, response_id: &str) -> AppResult<()> {
        let response = self.get_response(owner_id, response_id).await?;
        self.responses.delete(&response.id).await?;

        log::info!("Response '{}' deleted", response.id);
        Ok(())
    }

    pub async fn stats(&self, owner_id: &str, form_id: &str) -> AppResult<ResponseStats> {
        let form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        self.responses.stats(&form.id).await
    }

    /// A response exists but belongs to someone else's form: that is a 403, not a 404.
    async fn ensure_response_owner(&self, response: &FormResponse, owner_id: &str) -> AppResult<()> {
        let owned = self
            .forms
            .find_by_id(&response.form_id)
            .await?
            .is_some_and(|form| form.is_owned_by(owner_id));

        if !owned {
            return Err(AppError::Forbidden("Unauthorized access".to_string()));
        }
        Ok(())
    }
}

fn enforce_settings(form: &PublishedForm, request: &SubmitResponseRequest) -> AppResult<()> {
    let settings = &form.form().settings;

    let has_email = request
        .respondent_email
        .as_deref()
        .is_some_and(|email| !email.trim().is_empty());
    if settings.collect_email && !has_email {
        return Err(AppError::ValidationError(
            "This form requires an email address".to_string(),
        ));
    }

    let has_name = request
        .respondent_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !settings.allow_anonymous && !has_name {
        return Err(AppError::ValidationError(
            "This form does not accept anonymous responses".to_string(),
        ));
    }
    Ok(())
}
