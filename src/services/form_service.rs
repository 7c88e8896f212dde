use std::collections::HashSet;
use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Form, PublishedForm},
        dto::{
            form_dto::{FormDto, PublicFormView},
            request::{CreateFormRequest, UpdateFormRequest},
            response::PublishFormResult,
        },
    },
    repositories::{FormRepository, FormResponseRepository, QuestionRepository},
};

/// Loads a form and checks that `owner_id` created it. Foreign forms read as missing.
pub(crate) async fn find_owned_form(
    forms: &dyn FormRepository,
    form_id: &str,
    owner_id: &str,
) -> AppResult<Form> {
    forms
        .find_by_id(form_id)
        .await?
        .filter(|form| form.is_owned_by(owner_id))
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))
}

/// Snapshot used for taking and scoring a form. Unknown links and drafts both read as missing.
pub(crate) async fn load_published_form(
    forms: &dyn FormRepository,
    questions: &dyn QuestionRepository,
    shareable_link: &str,
) -> AppResult<PublishedForm> {
    let form = forms
        .find_published_by_link(shareable_link)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found or not published".to_string()))?;

    let questions = questions.find_by_ids(&form.question_ids).await?;
    PublishedForm::new(form, questions)
}

pub struct FormService {
    forms: Arc<dyn FormRepository>,
    questions: Arc<dyn QuestionRepository>,
    responses: Arc<dyn FormResponseRepository>,
}

impl FormService {
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

    pub async fn create_form(&self, owner_id: &str, request: CreateFormRequest) -> AppResult<Form> {
        request.validate()?;

        let mut form = Form::new_draft(&request.title, owner_id);
        form.description = request.description;
        form.header_image = request.header_image;
        form.settings = request.settings.unwrap_or_default();

        let form = self.forms.create(form).await?;
        log::info!("Form '{}' created by '{}'", form.id, owner_id);
        Ok(form)
    }

    /// Bare forms owned by the caller, newest first.
    pub async fn list_owned_forms(&self, owner_id: &str) -> AppResult<Vec<Form>> {
        self.forms.list_by_owner(owner_id).await
    }

    pub async fn list_forms(&self, owner_id: &str) -> AppResult<Vec<FormDto>> {
        let forms = self.forms.list_by_owner(owner_id).await?;

        let mut dtos = Vec::with_capacity(forms.len());
        for form in forms {
            dtos.push(self.resolve(form).await?);
        }
        Ok(dtos)
    }

    pub async fn get_form(&self, owner_id: &str, form_id: &str) -> AppResult<FormDto> {
        let form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        self.resolve(form).await
    }

    pub async fn update_form(
        &self,
        owner_id: &str,
        form_id: &str,
        request: UpdateFormRequest,
    ) -> AppResult<FormDto> {
        request.validate()?;

        let mut form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;

        if let Some(title) = request.title {
            form.title = title;
        }
        if let Some(description) = request.description {
            form.description = Some(description);
        }
        if let Some(header_image) = request.header_image {
            form.header_image = Some(header_image);
        }
        if let Some(settings) = request.settings {
            form.settings = settings;
        }
        if let Some(ordered) = &request.questions {
            ensure_same_questions(&form.question_ids, ordered)?;
            if !self
                .forms
                .reorder_questions(&form.id, &form.question_ids, ordered)
                .await?
            {
                return Err(AppError::Conflict(
                    "Form questions changed since they were read".to_string(),
                ));
            }
        }
        form.touch();

        let form = self.forms.update(form).await?;
        self.resolve(form).await
    }

    /// Removes the form together with its questions and collected responses.
    pub async fn delete_form(&self, owner_id: &str, form_id: &str) -> AppResult<()> {
        let form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;

        let questions = self.questions.delete_by_form(&form.id).await?;
        let responses = self.responses.delete_by_form(&form.id).await?;
        self.forms.delete(&form.id).await?;

        log::info!(
            "Form '{}' deleted with {} questions and {} responses",
            form.id,
            questions,
            responses
        );
        Ok(())
    }

    pub async fn publish_form(&self, owner_id: &str, form_id: &str) -> AppResult<PublishFormResult> {
        let mut form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        form.publish();
        let form = self.forms.update(form).await?;

        log::info!("Form '{}' published as '{}'", form.id, form.shareable_link);
        Ok(PublishFormResult {
            shareable_link: form.shareable_link.clone(),
            form,
        })
    }

    pub async fn unpublish_form(&self, owner_id: &str, form_id: &str) -> AppResult<Form> {
        let mut form = find_owned_form(self.forms.as_ref(), form_id, owner_id).await?;
        form.unpublish();
        let form = self.forms.update(form).await?;

        log::info!("Form '{}' unpublished", form.id);
        Ok(form)
    }

    /// The form as a respondent sees it, without any answer keys.
    pub async fn get_public_form(&self, shareable_link: &str) -> AppResult<PublicFormView> {
        let published =
            load_published_form(self.forms.as_ref(), self.questions.as_ref(), shareable_link)
                .await?;
        let form = published.form().clone();
        let questions = published.questions().to_vec();
        Ok(PublicFormView::from_parts(form, questions))
    }

    async fn resolve(&self, form: Form) -> AppResult<FormDto> {
        let questions = self.questions.find_by_ids(&form.question_ids).await?;
        Ok(FormDto::from_parts(form, questions))
    }
}

/// A new ordering may only permute the questions the form already has.
fn ensure_same_questions(current: &[String], proposed: &[String]) -> AppResult<()> {
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
    let proposed_set: HashSet<&str> = proposed.iter().map(String::as_str).collect();

    if proposed.len() != current.len() || proposed_set != current_set {
        return Err(AppError::ValidationError(
            "questions must list exactly the form's existing question ids".to_string(),
        ));
    }
    Ok(())
}
