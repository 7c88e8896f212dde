use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::form::{order_questions, Form, FormSettings};
use crate::models::domain::question::{
    BlankInputType, CategorizeItem, Category, Question, QuestionKind, SubQuestionType,
};

/// Owner view of a form with its questions resolved in form order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub header_image: Option<String>,
    pub questions: Vec<Question>,
    pub created_by: String,
    pub is_published: bool,
    pub shareable_link: String,
    pub settings: FormSettings,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl FormDto {
    pub fn from_parts(form: Form, questions: Vec<Question>) -> Self {
        let questions = order_questions(&form, questions);
        FormDto {
            id: form.id,
            title: form.title,
            description: form.description,
            header_image: form.header_image,
            questions,
            created_by: form.created_by,
            is_published: form.is_published,
            shareable_link: form.shareable_link,
            settings: form.settings,
            created_at: form.created_at,
            modified_at: form.modified_at,
        }
    }
}

/// What a respondent sees: every piece of correct-answer data is left out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFormView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub header_image: Option<String>,
    pub shareable_link: String,
    pub settings: FormSettings,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub question_text: String,
    pub question_image: Option<String>,
    pub points: i32,
    pub is_required: bool,
    pub order: i32,
    #[serde(flatten)]
    pub kind: PublicQuestionKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "questionType", rename_all = "lowercase")]
pub enum PublicQuestionKind {
    #[serde(rename_all = "camelCase")]
    Categorize {
        categories: Vec<Category>,
        items: Vec<PublicItem>,
        instructions: String,
    },
    #[serde(rename_all = "camelCase")]
    Cloze {
        passage: String,
        blanks: Vec<PublicBlank>,
        instructions: String,
    },
    #[serde(rename_all = "camelCase")]
    Comprehension {
        passage: String,
        passage_image: Option<String>,
        sub_questions: Vec<PublicSubQuestion>,
        instructions: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicItem {
    pub item_id: String,
    pub item_text: String,
    pub item_image: Option<String>,
}

impl From<&CategorizeItem> for PublicItem {
    fn from(item: &CategorizeItem) -> Self {
        PublicItem {
            item_id: item.item_id.clone(),
            item_text: item.item_text.clone(),
            item_image: item.item_image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlank {
    pub blank_id: String,
    pub position: i32,
    pub input_type: BlankInputType,
    pub options: Vec<String>,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSubQuestion {
    pub sub_question_id: String,
    pub question_text: String,
    pub question_type: SubQuestionType,
    pub options: Vec<String>,
    pub points: i32,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        let kind = match &question.kind {
            QuestionKind::Categorize(q) => PublicQuestionKind::Categorize {
                categories: q.categories.clone(),
                items: q.items.iter().map(PublicItem::from).collect(),
                instructions: q.instructions.clone(),
            },
            QuestionKind::Cloze(q) => PublicQuestionKind::Cloze {
                passage: q.passage.clone(),
                blanks: q
                    .blanks
                    .iter()
                    .map(|b| PublicBlank {
                        blank_id: b.blank_id.clone(),
                        position: b.position,
                        input_type: b.input_type,
                        options: b.options.iter().map(|o| o.option_text.clone()).collect(),
                        placeholder: b.placeholder.clone(),
                    })
                    .collect(),
                instructions: q.instructions.clone(),
            },
            QuestionKind::Comprehension(q) => PublicQuestionKind::Comprehension {
                passage: q.passage.clone(),
                passage_image: q.passage_image.clone(),
                sub_questions: q
                    .sub_questions
                    .iter()
                    .map(|sq| PublicSubQuestion {
                        sub_question_id: sq.sub_question_id.clone(),
                        question_text: sq.question_text.clone(),
                        question_type: sq.question_type,
                        options: sq.options.iter().map(|o| o.option_text.clone()).collect(),
                        points: sq.points,
                    })
                    .collect(),
                instructions: q.instructions.clone(),
            },
        };

        PublicQuestion {
            id: question.id.clone(),
            question_text: question.question_text.clone(),
            question_image: question.question_image.clone(),
            points: question.effective_points(),
            is_required: question.is_required,
            order: question.order,
            kind,
        }
    }
}

impl PublicFormView {
    pub fn from_parts(form: Form, questions: Vec<Question>) -> Self {
        let questions = order_questions(&form, questions);
        PublicFormView {
            id: form.id,
            title: form.title,
            description: form.description,
            header_image: form.header_image,
            shareable_link: form.shareable_link,
            settings: form.settings,
            questions: questions.iter().map(PublicQuestion::from).collect(),
        }
    }
}
