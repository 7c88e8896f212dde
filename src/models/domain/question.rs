use std::collections::HashSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

static BLANK_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[blank-([^\]]+)\]\]").expect("BLANK_MARKER is a valid regex pattern")
});

pub const DEFAULT_POINTS: i32 = 1;
pub const MAX_POINTS: i32 = 1000;

/// A question stored in the `questions` collection.
///
/// The per-type payload is flattened next to the shared fields and discriminated by
/// `questionType`, so a stored document reads the same as the form editor sends it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub form_id: String,
    pub question_text: String,
    #[serde(default)]
    pub question_image: Option<String>,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(default = "default_true")]
    pub is_required: bool,
    pub order: i32,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "questionType", rename_all = "lowercase")]
pub enum QuestionKind {
    Categorize(CategorizeQuestion),
    Cloze(ClozeQuestion),
    Comprehension(ComprehensionQuestion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Categorize,
    Cloze,
    Comprehension,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Categorize => "categorize",
            QuestionType::Cloze => "cloze",
            QuestionType::Comprehension => "comprehension",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "categorize" => Some(QuestionType::Categorize),
            "cloze" => Some(QuestionType::Cloze),
            "comprehension" => Some(QuestionType::Comprehension),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeQuestion {
    pub categories: Vec<Category>,
    pub items: Vec<CategorizeItem>,
    #[serde(default = "default_categorize_instructions")]
    pub instructions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeItem {
    pub item_id: String,
    pub item_text: String,
    pub correct_category: String,
    #[serde(default)]
    pub item_image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeQuestion {
    pub passage: String,
    pub blanks: Vec<Blank>,
    #[serde(default = "default_cloze_instructions")]
    pub instructions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    pub blank_id: String,
    pub position: i32,
    #[serde(default)]
    pub input_type: BlankInputType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankInputType {
    #[default]
    Dropdown,
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionQuestion {
    pub passage: String,
    #[serde(default)]
    pub passage_image: Option<String>,
    pub sub_questions: Vec<SubQuestion>,
    #[serde(default = "default_comprehension_instructions")]
    pub instructions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuestion {
    pub sub_question_id: String,
    pub question_text: String,
    pub question_type: SubQuestionType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
    #[serde(default = "default_sub_question_points")]
    pub points: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubQuestionType {
    Mcq,
    ShortAnswer,
    TrueFalse,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Points awarded for a correct answer. Unset or zero counts as one point.
    pub fn effective_points(&self) -> i32 {
        match self.points {
            Some(points) if points > 0 => points,
            _ => DEFAULT_POINTS,
        }
    }

    pub fn validate_structure(&self) -> AppResult<()> {
        if self.question_text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text is required".to_string(),
            ));
        }
        if self.question_text.chars().count() > 1000 {
            return Err(AppError::ValidationError(
                "Question text must be at most 1000 characters".to_string(),
            ));
        }
        if matches!(self.points, Some(points) if !(0..=MAX_POINTS).contains(&points)) {
            return Err(AppError::ValidationError(format!(
                "Points must be between 0 and {}",
                MAX_POINTS
            )));
        }
        self.kind.validate_structure()
    }
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Categorize(_) => QuestionType::Categorize,
            QuestionKind::Cloze(_) => QuestionType::Cloze,
            QuestionKind::Comprehension(_) => QuestionType::Comprehension,
        }
    }

    pub fn validate_structure(&self) -> AppResult<()> {
        match self {
            QuestionKind::Categorize(q) => q.validate_structure(),
            QuestionKind::Cloze(q) => q.validate_structure(),
            QuestionKind::Comprehension(q) => q.validate_structure(),
        }
    }
}

impl CategorizeQuestion {
    pub fn item(&self, item_id: &str) -> Option<&CategorizeItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    fn validate_structure(&self) -> AppResult<()> {
        if self.categories.is_empty() {
            return Err(AppError::ValidationError(
                "Categorize question needs at least one category".to_string(),
            ));
        }
        ensure_unique(self.categories.iter().map(|c| c.category_id.as_str()), "category")?;
        ensure_unique(self.items.iter().map(|i| i.item_id.as_str()), "item")?;

        let known: HashSet<&str> = self
            .categories
            .iter()
            .map(|c| c.category_id.as_str())
            .collect();

        if let Some(orphan) = self
            .items
            .iter()
            .find(|item| !known.contains(item.correct_category.as_str()))
        {
            return Err(AppError::ValidationError(format!(
                "Item '{}' references unknown category '{}'",
                orphan.item_id, orphan.correct_category
            )));
        }
        Ok(())
    }
}

impl ClozeQuestion {
    pub fn blank(&self, blank_id: &str) -> Option<&Blank> {
        self.blanks.iter().find(|blank| blank.blank_id == blank_id)
    }

    /// Blank ids referenced by `[[blank-<id>]]` markers, in passage order.
    pub fn marker_ids(&self) -> Vec<&str> {
        BLANK_MARKER
            .captures_iter(&self.passage)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    fn validate_structure(&self) -> AppResult<()> {
        if self.passage.chars().count() > 2000 {
            return Err(AppError::ValidationError(
                "Cloze passage must be at most 2000 characters".to_string(),
            ));
        }
        if self.blanks.is_empty() {
            return Err(AppError::ValidationError(
                "Cloze question needs at least one blank".to_string(),
            ));
        }
        ensure_unique(self.blanks.iter().map(|b| b.blank_id.as_str()), "blank")?;

        let markers: HashSet<&str> = self.marker_ids().into_iter().collect();
        for blank in &self.blanks {
            if !markers.contains(blank.blank_id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Blank '{}' has no [[blank-{}]] marker in the passage",
                    blank.blank_id, blank.blank_id
                )));
            }
            if blank.input_type == BlankInputType::Dropdown {
                let has_matching_option = blank
                    .options
                    .iter()
                    .any(|o| o.is_correct && o.option_text == blank.correct_answer);
                if !has_matching_option {
                    return Err(AppError::ValidationError(format!(
                        "Dropdown blank '{}' needs a correct option matching its answer",
                        blank.blank_id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ComprehensionQuestion {
    pub fn sub_question(&self, sub_question_id: &str) -> Option<&SubQuestion> {
        self.sub_questions
            .iter()
            .find(|sq| sq.sub_question_id == sub_question_id)
    }

    fn validate_structure(&self) -> AppResult<()> {
        if self.passage.chars().count() > 5000 {
            return Err(AppError::ValidationError(
                "Comprehension passage must be at most 5000 characters".to_string(),
            ));
        }
        if self.sub_questions.is_empty() {
            return Err(AppError::ValidationError(
                "Comprehension question needs at least one sub-question".to_string(),
            ));
        }
        ensure_unique(
            self.sub_questions.iter().map(|sq| sq.sub_question_id.as_str()),
            "sub-question",
        )?;

        if let Some(sq) = self.sub_questions.iter().find(|sq| {
            sq.question_type != SubQuestionType::ShortAnswer && sq.options.is_empty()
        }) {
            return Err(AppError::ValidationError(format!(
                "Sub-question '{}' needs options",
                sq.sub_question_id
            )));
        }
        Ok(())
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>, what: &str) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::ValidationError(format!(
                "Duplicate {} id '{}'",
                what, id
            )));
        }
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_sub_question_points() -> i32 {
    DEFAULT_POINTS
}

fn default_placeholder() -> String {
    "Enter your answer".to_string()
}

fn default_categorize_instructions() -> String {
    "Drag and drop items into the correct categories".to_string()
}

fn default_cloze_instructions() -> String {
    "Fill in the blanks with the correct answers".to_string()
}

fn default_comprehension_instructions() -> String {
    "Read the passage carefully and answer the questions below".to_string()
}
