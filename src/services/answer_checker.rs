//! Per-type correctness predicates.
//!
//! Every checker is all-or-nothing and only walks the entries the respondent submitted.
//! A reference to an unknown item, blank or sub-question counts as a wrong answer.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::domain::answer::{CategorizeAnswer, ClozeAnswer, ComprehensionAnswer};
use crate::models::domain::question::{
    CategorizeQuestion, ClozeQuestion, ComprehensionQuestion, QuestionKind,
};

pub trait AnswerChecker {
    type Answer: DeserializeOwned;

    fn is_correct(&self, answer: &Self::Answer) -> bool;
}

impl AnswerChecker for CategorizeQuestion {
    type Answer = CategorizeAnswer;

    fn is_correct(&self, answer: &CategorizeAnswer) -> bool {
        check_categorize(self, answer)
    }
}

impl AnswerChecker for ClozeQuestion {
    type Answer = ClozeAnswer;

    fn is_correct(&self, answer: &ClozeAnswer) -> bool {
        check_cloze(self, answer)
    }
}

impl AnswerChecker for ComprehensionQuestion {
    type Answer = ComprehensionAnswer;

    fn is_correct(&self, answer: &ComprehensionAnswer) -> bool {
        check_comprehension(self, answer)
    }
}

pub fn check_categorize(question: &CategorizeQuestion, answer: &CategorizeAnswer) -> bool {
    answer.item_placements.iter().all(|placement| {
        question
            .item(&placement.item_id)
            .is_some_and(|item| item.correct_category == placement.category_id)
    })
}

pub fn check_cloze(question: &ClozeQuestion, answer: &ClozeAnswer) -> bool {
    answer.blank_answers.iter().all(|blank_answer| {
        question
            .blank(&blank_answer.blank_id)
            .is_some_and(|blank| eq_ignore_case(&blank.correct_answer, &blank_answer.user_answer))
    })
}

/// Sub-question points are not consulted; the caller awards the parent question's points.
pub fn check_comprehension(question: &ComprehensionQuestion, answer: &ComprehensionAnswer) -> bool {
    answer.sub_answers.iter().all(|sub_answer| {
        question
            .sub_question(&sub_answer.sub_question_id)
            .is_some_and(|sq| eq_ignore_case(&sq.correct_answer, &sub_answer.user_answer))
    })
}

/// Parses the raw payload for the stored question's type and grades it.
/// A payload of the wrong shape is graded as incorrect.
pub fn check_answer(kind: &QuestionKind, raw: &serde_json::Value) -> bool {
    match kind {
        QuestionKind::Categorize(q) => grade(q, raw),
        QuestionKind::Cloze(q) => grade(q, raw),
        QuestionKind::Comprehension(q) => grade(q, raw),
    }
}

fn grade<Q: AnswerChecker>(question: &Q, raw: &serde_json::Value) -> bool {
    match Q::Answer::deserialize(raw) {
        Ok(answer) => question.is_correct(&answer),
        Err(err) => {
            log::debug!("Unparsable answer payload graded as incorrect: {}", err);
            false
        }
    }
}

fn eq_ignore_case(expected: &str, given: &str) -> bool {
    expected.to_lowercase() == given.to_lowercase()
}
