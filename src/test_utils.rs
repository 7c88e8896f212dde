#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::form::Form;
    use crate::models::domain::form_response::SubmittedAnswer;
    use crate::models::domain::question::{
        AnswerOption, Blank, BlankInputType, CategorizeItem, CategorizeQuestion, Category,
        ClozeQuestion, ComprehensionQuestion, Question, QuestionKind, QuestionType, SubQuestion,
        SubQuestionType,
    };

    pub const OWNER_ID: &str = "user-1";
    pub const FORM_ID: &str = "form-1";

    fn question(id: &str, text: &str, points: i32, kind: QuestionKind) -> Question {
        Question {
            id: id.to_string(),
            form_id: FORM_ID.to_string(),
            question_text: text.to_string(),
            question_image: None,
            points: Some(points),
            is_required: true,
            order: 0,
            kind,
            created_at: None,
            modified_at: None,
        }
    }

    /// Two categories `cat-a`/`cat-b`; item `X` belongs in `cat-a`, `Y` in `cat-b`.
    pub fn categorize_question(id: &str, points: i32) -> Question {
        question(
            id,
            "Sort the items",
            points,
            QuestionKind::Categorize(CategorizeQuestion {
                categories: vec![
                    Category {
                        category_id: "cat-a".to_string(),
                        category_name: "Category A".to_string(),
                    },
                    Category {
                        category_id: "cat-b".to_string(),
                        category_name: "Category B".to_string(),
                    },
                ],
                items: vec![
                    CategorizeItem {
                        item_id: "X".to_string(),
                        item_text: "Item X".to_string(),
                        correct_category: "cat-a".to_string(),
                        item_image: None,
                    },
                    CategorizeItem {
                        item_id: "Y".to_string(),
                        item_text: "Item Y".to_string(),
                        correct_category: "cat-b".to_string(),
                        item_image: None,
                    },
                ],
                instructions: "Drag and drop items into the correct categories".to_string(),
            }),
        )
    }

    /// A single free-text blank `b1`.
    pub fn cloze_question(id: &str, correct_answer: &str, points: i32) -> Question {
        question(
            id,
            "Fill in the capital",
            points,
            QuestionKind::Cloze(ClozeQuestion {
                passage: "The capital of Japan is [[blank-b1]].".to_string(),
                blanks: vec![Blank {
                    blank_id: "b1".to_string(),
                    position: 0,
                    input_type: BlankInputType::Text,
                    options: vec![],
                    correct_answer: correct_answer.to_string(),
                    placeholder: "Enter your answer".to_string(),
                }],
                instructions: "Fill in the blanks with the correct answers".to_string(),
            }),
        )
    }

    /// `sq1` is an mcq answered "Paris", `sq2` a short answer "Seine".
    pub fn comprehension_question(id: &str, points: i32) -> Question {
        question(
            id,
            "Read about the city",
            points,
            QuestionKind::Comprehension(ComprehensionQuestion {
                passage: "The river flowing through the French capital is well known.".to_string(),
                passage_image: None,
                sub_questions: vec![
                    SubQuestion {
                        sub_question_id: "sq1".to_string(),
                        question_text: "Which city?".to_string(),
                        question_type: SubQuestionType::Mcq,
                        options: vec![
                            AnswerOption { option_text: "Paris".to_string(), is_correct: true },
                            AnswerOption { option_text: "Lyon".to_string(), is_correct: false },
                        ],
                        correct_answer: "Paris".to_string(),
                        points: 3,
                    },
                    SubQuestion {
                        sub_question_id: "sq2".to_string(),
                        question_text: "Which river?".to_string(),
                        question_type: SubQuestionType::ShortAnswer,
                        options: vec![],
                        correct_answer: "Seine".to_string(),
                        points: 4,
                    },
                ],
                instructions: "Read the passage carefully and answer the questions below"
                    .to_string(),
            }),
        )
    }

    /// A published form owned by [`OWNER_ID`] listing `questions` in the given order.
    pub fn published_form(questions: &[Question]) -> Form {
        let mut form = Form::new_draft("Geography quiz", OWNER_ID);
        form.id = FORM_ID.to_string();
        form.question_ids = questions.iter().map(|q| q.id.clone()).collect();
        form.publish();
        form
    }

    pub fn submitted(
        question_id: &str,
        question_type: QuestionType,
        answer: serde_json::Value,
    ) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: question_id.to_string(),
            question_type,
            answer,
            time_spent: 0,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_questions_are_structurally_valid() {
        assert!(categorize_question("q-1", 5).validate_structure().is_ok());
        assert!(cloze_question("q-2", "Tokyo", 3).validate_structure().is_ok());
        assert!(comprehension_question("q-3", 2).validate_structure().is_ok());
    }

    #[test]
    fn test_fixture_form_lists_questions() {
        let questions = vec![categorize_question("q-1", 5), cloze_question("q-2", "Tokyo", 3)];
        let form = published_form(&questions);

        assert!(form.is_published);
        assert_eq!(form.created_by, OWNER_ID);
        assert_eq!(form.question_ids, vec!["q-1".to_string(), "q-2".to_string()]);
    }
}
