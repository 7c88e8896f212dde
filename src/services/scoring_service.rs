use crate::models::domain::{PublishedForm, ScoredAnswer, SubmittedAnswer};
use crate::services::answer_checker;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreSheet {
    pub scored_answers: Vec<ScoredAnswer>,
    pub total_score: i32,
    pub max_possible_score: i32,
}

impl ScoreSheet {
    pub fn percentage(&self) -> i32 {
        percentage(self.total_score, self.max_possible_score)
    }
}

pub struct ScoringService;

impl ScoringService {
    /// Grade submitted answers against a published form.
    ///
    /// Answers are processed in submission order. An answer naming a question the form
    /// does not contain is dropped: it produces no record and counts toward neither total.
    /// Totals saturate at `i32::MAX` instead of wrapping.
    pub fn score(form: &PublishedForm, submitted_answers: &[SubmittedAnswer]) -> ScoreSheet {
        let mut sheet = ScoreSheet::default();

        for answer in submitted_answers {
            let Some(question) = form.question(&answer.question_id) else {
                log::debug!(
                    "Skipping answer for question '{}' not on form '{}'",
                    answer.question_id,
                    form.form().id
                );
                continue;
            };

            let is_correct = answer_checker::check_answer(&question.kind, &answer.answer);
            let points = question.effective_points();
            let points_earned = if is_correct { points } else { 0 };

            sheet.total_score = sheet.total_score.saturating_add(points_earned);
            sheet.max_possible_score = sheet.max_possible_score.saturating_add(points);
            sheet
                .scored_answers
                .push(ScoredAnswer::from_submitted(answer, is_correct, points_earned));
        }

        sheet
    }
}

/// Rounded share of `max_possible_score`, halves rounding up. Zero when nothing was scorable.
pub fn percentage(total_score: i32, max_possible_score: i32) -> i32 {
    if max_possible_score <= 0 {
        return 0;
    }
    (total_score as f64 / max_possible_score as f64 * 100.0).round() as i32
}
