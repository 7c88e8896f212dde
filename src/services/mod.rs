pub mod answer_checker;
pub mod form_service;
pub mod question_service;
pub mod response_service;
pub mod scoring_service;

pub use form_service::FormService;
pub use question_service::QuestionService;
pub use response_service::ResponseService;
pub use scoring_service::{ScoreSheet, ScoringService};
