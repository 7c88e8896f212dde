pub mod answer;
pub mod form;
pub mod form_response;
pub mod question;

pub use form::{Form, FormSettings, PublishedForm};
pub use form_response::{FormResponse, ScoredAnswer, SubmittedAnswer};
pub use question::{Question, QuestionKind, QuestionType};
