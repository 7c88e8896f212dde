pub mod form_repository;
pub mod form_response_repository;
pub mod question_repository;

pub use form_repository::{FormRepository, MongoFormRepository};
pub use form_response_repository::{FormResponseRepository, MongoFormResponseRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};

#[cfg(test)]
pub use form_repository::MockFormRepository;
#[cfg(test)]
pub use form_response_repository::MockFormResponseRepository;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
