pub mod form_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod question_handler;
pub mod response_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Registers every REST and GraphQL route. Public routes come first so the
/// authenticated scopes below never see them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .service(health_check)
    .service(health_check_live)
    .service(health_check_ready)
    .service(form_handler::get_public_form)
    .service(response_handler::submit_response)
    .service(graphql_handler::graphiql)
    .service(
        web::scope("/forms")
            .wrap(AuthMiddleware)
            .service(form_handler::create_form)
            .service(form_handler::list_forms)
            .service(form_handler::publish_form)
            .service(form_handler::unpublish_form)
            .service(form_handler::get_form)
            .service(form_handler::update_form)
            .service(form_handler::delete_form),
    )
    .service(
        web::scope("/questions")
            .wrap(AuthMiddleware)
            .service(question_handler::list_questions_by_type)
            .service(question_handler::reorder_questions)
            .service(question_handler::create_question)
            .service(question_handler::list_questions_by_form)
            .service(question_handler::get_question)
            .service(question_handler::update_question)
            .service(question_handler::delete_question),
    )
    .service(
        web::scope("/responses")
            .wrap(AuthMiddleware)
            .service(response_handler::get_response_stats)
            .service(response_handler::list_form_responses)
            .service(response_handler::get_response)
            .service(response_handler::delete_response),
    )
    .service(
        web::scope("/graphql")
            .wrap(AuthMiddleware)
            .service(graphql_handler::graphql),
    );
}
