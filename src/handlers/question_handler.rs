use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuestionRequest, ReorderQuestionsRequest, UpdateQuestionRequest},
        response::{ApiResponse, MessageResponse},
    },
};

#[post("")]
async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        question,
        "Question created successfully",
    )))
}

#[get("/type/{question_type}")]
async fn list_questions_by_type(
    state: web::Data<AppState>,
    question_type: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .question_service
        .list_by_type(auth.user_id(), &question_type)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(questions)))
}

#[patch("/reorder")]
async fn reorder_questions(
    state: web::Data<AppState>,
    request: web::Json<ReorderQuestionsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .question_service
        .reorder_questions(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        questions,
        "Questions reordered successfully",
    )))
}

#[get("/form/{form_id}")]
async fn list_questions_by_form(
    state: web::Data<AppState>,
    form_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .question_service
        .list_by_form(auth.user_id(), &form_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(questions)))
}

#[get("/{id}")]
async fn get_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.question_service.get_question(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(question)))
}

#[put("/{id}")]
async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .update_question(auth.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        question,
        "Question updated successfully",
    )))
}

#[delete("/{id}")]
async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .question_service
        .delete_question(auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Question deleted successfully")))
}
