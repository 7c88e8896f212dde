use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateFormRequest, UpdateFormRequest},
        response::{ApiResponse, MessageResponse},
    },
};

#[post("")]
async fn create_form(
    state: web::Data<AppState>,
    request: web::Json<CreateFormRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = state
        .form_service
        .create_form(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(form, "Form created successfully")))
}

#[get("")]
async fn list_forms(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let forms = state.form_service.list_forms(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(forms)))
}

#[get("/{id}")]
async fn get_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = state.form_service.get_form(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(form)))
}

#[put("/{id}")]
async fn update_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateFormRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = state
        .form_service
        .update_form(auth.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(form, "Form updated successfully")))
}

#[delete("/{id}")]
async fn delete_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.form_service.delete_form(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Form deleted successfully")))
}

#[patch("/{id}/publish")]
async fn publish_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.form_service.publish_form(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(result, "Form published successfully")))
}

#[patch("/{id}/unpublish")]
async fn unpublish_form(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = state.form_service.unpublish_form(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(form, "Form unpublished successfully")))
}

/// Public: no token required.
#[get("/forms/public/{shareable_link}")]
async fn get_public_form(
    state: web::Data<AppState>,
    shareable_link: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let form = state.form_service.get_public_form(&shareable_link).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(form)))
}
