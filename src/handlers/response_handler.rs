use actix_web::{delete, get, http::header::USER_AGENT, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{RequestMeta, SubmitResponseRequest},
        response::{ApiResponse, MessageResponse},
    },
};

fn request_meta(req: &HttpRequest) -> RequestMeta {
    RequestMeta {
        ip_address: req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string),
        user_agent: req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// Public: respondents do not authenticate.
#[post("/responses/submit/{shareable_link}")]
async fn submit_response(
    state: web::Data<AppState>,
    shareable_link: web::Path<String>,
    request: web::Json<SubmitResponseRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let result = state
        .response_service
        .submit(&shareable_link, request.into_inner(), request_meta(&req))
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        result,
        "Response submitted successfully",
    )))
}

#[get("/form/{form_id}/stats")]
async fn get_response_stats(
    state: web::Data<AppState>,
    form_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let stats = state.response_service.stats(auth.user_id(), &form_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

#[get("/form/{form_id}")]
async fn list_form_responses(
    state: web::Data<AppState>,
    form_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let responses = state
        .response_service
        .list_for_form(auth.user_id(), &form_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

#[get("/{id}")]
async fn get_response(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.response_service.get_response(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

#[delete("/{id}")]
async fn delete_response(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .response_service
        .delete_response(auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Response deleted successfully")))
}
