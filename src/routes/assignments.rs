use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::submissions::requests::{ReviewSubmissionRequest, SubmitAssignmentRequest};
use crate::services::ProgressService;

// HTTP处理程序
pub async fn submit_assignment(
    service: web::Data<ProgressService>,
    assignment_id: web::Path<i64>,
    submission_data: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .submit_assignment(assignment_id.into_inner(), submission_data.into_inner())
        .await
    {
        Ok(update) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            update,
            "Submission recorded",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_submission(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, user_id) = path.into_inner();
    match service.submission(assignment_id, user_id).await {
        Some(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Submission not found",
        ))),
    }
}

pub async fn review_submission(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
    review_data: web::Json<ReviewSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, user_id) = path.into_inner();
    match service
        .review_submission(assignment_id, user_id, review_data.into_inner())
        .await
    {
        Ok(update) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            update,
            "Submission reviewed",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .service(
                web::resource("/{assignment_id}/submissions")
                    .route(web::post().to(submit_assignment)),
            )
            .service(
                web::resource("/{assignment_id}/submissions/{user_id}")
                    .route(web::get().to(get_submission)),
            )
            .service(
                web::resource("/{assignment_id}/submissions/{user_id}/review")
                    .route(web::put().to(review_submission)),
            ),
    );
}
