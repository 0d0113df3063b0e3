use actix_web::{HttpResponse, Result as ActixResult, web};

use super::{error_response, unavailable_response};
use crate::models::ApiResponse;
use crate::services::ProgressService;

// HTTP处理程序
pub async fn class_progress(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    match service.class_progress(class_id, user_id).await {
        Some(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Progress retrieved successfully",
        ))),
        None => Ok(unavailable_response()),
    }
}

pub async fn module_access(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    match service.module_access(class_id, user_id).await {
        Some(access) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            access,
            "Module access retrieved successfully",
        ))),
        None => Ok(unavailable_response()),
    }
}

pub async fn module_progress(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id, module_id) = path.into_inner();
    match service.module_progress(class_id, user_id, module_id).await {
        Some(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Module progress retrieved successfully",
        ))),
        None => Ok(unavailable_response()),
    }
}

pub async fn attendance_streak(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    match service.attendance_streak(class_id, user_id).await {
        Some(streak) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            streak,
            "Attendance streak retrieved successfully",
        ))),
        None => Ok(unavailable_response()),
    }
}

pub async fn learner_badges(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    match service.learner_badges(class_id, user_id).await {
        Some(badges) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            badges,
            "Badges retrieved successfully",
        ))),
        None => Ok(unavailable_response()),
    }
}

pub async fn run_completion(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    match service.run_completion_trigger(class_id, user_id).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            outcome,
            "Completion check finished",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

// 配置路由，挂载在 /api/v1/classes/{class_id}/learners/{user_id} 下
pub fn configure_learner_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/progress").route(web::get().to(class_progress)))
        .service(web::resource("/modules").route(web::get().to(module_access)))
        .service(web::resource("/modules/{module_id}").route(web::get().to(module_progress)))
        .service(web::resource("/streak").route(web::get().to(attendance_streak)))
        .service(web::resource("/badges").route(web::get().to(learner_badges)))
        .service(web::resource("/completion").route(web::post().to(run_completion)));
}
