use actix_web::{HttpResponse, Result as ActixResult, web};

use super::{error_response, learners};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::CreateAssignmentRequest,
    attendance::requests::MarkAttendanceRequest,
    badges::requests::CreateClassBadgeRequest,
    classes::requests::CreateClassRequest,
    enrollments::requests::EnrollRequest,
    modules::requests::CreateModuleRequest,
};
use crate::services::{CurriculumService, ProgressService};

// HTTP处理程序
pub async fn create_class(
    service: web::Data<CurriculumService>,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    match service.create_class(class_data.into_inner()).await {
        Ok(class) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created")))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_class(
    service: web::Data<CurriculumService>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_class(class_id.into_inner()).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Class not found",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_modules(
    service: web::Data<CurriculumService>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.list_modules(class_id.into_inner()).await {
        Ok(modules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            modules,
            "Modules retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_module(
    service: web::Data<CurriculumService>,
    class_id: web::Path<i64>,
    module_data: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .create_module(class_id.into_inner(), module_data.into_inner())
        .await
    {
        Ok(module) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(module, "Module created")))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_assignment(
    service: web::Data<CurriculumService>,
    class_id: web::Path<i64>,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .create_assignment(class_id.into_inner(), assignment_data.into_inner())
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(assignment, "Assignment created"))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_class_badge(
    service: web::Data<CurriculumService>,
    class_id: web::Path<i64>,
    badge_data: web::Json<CreateClassBadgeRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .create_class_badge(class_id.into_inner(), badge_data.into_inner())
        .await
    {
        Ok(badge) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(badge, "Badge configured")))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn enroll(
    service: web::Data<ProgressService>,
    class_id: web::Path<i64>,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .enroll(class_id.into_inner(), enroll_data.into_inner())
        .await
    {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment recorded",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn mark_attendance(
    service: web::Data<ProgressService>,
    class_id: web::Path<i64>,
    attendance_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .mark_attendance(class_id.into_inner(), attendance_data.into_inner())
        .await
    {
        Ok(update) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            update,
            "Attendance recorded",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn class_overview(
    service: web::Data<ProgressService>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.class_overview(class_id.into_inner()).await {
        Some(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Class progress retrieved successfully",
        ))),
        None => Ok(super::unavailable_response()),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .service(web::resource("").route(web::post().to(create_class)))
            .service(
                // 学员个人进度
                web::scope("/{class_id}/learners/{user_id}")
                    .configure(learners::configure_learner_routes),
            )
            .service(web::resource("/{class_id}").route(web::get().to(get_class)))
            .service(
                web::resource("/{class_id}/modules")
                    .route(web::get().to(list_modules))
                    .route(web::post().to(create_module)),
            )
            .service(
                web::resource("/{class_id}/assignments").route(web::post().to(create_assignment)),
            )
            .service(web::resource("/{class_id}/badges").route(web::post().to(create_class_badge)))
            .service(web::resource("/{class_id}/enrollments").route(web::post().to(enroll)))
            .service(
                web::resource("/{class_id}/attendance").route(web::post().to(mark_attendance)),
            )
            .service(web::resource("/{class_id}/progress").route(web::get().to(class_overview))),
    );
}
