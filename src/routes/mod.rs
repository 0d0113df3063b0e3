pub mod assignments;

pub mod classes;

pub mod learners;

pub use assignments::configure_assignments_routes;
pub use classes::configure_classes_routes;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::CohortError;
use crate::models::{ApiResponse, ErrorCode};

/// 将业务错误转换为 HTTP 响应
pub(crate) fn error_response(err: CohortError) -> HttpResponse {
    let body = ApiResponse::error_empty(ErrorCode::from(&err), err.message());
    match err {
        CohortError::Validation(_) => HttpResponse::BadRequest().json(body),
        CohortError::NotFound(_) => HttpResponse::NotFound().json(body),
        CohortError::Conflict(_) => HttpResponse::Conflict().json(body),
        _ => {
            error!("{}", err.format_simple());
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// 进度无法计算（记录不存在或存储出错，原因已记录在日志中）
pub(crate) fn unavailable_response() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ProgressUnavailable,
        "Progress unavailable",
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};

    use super::*;
    use crate::services::{CurriculumService, ProgressService};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[actix_web::test]
    async fn test_routes_map_errors_and_unavailable_progress() {
        let storage = Arc::new(
            SeaOrmStorage::connect_in_memory()
                .await
                .expect("in-memory storage"),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ProgressService::with_defaults(
                    storage.clone(),
                )))
                .app_data(web::Data::new(CurriculumService::new(storage)))
                .configure(configure_classes_routes)
                .configure(configure_assignments_routes),
        )
        .await;

        let now = Utc::now();
        let req = test::TestRequest::post()
            .uri("/api/v1/classes")
            .set_json(json!({
                "name": "Rust 训练营",
                "starts_at": now,
                "ends_at": now + Duration::weeks(4),
                "capacity": 10
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let class_id = body["data"]["id"].as_i64().unwrap();

        // 班级不存在时进度不可用
        let req = test::TestRequest::get()
            .uri("/api/v1/classes/999/learners/7/progress")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::ProgressUnavailable as i32);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/classes/{class_id}/attendance"))
            .set_json(json!({ "user_id": 7, "week": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/classes/{class_id}/enrollments"))
            .set_json(json!({ "user_id": 7 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{class_id}/learners/7/progress"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["overall"], 0);
        assert_eq!(body["data"]["modules"]["total"], 0);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{class_id}/learners/7/badges"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!([]));

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments/1/submissions/7")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_error_response_status() {
        let resp = error_response(CohortError::validation("bad"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = error_response(CohortError::conflict("full"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let resp = error_response(CohortError::database_operation("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
