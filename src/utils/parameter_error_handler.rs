//! 请求参数解析失败时统一返回 `ApiResponse`

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid JSON payload: {err}"));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid query parameters: {err}"));
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let response = bad_request(format!("Invalid path parameters: {err}"));
    InternalError::from_response(err, response).into()
}
