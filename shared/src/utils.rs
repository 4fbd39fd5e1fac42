use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use serde::Serialize;
use serde_json::json;

pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Resource not found";

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(body)?)
        .map_err(Box::new)?;

    Ok(response)
}

pub fn success_response(data: &impl Serialize) -> Result<Response<String>, Error> {
    json_response(&StatusCode::OK, data)
}

pub fn created_response(data: &impl Serialize) -> Result<Response<String>, Error> {
    json_response(&StatusCode::CREATED, data)
}

pub fn not_found_response(message: Option<&str>) -> Result<Response<String>, Error> {
    json_response(
        &StatusCode::NOT_FOUND,
        &json!({ "error": message.unwrap_or(DEFAULT_NOT_FOUND_MESSAGE) }),
    )
}

/// `error` may be a plain message or a structured validation report.
pub fn bad_request(error: &impl Serialize) -> Result<Response<String>, Error> {
    json_response(&StatusCode::BAD_REQUEST, &json!({ "error": error }))
}

pub fn error_response(message: &str, status: &StatusCode) -> Result<Response<String>, Error> {
    json_response(status, &json!({ "error": message }))
}
