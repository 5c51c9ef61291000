use hyper::{StatusCode, header};

use super::Response;


fn plain_text(status: StatusCode, body: &'static str) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(body.into())
        .unwrap()
}

pub(super) fn html(body: String) -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/html; charset=UTF-8")
        .body(body.into())
        .unwrap()
}

pub(super) fn bad_request(msg: Option<&str>) -> Response {
    let body = msg.unwrap_or("Bad request").to_owned();
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(header::CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(body.into())
        .unwrap()
}

pub(super) fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "404 Not found")
}

pub(super) fn method_not_allowed() -> Response {
    plain_text(StatusCode::METHOD_NOT_ALLOWED, "405 Method not allowed")
}

pub(super) fn mutation_requires_post() -> Response {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(header::ALLOW, "POST")
        .header(header::CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body("405 Can only perform a mutation operation from a POST request".into())
        .unwrap()
}

pub(super) fn payload_too_large() -> Response {
    plain_text(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload too large")
}

pub(super) fn internal_server_error() -> Response {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
