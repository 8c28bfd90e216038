//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of characters of a request or response body to log at the
/// `info` level. Longer bodies are logged in full at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Bodies are passed on byte-for-byte, only the logged text is lossily
/// decoded as UTF-8.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return Error::InvalidBody(error.to_string()).into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Cut `body` down to [LOG_BODY_LENGTH_LIMIT] characters, or `None` if it is
/// already short enough.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}

#[cfg(test)]
mod truncate_tests {
    use super::{LOG_BODY_LENGTH_LIMIT, truncate};

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate("{\"hello\":\"world\"}"), None);
    }

    #[test]
    fn body_at_limit_is_not_truncated() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncate(&body), None);
    }

    #[test]
    fn long_body_is_cut_at_limit() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT + 10);

        assert_eq!(truncate(&body), Some(&body[..LOG_BODY_LENGTH_LIMIT]));
    }

    #[test]
    fn multibyte_body_is_cut_on_char_boundary() {
        let body = "€".repeat(LOG_BODY_LENGTH_LIMIT + 1);

        let got = truncate(&body).expect("body should be truncated");

        assert_eq!(got.chars().count(), LOG_BODY_LENGTH_LIMIT);
    }
}

#[cfg(test)]
mod logging_middleware_tests {
    use axum::{Router, body::Bytes, http::StatusCode, middleware, routing::post};
    use axum_test::TestServer;

    use super::logging_middleware;

    async fn echo(body: String) -> String {
        body
    }

    async fn echo_bytes(body: Bytes) -> Bytes {
        body
    }

    #[tokio::test]
    async fn non_utf8_body_passes_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(echo_bytes))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");
        let body = Bytes::from_static(&[b'{', 0xff, 0xfe, b'}']);

        let response = server.post("/echo").bytes(body.clone()).await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.as_bytes(), &body);
    }

    #[tokio::test]
    async fn non_utf8_body_is_still_rejected_by_string_handlers() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .bytes(Bytes::from_static(&[0xff, 0xfe]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn request_and_response_bodies_pass_through() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");
        let body = "x".repeat(200);

        let response = server.post("/echo").text(body.clone()).await;

        response.assert_status(StatusCode::OK);
        response.assert_text(body);
    }
}
