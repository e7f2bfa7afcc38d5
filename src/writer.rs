//! The response-writing boundary
//!
//! This module is the single place where in-memory request state becomes
//! wire bytes. [`write_response`] consumes a populated [`Context`];
//! [`write_error`] renders the JSON error envelope; [`cors_handler`] and
//! [`not_found_handler`] answer preflight probes and route misses.
//!
//! The payload is always buffered in full before the response is assembled,
//! so an encoding failure can never leak a partial body: the buffer is
//! dropped and a bare 500 goes out instead.

use axum::{
    body::Body,
    http::{HeaderMap, Method, StatusCode},
    response::Response,
};

use crate::{
    context::{Context, Operation},
    error::ApiErrors,
    headers::{request_origin, set_common_headers, set_pagination_headers},
    pagination::PageWindow,
};

/// Write the HTTP response for a consumed request context.
///
/// Status selection is a pure function of the operation, the inbound method,
/// and whether an error is set:
///
/// - error set: delegated to [`write_error`], status from the first entry
/// - `Create`: 201
/// - `Info`, or a `Delete` with no output, or any HEAD request: 204, no body
/// - everything else: 200, body = JSON-encoded output followed by a newline
pub fn write_response(ctx: &Context) -> Response {
    if let Some(errors) = &ctx.errors {
        return write_error(ctx.origin.as_deref(), errors.clone());
    }

    // Headers are composed before the body is written; a streaming writer
    // cannot emit them after the first body byte.
    let mut headers = HeaderMap::new();
    set_common_headers(&mut headers, ctx.origin.as_deref());
    let window = PageWindow::compute(ctx.count.total, ctx.count.page, ctx.count.per_page);
    set_pagination_headers(&mut headers, window);

    let status = match ctx.operation {
        Operation::Create => StatusCode::CREATED,
        Operation::Info => StatusCode::NO_CONTENT,
        Operation::Delete if ctx.output.is_none() => StatusCode::NO_CONTENT,
        _ if ctx.method == Method::HEAD => StatusCode::NO_CONTENT,
        _ => StatusCode::OK,
    };

    if status == StatusCode::NO_CONTENT {
        return assemble(status, headers, Vec::new());
    }

    let encoded = match &ctx.output {
        Some(payload) => payload.encode(),
        None => serde_json::to_vec(&serde_json::Value::Null),
    };

    match encoded {
        Ok(mut body) => {
            body.push(b'\n');
            assemble(status, headers, body)
        }
        Err(err) => {
            tracing::error!(
                operation = %ctx.operation,
                error = %err,
                "failed to encode response payload"
            );
            encoding_failure(ctx.origin.as_deref())
        }
    }
}

/// Write the JSON error envelope.
///
/// The input is normalized to an ordered sequence of entries; the response
/// status is the first entry's code and the body is the serialized array
/// followed by a newline.
pub fn write_error(origin: Option<&str>, errors: impl Into<ApiErrors>) -> Response {
    let errors = errors.into();

    let mut headers = HeaderMap::new();
    set_common_headers(&mut headers, origin);

    match serde_json::to_vec(&errors) {
        Ok(mut body) => {
            body.push(b'\n');
            assemble(errors.status(), headers, body)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to encode error envelope");
            encoding_failure(origin)
        }
    }
}

/// Answer a CORS preflight or discovery probe: 200, common headers echoing
/// the given origin, empty body.
pub fn cors_response(origin: Option<&str>) -> Response {
    let mut headers = HeaderMap::new();
    set_common_headers(&mut headers, origin);
    assemble(StatusCode::OK, headers, Vec::new())
}

/// Axum handler answering any request with a CORS probe response
pub async fn cors_handler(headers: HeaderMap) -> Response {
    let origin = request_origin(&headers);
    cors_response(origin.as_deref())
}

/// Axum handler for route misses: 404, empty body
pub async fn not_found_handler() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Bare 500 sent when encoding fails; the buffered body never went out
fn encoding_failure(origin: Option<&str>) -> Response {
    let mut headers = HeaderMap::new();
    set_common_headers(&mut headers, origin);
    assemble(StatusCode::INTERNAL_SERVER_ERROR, headers, Vec::new())
}

fn assemble(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use http_body_util::BodyExt;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entity {
        name: String,
    }

    /// Payload whose serialization always fails
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    fn paginated_context(operation: Operation, method: Method) -> Context {
        let mut ctx = Context::new(operation).with_method(method);
        ctx.count.total = 40;
        ctx.count.page = 2;
        ctx.count.per_page = 10;
        ctx
    }

    fn header(response: &Response, name: &str) -> String {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_retrieve_many_writes_collection() {
        let mut ctx = paginated_context(Operation::RetrieveMany, Method::GET);
        ctx.set_output(vec![
            Entity {
                name: "e1".to_owned(),
            },
            Entity {
                name: "e2".to_owned(),
            },
        ]);

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "X-Page-First"), "1");
        assert_eq!(header(&response, "X-Page-Prev"), "1");
        assert_eq!(header(&response, "X-Page-Next"), "3");
        assert_eq!(header(&response, "X-Page-Last"), "4");
        assert_eq!(
            body_bytes(response).await,
            b"[{\"name\":\"e1\"},{\"name\":\"e2\"}]\n"
        );
    }

    #[tokio::test]
    async fn test_info_head_is_204_with_pagination_headers() {
        let ctx = paginated_context(Operation::Info, Method::HEAD);

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(header(&response, "X-Page-First"), "1");
        assert_eq!(header(&response, "X-Page-Prev"), "1");
        assert_eq!(header(&response, "X-Page-Next"), "3");
        assert_eq!(header(&response, "X-Page-Last"), "4");
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_on_collection_omits_body() {
        let mut ctx = paginated_context(Operation::RetrieveMany, Method::HEAD);
        ctx.set_output(vec![Entity {
            name: "e1".to_owned(),
        }]);

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_is_201() {
        let mut ctx = paginated_context(Operation::Create, Method::POST);
        ctx.set_output(Entity {
            name: "e1".to_owned(),
        });

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_bytes(response).await, b"{\"name\":\"e1\"}\n");
    }

    #[tokio::test]
    async fn test_delete_with_body_is_200() {
        let mut ctx = paginated_context(Operation::Delete, Method::DELETE);
        ctx.set_output(Entity {
            name: "e1".to_owned(),
        });

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"{\"name\":\"e1\"}\n");
    }

    #[tokio::test]
    async fn test_delete_without_body_is_204() {
        let ctx = paginated_context(Operation::Delete, Method::DELETE);

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_absent_output_encodes_as_null() {
        let ctx = paginated_context(Operation::Retrieve, Method::GET);

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"null\n");
    }

    #[tokio::test]
    async fn test_unserializable_output_yields_bare_500() {
        let mut ctx = paginated_context(Operation::RetrieveMany, Method::GET);
        ctx.output = Some(Box::new(Unserializable));

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // No partial body leaks out
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_state_routes_through_envelope() {
        let mut ctx = paginated_context(Operation::RetrieveMany, Method::GET);
        ctx.set_error(ApiError::new("title", "description", "subject", 422));

        let response = write_response(&ctx);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_bytes(response).await,
            b"[{\"code\":422,\"description\":\"description\",\"subject\":\"subject\",\"title\":\"title\",\"data\":null}]\n"
        );
    }

    #[tokio::test]
    async fn test_write_error_single_entry() {
        let response = write_error(
            Some("http://origin"),
            ApiError::new("title", "description", "subject", 422),
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), "http://origin");
        assert_eq!(
            body_bytes(response).await,
            b"[{\"code\":422,\"description\":\"description\",\"subject\":\"subject\",\"title\":\"title\",\"data\":null}]\n"
        );
    }

    #[tokio::test]
    async fn test_write_error_collection_uses_first_code() {
        let errors: ApiErrors = vec![
            ApiError::new("title", "description", "subject", 409),
            ApiError::new("other", "detail", "subject", 422),
        ]
        .into();

        let response = write_error(None, errors);
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_bytes(response).await;
        assert!(body.starts_with(b"[{\"code\":409,"));
        assert!(body.ends_with(b"]\n"));
    }

    #[tokio::test]
    async fn test_cors_handler_echoes_origin() {
        let mut headers = HeaderMap::new();
        headers.insert("Origin", "http://toto.com".parse().unwrap());

        let response = cors_handler(headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), "http://toto.com");
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_handler() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }
}
