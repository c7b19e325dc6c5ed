//! Request ID middleware - echoes a request ID on every response.

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use tracing_actix_web::RequestId;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: &str = "X-Request-ID";

const MAX_CLIENT_ID_LEN: usize = 128;

/// Adds an `X-Request-ID` header to each response.
///
/// A well-formed ID sent by the client (or a load balancer) is echoed back;
/// otherwise the ID `TracingLogger` assigned to the request span is used.
/// Must be wrapped inside `TracingLogger` so that ID is already present.
pub struct RequestIdHeader;

impl<S, B> Transform<S, ServiceRequest> for RequestIdHeader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdHeaderService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdHeaderService { service }))
    }
}

pub struct RequestIdHeaderService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdHeaderService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span_id = req.extensions().get::<RequestId>().map(|id| id.to_string());
        let client_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_acceptable_client_id(id))
            .map(String::from);

        if let (Some(client), Some(span)) = (&client_id, &span_id) {
            tracing::debug!(
                client_request_id = %client,
                request_id = %span,
                "Client supplied request ID"
            );
        }

        let request_id = client_id.or(span_id);
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
                res.headers_mut()
                    .insert(HeaderName::from_static("x-request-id"), value);
            }

            Ok(res)
        })
    }
}

fn is_acceptable_client_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CLIENT_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_filter() {
        assert!(is_acceptable_client_id("3f2a-11_ab.c"));
        assert!(!is_acceptable_client_id(""));
        assert!(!is_acceptable_client_id("has space"));
        assert!(!is_acceptable_client_id(&"a".repeat(MAX_CLIENT_ID_LEN + 1)));
    }
}
