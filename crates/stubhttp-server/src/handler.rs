//! Axum adapter around the core [`Dispatcher`].
//!
//! Every method and path lands in a single fallback handler: the request body
//! is buffered once, the request is handed to the dispatcher and its reply is
//! written back verbatim.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use stubhttp_core::{Dispatcher, Headers, IncomingRequest, Reply};

pub(crate) fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new().fallback(dispatch).with_state(dispatcher)
}

async fn dispatch(State(dispatcher): State<Arc<Dispatcher>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let body = match to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                error = %err,
                "Failed to read request body"
            );
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let target = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), |pq| pq.as_str());

    let reply = dispatcher.dispatch(IncomingRequest {
        method: parts.method.as_str().to_owned(),
        target: target.to_owned(),
        headers: collect_headers(&parts.headers),
        body: body.to_vec(),
    });

    match into_response(reply) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "Registered response cannot be written");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Copy request headers, keeping repeated values in order.
fn collect_headers(headers: &HeaderMap) -> Headers {
    let mut collected = Headers::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

fn into_response(reply: Reply) -> Result<Response, axum::http::Error> {
    let mut builder = Response::builder().status(reply.status);
    for (name, values) in &reply.headers {
        for value in values {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }
    builder.body(Body::from(reply.body))
}
