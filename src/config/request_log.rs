use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::Next;
use axum::response::Response;

const API_PREFIX: &str = "/api";
const MAX_LINE_CHARS: usize = 80;

/// Logs one line per `/api` request:
/// `POST /api/crafts 200 in 3ms :: {"id":1,...}`.
///
/// JSON bodies are buffered to be logged and then handed on unchanged.
pub async fn log_api_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    if !path.starts_with(API_PREFIX) {
        return response;
    }

    let duration = start.elapsed().as_millis();
    let mut line = format!("{} {} {} in {}ms", method, path, response.status().as_u16(), duration);

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if !is_json {
        tracing::info!("{}", truncate_line(line));
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "{}", truncate_line(line));
            return Response::from_parts(parts, Body::empty());
        }
    };

    if !bytes.is_empty() {
        line.push_str(" :: ");
        line.push_str(&String::from_utf8_lossy(&bytes));
    }
    tracing::info!("{}", truncate_line(line));

    Response::from_parts(parts, Body::from(bytes))
}

fn truncate_line(line: String) -> String {
    if line.chars().count() <= MAX_LINE_CHARS {
        return line;
    }
    let mut short: String = line.chars().take(MAX_LINE_CHARS - 1).collect();
    short.push('…');
    short
}
