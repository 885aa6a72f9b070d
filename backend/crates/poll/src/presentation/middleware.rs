//! Instructor Middleware
//!
//! Guards the instructor subtree. The passcode travels in the
//! `X-Instructor-Key` header, or in the `key` query parameter for links
//! opened straight from a browser; verification is constant time.

use axum::body::Body;
use axum::extract::Query;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::config::PollConfig;
use crate::error::PollError;

const KEY_HEADER: &str = "x-instructor-key";

/// Middleware state
#[derive(Clone)]
pub struct InstructorGuardState {
    pub config: Arc<PollConfig>,
}

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

/// Middleware that requires the instructor passcode
pub async fn require_instructor_key(
    state: InstructorGuardState,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let presented = req
        .headers()
        .get(KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| {
            Query::<KeyQuery>::try_from_uri(req.uri())
                .ok()
                .and_then(|Query(q)| q.key)
        });

    let authorized = presented
        .as_deref()
        .is_some_and(|key| platform::passcode::verify_passcode(key, &state.config.instructor_key));

    if !authorized {
        return Err(PollError::Unauthorized.into_response());
    }

    Ok(next.run(req).await)
}
