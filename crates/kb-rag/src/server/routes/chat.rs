//! Agent invocation endpoint

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::StreamExt;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::ChatRequest;

/// POST /chat - Ask the knowledge-base agent a question.
///
/// Responds with plain text; with `stream: true` the answer is sent
/// incrementally as it is generated.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response> {
    tracing::info!("Question: \"{}\"", request.question);

    if request.stream {
        let stream = state.agent().answer_stream(&request.question).await?;
        let body = Body::from_stream(stream.map(|piece| piece.map(axum::body::Bytes::from)));

        Response::builder()
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .map_err(|e| Error::Internal(e.to_string()))
    } else {
        let answer = state.agent().answer(&request.question).await?;
        Ok(answer.into_response())
    }
}
