//! Request types for the chat endpoint

use serde::{Deserialize, Serialize};

/// Request for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    pub question: String,
    /// Stream the answer incrementally instead of returning it whole
    #[serde(default)]
    pub stream: bool,
}
