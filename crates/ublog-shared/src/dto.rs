//! Data Transfer Objects - form bodies and page action data.

use serde::{Deserialize, Serialize};

/// Body of the post submission form (`POST /`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    pub content: Option<String>,
}

/// Result of the submission action, rendered back into the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    pub error: Option<String>,
    /// Echoed content used to refill the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
