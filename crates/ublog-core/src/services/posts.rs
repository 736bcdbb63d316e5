//! Post submission.

use crate::domain::{ContentInput, User};
use crate::error::{DomainError, StoreError};
use crate::ports::PostStore;

/// What the page shows after a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Message rendered under the form.
    pub error: Option<String>,
    /// Text to put back into the form so the user does not lose it.
    pub content: Option<String>,
}

impl SubmissionOutcome {
    pub fn accepted() -> Self {
        Self::default()
    }

    pub fn rejected(error: impl Into<String>, content: Option<String>) -> Self {
        Self {
            error: Some(error.into()),
            content,
        }
    }
}

/// Validate and persist a post for the signed-in `user`.
///
/// Rejections come back as an outcome to render; only store failures are errors.
pub async fn submit_post(
    store: &dyn PostStore,
    user: Option<&User>,
    input: ContentInput,
) -> Result<SubmissionOutcome, StoreError> {
    let Some(user) = user else {
        tracing::debug!("Rejected anonymous post submission");
        return Ok(SubmissionOutcome::rejected(
            DomainError::Unauthenticated.to_string(),
            None,
        ));
    };

    let echo = input.as_text().map(str::to_owned);

    match store.create_post(input, &user.login).await {
        Ok(post) => {
            tracing::info!(key = %post.key, author = %user.login, "Post created");
            Ok(SubmissionOutcome::accepted())
        }
        Err(DomainError::Validation(e)) => {
            tracing::debug!(author = %user.login, error = %e, "Rejected post submission");
            Ok(SubmissionOutcome::rejected(e.to_string(), echo))
        }
        Err(DomainError::Unauthenticated) => Ok(SubmissionOutcome::rejected(
            DomainError::Unauthenticated.to_string(),
            None,
        )),
        Err(DomainError::Store(e)) => Err(e),
    }
}
