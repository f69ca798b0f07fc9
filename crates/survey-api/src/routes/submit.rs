use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use survey_core::ValidatedSubmission;
use utoipa::ToSchema;

use crate::AppState;
use crate::error::Result;
use crate::extract::FormInput;

/// Fields accepted by `POST /submit`
///
/// Only `age` is required. `improvements` may be repeated and keeps its
/// order.
#[derive(Debug, ToSchema)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Base-10 integer, surrounding whitespace ignored
    #[schema(example = "30")]
    pub age: String,
    pub role: Option<String>,
    pub recommend: Option<String>,
    pub improvements: Vec<String>,
    pub comments: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/submit", post(submit_form))
}

/// Validate a survey form and echo it back as JSON
#[utoipa::path(
    post,
    path = "/submit",
    request_body(
        description = "Survey form, url-encoded or multipart",
        content(
            (SubmissionForm = "application/x-www-form-urlencoded"),
            (SubmissionForm = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Validated submission", body = ValidatedSubmission),
        (status = 400, description = "Age missing or not an integer"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Failed to encode JSON response")
    ),
    tag = "submissions"
)]
pub async fn submit_form(
    State(state): State<AppState>,
    FormInput(raw): FormInput,
) -> Result<impl IntoResponse> {
    let submission = state.validator.validate(&raw)?;
    let body = submission.to_json()?;

    tracing::debug!(
        age = submission.age,
        improvements = submission.improvements.len(),
        "Accepted submission"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ))
}
