//! Decoding of submitted form bodies into a [`RawForm`]

use axum::{
    Form,
    extract::{FromRequest, Multipart, Query, Request},
    http::header,
};
use survey_core::RawForm;

use crate::error::ApiError;

/// Extractor for url-encoded or multipart form submissions
///
/// Body fields come first, followed by any query-string pairs, so a single
/// value read prefers what was posted in the body. File parts of a
/// multipart body are skipped.
#[derive(Debug, Clone)]
pub struct FormInput(pub RawForm);

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()).map_err(
            |rejection| ApiError::InvalidForm {
                status: rejection.status(),
                message: rejection.body_text(),
            },
        )?;

        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_multipart_form);

        let mut form = if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
                ApiError::InvalidForm {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            })?;
            read_multipart(multipart).await?
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidForm {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            pairs.into_iter().collect()
        };

        form.extend(query);
        Ok(FormInput(form))
    }
}

/// Media types compare case-insensitively and parameters are ignored
fn is_multipart_form(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("multipart/form-data"))
}

async fn read_multipart(mut multipart: Multipart) -> Result<RawForm, ApiError> {
    let mut form = RawForm::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::InvalidForm {
        status: e.status(),
        message: e.body_text(),
    })? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let value = field.text().await.map_err(|e| ApiError::InvalidForm {
            status: e.status(),
            message: e.body_text(),
        })?;
        form.insert(name, value);
    }

    Ok(form)
}
