//! Extracting a `SignupForm` from a JSON, urlencoded or multipart request body.

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{BytesRejection, FormRejection},
        FromRequest, Multipart, Request,
    },
    http::header::CONTENT_TYPE,
    Form,
};

use serde_json::Value;

use crate::web::{types::SignupForm, Error};

const JSON_MIME: &str = "application/json";
const MULTIPART_MIME: &str = "multipart/form-data";

const FIRST_NAME_FIELD: &str = "firstName";
const EMAIL_FIELD: &str = "email";

#[derive(Debug, thiserror::Error)]
pub enum FormDataError {
    #[error("failed to buffer the request body: {0}")]
    Bytes(#[from] BytesRejection),
    #[error("failed to deserialize json body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("json body is null")]
    NullJson,
    #[error("failed to extract urlencoded form: {0}")]
    Form(#[from] FormRejection),
    #[error("failed to extract multipart form: {0}")]
    MultipartRejection(#[from] MultipartRejection),
    #[error("failed to read multipart field: {0}")]
    Multipart(#[from] MultipartError),
}

/// Picks the body format from the `Content-Type` header and returns the trimmed form.
impl<S> FromRequest<S> for SignupForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = parse_body(req, state).await?;
        Ok(form.trimmed())
    }
}

async fn parse_body<S>(req: Request, state: &S) -> Result<SignupForm, FormDataError>
where
    S: Send + Sync,
{
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|val| val.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if content_type.contains(JSON_MIME) {
        let body = Bytes::from_request(req, state).await?;
        return from_json(&body);
    }

    if content_type.starts_with(MULTIPART_MIME) {
        let multipart = Multipart::from_request(req, state).await?;
        return from_multipart(multipart).await;
    }

    let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
    let mut form = SignupForm::default();
    for (name, value) in pairs {
        if let Some(target) = empty_slot(&mut form, &name) {
            *target = Some(value);
        }
    }
    Ok(form)
}

/// Only a JSON object carries the fields. Any other value except `null` reads as an empty form.
fn from_json(body: &[u8]) -> Result<SignupForm, FormDataError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Err(FormDataError::NullJson),
        fields @ Value::Object(_) => Ok(serde_json::from_value(fields)?),
        _ => Ok(SignupForm::default()),
    }
}

/// Reads the text of the known fields, the first occurrence of a field wins.
async fn from_multipart(mut multipart: Multipart) -> Result<SignupForm, FormDataError> {
    let mut form = SignupForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name() else {
            continue;
        };
        let Some(target) = empty_slot(&mut form, name) else {
            continue;
        };
        *target = Some(field.text().await?);
    }

    Ok(form)
}

/// The form field `name` maps to, if it is a known field that has no value yet.
fn empty_slot<'a>(form: &'a mut SignupForm, name: &str) -> Option<&'a mut Option<String>> {
    let slot = match name {
        FIRST_NAME_FIELD => &mut form.first_name,
        EMAIL_FIELD => &mut form.email,
        _ => return None,
    };
    slot.is_none().then_some(slot)
}
