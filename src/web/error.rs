use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::{
    subscriber_client,
    web::{extract::FormDataError, types::DataParsingError},
};

pub type WebResult<T> = core::result::Result<T, Error>;

/// Shown to the caller when the Subscriber API rejects a subscription without a message.
pub const SUBSCRIPTION_FAILED_FALLBACK: &str = "Subscription failed. Please try again.";

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed: {0}")]
    MethodNotAllowed(Method),

    #[error("invalid form data: {0}")]
    InvalidFormData(#[from] FormDataError),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),

    #[error("subscriber api rejected the subscription with status: {status}")]
    SubscriptionRejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("subscriber client error: {0}")]
    SubscriberClient(#[from] subscriber_client::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::InvalidFormData(_) => (StatusCode::BAD_REQUEST, InvalidFormData),
            Error::DataParsing(DataParsingError::EmailInvalid) => {
                (StatusCode::BAD_REQUEST, EmailInvalid)
            }
            Error::DataParsing(DataParsingError::SubscriberNameEmpty) => {
                (StatusCode::BAD_REQUEST, FirstNameMissing)
            }
            Error::SubscriptionRejected { message, .. } => {
                let message = message
                    .clone()
                    .unwrap_or_else(|| SUBSCRIPTION_FAILED_FALLBACK.to_string());
                (StatusCode::BAD_REQUEST, SubscriptionFailed(message))
            }
            Error::SubscriberClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The errors the caller gets to see, `Display` is the exact message put in the envelope.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Invalid form data")]
    InvalidFormData,
    #[display("Valid email address is required")]
    EmailInvalid,
    #[display("First name is required")]
    FirstNameMissing,
    #[display("{_0}")]
    SubscriptionFailed(String),
    #[display("Server error. Please try again in a moment.")]
    ServiceError,
}
