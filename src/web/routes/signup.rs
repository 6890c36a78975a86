use axum::{
    extract::State,
    http::{Method, StatusCode},
    Json,
};
use tracing::{error, info};

use crate::{
    subscriber_client::SubscribeOutcome,
    web::{
        types::{Envelope, SignupForm, ValidSubscriber},
        Error, WebResult,
    },
    AppState,
};

pub const SUBSCRIBED_MESSAGE: &str = "Successfully subscribed! Redirecting to your free apps...";

#[tracing::instrument(name = "Adding a new subscriber", skip(app_state, form))]
pub async fn subscribe(
    State(app_state): State<AppState>,
    form: SignupForm,
) -> WebResult<Json<Envelope>> {
    let subscriber = ValidSubscriber::try_from(form)?;

    let outcome = app_state
        .subscriber_client
        .add_subscriber(&subscriber)
        .await
        .inspect_err(|er| error!(error = %er, "Subscriber API request failed"))?;

    match outcome {
        SubscribeOutcome::Accepted => {
            info!("SUCCESS");
            Ok(Json(Envelope::success(SUBSCRIBED_MESSAGE)))
        }
        SubscribeOutcome::Rejected {
            status,
            message,
            body,
        } => {
            error!(%status, %body, "Subscriber API rejected the subscription");
            Err(Error::SubscriptionRejected { status, message })
        }
    }
}

/// CORS preflight, the headers get attached by `midware::cors_headers`.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed(method: Method) -> Error {
    Error::MethodNotAllowed(method)
}
