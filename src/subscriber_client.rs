use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::web::types::ValidSubscriber;

/// The HTTP client talking to the Subscriber API of the email-marketing service.
#[derive(Debug)]
pub struct SubscriberClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    auth_token: SecretString,
}

/// What the Subscriber API made of our request.
#[derive(Debug)]
pub enum SubscribeOutcome {
    Accepted,
    Rejected {
        status: StatusCode,
        /// The `message` field of the response body, if it was a non-empty string.
        message: Option<String>,
        body: Value,
    },
}

impl SubscriberClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        auth_token: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(SubscriberClient {
            http_client,
            url,
            auth_token,
        })
    }

    /// Sends a single `POST` with the new subscriber to the Subscriber API.
    ///
    /// The response body is parsed as JSON regardless of the status, a body that isn't JSON
    /// is an `Err` just like a transport failure.
    #[tracing::instrument(name = "Adding subscriber to the Subscriber API", skip(self, subscriber))]
    pub async fn add_subscriber(&self, subscriber: &ValidSubscriber) -> Result<SubscribeOutcome> {
        let new_subscriber = NewSubscriber {
            email: subscriber.email.as_ref(),
            fields: SubscriberFields {
                name: subscriber.name.as_ref(),
            },
            status: SubscriberStatus::Active,
        };

        let resp = self
            .http_client
            .post(self.url.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .header(header::ACCEPT, "application/json")
            .json(&new_subscriber)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await?;

        if status.is_success() {
            return Ok(SubscribeOutcome::Accepted);
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(str::to_owned);

        Ok(SubscribeOutcome::Rejected {
            status,
            message,
            body,
        })
    }
}

#[derive(Serialize)]
pub struct NewSubscriber<'a> {
    pub email: &'a str,
    pub fields: SubscriberFields<'a>,
    pub status: SubscriberStatus,
}

#[derive(Serialize)]
pub struct SubscriberFields<'a> {
    pub name: &'a str,
}

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse url: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
