use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::error::ClientError;
use crate::web::Error;

/// Emits one `debug` line per request. `status_code` is what the caller got,
/// `upstream_status` is set when the Subscriber API turned the signup down.
pub fn log_request(
    uuid: Uuid,
    req_method: Method,
    uri: Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_status_and_error: Option<&(StatusCode, ClientError)>,
) {
    let (status_code, client_error_type) = match client_status_and_error {
        Some((sc, ce)) => (*sc, Some(ce.as_ref().to_string())),
        None => (status_code, None),
    };

    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        uuid: uuid.to_string(),
        req_method: req_method.to_string(),
        uri: uri.to_string(),
        status_code: status_code.as_u16(),
        upstream_status: web_error.and_then(upstream_status),
        client_error_type,
        web_error_type: web_error.map(|we| we.as_ref().to_string()),
    };

    debug!("LOGLINE: {}", json!(logline));
}

fn upstream_status(web_error: &Error) -> Option<u16> {
    match web_error {
        Error::SubscriptionRejected { status, .. } => Some(status.as_u16()),
        _ => None,
    }
}

#[derive(Serialize)]
struct LogLine {
    timestamp: String,
    uuid: String,

    req_method: String,
    uri: String,
    status_code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_type: Option<String>,
}
