//! Spawns the app on a random port with the Subscriber API replaced by a `wiremock` server.
use std::{net::SocketAddr, sync::OnceLock};

use anyhow::Result;
use reqwest::{Method, Response};
use secrecy::SecretString;
use serde_json::Value;
use signup_relay::{
    config::{AppConfig, CorsConfig, NetConfig, SubscriberConfig},
    web::types::Envelope,
    App,
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
use wiremock::MockServer;

pub const TEST_AUTH_TOKEN: &str = "test-subscriber-api-token";
pub const SUBSCRIBERS_PATH: &str = "/api/subscribers";

pub struct TestApp {
    pub addr: SocketAddr,
    pub subscriber_server: MockServer,
    pub http_client: reqwest::Client,
}

/// Set `TEST_LOG` to see the app logs while running the tests.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .without_time()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_env_filter(EnvFilter::new("debug"))
                .compact()
                .init();
        }
    });
}

fn test_config(subscriber_server: &MockServer, allowed_origin: &str) -> AppConfig {
    AppConfig {
        // Trying to bind port 0 will trigger an OS scan for an available port
        // which will then be bound to the application.
        net_config: NetConfig {
            host: [127, 0, 0, 1],
            app_port: 0,
        },
        subscriber_config: SubscriberConfig {
            url: format!("{}{SUBSCRIBERS_PATH}", subscriber_server.uri()),
            auth_token: SecretString::from(TEST_AUTH_TOKEN.to_string()),
            timeout_millis: Some(200),
        },
        cors_config: CorsConfig {
            allowed_origin: allowed_origin.to_string(),
        },
    }
}

impl TestApp {
    /// A helper function that tries to spawn a separate task to serve our app.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_allowed_origin("*").await
    }

    pub async fn spawn_with_allowed_origin(allowed_origin: &str) -> Result<Self> {
        init_test_subscriber();

        let subscriber_server = MockServer::start().await;
        let config = test_config(&subscriber_server, allowed_origin);
        let app = App::build_from_config(config).await?;
        let addr = app.listener.local_addr()?;

        tokio::spawn(signup_relay::serve(app));

        Ok(TestApp {
            addr,
            subscriber_server,
            http_client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn post_json(&self, body: &Value) -> Result<Response> {
        let res = self.http_client.post(self.url("/")).json(body).send().await?;
        Ok(res)
    }

    pub async fn post_form(&self, fields: &[(&str, &str)]) -> Result<Response> {
        let res = self.http_client.post(self.url("/")).form(fields).send().await?;
        Ok(res)
    }

    pub async fn post_multipart(&self, form: reqwest::multipart::Form) -> Result<Response> {
        let res = self
            .http_client
            .post(self.url("/"))
            .multipart(form)
            .send()
            .await?;
        Ok(res)
    }

    /// Posts a raw body with the given content type, or none at all.
    pub async fn post_raw(
        &self,
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<Response> {
        let mut req = self.http_client.post(self.url("/")).body(body);
        if let Some(content_type) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let res = req.send().await?;
        Ok(res)
    }

    pub async fn request(&self, method: Method, path: &str) -> Result<Response> {
        let res = self.http_client.request(method, self.url(path)).send().await?;
        Ok(res)
    }
}

/// Checks the CORS headers that should be present on every response.
pub fn assert_cors_headers(res: &Response) {
    assert_cors_headers_for_origin(res, "*");
}

pub fn assert_cors_headers_for_origin(res: &Response, allowed_origin: &str) {
    let cases = [
        ("access-control-allow-origin", allowed_origin),
        ("access-control-allow-methods", "POST, OPTIONS"),
        ("access-control-allow-headers", "Content-Type, Authorization"),
        ("access-control-max-age", "86400"),
    ];

    for (name, expected) in cases {
        let value = res.headers().get(name).and_then(|v| v.to_str().ok());
        assert_eq!(Some(expected), value, "wrong value for header: {name}");
    }
}

/// Checks status code, content type and CORS headers and returns the parsed envelope.
pub async fn assert_envelope(res: Response, expected_status: u16) -> Result<Envelope> {
    assert_eq!(
        expected_status,
        res.status().as_u16(),
        "Wrong response StatusCode: {}",
        res.status()
    );
    assert_cors_headers(&res);
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    assert_eq!(Some("application/json"), content_type);

    let envelope = res.json::<Envelope>().await?;
    Ok(envelope)
}
