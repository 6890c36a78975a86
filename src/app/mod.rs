use std::{net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::AppConfig, Result, SubscriberClient};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let allowed_origin = config.cors_config.header_value()?;
        let timeout = config.subscriber_config.timeout();
        let subscriber_client = SubscriberClient::new(
            &config.subscriber_config.url,
            config.subscriber_config.auth_token,
            timeout,
        )?;

        let app_state = AppState::new(subscriber_client, allowed_origin);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub subscriber_client: SubscriberClient,
    pub allowed_origin: HeaderValue,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(subscriber_client: SubscriberClient, allowed_origin: HeaderValue) -> Self {
        AppState(Arc::new(InternalState {
            subscriber_client,
            allowed_origin,
        }))
    }
}
