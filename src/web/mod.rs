mod error;
pub mod extract;
mod log;
pub mod midware;
pub mod routes;
pub mod serve;
pub mod types;

pub use error::{ClientError, Error, WebResult, SUBSCRIPTION_FAILED_FALLBACK};
pub use routes::SUBSCRIBED_MESSAGE;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
