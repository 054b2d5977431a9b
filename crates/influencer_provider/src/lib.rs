mod cache;
mod client;
mod clock;
mod config;
mod error;
mod headers;
#[cfg(test)]
mod mock;
mod request;
mod response;
mod transport;
mod utils;

pub use client::Client;
pub use clock::{Clock, SystemClock};
pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use headers::build_headers;
pub use request::SYSTEM_INSTRUCTION;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
