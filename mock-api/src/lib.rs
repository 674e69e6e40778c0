pub mod client;
pub mod responder;
pub mod transport;

pub use client::{ApiClient, ClientConfig, ClientError, FetchReply};
pub use responder::MockResponder;
pub use transport::{HttpTransport, Reply, RequestOptions, Transport, TransportError};

#[cfg(test)]
mod tests;
