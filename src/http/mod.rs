//! HTTP transport module
//!
//! The fetch paths never talk to the network directly. They hand a fully
//! built [`HttpRequest`] to an injected [`Transport`] and get back status,
//! headers and body. [`ReqwestTransport`] is the default implementation;
//! hosts may supply their own (connection pooling, proxies, test doubles).
//!
//! # Features
//!
//! - **Per-call deadline**: every request carries its own timeout
//! - **No retries**: failures are classified and returned to the host
//! - **Bearer auth**: applied by the request builders, not the transport

mod client;
mod types;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, ReqwestTransport};
pub use types::{HttpRequest, HttpResponse, Transport};
