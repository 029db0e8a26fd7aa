// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # entity-pager
//!
//! Page-at-a-time data fetch engine for a security platform's entity and
//! incident APIs.
//!
//! Each call fetches exactly one page of one entity and returns the raw
//! records plus an opaque cursor for the next call. The engine keeps no
//! state between calls; the host drives pagination.
//!
//! ## Features
//!
//! - **GraphQL entities**: users, endpoints and incidents over one endpoint
//! - **REST entities**: integer offset, scroll token and after token dialects
//! - **Two-phase REST**: list ids, then fetch details in one batch
//! - **Opaque cursors**: base64 JSON, nestable for inner connections
//! - **Classified errors**: config, cursor, transport, upstream and shape
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entity_pager::{EntityRegistry, FetchRequest, PageFetcher, ReqwestTransport};
//! use entity_pager::AttributeConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> entity_pager::Result<()> {
//!     let fetcher = PageFetcher::new(
//!         Arc::new(EntityRegistry::builtin()),
//!         ReqwestTransport::new()?,
//!     );
//!
//!     let mut request = FetchRequest::new("https://api.example.com", "token", "user")
//!         .with_attribute(AttributeConfig::unique("entityId"));
//!
//!     loop {
//!         let page = fetcher.get_page(&request).await?.error_for_status()?;
//!         for record in &page.records {
//!             println!("{record:?}");
//!         }
//!         match page.next_cursor {
//!             Some(cursor) => request = request.next(cursor),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │          PageFetcher::get_page(request) → Page               │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┴──────┬────────────┬────────────┐
//! │ Registry │ Fetch path             │ Query      │ Cursor     │
//! ├──────────┼────────────────────────┼────────────┼────────────┤
//! │ GraphQL  │ GraphQL: one query     │ GraphQL    │ Composite  │
//! │ REST     │ REST: list → detail    │ REST URLs  │ PageInfo   │
//! │          │ REST: combined         │ REST body  │ base64     │
//! └──────────┴────────────────────────┴────────────┴────────────┘
//!                              │
//!                    Transport (reqwest)
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Entity registry
pub mod registry;

/// Opaque cursors and page-info trees
pub mod cursor;

/// REST pagination dialects
pub mod pagination;

/// GraphQL query and REST endpoint builders
pub mod query;

/// HTTP transport
pub mod http;

/// Page fetcher
pub mod fetch;

/// Host configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use config::HostConfig;
pub use cursor::CompositeCursor;
pub use fetch::{FetchRequest, FetchResponse, Page, PageFetcher};
pub use http::{ReqwestTransport, Transport};
pub use registry::{EntityDescriptor, EntityRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
