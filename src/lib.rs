//! # twinfield-rs
//!
//! A Rust client library for the Twinfield accounting API.
//!
//! Entities are exchanged with Twinfield through the `ProcessXml` web service: connectors build a
//! request document, send it through a [`Transport`], check the response and map it back into
//! typed entities.
//!
//! ```ignore
//! use twinfield_rs::{Client, KeyPair, Office};
//!
//! let client = Client::from_refresh_token(KeyPair::from_env()?, refresh_token)
//!     .await?
//!     .with_office(Office::from_code("NL001"));
//!
//! let invoice = client
//!     .invoices()
//!     .get("FACTUUR", "20240001", &Office::from_code("NL001"))
//!     .await?;
//! ```
//!
//! ## Sentry Integration
//!
//! Errors returned when Twinfield rejects a document carry a span trace that captures the
//! call stack at the point of error creation. To record it, set up tracing with `ErrorLayer`:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())  // Required for SpanTrace capture
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//! ```
//!
//! With the `sentry` feature enabled, errors can also be turned into Sentry breadcrumbs.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod connectors;
pub mod documents;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod mappers;
pub mod oauth;
pub mod response;
pub mod soap;
pub mod transport;
pub mod utils;
pub mod xml;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use client::Client;
pub use connectors::{InvoiceApiConnector, ProcessXmlApiConnector, TransactionApiConnector};
pub use endpoints::TwinfieldEndpoint;
pub use entities::*;
pub use error::{Error, Result};
pub use oauth::KeyPair;
pub use response::Response;
pub use transport::Transport;

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
