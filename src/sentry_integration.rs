//! Sentry integration for twinfield-rs errors.
//!
//! This module is only available when the `sentry` feature is enabled.
//!
//! ```toml
//! [dependencies]
//! twinfield-rs = { version = "0.1", features = ["sentry"] }
//! ```
//!
//! ```ignore
//! if let Err(e) = client.invoices().send(&invoice).await {
//!     sentry::add_breadcrumb(sentry::Breadcrumb::from(&e));
//!     sentry::capture_error(&e);
//! }
//! ```

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, Level, protocol::Value};

use crate::error::Error;

/// Convert a twinfield-rs Error into a Sentry breadcrumb.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let mut data = BTreeMap::new();
        let category = match error {
            Error::Request(_) => "http.request",

            Error::Forbidden {
                url, status_code, ..
            }
            | Error::UnexpectedStatus {
                url, status_code, ..
            } => {
                data.insert("url".to_string(), Value::from(url.clone()));
                data.insert("status_code".to_string(), Value::from(status_code.as_u16()));
                "http.response"
            }

            Error::Remote { messages, .. } => {
                data.insert(
                    "messages".to_string(),
                    Value::from(messages.0.clone()),
                );
                "twinfield.remote"
            }

            Error::Fault { code, .. } => {
                data.insert("fault_code".to_string(), Value::from(code.clone()));
                "twinfield.soap"
            }

            Error::InvalidFieldForLineType { field, line_type } => {
                data.insert("field".to_string(), Value::from(field.to_string()));
                data.insert("line_type".to_string(), Value::from(line_type.to_string()));
                "twinfield.validation"
            }
            Error::EmptyBatch { .. } => "twinfield.validation",

            Error::Xml(_)
            | Error::InvalidValue { .. }
            | Error::MissingField { .. }
            | Error::NotFound { .. }
            | Error::DeserializationError(..) => "twinfield.mapping",

            Error::OAuth2(_) => "auth",

            Error::InvalidEndpoint | Error::MissingOffice | Error::Configuration(_) => "config",
        };

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(error.to_string()),
            data,
            level: Level::Error,
            ..Default::default()
        }
    }
}
