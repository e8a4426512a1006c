use std::{convert::TryFrom, fmt};
use url::Url;

use crate::error::{Error, Result};

pub const LOGIN_BASE_URL: &str = "https://login.twinfield.com/auth/authentication/";

/// A typed representation of the Twinfield endpoints used by this crate.
#[derive(Debug, Clone)]
pub enum TwinfieldEndpoint {
    // Identity server endpoints
    Authorize,
    Token,
    AccessTokenValidation,

    /// The `ProcessXml` web service on the given cluster.
    ProcessXml(Url),
}

impl TwinfieldEndpoint {
    /// Converts the endpoint to a URL.
    pub fn to_url(&self) -> Result<Url> {
        let path = match self {
            Self::Authorize => "connect/authorize",
            Self::Token => "connect/token",
            Self::AccessTokenValidation => "connect/accesstokenvalidation",
            Self::ProcessXml(cluster) => {
                return cluster
                    .join("webservices/processxml.asmx")
                    .map_err(|_| Error::InvalidEndpoint);
            }
        };

        Url::parse(LOGIN_BASE_URL)
            .and_then(|base| base.join(path))
            .map_err(|_| Error::InvalidEndpoint)
    }
}

impl fmt::Display for TwinfieldEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url() {
            Ok(url) => write!(f, "{url}"),
            Err(_) => write!(f, "Invalid endpoint"),
        }
    }
}

impl TryFrom<TwinfieldEndpoint> for Url {
    type Error = Error;

    fn try_from(endpoint: TwinfieldEndpoint) -> Result<Self> {
        endpoint.to_url()
    }
}
