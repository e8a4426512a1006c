use oauth2::{AuthUrl, EndpointNotSet, EndpointSet, TokenUrl, basic::BasicClient};
use serde::Deserialize;
use url::Url;

use crate::{
    endpoints::TwinfieldEndpoint,
    error::{Error, Result},
};

/// Scopes needed to use the `ProcessXml` web services and to obtain a refresh token.
pub const DEFAULT_SCOPES: &[&str] = &[
    "openid",
    "twf.user",
    "twf.organisation",
    "twf.organisationUser",
    "offline_access",
];

/// Stores the OAuth 2 client ID and client secret.
#[derive(Debug, Clone)]
pub struct KeyPair(
    pub(crate) oauth2::ClientId,
    pub(crate) Option<oauth2::ClientSecret>,
);

impl KeyPair {
    /// Creates a new `KeyPair` from the provided `client_id` and `client_secret` strings.
    #[must_use]
    pub fn new(client_id: String, client_secret: Option<String>) -> Self {
        Self(
            oauth2::ClientId::new(client_id),
            client_secret.map(oauth2::ClientSecret::new),
        )
    }

    /// Creates a new `KeyPair` from `TWINFIELD_CLIENT_ID` and `TWINFIELD_CLIENT_SECRET`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("TWINFIELD_CLIENT_ID")
            .map_err(|_| Error::Configuration("TWINFIELD_CLIENT_ID not set".to_string()))?;
        Ok(Self::new(
            client_id,
            std::env::var("TWINFIELD_CLIENT_SECRET").ok(),
        ))
    }
}

pub type OAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

pub(crate) fn build_oauth_client(key_pair: KeyPair) -> Result<OAuthClient> {
    let client = BasicClient::new(key_pair.0)
        .set_auth_uri(AuthUrl::from_url(TwinfieldEndpoint::Authorize.to_url()?))
        .set_token_uri(TokenUrl::from_url(TwinfieldEndpoint::Token.to_url()?));

    Ok(match key_pair.1 {
        Some(secret) => client.set_client_secret(secret),
        None => client,
    })
}

/// Result of validating an access token against the identity server.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenValidation {
    /// The cluster that hosts the organisation; all web service calls go here.
    #[serde(rename = "twf.clusterUrl")]
    pub cluster_url: Url,
    #[serde(rename = "twf.organisationId")]
    pub organisation_id: Option<String>,
    #[serde(rename = "twf.organisationCode")]
    pub organisation_code: Option<String>,
    /// Expiry as a unix timestamp.
    pub exp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_access_token_validation() {
        let validation: AccessTokenValidation = serde_json::from_str(
            r#"{
                "auth_time": 1700000000,
                "exp": 1700003600,
                "twf.clusterUrl": "https://accounting.twinfield.com",
                "twf.organisationCode": "DEMO",
                "twf.organisationId": "6f9a8c3e"
            }"#,
        )
        .unwrap();
        assert_eq!(
            validation.cluster_url.as_str(),
            "https://accounting.twinfield.com/"
        );
        assert_eq!(validation.organisation_code.as_deref(), Some("DEMO"));
        assert_eq!(validation.exp, Some(1_700_003_600));
    }
}
