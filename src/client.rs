use std::borrow::Cow;

use oauth2::{
    AccessToken, AuthorizationCode, CsrfToken, RedirectUrl, RefreshToken, Scope, TokenResponse,
};
use reqwest::{StatusCode, header};
use url::Url;

use crate::connectors::{InvoiceApiConnector, TransactionApiConnector};
use crate::endpoints::TwinfieldEndpoint;
use crate::entities::Office;
use crate::error::{Error, Result};
use crate::oauth::{AccessTokenValidation, DEFAULT_SCOPES, KeyPair, build_oauth_client};
use crate::soap;
use crate::transport::Transport;

/// This is the client that is used for interacting with the Twinfield API. It handles OAuth 2
/// authentication and context (the cluster and the current office).
#[derive(Clone, Debug)]
pub struct Client {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    cluster: Url,
    office: Option<Office>,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a client from an access token that was obtained elsewhere.
    #[must_use]
    pub fn new(access_token: String, cluster: Url) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            refresh_token: None,
            cluster,
            office: None,
            http_client: reqwest::Client::new(),
        }
    }

    fn oauth_http_client() -> Result<reqwest::Client> {
        // Following redirects on token requests would leak credentials.
        Ok(reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?)
    }

    /// Generates an authorization URL to use for the code flow authorization method.
    #[instrument]
    pub fn authorize_url(key_pair: KeyPair, redirect_url: Url) -> Result<(Url, CsrfToken)> {
        let nonce = CsrfToken::new_random();
        Ok(build_oauth_client(key_pair)?
            .set_redirect_uri(RedirectUrl::from_url(redirect_url))
            .authorize_url(CsrfToken::new_random)
            .add_scopes(DEFAULT_SCOPES.iter().map(|scope| Scope::new((*scope).to_string())))
            .add_extra_param("nonce", nonce.secret().clone())
            .url())
    }

    /// Creates an authorized client from a code generated in the code flow authorization method.
    #[instrument(skip(code))]
    pub async fn from_authorization_code(
        key_pair: KeyPair,
        redirect_url: Url,
        code: String,
    ) -> Result<Self> {
        let http_client = Self::oauth_http_client()?;
        let token = build_oauth_client(key_pair)?
            .exchange_code(AuthorizationCode::new(code))
            .set_redirect_uri(Cow::Owned(RedirectUrl::from_url(redirect_url)))
            .request_async(&http_client)
            .await?;

        Self::from_tokens(
            &http_client,
            token.access_token().clone(),
            token.refresh_token().cloned(),
        )
        .await
    }

    /// Creates an authorized client from a refresh token stored after an earlier authorization.
    #[instrument(skip(refresh_token))]
    pub async fn from_refresh_token(key_pair: KeyPair, refresh_token: String) -> Result<Self> {
        let http_client = Self::oauth_http_client()?;
        let refresh_token = RefreshToken::new(refresh_token);
        let token = build_oauth_client(key_pair)?
            .exchange_refresh_token(&refresh_token)
            .request_async(&http_client)
            .await?;

        Self::from_tokens(
            &http_client,
            token.access_token().clone(),
            Some(token.refresh_token().cloned().unwrap_or(refresh_token)),
        )
        .await
    }

    async fn from_tokens(
        http_client: &reqwest::Client,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Result<Self> {
        let validation = Self::validate_access_token(http_client, &access_token).await?;
        debug!(cluster = %validation.cluster_url, "validated access token");

        Ok(Self {
            access_token,
            refresh_token,
            cluster: validation.cluster_url,
            office: None,
            http_client: reqwest::Client::new(),
        })
    }

    /// Asks the identity server which cluster the token belongs to.
    #[instrument(skip_all)]
    async fn validate_access_token(
        http_client: &reqwest::Client,
        access_token: &AccessToken,
    ) -> Result<AccessTokenValidation> {
        let mut url = TwinfieldEndpoint::AccessTokenValidation.to_url()?;
        url.query_pairs_mut()
            .append_pair("token", access_token.secret());

        let response = http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        Self::parse_validation(status, text)
    }

    fn parse_validation(status: StatusCode, text: String) -> Result<AccessTokenValidation> {
        let url = TwinfieldEndpoint::AccessTokenValidation.to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Forbidden {
                url,
                status_code: status,
                response_body: Some(text),
            }),
            status if status.is_success() => match serde_json::from_str(&text) {
                Ok(validation) => Ok(validation),
                Err(e) => Err(Error::DeserializationError(e, Some(text))),
            },
            status => {
                error!("Unexpected status code from token validation: {}", status);
                Err(Error::UnexpectedStatus {
                    url,
                    status_code: status,
                    response_body: Some(text),
                })
            }
        }
    }

    /// Refreshes the access token using the refresh token.
    pub async fn refresh_access_token(&mut self, key_pair: KeyPair) -> Result<()> {
        let Some(refresh_token) = &self.refresh_token else {
            return Err(Error::Configuration(
                "client has no refresh token".to_string(),
            ));
        };

        let http_client = Self::oauth_http_client()?;
        let token = build_oauth_client(key_pair)?
            .exchange_refresh_token(refresh_token)
            .request_async(&http_client)
            .await?;

        self.access_token = token.access_token().clone();
        if let Some(new_refresh_token) = token.refresh_token() {
            self.refresh_token = Some(new_refresh_token.clone());
        }
        Ok(())
    }

    /// Sets the office (company code) that requests are made for.
    pub fn set_office(&mut self, office: Option<Office>) {
        trace!(?office, "updating office");
        self.office = office;
    }

    #[must_use]
    pub fn with_office(mut self, office: Office) -> Self {
        self.set_office(Some(office));
        self
    }

    #[must_use]
    pub fn office(&self) -> Option<&Office> {
        self.office.as_ref()
    }

    #[must_use]
    pub fn cluster(&self) -> &Url {
        &self.cluster
    }

    /// The refresh token to store for later sessions.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|token| token.secret().as_str())
    }

    #[instrument(skip(response))]
    async fn handle_response(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        debug!(
            "Response from {}: status={}, size={} bytes",
            url,
            status,
            text.len()
        );

        match status {
            StatusCode::OK => soap::process_xml_result(&text),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Forbidden {
                url,
                status_code: status,
                response_body: Some(text),
            }),
            status => {
                if let Some(fault) = soap::fault(&text) {
                    return Err(fault);
                }
                error!("Unexpected status code: {}", status);
                Err(Error::UnexpectedStatus {
                    url,
                    status_code: status,
                    response_body: Some(text),
                })
            }
        }
    }

    /// Access the sales invoices API
    #[must_use]
    pub fn invoices(&self) -> InvoiceApiConnector<'_, Self> {
        InvoiceApiConnector::new(self)
    }

    /// Access the transactions API
    #[must_use]
    pub fn transactions(&self) -> TransactionApiConnector<'_, Self> {
        TransactionApiConnector::new(self)
    }
}

impl Transport for Client {
    #[instrument(skip(self, document))]
    async fn process_xml(&self, document: &str) -> Result<String> {
        let office = self.office.as_ref().ok_or(Error::MissingOffice)?;
        let envelope =
            soap::process_xml_envelope(self.access_token.secret(), office.code(), document)?;
        let url = TwinfieldEndpoint::ProcessXml(self.cluster.clone()).to_url()?;

        trace!(%url, office = office.code(), "making ProcessXmlString request");
        let response = self
            .http_client
            .post(url)
            .header(header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", soap::PROCESS_XML_ACTION)
            .body(envelope)
            .send()
            .await?;

        Self::handle_response(response).await
    }
}
