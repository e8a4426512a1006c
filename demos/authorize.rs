#[macro_use]
extern crate tracing;

use std::{io::BufRead, str::FromStr};

use anyhow::{Context, Result, bail};
use twinfield_rs::{Client, KeyPair, Office};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let key_pair = KeyPair::from_env()?;
    let office = Office::from_env()?;
    let redirect_url = Url::from_str("http://localhost:4000/redirect")?;

    // Get authorization URL and CSRF token
    let (authorize_url, csrf_token) = Client::authorize_url(key_pair.clone(), redirect_url.clone())?;
    info!("Sign in to Twinfield: {}", authorize_url);
    info!("Paste the URL you were redirected to:");

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let redirected = Url::parse(line.trim())?;

    let pair = |name: &str| {
        redirected
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };
    let code = pair("code").context("redirect carries no code")?;
    if pair("state").as_deref() != Some(csrf_token.secret().as_str()) {
        bail!("state does not match the CSRF token");
    }

    // Exchange authorization code for access token
    let client = Client::from_authorization_code(key_pair, redirect_url, code)
        .await?
        .with_office(office);
    info!("Authorized against cluster {}", client.cluster());

    if let Some(refresh_token) = client.refresh_token() {
        info!("Store this refresh token as TWINFIELD_REFRESH_TOKEN: {}", refresh_token);
    }

    Ok(())
}
