#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use twinfield_rs::{Client, KeyPair, Office};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let refresh_token =
        std::env::var("TWINFIELD_REFRESH_TOKEN").context("TWINFIELD_REFRESH_TOKEN not set")?;
    let mut args = std::env::args().skip(1);
    let invoice_type = args.next().context("usage: get_invoice <invoice type> <number>")?;
    let invoice_number = args.next().context("usage: get_invoice <invoice type> <number>")?;

    let office = Office::from_env()?;
    let client = Client::from_refresh_token(KeyPair::from_env()?, refresh_token)
        .await?
        .with_office(office.clone());

    let invoice = client
        .invoices()
        .get(&invoice_type, &invoice_number, &office)
        .await?;
    info!("found invoice: {:#?}", invoice);

    if let Some(totals) = invoice.totals() {
        info!(
            "total excl. VAT {:?}, incl. VAT {:?}",
            totals.value_excl(),
            totals.value_inc()
        );
    }

    Ok(())
}
