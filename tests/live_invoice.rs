//! Runs against a real Twinfield office when `TWINFIELD_CLIENT_ID`, `TWINFIELD_CLIENT_SECRET`,
//! `TWINFIELD_REFRESH_TOKEN`, `TWINFIELD_OFFICE` and `TWINFIELD_INVOICE` are set.

use miette::{IntoDiagnostic, Result};
use tracing::info;

use test_utils::{do_setup, try_create_client};

#[tokio::test]
async fn get_invoice() -> Result<()> {
    do_setup();
    let Some(client) = try_create_client().await? else {
        return Ok(());
    };
    let Ok(invoice_number) = std::env::var("TWINFIELD_INVOICE") else {
        info!("TWINFIELD_INVOICE not set, skipping");
        return Ok(());
    };
    let invoice_type = std::env::var("TWINFIELD_INVOICE_TYPE").unwrap_or_else(|_| "FACTUUR".to_string());

    let office = client.office().cloned().unwrap();
    let invoice = client
        .invoices()
        .get(&invoice_type, &invoice_number, &office)
        .await
        .into_diagnostic()?;

    info!(?invoice, "fetched invoice");
    assert_eq!(invoice.invoice_number.as_deref(), Some(invoice_number.as_str()));
    Ok(())
}
