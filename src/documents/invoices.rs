use super::Document;
use crate::{
    entities::{Invoice, InvoiceLine},
    error::Result,
    utils::date_format::format_date,
    xml::XmlWriter,
};

/// Write document carrying one or more sales invoices, in insertion order.
#[derive(Debug, Default)]
pub struct InvoicesDocument<'a> {
    invoices: Vec<&'a Invoice>,
}

impl<'a> InvoicesDocument<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_invoice(&mut self, invoice: &'a Invoice) {
        self.invoices.push(invoice);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

impl Document for InvoicesDocument<'_> {
    fn to_xml(&self) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer.start("salesinvoices", &[])?;
        for invoice in &self.invoices {
            write_invoice(&mut writer, invoice)?;
        }
        writer.end("salesinvoices")?;
        writer.finish()
    }
}

fn write_invoice(writer: &mut XmlWriter, invoice: &Invoice) -> Result<()> {
    writer.start("salesinvoice", &[])?;

    writer.start("header", &[])?;
    writer.optional("office", invoice.office.as_ref().map(|office| office.code()))?;
    writer.optional("invoicetype", invoice.invoice_type.as_ref())?;
    writer.optional("invoicenumber", invoice.invoice_number.as_ref())?;
    writer.optional("invoicedate", invoice.invoice_date.map(format_date).transpose()?)?;
    writer.optional("duedate", invoice.due_date.map(format_date).transpose()?)?;
    writer.optional("bank", invoice.bank.as_ref())?;
    writer.optional("invoiceaddressnumber", invoice.invoice_address_number)?;
    writer.optional("deliveraddressnumber", invoice.deliver_address_number)?;
    writer.optional("customer", invoice.customer.as_ref())?;
    writer.optional("period", invoice.period.as_ref())?;
    writer.optional("currency", invoice.currency.as_ref())?;
    writer.optional("status", invoice.status)?;
    writer.optional("paymentmethod", invoice.payment_method.as_ref())?;
    writer.optional("headertext", invoice.header_text.as_ref())?;
    writer.optional("footertext", invoice.footer_text.as_ref())?;
    writer.end("header")?;

    writer.start("lines", &[])?;
    for line in &invoice.lines {
        write_line(writer, line)?;
    }
    writer.end("lines")?;

    writer.end("salesinvoice")
}

fn write_line(writer: &mut XmlWriter, line: &InvoiceLine) -> Result<()> {
    match line.id.as_deref() {
        Some(id) => writer.start("line", &[("id", id)])?,
        None => writer.start("line", &[])?,
    }
    writer.optional("quantity", line.quantity)?;
    writer.optional("article", line.article.as_ref())?;
    writer.optional("subarticle", line.sub_article.as_ref())?;
    writer.optional("description", line.description.as_ref())?;
    writer.optional("unitspriceexcl", line.units_price_excl)?;
    writer.optional("units", line.units)?;
    writer.optional("allowdiscountorpremium", line.allow_discount_or_premium)?;
    writer.optional("vatcode", line.vat_code.as_ref())?;
    writer.optional("freetext1", line.free_text_1.as_ref())?;
    writer.optional("freetext2", line.free_text_2.as_ref())?;
    writer.optional("freetext3", line.free_text_3.as_ref())?;
    writer.optional("dim1", line.dim1.as_ref())?;
    writer.optional("performancetype", line.performance_type)?;
    writer.optional(
        "performancedate",
        line.performance_date.map(format_date).transpose()?,
    )?;
    writer.end("line")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use super::*;
    use crate::{entities::Office, xml::Element};

    fn invoice(customer: &str) -> Invoice {
        let mut invoice = Invoice::new(Office::from_code("NL001"), "FACTUUR", customer);
        invoice.invoice_date = Some(date!(2024 - 01 - 31));
        invoice.currency = Some("EUR".to_string());
        let mut line = InvoiceLine::new("9060", dec!(2));
        line.id = Some("1".to_string());
        line.units_price_excl = Some(dec!(49.95));
        invoice.add_line(line);
        invoice
    }

    #[test]
    fn invoices_are_written_in_insertion_order() {
        let first = invoice("1000");
        let second = invoice("1001");
        let mut document = InvoicesDocument::new();
        document.add_invoice(&first);
        document.add_invoice(&second);

        let root = Element::parse(&document.to_xml().unwrap()).unwrap();
        let customers: Vec<_> = root
            .children_named("salesinvoice")
            .filter_map(|invoice| invoice.child("header")?.child_text("customer"))
            .collect();
        assert_eq!(customers, vec!["1000", "1001"]);
    }

    #[test]
    fn header_and_lines_use_wire_formats() {
        let invoice = invoice("1000");
        let mut document = InvoicesDocument::new();
        document.add_invoice(&invoice);
        let root = Element::parse(&document.to_xml().unwrap()).unwrap();
        let sales_invoice = root.child("salesinvoice").unwrap();

        let header = sales_invoice.child("header").unwrap();
        assert_eq!(header.child_text("invoicedate"), Some("20240131"));
        assert_eq!(header.child_text("office"), Some("NL001"));
        assert!(header.child("invoicenumber").is_none());

        let line = sales_invoice.child("lines").unwrap().child("line").unwrap();
        assert_eq!(line.attribute("id"), Some("1"));
        assert_eq!(line.child_text("unitspriceexcl"), Some("49.95"));
        assert!(line.child("valueinc").is_none());
    }
}
