use super::{date, office, parse, required_child, text};
use crate::{
    entities::{
        Invoice, InvoiceLine,
        invoice::Totals,
    },
    error::{Error, Result, malformed},
    response::Response,
    xml::Element,
};

/// Maps `salesinvoice` responses into [`Invoice`]s.
pub struct InvoiceMapper;

impl InvoiceMapper {
    /// Maps the first invoice of the response.
    pub fn map(response: &Response) -> Result<Invoice> {
        Self::map_all(response)?
            .into_iter()
            .next()
            .ok_or(Error::NotFound { entity: "Invoice" })
    }

    /// Maps a single `salesinvoice` root or every invoice of a `salesinvoices` root.
    pub fn map_all(response: &Response) -> Result<Vec<Invoice>> {
        let root = response.root();
        match root.name() {
            "salesinvoice" => Ok(vec![Self::map_invoice(root)?]),
            "salesinvoices" => root
                .children_named("salesinvoice")
                .map(Self::map_invoice)
                .collect(),
            other => Err(malformed(format!("unexpected root element <{other}> for invoices"))),
        }
    }

    fn map_invoice(element: &Element) -> Result<Invoice> {
        let header = required_child(element, "salesinvoice", "header")?;

        let mut invoice = Invoice {
            office: office(header),
            invoice_type: text(header, "invoicetype"),
            invoice_number: text(header, "invoicenumber"),
            invoice_date: date(header, "invoicedate")?,
            due_date: date(header, "duedate")?,
            bank: text(header, "bank"),
            invoice_address_number: parse(header, "invoiceaddressnumber")?,
            deliver_address_number: parse(header, "deliveraddressnumber")?,
            customer: text(header, "customer"),
            period: text(header, "period"),
            currency: text(header, "currency"),
            status: parse(header, "status")?,
            payment_method: text(header, "paymentmethod"),
            header_text: text(header, "headertext"),
            footer_text: text(header, "footertext"),
            ..Invoice::default()
        };

        if let Some(lines) = element.child("lines") {
            invoice.lines = lines
                .children_named("line")
                .map(Self::map_line)
                .collect::<Result<_>>()?;
        }

        let totals = element
            .child("totals")
            .map(|totals| -> Result<Totals> {
                Ok(Totals::new(
                    parse(totals, "valueexcl")?,
                    parse(totals, "valueinc")?,
                ))
            })
            .transpose()?;
        invoice.set_totals(totals);

        trace!(invoice_number = ?invoice.invoice_number, lines = invoice.lines.len(), "mapped invoice");
        Ok(invoice)
    }

    fn map_line(element: &Element) -> Result<InvoiceLine> {
        let mut line = InvoiceLine {
            id: element.attribute("id").map(str::to_string),
            article: text(element, "article"),
            sub_article: text(element, "subarticle"),
            quantity: parse(element, "quantity")?,
            units: parse(element, "units")?,
            units_price_excl: parse(element, "unitspriceexcl")?,
            allow_discount_or_premium: parse(element, "allowdiscountorpremium")?,
            description: text(element, "description"),
            vat_code: text(element, "vatcode"),
            free_text_1: text(element, "freetext1"),
            free_text_2: text(element, "freetext2"),
            free_text_3: text(element, "freetext3"),
            dim1: text(element, "dim1"),
            performance_type: parse(element, "performancetype")?,
            performance_date: date(element, "performancedate")?,
            ..InvoiceLine::default()
        };
        line.set_calculated_values(
            parse(element, "valueexcl")?,
            parse(element, "vatvalue")?,
            parse(element, "valueinc")?,
        );
        Ok(line)
    }
}
