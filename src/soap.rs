//! SOAP envelope handling for the `ProcessXmlString` web service operation.

use crate::{
    error::{Error, Result},
    xml::{Element, XmlWriter},
};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const TWINFIELD_NS: &str = "http://www.twinfield.com/";
pub const PROCESS_XML_ACTION: &str = "\"http://www.twinfield.com/ProcessXmlString\"";

/// Wraps a request document in a `ProcessXmlString` envelope authenticated by an access token.
pub fn process_xml_envelope(access_token: &str, company_code: &str, document: &str) -> Result<String> {
    let mut writer = XmlWriter::new();
    writer.declaration()?;
    writer.start(
        "soap:Envelope",
        &[("xmlns:soap", SOAP_ENVELOPE_NS), ("xmlns:twin", TWINFIELD_NS)],
    )?;

    writer.start("soap:Header", &[])?;
    writer.start("twin:Header", &[])?;
    writer.element("twin:AccessToken", access_token)?;
    writer.element("twin:CompanyCode", company_code)?;
    writer.end("twin:Header")?;
    writer.end("soap:Header")?;

    writer.start("soap:Body", &[])?;
    writer.start("twin:ProcessXmlString", &[])?;
    writer.element("twin:xmlRequest", document)?;
    writer.end("twin:ProcessXmlString")?;
    writer.end("soap:Body")?;

    writer.end("soap:Envelope")?;
    writer.finish()
}

/// Extracts the response document from a successful `ProcessXmlString` envelope.
pub fn process_xml_result(envelope: &str) -> Result<String> {
    let root = Element::parse(envelope)?;
    if let Some(fault) = fault_from(&root) {
        return Err(fault);
    }
    root.find("ProcessXmlStringResult")
        .map(|result| result.text().to_string())
        .ok_or(Error::MissingField {
            entity: "ProcessXmlStringResponse",
            field: "ProcessXmlStringResult",
        })
}

/// Parses a SOAP fault, if the body holds one.
pub fn fault(envelope: &str) -> Option<Error> {
    Element::parse(envelope).ok().as_ref().and_then(fault_from)
}

fn fault_from(root: &Element) -> Option<Error> {
    let fault = root.find("Fault")?;
    Some(Error::Fault {
        code: fault
            .find("faultcode")
            .map(|code| code.text().to_string())
            .unwrap_or_default(),
        message: fault
            .find("faultstring")
            .map(|message| message.text().to_string())
            .unwrap_or_default(),
    })
}
