use twinfield_rs::{
    Error, LineField, LineType, Response,
    error::RemoteMessages,
    soap,
};

#[test]
fn test_remote_error_collects_every_message() {
    let response = Response::from_xml(
        r#"<salesinvoices>
            <salesinvoice result="0">
                <header>
                    <customer msgtype="error" msg="Customer 9999 does not exist.">9999</customer>
                    <invoicedate msgtype="warning" msg="Date lies in a closed period.">20200101</invoicedate>
                </header>
                <lines>
                    <line id="1"><article msgtype="error" msg="Article XX is unknown.">XX</article></line>
                </lines>
            </salesinvoice>
        </salesinvoices>"#,
    )
    .unwrap();

    assert!(!response.is_successful());
    assert_eq!(
        response.warning_messages(),
        vec!["invoicedate: Date lies in a closed period."]
    );

    let err = response.assert_successful().unwrap_err();
    match &err {
        Error::Remote { messages, .. } => assert_eq!(
            messages,
            &RemoteMessages(vec![
                "customer: Customer 9999 does not exist.".to_string(),
                "article: Article XX is unknown.".to_string(),
            ])
        ),
        other => panic!("Expected Remote, got {other:?}"),
    }
    assert!(err.span_trace().is_some());
    assert!(!err.is_validation());
}

#[test]
fn test_response_without_result_attribute_is_successful() {
    let response = Response::from_xml("<salesinvoices><salesinvoice/></salesinvoices>").unwrap();
    assert!(response.is_successful());
    assert!(response.assert_successful().is_ok());
}

#[test]
fn test_error_display_formatting() {
    let err = Error::InvalidFieldForLineType {
        field: LineField::VatValue,
        line_type: LineType::Vat,
    };
    assert_eq!(err.to_string(), "field vatValue is not allowed for line type vat");

    let err = Error::remote(Vec::new());
    assert_eq!(err.to_string(), "request rejected by Twinfield: no messages given");

    let err = Error::EmptyBatch { entity: "Invoice" };
    assert_eq!(err.to_string(), "at least one Invoice is required");
}

#[test]
fn test_soap_fault_is_mapped() {
    let err = soap::process_xml_result(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
            <soap:Body>
                <soap:Fault>
                    <faultcode>soap:Server</faultcode>
                    <faultstring>Invalid token.</faultstring>
                </soap:Fault>
            </soap:Body>
        </soap:Envelope>"#,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Fault { ref code, .. } if code == "soap:Server"));
    assert!(err.span_trace().is_none());
}

#[test]
fn test_malformed_response_is_an_xml_error() {
    let err = Response::from_xml("<salesinvoice><header></salesinvoice>").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
}
