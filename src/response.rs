use crate::{
    error::{Error, Result},
    xml::Element,
};

/// A parsed `ProcessXml` response document.
///
/// Twinfield flags rejected objects with `result="0"` and attaches messages to the offending
/// elements through `msgtype` / `msg` attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    root: Element,
}

impl Response {
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// A response is unsuccessful when the root or any nested object reports `result="0"`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        let mut successful = true;
        self.root.walk(&mut |element| {
            if element.attribute("result") == Some("0") {
                successful = false;
            }
        });
        successful
    }

    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.messages("error")
    }

    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.messages("warning")
    }

    fn messages(&self, kind: &str) -> Vec<String> {
        let mut messages = Vec::new();
        self.root.walk(&mut |element| {
            if element.attribute("msgtype") == Some(kind)
                && let Some(msg) = element.attribute("msg")
            {
                messages.push(format!("{}: {msg}", element.name()));
            }
        });
        messages
    }

    pub fn assert_successful(&self) -> Result<()> {
        if self.is_successful() {
            Ok(())
        } else {
            Err(Error::remote(self.error_messages()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_nested_object_fails_the_response() {
        let response = Response::from_xml(
            r#"<salesinvoices>
                <salesinvoice result="1"/>
                <salesinvoice result="0">
                    <header><customer msgtype="error" msg="Customer 9999 does not exist."/></header>
                </salesinvoice>
            </salesinvoices>"#,
        )
        .unwrap();

        assert!(!response.is_successful());
        let err = response.assert_successful().unwrap_err();
        match err {
            Error::Remote { messages, .. } => assert_eq!(
                messages.0,
                vec!["customer: Customer 9999 does not exist.".to_string()]
            ),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn warnings_do_not_fail_the_response() {
        let response = Response::from_xml(
            r#"<transaction result="1"><header><date msgtype="warning" msg="Date is in the future."/></header></transaction>"#,
        )
        .unwrap();
        assert!(response.assert_successful().is_ok());
        assert_eq!(
            response.warning_messages(),
            vec!["date: Date is in the future.".to_string()]
        );
        assert!(response.error_messages().is_empty());
    }

    #[test]
    fn missing_result_attribute_counts_as_success() {
        let response = Response::from_xml("<salesinvoices><salesinvoice/></salesinvoices>").unwrap();
        assert!(response.is_successful());
    }
}
