//! Mapping of response documents into entities.
//!
//! Mappers are the only place where fields calculated by Twinfield get populated.

pub mod invoice;
pub mod transaction;

pub use invoice::InvoiceMapper;
pub use transaction::TransactionMapper;

use std::str::FromStr;

use time::Date;

use crate::{
    entities::Office,
    error::{Error, Result},
    utils::date_format::parse_date,
    xml::Element,
};

// Free text is kept verbatim; an empty element is an empty string, not a missing one.
fn text(element: &Element, name: &str) -> Option<String> {
    element.child_value(name).map(str::to_string)
}

fn code(element: &Element, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_string)
}

fn parse<T: FromStr>(element: &Element, name: &'static str) -> Result<Option<T>> {
    element
        .child_text(name)
        .map(|value| {
            value.parse().map_err(|_| Error::InvalidValue {
                field: name,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn date(element: &Element, name: &'static str) -> Result<Option<Date>> {
    element
        .child_text(name)
        .map(|value| parse_date(name, value))
        .transpose()
}

fn office(header: &Element) -> Option<Office> {
    let office = header.child("office").filter(|office| !office.text().is_empty())?;
    Some(Office::from_code(office.text()).with_name(office.attribute("name").map(str::to_string)))
}

fn required_child<'a>(element: &'a Element, entity: &'static str, field: &'static str) -> Result<&'a Element> {
    element.child(field).ok_or(Error::MissingField { entity, field })
}
