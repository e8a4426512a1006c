use time::{Date, macros::format_description};

use crate::error::{Error, Result};

// Twinfield writes dates as `YYYYMMDD` without separators.
pub fn format_date(date: Date) -> Result<String> {
    let format = format_description!("[year][month][day]");
    date.format(format).map_err(|e| Error::InvalidValue {
        field: "date",
        value: e.to_string(),
    })
}

pub fn parse_date(field: &'static str, date_str: &str) -> Result<Date> {
    let format = format_description!("[year][month][day]");
    Date::parse(date_str, format).map_err(|_| Error::InvalidValue {
        field,
        value: date_str.to_string(),
    })
}
