use serde_json::Value;
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

use crate::error::ConvertError;

use super::Converter;

/// `%Y-%m-%d %H:%M:%S`, the only date format of the API.
pub const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parse a date in the API's format. There is no fallback format.
pub fn parse_date(s: &str) -> Result<PrimitiveDateTime, ConvertError> {
    PrimitiveDateTime::parse(s, DATE_FORMAT).map_err(|source| ConvertError::Date {
        value: s.to_owned(),
        source,
    })
}

/// Format a date the way the API expects it in query parameters.
pub fn format_date(date: PrimitiveDateTime) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Date;

impl Converter for Date {
    type Output = PrimitiveDateTime;

    fn convert(&self, raw: &Value) -> Result<PrimitiveDateTime, ConvertError> {
        match raw {
            Value::String(s) => parse_date(s),
            other => Err(ConvertError::invalid_type("date string", other)),
        }
    }
}
