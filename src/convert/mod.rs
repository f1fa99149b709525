//! Converters turning raw JSON values of the osu! API into typed values.
//!
//! The API hands out nearly every number as a string, so the scalar
//! converters accept both the JSON-native shape and its textual form.

use std::{marker::PhantomData, str::FromStr};

use serde_json::Value;

use crate::error::ConvertError;

pub use self::{
    combinator::{IntEnum, JsonList, Nested, Nullable, PreProcessInt},
    date::{format_date, parse_date, Date, DATE_FORMAT},
};

mod combinator;
mod date;

/// Maps one raw JSON value to one typed value, or fails.
pub trait Converter {
    type Output;

    fn convert(&self, raw: &Value) -> Result<Self::Output, ConvertError>;
}

/// Strings as-is; numbers, booleans, arrays and objects as their JSON text.
#[derive(Copy, Clone, Debug, Default)]
pub struct Str;

impl Converter for Str {
    type Output = String;

    fn convert(&self, raw: &Value) -> Result<String, ConvertError> {
        match raw {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Err(ConvertError::invalid_type("string", raw)),
            other => Ok(other.to_string()),
        }
    }
}

/// Integers, either as JSON number or as numeric string.
pub struct Int<T>(PhantomData<T>);

impl<T> Int<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Int<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Converter for Int<T>
where
    T: FromStr + TryFrom<i64> + TryFrom<u64>,
{
    type Output = T;

    fn convert(&self, raw: &Value) -> Result<T, ConvertError> {
        match raw {
            Value::Number(n) => {
                let converted = if let Some(n) = n.as_i64() {
                    T::try_from(n).ok()
                } else if let Some(n) = n.as_u64() {
                    T::try_from(n).ok()
                } else {
                    None
                };

                converted.ok_or_else(|| ConvertError::malformed("integer", n))
            }
            Value::String(s) => s.parse().map_err(|_| ConvertError::malformed("integer", s)),
            other => Err(ConvertError::invalid_type("integer", other)),
        }
    }
}

/// Floating point numbers, either as JSON number or as numeric string.
#[derive(Copy, Clone, Debug, Default)]
pub struct Float;

impl Converter for Float {
    type Output = f64;

    fn convert(&self, raw: &Value) -> Result<f64, ConvertError> {
        match raw {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ConvertError::malformed("float", n)),
            Value::String(s) => s.parse().map_err(|_| ConvertError::malformed("float", s)),
            other => Err(ConvertError::invalid_type("float", other)),
        }
    }
}

/// Booleans as JSON booleans, `0`/`1`, or `"0"`/`"1"`/`"true"`/`"false"`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bool;

impl Converter for Bool {
    type Output = bool;

    fn convert(&self, raw: &Value) -> Result<bool, ConvertError> {
        match raw {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(ConvertError::malformed("boolean", n)),
            },
            Value::String(s) => match s.as_str() {
                "0" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                _ => Err(ConvertError::malformed("boolean", s)),
            },
            other => Err(ConvertError::invalid_type("boolean", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn str_accepts_scalars() {
        assert_eq!(Str.convert(&json!("peppy")).unwrap(), "peppy");
        assert_eq!(Str.convert(&json!(75)).unwrap(), "75");
        assert!(matches!(
            Str.convert(&Value::Null),
            Err(ConvertError::InvalidType {
                expected: "string",
                found: "null"
            })
        ));
    }

    #[test]
    fn int_from_number_and_string() {
        assert_eq!(Int::<u32>::new().convert(&json!("124493")).unwrap(), 124493);
        assert_eq!(Int::<i64>::new().convert(&json!(-2)).unwrap(), -2);
        assert_eq!(
            Int::<u64>::new().convert(&json!("12345678901")).unwrap(),
            12_345_678_901
        );
    }

    #[test]
    fn int_rejects_bad_shapes() {
        let int = Int::<u32>::new();

        assert!(matches!(
            int.convert(&json!("abc")),
            Err(ConvertError::Malformed { expected: "integer", .. })
        ));
        assert!(matches!(
            int.convert(&json!(1.5)),
            Err(ConvertError::Malformed { .. })
        ));
        assert!(matches!(
            int.convert(&json!(-1)),
            Err(ConvertError::Malformed { .. })
        ));
        assert!(matches!(
            int.convert(&json!(true)),
            Err(ConvertError::InvalidType { found: "boolean", .. })
        ));
    }

    #[test]
    fn float_from_number_and_string() {
        assert_eq!(Float.convert(&json!("98.7654")).unwrap(), 98.7654);
        assert_eq!(Float.convert(&json!(4)).unwrap(), 4.0);
        assert!(Float.convert(&json!("fast")).is_err());
    }

    #[test]
    fn bool_variants() {
        assert!(Bool.convert(&json!("1")).unwrap());
        assert!(!Bool.convert(&json!("0")).unwrap());
        assert!(Bool.convert(&json!(true)).unwrap());
        assert!(!Bool.convert(&json!(0)).unwrap());
        assert!(Bool.convert(&json!("2")).is_err());
        assert!(Bool.convert(&json!(null)).is_err());
    }
}
