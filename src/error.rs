use std::error::Error as StdError;

use serde_json::Value;
use thiserror::Error;

/// Boxed error returned by a [`Transport`](crate::client::Transport).
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure to turn one raw JSON value into a typed value.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("failed to parse `{value}` as {expected}")]
    Malformed {
        expected: &'static str,
        value: String,
    },
    #[error("failed to parse `{value}` as date")]
    Date {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("unknown {kind} value {value}")]
    UnknownEnum { kind: &'static str, value: i64 },
    #[error("invalid list element at index {index}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConvertError>,
    },
    #[error(transparent)]
    Model(Box<ModelError>),
}

impl ConvertError {
    pub(crate) fn invalid_type(expected: &'static str, found: &Value) -> Self {
        Self::InvalidType {
            expected,
            found: json_kind(found),
        }
    }

    pub(crate) fn malformed(expected: &'static str, value: impl ToString) -> Self {
        Self::Malformed {
            expected,
            value: value.to_string(),
        }
    }

    /// Whether this error, or the error of a list element it wraps,
    /// is an out-of-set enum code.
    pub fn is_unknown_enum(&self) -> bool {
        match self {
            Self::UnknownEnum { .. } => true,
            Self::Element { source, .. } => source.is_unknown_enum(),
            _ => false,
        }
    }
}

impl From<ModelError> for ConvertError {
    fn from(err: ModelError) -> Self {
        Self::Model(Box::new(err))
    }
}

/// Failure to construct a model from a raw JSON object.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{model}: missing field `{field}` (key `{key}`)")]
    MissingField {
        model: &'static str,
        field: &'static str,
        key: &'static str,
    },
    #[error("{model}: invalid field `{field}`")]
    Field {
        model: &'static str,
        field: &'static str,
        #[source]
        source: ConvertError,
    },
    #[error("{model}: expected object, found {found}")]
    NotAnObject {
        model: &'static str,
        found: &'static str,
    },
    #[error("{model}: field `{field}` does not hold a {expected}")]
    FieldType {
        model: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    #[error("{model}: field `{field}` is not declared")]
    Undeclared {
        model: &'static str,
        field: &'static str,
    },
    #[error("{model}: inherited field `{field}` redeclared outside of `overrides`")]
    Redeclared {
        model: &'static str,
        field: &'static str,
    },
}

impl ModelError {
    /// Declared name of the field that failed, if the error is field related.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. }
            | Self::Field { field, .. }
            | Self::FieldType { field, .. }
            | Self::Undeclared { field, .. }
            | Self::Redeclared { field, .. } => Some(field),
            Self::NotAnObject { .. } => None,
        }
    }

    /// The conversion error of a [`ModelError::Field`].
    pub fn conversion(&self) -> Option<&ConvertError> {
        match self {
            Self::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors of [`OsuApi`](crate::OsuApi) requests.
#[derive(Debug, Error)]
pub enum OsuError {
    #[error("failed to request `{endpoint}`")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: TransportError,
    },
    #[error("failed to deserialize `{endpoint}` response")]
    Json {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode query parameters")]
    Query(#[from] serde_urlencoded::ser::Error),
    #[error("failed to format date parameter")]
    DateFormat(#[from] time::error::Format),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
