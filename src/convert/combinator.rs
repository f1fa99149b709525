use std::marker::PhantomData;

use serde_json::Value;

use crate::{attribute::AttributeModel, error::ConvertError};

use super::{Converter, Int};

/// `null` becomes `None`, anything else goes through the inner converter.
#[derive(Copy, Clone, Debug, Default)]
pub struct Nullable<C>(pub C);

impl<C: Converter> Converter for Nullable<C> {
    type Output = Option<C::Output>;

    fn convert(&self, raw: &Value) -> Result<Self::Output, ConvertError> {
        match raw {
            Value::Null => Ok(None),
            raw => self.0.convert(raw).map(Some),
        }
    }
}

/// Converts every element of a JSON array, keeping their order.
#[derive(Copy, Clone, Debug, Default)]
pub struct JsonList<C>(pub C);

impl<C: Converter> Converter for JsonList<C> {
    type Output = Vec<C::Output>;

    fn convert(&self, raw: &Value) -> Result<Self::Output, ConvertError> {
        let Value::Array(elements) = raw else {
            return Err(ConvertError::invalid_type("array", raw));
        };

        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                self.0
                    .convert(element)
                    .map_err(|source| ConvertError::Element {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}

/// A closed set of integer codes.
pub trait IntEnum: Sized {
    /// Name used in error messages.
    const KIND: &'static str;

    fn from_code(code: i64) -> Option<Self>;

    fn code(&self) -> i64;
}

/// Coerces the raw value to an integer before looking it up in `E`.
pub struct PreProcessInt<E>(PhantomData<E>);

impl<E> PreProcessInt<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for PreProcessInt<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: IntEnum> Converter for PreProcessInt<E> {
    type Output = E;

    fn convert(&self, raw: &Value) -> Result<E, ConvertError> {
        let code = Int::<i64>::new().convert(raw)?;

        E::from_code(code).ok_or(ConvertError::UnknownEnum {
            kind: E::KIND,
            value: code,
        })
    }
}

/// A JSON object converted into the model `M`.
pub struct Nested<M>(PhantomData<M>);

impl<M> Nested<M> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M> Default for Nested<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: AttributeModel> Converter for Nested<M> {
    type Output = M;

    fn convert(&self, raw: &Value) -> Result<M, ConvertError> {
        M::from_value(raw).map_err(ConvertError::from)
    }
}
