//! Declarative mapping of raw JSON objects onto typed models.
//!
//! Every model owns a [`Schema`]: an ordered list of [`Attribute`]s, each
//! naming a field, the JSON key it is read from, and its converter.
//! Models are declared through [`attribute_model!`](crate::attribute_model),
//! which builds the schema once and moves the converted values into the
//! struct's fields.

use std::{
    any::{type_name, Any},
    fmt::{Debug, Formatter, Result as FmtResult},
    slice::Iter,
};

use serde_json::{Map, Value};

use crate::{
    convert::Converter,
    error::{json_kind, ConvertError, ModelError},
};

type AnyValue = Box<dyn Any + Send>;
type ConvertFn = dyn Fn(&Value) -> Result<AnyValue, ConvertError> + Send + Sync;

/// Declares one field of a model.
pub struct Attribute {
    name: &'static str,
    source_key: &'static str,
    convert: Box<ConvertFn>,
}

impl Attribute {
    /// The source key defaults to `name`.
    pub fn new<T, C>(name: &'static str, converter: C) -> Self
    where
        T: Send + 'static,
        C: Converter<Output = T> + Send + Sync + 'static,
    {
        let convert = move |raw: &Value| {
            converter
                .convert(raw)
                .map(|value| Box::new(value) as AnyValue)
        };

        Self {
            name,
            source_key: name,
            convert: Box::new(convert),
        }
    }

    /// Read the field from a JSON key other than its name.
    pub fn source_key(mut self, source_key: &'static str) -> Self {
        self.source_key = source_key;

        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &'static str {
        self.source_key
    }

    fn extract(&self, model: &'static str, object: &Map<String, Value>) -> Result<AnyValue, ModelError> {
        let raw = object
            .get(self.source_key)
            .ok_or(ModelError::MissingField {
                model,
                field: self.name,
                key: self.source_key,
            })?;

        (self.convert)(raw).map_err(|source| ModelError::Field {
            model,
            field: self.name,
            source,
        })
    }
}

impl Debug for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("source_key", &self.source_key)
            .finish_non_exhaustive()
    }
}

/// Ordered attributes of one model type.
#[derive(Debug)]
pub struct Schema {
    model: &'static str,
    attributes: Vec<Attribute>,
    /// First attribute added under a name that was already taken.
    redeclared: Option<&'static str>,
}

impl Schema {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            attributes: Vec::new(),
            redeclared: None,
        }
    }

    /// Start a child schema from its parent's attributes.
    pub fn extend(parent: Schema, model: &'static str) -> Self {
        Self {
            model,
            attributes: parent.attributes,
            redeclared: parent.redeclared,
        }
    }

    /// Add a new attribute.
    ///
    /// A name that is already declared is not added; the schema remembers it
    /// and every construction fails with [`ModelError::Redeclared`].
    pub fn add(mut self, attribute: Attribute) -> Self {
        if self.get(attribute.name).is_some() {
            self.redeclared.get_or_insert(attribute.name);
        } else {
            self.attributes.push(attribute);
        }

        self
    }

    /// Add an attribute, replacing an earlier one of the same name in place.
    pub fn with(mut self, attribute: Attribute) -> Self {
        match self.attributes.iter().position(|a| a.name == attribute.name) {
            Some(idx) => self.attributes[idx] = attribute,
            None => self.attributes.push(attribute),
        }

        self
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Name of an attribute that was added twice through [`Schema::add`].
    pub fn redeclared(&self) -> Option<&'static str> {
        self.redeclared
    }

    /// Apply every attribute to the object, failing on the first error.
    pub fn construct(&self, object: &Map<String, Value>) -> Result<Fields, ModelError> {
        if let Some(field) = self.redeclared {
            return Err(ModelError::Redeclared {
                model: self.model,
                field,
            });
        }

        let values = self
            .attributes
            .iter()
            .map(|attribute| {
                attribute
                    .extract(self.model, object)
                    .map(|value| (attribute.name, value))
            })
            .collect::<Result<_, _>>()?;

        Ok(Fields {
            model: self.model,
            values,
        })
    }
}

/// Converted values of a constructed schema, keyed by attribute name.
pub struct Fields {
    model: &'static str,
    values: Vec<(&'static str, AnyValue)>,
}

impl Fields {
    /// Move a value out by its attribute name.
    pub fn take<T: 'static>(&mut self, name: &'static str) -> Result<T, ModelError> {
        let idx = self
            .values
            .iter()
            .position(|(field, _)| *field == name)
            .ok_or(ModelError::Undeclared {
                model: self.model,
                field: name,
            })?;

        let (_, value) = self.values.swap_remove(idx);

        value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ModelError::FieldType {
                model: self.model,
                field: name,
                expected: type_name::<T>(),
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A type constructed from a raw JSON object through its [`Schema`].
pub trait AttributeModel: Sized {
    /// Build a fresh schema for this model.
    fn declare() -> Schema;

    /// The schema, built on first access.
    fn schema() -> &'static Schema;

    /// Move this model's values out of constructed fields.
    fn from_fields(fields: &mut Fields) -> Result<Self, ModelError>;

    fn from_object(object: &Map<String, Value>) -> Result<Self, ModelError> {
        let mut fields = Self::schema().construct(object)?;

        Self::from_fields(&mut fields)
    }

    fn from_value(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(ModelError::NotAnObject {
                model: Self::schema().model(),
                found: json_kind(other),
            }),
        }
    }
}

/// Declare a struct whose fields are read from a JSON object.
///
/// Each field is `name: Type = converter`, optionally followed by
/// `=> "key"` when the JSON key differs from the field name.
/// `struct Child extends Parent { .. }` embeds the parent as `base`,
/// derefs to it, and inherits its attributes. A trailing
/// `overrides { .. }` block redeclares inherited attributes; their values
/// stay in the parent's fields. An inherited field redeclared in the body
/// instead makes every construction fail with [`ModelError::Redeclared`].
#[macro_export]
macro_rules! attribute_model {
    (@attribute $field:ident: $ty:ty = $converter:expr) => {
        $crate::attribute::Attribute::new::<$ty, _>(stringify!($field), $converter)
    };
    (@attribute $field:ident: $ty:ty = $converter:expr => $key:literal) => {
        $crate::attribute::Attribute::new::<$ty, _>(stringify!($field), $converter)
            .source_key($key)
    };
    (@schema $name:ident) => {
        fn schema() -> &'static $crate::attribute::Schema {
            static SCHEMA: ::std::sync::OnceLock<$crate::attribute::Schema> =
                ::std::sync::OnceLock::new();

            SCHEMA.get_or_init(<$name as $crate::attribute::AttributeModel>::declare)
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident extends $parent:ty {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty = $converter:expr $(=> $key:literal)?
            ),* $(,)?
        }
        $(
            overrides {
                $(
                    $inherited:ident: $inherited_ty:ty = $inherited_converter:expr
                    $(=> $inherited_key:literal)?
                ),* $(,)?
            }
        )?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            pub base: $parent,
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl ::std::ops::Deref for $name {
            type Target = $parent;

            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }

        impl $crate::attribute::AttributeModel for $name {
            fn declare() -> $crate::attribute::Schema {
                let parent = <$parent as $crate::attribute::AttributeModel>::declare();

                $crate::attribute::Schema::extend(parent, stringify!($name))
                    $(
                        .add($crate::attribute_model!(@attribute $field: $ty = $converter $(=> $key)?))
                    )*
                    $($(
                        .with($crate::attribute_model!(
                            @attribute $inherited: $inherited_ty = $inherited_converter
                            $(=> $inherited_key)?
                        ))
                    )*)?
            }

            $crate::attribute_model!(@schema $name);

            fn from_fields(
                fields: &mut $crate::attribute::Fields,
            ) -> ::std::result::Result<Self, $crate::error::ModelError> {
                Ok(Self {
                    base: <$parent as $crate::attribute::AttributeModel>::from_fields(fields)?,
                    $( $field: fields.take(stringify!($field))?, )*
                })
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty = $converter:expr $(=> $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::attribute::AttributeModel for $name {
            fn declare() -> $crate::attribute::Schema {
                $crate::attribute::Schema::new(stringify!($name))
                    $(
                        .add($crate::attribute_model!(@attribute $field: $ty = $converter $(=> $key)?))
                    )*
            }

            $crate::attribute_model!(@schema $name);

            fn from_fields(
                fields: &mut $crate::attribute::Fields,
            ) -> ::std::result::Result<Self, $crate::error::ModelError> {
                Ok(Self {
                    $( $field: fields.take(stringify!($field))?, )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::convert::{Bool, Int, Nullable, Str};

    use super::*;

    crate::attribute_model! {
        #[derive(Debug, PartialEq)]
        struct Parent {
            id: u32 = Int::new(),
            label: String = Str,
        }
    }

    crate::attribute_model! {
        #[derive(Debug, PartialEq)]
        struct Child extends Parent {
            hidden: Option<bool> = Nullable(Bool) => "private",
        }
        overrides {
            label: String = Str => "title",
        }
    }

    crate::attribute_model! {
        #[allow(dead_code)]
        #[derive(Debug)]
        struct Shadowing extends Parent {
            label: String = Str => "title",
        }
    }

    #[test]
    fn schema_keeps_declaration_order() {
        let names: Vec<_> = Parent::schema().iter().map(Attribute::name).collect();

        assert_eq!(names, ["id", "label"]);
        assert_eq!(Parent::schema().model(), "Parent");
    }

    #[test]
    fn child_overrides_by_name() {
        let schema = Child::schema();
        let pairs: Vec<_> = schema.iter().map(|a| (a.name(), a.key())).collect();

        assert_eq!(
            pairs,
            [("id", "id"), ("label", "title"), ("hidden", "private")]
        );

        // the parent's own schema is untouched
        assert_eq!(Parent::schema().get("label").unwrap().key(), "label");
    }

    #[test]
    fn child_construction_uses_overridden_key() {
        let raw = json!({ "id": "7", "title": "from title", "private": null });
        let child = Child::from_value(&raw).unwrap();

        assert_eq!(child.id, 7);
        assert_eq!(child.base.label, "from title");
        assert_eq!(child.label, "from title");
        assert_eq!(child.hidden, None);
    }

    #[test]
    fn body_redeclaration_is_rejected() {
        let schema = Shadowing::schema();

        assert_eq!(schema.redeclared(), Some("label"));
        assert_eq!(schema.get("label").unwrap().key(), "label");
        assert_eq!(schema.len(), 2);

        let raw = json!({ "id": "1", "label": "l", "title": "t" });
        let err = Shadowing::from_value(&raw).unwrap_err();

        assert!(matches!(
            err,
            ModelError::Redeclared {
                model: "Shadowing",
                field: "label"
            }
        ));
        assert!(Child::schema().redeclared().is_none());
    }

    #[test]
    fn missing_field_is_named() {
        let raw = json!({ "id": "7" });
        let err = Parent::from_value(&raw).unwrap_err();

        assert!(matches!(
            err,
            ModelError::MissingField {
                model: "Parent",
                field: "label",
                key: "label"
            }
        ));
    }

    #[test]
    fn conversion_error_names_field() {
        let raw = json!({ "id": "seven", "label": "x" });
        let err = Parent::from_value(&raw).unwrap_err();

        assert_eq!(err.field(), Some("id"));
        assert!(matches!(
            err.conversion(),
            Some(ConvertError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_non_objects() {
        let err = Parent::from_value(&json!([1, 2])).unwrap_err();

        assert!(matches!(
            err,
            ModelError::NotAnObject {
                model: "Parent",
                found: "array"
            }
        ));
    }

    #[test]
    fn fields_type_mismatch_is_reported() {
        let raw = json!({ "id": "1", "label": "x" });
        let mut fields = Parent::schema().construct(raw.as_object().unwrap()).unwrap();

        assert_eq!(fields.len(), 2);
        assert!(matches!(
            fields.take::<String>("id"),
            Err(ModelError::FieldType { field: "id", .. })
        ));
        assert!(matches!(
            fields.take::<u32>("unknown"),
            Err(ModelError::Undeclared { .. })
        ));
    }
}
