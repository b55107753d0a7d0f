//! Dynamically typed field values and their link to typed slots.
//!
//! The mapper decodes every element into a [`Value`] and encodes from a
//! borrowed [`ValueRef`]. [`FieldValue`] converts between those and the Rust
//! type stored in an entity's [`Slot`](crate::Slot).

use wsbind_support::{Base64Binary, Scalar, ScalarKind, ScalarRef};

use crate::descriptor::TypeName;
use crate::entity::Bindable;

/// A decoded element: a leaf, a nested entity, or the occurrences of a
/// repeated field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Object(Box<dyn Bindable>),
    List(Vec<Value>),
}

impl Value {
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Scalar(scalar) => ValueRef::Scalar(scalar.as_scalar_ref()),
            Value::Object(entity) => ValueRef::Object(entity.as_ref()),
            Value::List(items) => ValueRef::List(items.iter().map(Value::as_value_ref).collect()),
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn Bindable> {
        match self {
            Value::Object(entity) => Some(entity.as_ref()),
            _ => None,
        }
    }

    /// Describes this value for a field that cannot hold it.
    pub fn mismatch(&self) -> Mismatch {
        match self {
            Value::Scalar(scalar) => Mismatch::Scalar {
                kind: scalar.kind(),
                text: scalar.to_lexical().into_owned(),
            },
            Value::Object(entity) => Mismatch::Object(entity.schema().type_name()),
            Value::List(_) => Mismatch::List,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Box<dyn Bindable>> for Value {
    fn from(entity: Box<dyn Bindable>) -> Self {
        Value::Object(entity)
    }
}

/// Borrowed form of [`Value`] used on the write path.
#[derive(Debug, Clone)]
pub enum ValueRef<'a> {
    Scalar(ScalarRef<'a>),
    Object(&'a dyn Bindable),
    List(Vec<ValueRef<'a>>),
}

/// A decoded value that the target field type cannot store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// A leaf of the wrong simple type.
    Scalar { kind: ScalarKind, text: String },
    /// A string that is not a member of the field's enumeration.
    Literal(String),
    /// An entity whose runtime type the field cannot hold.
    Object(TypeName),
    /// A sequence where a single value was expected.
    List,
}

/// Conversion between a slot's Rust type and the mapper's dynamic values.
///
/// Implemented here for the scalar types, `Vec<T>`, `Box<dyn Bindable>` and
/// [`Value`] itself (for `anyType` fields). Generated entities and
/// enumerations get their implementation from [`field_value!`](crate::field_value).
pub trait FieldValue: Sized {
    fn from_value(value: Value) -> Result<Self, Mismatch>;
    fn to_value(&self) -> ValueRef<'_>;
}

/// A schema enumeration with string literals.
pub trait Enumeration: Sized {
    fn from_lexical(text: &str) -> Option<Self>;
    fn as_lexical(&self) -> &'static str;
}

macro_rules! scalar_field_value {
    ($ty:ty, $variant:ident, $this:ident => $borrow:expr) => {
        impl FieldValue for $ty {
            fn from_value(value: Value) -> Result<Self, Mismatch> {
                match value {
                    Value::Scalar(Scalar::$variant(v)) => Ok(v),
                    other => Err(other.mismatch()),
                }
            }

            fn to_value(&self) -> ValueRef<'_> {
                let $this = self;
                ValueRef::Scalar(ScalarRef::$variant($borrow))
            }
        }
    };
}

scalar_field_value!(String, String, s => s.as_str());
scalar_field_value!(i32, Int, v => *v);
scalar_field_value!(i64, Long, v => *v);
scalar_field_value!(f64, Double, v => *v);
scalar_field_value!(bool, Boolean, v => *v);
scalar_field_value!(rust_decimal::Decimal, Decimal, v => *v);
scalar_field_value!(chrono::NaiveDate, Date, v => *v);
scalar_field_value!(chrono::NaiveTime, Time, v => *v);
scalar_field_value!(chrono::DateTime<chrono::Utc>, DateTime, v => *v);
scalar_field_value!(Base64Binary, Base64Binary, v => v.0.as_slice());

impl<T: FieldValue> FieldValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other.mismatch()),
        }
    }

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl FieldValue for Box<dyn Bindable> {
    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Object(entity) => Ok(entity),
            other => Err(other.mismatch()),
        }
    }

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Object(self.as_ref())
    }
}

impl FieldValue for Value {
    fn from_value(value: Value) -> Result<Self, Mismatch> {
        Ok(value)
    }

    fn to_value(&self) -> ValueRef<'_> {
        self.as_value_ref()
    }
}

/// Implements [`FieldValue`] for a generated entity or enumeration.
///
/// ```rust,ignore
/// wsbind::field_value!(entity SecurityHealthCheckRisks);
/// wsbind::field_value!(enumeration SharingModel);
/// ```
///
/// An entity field accepts the exact type only; a field that must hold
/// subtypes is declared as `Box<dyn Bindable>`.
#[macro_export]
macro_rules! field_value {
    (entity $ty:ty) => {
        impl $crate::FieldValue for $ty {
            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::value::Mismatch> {
                match value {
                    $crate::Value::Object(entity) => $crate::entity::downcast_entity::<$ty>(entity),
                    other => Err(other.mismatch()),
                }
            }

            fn to_value(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Object(self)
            }
        }
    };
    (enumeration $ty:ty) => {
        impl $crate::FieldValue for $ty {
            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::value::Mismatch> {
                match value {
                    $crate::Value::Scalar($crate::Scalar::String(text)) => {
                        match <$ty as $crate::Enumeration>::from_lexical(&text) {
                            Some(member) => Ok(member),
                            None => Err($crate::value::Mismatch::Literal(text)),
                        }
                    }
                    other => Err(other.mismatch()),
                }
            }

            fn to_value(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Scalar($crate::ScalarRef::String(
                    <$ty as $crate::Enumeration>::as_lexical(self),
                ))
            }
        }
    };
}
