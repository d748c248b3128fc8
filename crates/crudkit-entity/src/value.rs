//! Dynamically typed field values.
//!
//! [`FieldValue`] is the currency of field introspection: field tables read
//! entity fields into it, predicates compare against it, and the SQL
//! renderer binds it as a query parameter.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single field value read from, or written to, an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Absent value (`None`).
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer of any width up to 64 bits.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    Text(String),
    /// UUID.
    Uuid(Uuid),
    /// Point in time, UTC.
    Timestamp(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without zone.
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }

    /// Whether this is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is null or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Total order used for sorting rows.
    ///
    /// Nulls sort first. Values of the same kind compare naturally; values
    /// of different kinds fall back to comparing their kind names.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (a, b) => a.kind().cmp(b.kind()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
        }
    }
}

/// Conversion of a Rust field into a [`FieldValue`].
pub trait IntoFieldValue {
    /// Read the field as a dynamic value.
    fn to_field_value(&self) -> FieldValue;
}

/// Conversion of a [`FieldValue`] back into a Rust field.
pub trait FromFieldValue: Sized {
    /// Returns `None` when the value's kind does not fit `Self`.
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

macro_rules! scalar_field_value {
    ($ty:ty, $variant:ident) => {
        impl IntoFieldValue for $ty {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }
        }

        impl FromFieldValue for $ty {
            fn from_field_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::$variant(value)
            }
        }
    };
}

scalar_field_value!(bool, Bool);
scalar_field_value!(i64, Int);
scalar_field_value!(String, Text);
scalar_field_value!(Uuid, Uuid);
scalar_field_value!(DateTime<Utc>, Timestamp);
scalar_field_value!(NaiveDate, Date);
scalar_field_value!(NaiveDateTime, DateTime);

impl IntoFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(v) => Some(v),
            FieldValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// Narrower integers widen into `Int` and convert back with a range check.
macro_rules! int_field_value {
    ($($ty:ty),*) => {
        $(
            impl IntoFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(i64::from(*self))
                }
            }

            impl FromFieldValue for $ty {
                fn from_field_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Int(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Int(i64::from(value))
                }
            }
        )*
    };
}

int_field_value!(i8, i16, i32, u8, u16, u32);

impl IntoFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        let wide = f64::from_field_value(value)?;
        let narrow = wide as f32;
        (narrow.is_finite() || !wide.is_finite()).then_some(narrow)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Null => Some(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
