//! Self-registering field tables.
//!
//! An entity opts into name-based field access by implementing [`Reflect`],
//! normally through the [`reflect!`](crate::reflect!) macro. Ancestry is
//! modelled by composition: a type embeds its parent shape in a field and
//! names that field as its `parent`, forming the ancestor chain that
//! [`FieldAccessor`](crate::FieldAccessor) walks.

use thiserror::Error;

use crate::value::{FieldValue, FromFieldValue};

/// Failure to read or write a named field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// No level of the ancestor chain declares the field.
    #[error("no field '{field}' on {type_name} or its ancestors")]
    NotFound {
        /// The type the lookup started from.
        type_name: &'static str,
        /// The requested field name.
        field: String,
    },
    /// The field exists but cannot hold the supplied value.
    #[error("field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        /// The field name.
        field: &'static str,
        /// The Rust type of the field.
        expected: &'static str,
        /// The kind of the rejected value.
        actual: &'static str,
    },
}

impl From<FieldError> for crudkit_core::AppError {
    fn from(err: FieldError) -> Self {
        crudkit_core::AppError::with_source(
            crudkit_core::error::ErrorKind::Field,
            err.to_string(),
            err,
        )
    }
}

/// A type whose fields can be enumerated, read and written by name.
///
/// Only the fields declared directly on the implementing type are listed
/// here; inherited fields are reached through [`Reflect::parent`].
pub trait Reflect: Send + Sync {
    /// Name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Names of the fields declared on this level, in declaration order.
    fn declared_fields(&self) -> &'static [&'static str];

    /// Read a field declared on this level.
    fn read_declared(&self, field: &str) -> Option<FieldValue>;

    /// Write a field declared on this level.
    fn write_declared(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError>;

    /// The embedded ancestor, if any.
    fn parent(&self) -> Option<&dyn Reflect> {
        None
    }

    /// Mutable access to the embedded ancestor, if any.
    fn parent_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }

    /// Whether this level declares `field`.
    fn declares(&self, field: &str) -> bool {
        self.declared_fields().contains(&field)
    }
}

#[doc(hidden)]
pub fn assign_slot<T: FromFieldValue>(
    slot: &mut T,
    field: &'static str,
    value: FieldValue,
) -> Result<(), FieldError> {
    let actual = value.kind();
    match T::from_field_value(value) {
        Some(v) => {
            *slot = v;
            Ok(())
        }
        None => Err(FieldError::TypeMismatch {
            field,
            expected: std::any::type_name::<T>(),
            actual,
        }),
    }
}

/// Generate a [`Reflect`] implementation (a field table) for a struct.
///
/// The macro must be invoked in the module that defines the struct so that
/// private fields are reachable.
///
/// ```ignore
/// reflect! {
///     impl for Article {
///         parent: base;
///         fields: [title, views];
///     }
/// }
///
/// reflect! {
///     impl[ID: EntityId] for DefaultBaseEntity<ID> {
///         fields: [id];
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect {
    (
        impl $([$($gen:tt)*])? for $ty:ty {
            $(parent: $parent:ident;)?
            fields: [$($field:ident),* $(,)?];
        }
    ) => {
        impl<$($($gen)*)?> $crate::reflect::Reflect for $ty {
            fn type_name(&self) -> &'static str {
                ::std::any::type_name::<Self>()
            }

            fn declared_fields(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn read_declared(&self, field: &str) -> Option<$crate::value::FieldValue> {
                match field {
                    $(stringify!($field) => Some(
                        $crate::value::IntoFieldValue::to_field_value(&self.$field)
                    ),)*
                    _ => None,
                }
            }

            fn write_declared(
                &mut self,
                field: &str,
                value: $crate::value::FieldValue,
            ) -> Result<(), $crate::reflect::FieldError> {
                let _ = &value;
                match field {
                    $(stringify!($field) => $crate::reflect::assign_slot(
                        &mut self.$field,
                        stringify!($field),
                        value,
                    ),)*
                    _ => Err($crate::reflect::FieldError::NotFound {
                        type_name: ::std::any::type_name::<Self>(),
                        field: field.to_string(),
                    }),
                }
            }

            $(
                fn parent(&self) -> Option<&dyn $crate::reflect::Reflect> {
                    Some(&self.$parent)
                }

                fn parent_mut(&mut self) -> Option<&mut dyn $crate::reflect::Reflect> {
                    Some(&mut self.$parent)
                }
            )?
        }
    };
}
