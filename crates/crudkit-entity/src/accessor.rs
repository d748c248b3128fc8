//! Name-based field access across an entity's ancestor chain.

use tracing::debug;

use crate::reflect::{FieldError, Reflect};
use crate::value::FieldValue;

/// Outcome of resolving a field by name.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldResolution {
    /// The nearest level declaring the field holds this value.
    Found(FieldValue),
    /// No level of the ancestor chain declares the field.
    NotFound,
}

impl FieldResolution {
    /// Collapse to an optional value.
    pub fn into_option(self) -> Option<FieldValue> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Whether the field was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Reads and writes named fields, searching the target's own level first
/// and then each ancestor in turn. The nearest declaration wins.
///
/// [`resolve`](Self::resolve) and [`assign`](Self::assign) report failures
/// explicitly; [`get`](Self::get) and [`set`](Self::set) are best-effort
/// wrappers that never fail.
pub struct FieldAccessor;

impl FieldAccessor {
    /// Resolve `field` on `target` or its ancestors.
    pub fn resolve(target: &dyn Reflect, field: &str) -> FieldResolution {
        let mut level = Some(target);
        while let Some(current) = level {
            if let Some(value) = current.read_declared(field) {
                return FieldResolution::Found(value);
            }
            level = current.parent();
        }
        FieldResolution::NotFound
    }

    /// Best-effort read: a field missing from the whole chain yields `None`.
    pub fn get(target: &dyn Reflect, field: &str) -> Option<FieldValue> {
        Self::resolve(target, field).into_option()
    }

    /// Whether `field` is declared anywhere along the chain.
    pub fn has_field(target: &dyn Reflect, field: &str) -> bool {
        let mut level = Some(target);
        while let Some(current) = level {
            if current.declares(field) {
                return true;
            }
            level = current.parent();
        }
        false
    }

    /// Write `value` into the nearest level declaring `field`.
    pub fn assign(
        target: &mut dyn Reflect,
        field: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        let type_name = target.type_name();
        match Self::assign_in(target, field, value) {
            Some(result) => result,
            None => Err(FieldError::NotFound {
                type_name,
                field: field.to_string(),
            }),
        }
    }

    fn assign_in(
        level: &mut dyn Reflect,
        field: &str,
        value: FieldValue,
    ) -> Option<Result<(), FieldError>> {
        if level.declares(field) {
            return Some(level.write_declared(field, value));
        }
        match level.parent_mut() {
            Some(parent) => Self::assign_in(parent, field, value),
            None => None,
        }
    }

    /// Best-effort write: failures are swallowed.
    pub fn set(target: &mut dyn Reflect, field: &str, value: FieldValue) {
        if let Err(e) = Self::assign(target, field, value) {
            debug!(error = %e, "Ignored field write");
        }
    }

    /// Every field visible on `target`, ancestors first, with shadowed
    /// ancestor fields replaced by the nearer declaration.
    pub fn field_names(target: &dyn Reflect) -> Vec<&'static str> {
        let mut levels: Vec<&dyn Reflect> = Vec::new();
        let mut level = Some(target);
        while let Some(current) = level {
            levels.push(current);
            level = current.parent();
        }

        let mut names = Vec::new();
        for (depth, current) in levels.iter().enumerate().rev() {
            for name in current.declared_fields() {
                let shadowed = levels[..depth].iter().any(|nearer| nearer.declares(name));
                if !shadowed {
                    names.push(*name);
                }
            }
        }
        names
    }

    /// Every visible field paired with its current value.
    pub fn snapshot(target: &dyn Reflect) -> Vec<(&'static str, FieldValue)> {
        Self::field_names(target)
            .into_iter()
            .filter_map(|name| Self::get(target, name).map(|value| (name, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect;

    #[derive(Debug, Default)]
    struct Grandparent {
        code: String,
        rank: i64,
    }

    #[derive(Debug, Default)]
    struct Parent {
        base: Grandparent,
        label: Option<String>,
    }

    #[derive(Debug, Default)]
    struct Child {
        base: Parent,
        rank: i64,
        secret: bool,
    }

    reflect! {
        impl for Grandparent {
            fields: [code, rank];
        }
    }

    reflect! {
        impl for Parent {
            parent: base;
            fields: [label];
        }
    }

    reflect! {
        impl for Child {
            parent: base;
            fields: [rank, secret];
        }
    }

    fn child() -> Child {
        Child {
            base: Parent {
                base: Grandparent {
                    code: "G-1".to_string(),
                    rank: 1,
                },
                label: Some("parent".to_string()),
            },
            rank: 7,
            secret: true,
        }
    }

    #[test]
    fn test_get_resolves_grandparent_field() {
        let target = child();
        assert_eq!(
            FieldAccessor::get(&target, "code"),
            Some(FieldValue::from("G-1"))
        );
    }

    #[test]
    fn test_get_unknown_field_is_absent() {
        let target = child();
        assert_eq!(FieldAccessor::get(&target, "nope"), None);
        assert_eq!(
            FieldAccessor::resolve(&target, "nope"),
            FieldResolution::NotFound
        );
    }

    #[test]
    fn test_nearest_declaration_wins() {
        let mut target = child();
        assert_eq!(FieldAccessor::get(&target, "rank"), Some(FieldValue::Int(7)));
        FieldAccessor::assign(&mut target, "rank", FieldValue::Int(9)).unwrap();
        assert_eq!(target.rank, 9);
        assert_eq!(target.base.base.rank, 1);
    }

    #[test]
    fn test_private_fields_are_writable() {
        let mut target = child();
        FieldAccessor::set(&mut target, "secret", FieldValue::Bool(false));
        assert!(!target.secret);
        FieldAccessor::set(&mut target, "code", FieldValue::from("G-2"));
        assert_eq!(target.base.base.code, "G-2");
    }

    #[test]
    fn test_assign_reports_failures() {
        let mut target = child();
        let err = FieldAccessor::assign(&mut target, "missing", FieldValue::Null).unwrap_err();
        assert!(matches!(err, FieldError::NotFound { .. }));

        let err = FieldAccessor::assign(&mut target, "secret", FieldValue::from("yes")).unwrap_err();
        assert!(matches!(
            err,
            FieldError::TypeMismatch {
                field: "secret",
                actual: "text",
                ..
            }
        ));
        assert!(target.secret);
    }

    #[test]
    fn test_set_swallows_failures() {
        let mut target = child();
        FieldAccessor::set(&mut target, "missing", FieldValue::Int(1));
        FieldAccessor::set(&mut target, "rank", FieldValue::from("seven"));
        assert_eq!(target.rank, 7);
    }

    #[test]
    fn test_field_names_ancestors_first_without_shadowed() {
        let target = child();
        assert_eq!(
            FieldAccessor::field_names(&target),
            vec!["code", "label", "rank", "secret"]
        );
        assert!(FieldAccessor::has_field(&target, "code"));
        assert!(!FieldAccessor::has_field(&target, "base"));
    }

    #[derive(Debug, Default)]
    struct Gauge {
        slot: u8,
        reading: f32,
        serial: u32,
    }

    reflect! {
        impl for Gauge {
            fields: [slot, reading, serial];
        }
    }

    #[test]
    fn test_narrow_numeric_fields() {
        let mut gauge = Gauge::default();
        FieldAccessor::assign(&mut gauge, "serial", FieldValue::Int(70_000)).unwrap();
        FieldAccessor::assign(&mut gauge, "reading", FieldValue::Float(0.5)).unwrap();
        assert_eq!(FieldAccessor::get(&gauge, "serial"), Some(FieldValue::Int(70_000)));
        assert_eq!(gauge.reading, 0.5);

        assert!(FieldAccessor::assign(&mut gauge, "slot", FieldValue::Int(256)).is_err());
        assert_eq!(gauge.slot, 0);
    }
}
