//! Query-by-example probes with configurable matching.

use crudkit_core::result::AppResult;
use crudkit_entity::{Entity, FieldAccessor};

use crate::criteria::{CriteriaBuilder, Predicate, Root};

/// Controls which probe fields participate in matching.
///
/// The default ignores null-valued fields, so a probe only constrains the
/// fields that actually hold something. Non-optional fields always hold a
/// value and always participate unless ignored by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleMatcher {
    include_nulls: bool,
    ignored_paths: Vec<String>,
}

impl ExampleMatcher {
    pub fn matching() -> Self {
        Self::default()
    }

    /// Null-valued fields become "is null" restrictions.
    pub fn with_include_null_values(mut self) -> Self {
        self.include_nulls = true;
        self
    }

    /// Leave the named fields out of matching.
    pub fn with_ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored_paths.iter().any(|p| p == path)
    }
}

/// A probe entity paired with its matcher.
#[derive(Debug, Clone)]
pub struct Example<T> {
    probe: T,
    matcher: ExampleMatcher,
}

impl<T: Entity> Example<T> {
    /// Probe with the default matcher.
    pub fn of(probe: T) -> Self {
        Self::with_matcher(probe, ExampleMatcher::matching())
    }

    pub fn with_matcher(probe: T, matcher: ExampleMatcher) -> Self {
        Self { probe, matcher }
    }

    pub fn probe(&self) -> &T {
        &self.probe
    }

    pub fn matcher(&self) -> &ExampleMatcher {
        &self.matcher
    }

    /// Equality restrictions for every participating probe field.
    pub fn to_predicates(&self, root: &Root<T>, cb: &CriteriaBuilder) -> AppResult<Vec<Predicate>> {
        FieldAccessor::snapshot(&self.probe)
            .into_iter()
            .filter(|(name, value)| {
                !self.matcher.is_ignored(name) && (self.matcher.include_nulls || !value.is_null())
            })
            .map(|(name, value)| Ok(cb.equal(root.get(name)?, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_entity::{FieldValue, reflect};

    #[derive(Debug, Clone, Default)]
    struct Tag {
        id: Option<String>,
        label: Option<String>,
        pinned: bool,
    }

    reflect! {
        impl for Tag {
            fields: [id, label, pinned];
        }
    }

    impl Entity for Tag {
        type Id = String;
        const TABLE: &'static str = "tags";

        fn id(&self) -> Option<&String> {
            self.id.as_ref()
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }
    }

    fn attributes(predicates: &[Predicate]) -> Vec<&'static str> {
        predicates
            .iter()
            .filter_map(|p| match p {
                Predicate::Equal(path, _) => Some(path.attribute()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_default_matcher_skips_nulls() {
        let probe = Tag {
            label: Some("rust".to_string()),
            ..Tag::default()
        };
        let predicates = Example::of(probe)
            .to_predicates(&Root::new(), &CriteriaBuilder)
            .unwrap();
        assert_eq!(attributes(&predicates), vec!["label", "pinned"]);
    }

    #[test]
    fn test_include_nulls_and_ignore_paths() {
        let matcher = ExampleMatcher::matching()
            .with_include_null_values()
            .with_ignore_paths(["pinned"]);
        let predicates = Example::with_matcher(Tag::default(), matcher)
            .to_predicates(&Root::new(), &CriteriaBuilder)
            .unwrap();
        assert_eq!(attributes(&predicates), vec!["id", "label"]);
        assert!(matches!(&predicates[0], Predicate::Equal(_, FieldValue::Null)));
    }
}
