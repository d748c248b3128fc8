//! Integration tests for the generic repository over the in-memory context.

use std::thread;
use std::time::Duration;

use chrono::Utc;

use crudkit_core::error::ErrorKind;
use crudkit_core::types::{MatchPolicy, PageRequest, Sort, SortField};
use crudkit_database::{CriteriaBuilder, Example, ExampleMatcher, Pageable, Predicate, Root};
use crudkit_entity::{Entity, FieldAccessor, FieldValue};

use crate::helpers::{Product, all_ids, product, seeded_repository};

#[test]
fn test_match_all_fields_constrains_every_field() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);

    // Only `category` set: the null id never matches a stored row.
    let sparse = Product {
        category: Some("tools".to_string()),
        ..Product::default()
    };
    assert_eq!(repository.count(Some(&sparse)).unwrap(), 0);

    // A full copy of a stored row matches exactly that row.
    let stored = repository.list_all().unwrap().remove(2);
    let rows = repository
        .find_all(Some(&stored), &PageRequest::new(10, 0))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), stored.id());

    let mut changed = stored.clone();
    changed.stock += 1;
    assert_eq!(repository.count(Some(&changed)).unwrap(), 0);
}

#[test]
fn test_match_non_default_fields_ignores_defaults() {
    let repository = seeded_repository(MatchPolicy::MatchNonDefaultFields);
    let example = Product {
        category: Some("tools".to_string()),
        ..Product::default()
    };
    assert_eq!(repository.count(Some(&example)).unwrap(), 2);
}

#[test]
fn test_page_window_in_storage_order() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let rows = repository.find_all(None, &PageRequest::new(2, 1)).unwrap();
    let skus: Vec<_> = rows.iter().filter_map(|p| p.sku.as_deref()).collect();
    assert_eq!(skus, vec!["A-2", "B-1"]);

    let tail = repository.find_all(None, &PageRequest::new(10, 3)).unwrap();
    assert_eq!(tail.len(), 1);
    assert!(repository.find_all(None, &PageRequest::new(10, 9)).unwrap().is_empty());
}

#[test]
fn test_sort_field_orders_descending() {
    let repository = seeded_repository(MatchPolicy::MatchNonDefaultFields);
    let rows = repository
        .find_all(None, &PageRequest::new(10, 0).sorted_by("stock"))
        .unwrap();
    let stock: Vec<i64> = rows.iter().map(|p| p.stock).collect();
    assert_eq!(stock, vec![12, 5, 3, 0]);

    let inherited = repository
        .find_all_unpaged(None, Some("created_at"))
        .unwrap();
    assert_eq!(inherited.len(), 4);

    let err = repository
        .find_all(None, &PageRequest::new(10, 0).sorted_by("price"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);
}

#[test]
fn test_count_agrees_with_unpaged_listing() {
    let repository = seeded_repository(MatchPolicy::MatchNonDefaultFields);
    let examples = [
        None,
        Some(product("B-1", "paint", 0)),
        Some(Product {
            category: Some("paint".to_string()),
            ..Product::default()
        }),
    ];
    for example in &examples {
        let counted = repository.count(example.as_ref()).unwrap();
        let listed = repository.find_all_unpaged(example.as_ref(), None).unwrap();
        assert_eq!(counted, listed.len() as u64);
    }
}

#[test]
fn test_soft_delete_skips_missing_ids() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let ids = all_ids(&repository);
    let before = Utc::now();

    let updated = repository
        .soft_delete_all_by_id(
            &[ids[0].clone(), ids[3].clone(), "no-such-id".to_string()],
            "auditor",
        )
        .unwrap();
    assert_eq!(updated, 2);

    for id in [&ids[0], &ids[3]] {
        let row = repository.find_by_id(id).unwrap().unwrap();
        assert!(row.base.deleted);
        assert_eq!(row.base.deleter.as_deref(), Some("auditor"));
        assert!(row.base.deleted_at.unwrap() >= before);
    }
    let untouched = repository.find_by_id(&ids[1]).unwrap().unwrap();
    assert!(!untouched.base.deleted);
}

#[test]
fn test_soft_delete_empty_ids_changes_nothing() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let before = repository.list_all().unwrap();

    assert_eq!(repository.soft_delete_all_by_id(&[], "auditor").unwrap(), 0);

    let after = repository.list_all().unwrap();
    assert_eq!(before.len(), after.len());
    assert!(after.iter().all(|p| !p.base.deleted && p.base.deleter.is_none()));
}

#[test]
fn test_repeated_soft_delete_refreshes_timestamp() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let id = all_ids(&repository).remove(0);

    repository.soft_delete_all_by_id(&[id.clone()], "first").unwrap();
    let first = repository.find_by_id(&id).unwrap().unwrap();

    thread::sleep(Duration::from_millis(5));
    assert_eq!(repository.soft_delete_all_by_id(&[id.clone()], "second").unwrap(), 1);
    let second = repository.find_by_id(&id).unwrap().unwrap();

    assert!(second.base.deleted);
    assert_eq!(second.base.deleter.as_deref(), Some("second"));
    assert!(second.base.deleted_at.unwrap() > first.base.deleted_at.unwrap());
}

#[test]
fn test_accessor_reaches_grandparent_identity() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let row = repository.list_all().unwrap().remove(0);

    let id = FieldAccessor::get(&row, "id").unwrap();
    assert_eq!(Some(&id), row.id().map(|i| FieldValue::from(i.clone())).as_ref());
    assert_eq!(FieldAccessor::get(&row, "warehouse"), None);
}

#[test]
fn test_spec_and_example_queries() {
    let repository = seeded_repository(MatchPolicy::MatchAllFields);
    let in_stock = |root: &Root<Product>, cb: &CriteriaBuilder| -> crudkit_core::AppResult<Option<Predicate>> {
        Ok(Some(cb.not(cb.equal(root.get("stock")?, 0))))
    };

    let rows = repository
        .find_all_by_spec(&in_stock, &Sort::by(SortField::asc("stock")))
        .unwrap();
    let stock: Vec<i64> = rows.iter().map(|p| p.stock).collect();
    assert_eq!(stock, vec![3, 5, 12]);

    let page = repository
        .find_page_by_spec(&in_stock, &Pageable::of(0, 2))
        .unwrap();
    assert_eq!((page.total_elements, page.total_pages, page.content.len()), (3, 2, 2));

    // `stock` is not optional, so a zero would otherwise constrain it.
    let matcher = ExampleMatcher::matching().with_ignore_paths(["stock"]);
    let probe = Example::with_matcher(
        Product {
            sku: Some("B-2".to_string()),
            ..Product::default()
        },
        matcher.clone(),
    );
    let found = repository.find_one_by_example(&probe).unwrap().unwrap();
    assert_eq!(found.stock, 3);

    let paint = Example::with_matcher(
        Product {
            category: Some("paint".to_string()),
            ..Product::default()
        },
        matcher,
    );
    let err = repository.find_one_by_example(&paint).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}
