//! PostgreSQL rendering of criteria queries.
//!
//! Attribute names map one-to-one onto column names. Every value is bound
//! as a parameter; identifiers are quoted.

use sqlx::{Postgres, QueryBuilder};

use crudkit_core::types::SortDirection;
use crudkit_entity::{Entity, FieldValue};

use super::{CriteriaQuery, Predicate, Selection};

/// Render `query` as a `SELECT` (or `SELECT COUNT(*)`) statement.
pub fn render<T: Entity>(query: &CriteriaQuery<T>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    match query.selection() {
        Selection::Rows => builder.push("*"),
        Selection::Count => builder.push("COUNT(*)"),
    };
    builder.push(" FROM ");
    builder.push(quote(query.root().table()));

    let restrictions = query.restrictions();
    if !restrictions.is_empty() {
        builder.push(" WHERE ");
        push_joined(&mut builder, restrictions, " AND ");
    }

    if query.selection() == Selection::Count {
        return builder;
    }

    if !query.ordering().is_empty() {
        builder.push(" ORDER BY ");
        for (i, order) in query.ordering().iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(quote(order.path.attribute()));
            builder.push(" ");
            builder.push(order.direction.as_sql());
            // Nulls sort below every value, as the in-memory evaluator does.
            builder.push(match order.direction {
                SortDirection::Asc => " NULLS FIRST",
                SortDirection::Desc => " NULLS LAST",
            });
        }
    }

    if let Some(limit) = query.limit() {
        builder.push(" LIMIT ");
        builder.push_bind(to_i64(limit));
    }
    if query.offset() > 0 {
        builder.push(" OFFSET ");
        builder.push_bind(to_i64(query.offset()));
    }
    builder
}

fn push_joined(builder: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate], sep: &str) {
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            builder.push(sep);
        }
        push_predicate(builder, predicate);
    }
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Equal(path, FieldValue::Null) => {
            builder.push(quote(path.attribute()));
            builder.push(" IS NULL");
        }
        Predicate::NotEqual(path, FieldValue::Null) => {
            builder.push(quote(path.attribute()));
            builder.push(" IS NOT NULL");
        }
        Predicate::Equal(path, value) => {
            builder.push(quote(path.attribute()));
            builder.push(" = ");
            push_value(builder, value);
        }
        Predicate::NotEqual(path, value) => {
            builder.push(quote(path.attribute()));
            builder.push(" <> ");
            push_value(builder, value);
        }
        Predicate::And(all) if all.is_empty() => {
            builder.push("TRUE");
        }
        Predicate::Or(any) if any.is_empty() => {
            builder.push("FALSE");
        }
        Predicate::And(all) => {
            builder.push("(");
            push_joined(builder, all, " AND ");
            builder.push(")");
        }
        Predicate::Or(any) => {
            builder.push("(");
            push_joined(builder, any, " OR ");
            builder.push(")");
        }
        Predicate::Not(inner) => {
            builder.push("NOT (");
            push_predicate(builder, inner);
            builder.push(")");
        }
    }
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value.clone() {
        FieldValue::Null => builder.push("NULL"),
        FieldValue::Bool(v) => builder.push_bind(v),
        FieldValue::Int(v) => builder.push_bind(v),
        FieldValue::Float(v) => builder.push_bind(v),
        FieldValue::Text(v) => builder.push_bind(v),
        FieldValue::Uuid(v) => builder.push_bind(v),
        FieldValue::Timestamp(v) => builder.push_bind(v),
        FieldValue::Date(v) => builder.push_bind(v),
        FieldValue::DateTime(v) => builder.push_bind(v),
    };
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
