//! Declarative document filters understood by every store backend.

use serde_json::Value;
use taskboard_core::kind::{DocKind, KIND_FIELD};

/// A predicate over stored documents.
///
/// Field names are `&'static str` because they are spliced into SQL by the
/// PostgreSQL backend; only values are bound as parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document.
    All,
    /// Documents whose `_type` equals the given kind.
    KindIs(DocKind),
    /// Documents whose string field equals `value`.
    FieldEquals { field: &'static str, value: String },
    /// Documents whose array field holds `value` as one of its elements.
    ArrayContains { field: &'static str, value: String },
    /// Conjunction of the inner filters.
    And(Vec<Filter>),
}

impl Filter {
    pub fn field_equals(field: &'static str, value: impl Into<String>) -> Self {
        Self::FieldEquals {
            field,
            value: value.into(),
        }
    }

    pub fn array_contains(field: &'static str, value: impl Into<String>) -> Self {
        Self::ArrayContains {
            field,
            value: value.into(),
        }
    }

    /// Evaluate the filter against an in-memory document.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Self::All => true,
            Self::KindIs(kind) => {
                doc.get(KIND_FIELD).and_then(Value::as_str) == Some(kind.as_str())
            }
            Self::FieldEquals { field, value } => {
                doc.get(*field).and_then(Value::as_str) == Some(value.as_str())
            }
            Self::ArrayContains { field, value } => doc
                .get(*field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(value.as_str()))),
            Self::And(filters) => filters.iter().all(|f| f.matches(doc)),
        }
    }

    /// Render the filter as a SQL condition over the `documents` table.
    ///
    /// Placeholders are numbered from `*bind_idx`; bound values are appended
    /// to `binds` in placeholder order.
    pub(crate) fn to_sql(&self, bind_idx: &mut u32, binds: &mut Vec<String>) -> String {
        match self {
            Self::All => "TRUE".to_string(),
            Self::KindIs(kind) => {
                binds.push(kind.as_str().to_string());
                let cond = format!("kind = ${bind_idx}");
                *bind_idx += 1;
                cond
            }
            Self::FieldEquals { field, value } => {
                binds.push(value.clone());
                let cond = format!("body->>'{field}' = ${bind_idx}");
                *bind_idx += 1;
                cond
            }
            Self::ArrayContains { field, value } => {
                binds.push(value.clone());
                let cond = format!("body->'{field}' @> jsonb_build_array(${bind_idx}::text)");
                *bind_idx += 1;
                cond
            }
            Self::And(filters) if filters.is_empty() => "TRUE".to_string(),
            Self::And(filters) => {
                let conditions: Vec<String> =
                    filters.iter().map(|f| f.to_sql(bind_idx, binds)).collect();
                format!("({})", conditions.join(" AND "))
            }
        }
    }
}
