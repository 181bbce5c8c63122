//! Search criteria for [`PersonStore::filter`](crate::PersonStore::filter).

use serde::{Deserialize, Serialize};

use crate::person::null_as_default;

/// Equality and range predicates over [`Person`](crate::Person) fields.
///
/// An empty string or zero means "no predicate" for that field. `name`,
/// `surname`, `patronymic` and `nationality` match case-insensitively;
/// `gender` matches exactly as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonFilter {
  #[serde(deserialize_with = "null_as_default")]
  pub name:        String,
  #[serde(deserialize_with = "null_as_default")]
  pub surname:     String,
  #[serde(deserialize_with = "null_as_default")]
  pub patronymic:  String,
  /// Inclusive lower bound.
  #[serde(deserialize_with = "null_as_default")]
  pub min_age:     i32,
  /// Inclusive upper bound.
  #[serde(deserialize_with = "null_as_default")]
  pub max_age:     i32,
  #[serde(deserialize_with = "null_as_default")]
  pub gender:      String,
  #[serde(deserialize_with = "null_as_default")]
  pub nationality: String,
  /// 1-indexed page number.
  #[serde(deserialize_with = "null_as_default")]
  pub page:        i64,
  #[serde(deserialize_with = "null_as_default")]
  pub page_size:   i64,
}

impl PersonFilter {
  /// The `(limit, offset)` window, if pagination is active.
  ///
  /// Pagination applies only when both `page` and `page_size` are positive.
  /// A page past the representable offset clamps to `i64::MAX`, which selects
  /// no rows.
  pub fn window(&self) -> Option<(i64, i64)> {
    if self.page <= 0 || self.page_size <= 0 {
      return None;
    }
    let offset = (self.page - 1)
      .checked_mul(self.page_size)
      .unwrap_or(i64::MAX);
    Some((self.page_size, offset))
  }
}
