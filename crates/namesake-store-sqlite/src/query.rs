//! Dynamic `SELECT` construction for [`PersonFilter`].
//!
//! Each present predicate contributes one clause with a numbered placeholder
//! and one bound value. User input never reaches the SQL text.

use namesake_core::PersonFilter;
use rusqlite::types::Value;

pub const PERSON_COLUMNS: &str =
  "id, name, surname, patronymic, age, gender, nationality";

/// A `SELECT` over `people` with its bound parameters.
#[derive(Debug, Default)]
pub struct PeopleQuery {
  conds:  Vec<String>,
  window: Option<(usize, usize)>,
  params: Vec<Value>,
}

impl PeopleQuery {
  pub fn from_filter(filter: &PersonFilter) -> Self {
    let mut q = Self::default();

    if !filter.name.is_empty() {
      q.push(|n| format!("LOWER(name) = LOWER(?{n})"), filter.name.clone());
    }
    if !filter.surname.is_empty() {
      q.push(|n| format!("LOWER(surname) = LOWER(?{n})"), filter.surname.clone());
    }
    if !filter.patronymic.is_empty() {
      q.push(
        |n| format!("LOWER(patronymic) = LOWER(?{n})"),
        filter.patronymic.clone(),
      );
    }
    if filter.min_age != 0 {
      q.push(|n| format!("age >= ?{n}"), filter.min_age);
    }
    if filter.max_age != 0 {
      q.push(|n| format!("age <= ?{n}"), filter.max_age);
    }
    if !filter.gender.is_empty() {
      q.push(|n| format!("gender = ?{n}"), filter.gender.clone());
    }
    if !filter.nationality.is_empty() {
      q.push(
        |n| format!("LOWER(nationality) = LOWER(?{n})"),
        filter.nationality.clone(),
      );
    }

    if let Some((limit, offset)) = filter.window() {
      q.params.push(Value::Integer(limit));
      let limit_idx = q.params.len();
      q.params.push(Value::Integer(offset));
      q.window = Some((limit_idx, limit_idx + 1));
    }

    q
  }

  fn push(&mut self, clause: impl FnOnce(usize) -> String, value: impl Into<Value>) {
    self.params.push(value.into());
    self.conds.push(clause(self.params.len()));
  }

  pub fn sql(&self) -> String {
    let mut sql = format!("SELECT {PERSON_COLUMNS} FROM people");
    if !self.conds.is_empty() {
      sql.push_str(" WHERE ");
      sql.push_str(&self.conds.join(" AND "));
    }
    sql.push_str(" ORDER BY id");
    if let Some((limit, offset)) = self.window {
      sql.push_str(&format!(" LIMIT ?{limit} OFFSET ?{offset}"));
    }
    sql
  }

  pub fn into_params(self) -> Vec<Value> { self.params }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_filter_selects_everything() {
    let q = PeopleQuery::from_filter(&PersonFilter::default());
    assert_eq!(
      q.sql(),
      format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id")
    );
    assert!(q.into_params().is_empty());
  }

  #[test]
  fn placeholders_follow_present_fields() {
    let q = PeopleQuery::from_filter(&PersonFilter {
      gender: "Male".into(),
      min_age: 20,
      max_age: 29,
      page: 2,
      page_size: 2,
      ..PersonFilter::default()
    });
    assert_eq!(
      q.sql(),
      format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE age >= ?1 AND age <= ?2 \
         AND gender = ?3 ORDER BY id LIMIT ?4 OFFSET ?5"
      )
    );
    assert_eq!(
      q.into_params(),
      vec![
        Value::Integer(20),
        Value::Integer(29),
        Value::Text("Male".into()),
        Value::Integer(2),
        Value::Integer(2),
      ]
    );
  }

  #[test]
  fn user_input_never_lands_in_sql() {
    let hostile = "x'; DROP TABLE people; --";
    let q = PeopleQuery::from_filter(&PersonFilter {
      name: hostile.into(),
      ..PersonFilter::default()
    });
    assert!(!q.sql().contains(hostile));
    assert_eq!(q.into_params(), vec![Value::Text(hostile.into())]);
  }
}
