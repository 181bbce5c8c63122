//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `namesake-store-sqlite`). The server
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
};

/// Abstraction over a person store backend.
///
/// Not-found is reported in the success channel (`None` / `false`) so callers
/// can tell it apart from a backend failure without inspecting the error.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new person and return the assigned identifier.
  fn create(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Fetch a person by identifier. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Apply `patch` to a stored person and return the updated row, or `None`
  /// if there is no person with `id`.
  fn update(
    &self,
    id: i64,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Delete a person. Returns `false` if there was nothing to delete.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// List people matching `filter`, in insertion order.
  fn filter<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;
}
