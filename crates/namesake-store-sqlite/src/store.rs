//! [`SqliteStore`]: the SQLite implementation of [`PersonStore`].

use std::path::Path;

use namesake_core::{NewPerson, Person, PersonFilter, PersonPatch, PersonStore};
use rusqlite::OptionalExtension as _;

use crate::{
  query::{PERSON_COLUMNS, PeopleQuery},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:          row.get(0)?,
    name:        row.get(1)?,
    surname:     row.get(2)?,
    patronymic:  row.get(3)?,
    age:         row.get(4)?,
    gender:      row.get(5)?,
    nationality: row.get(6)?,
  })
}

fn select_one(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<Person>> {
  conn
    .query_row(
      &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
      rusqlite::params![id],
      person_from_row,
    )
    .optional()
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, person: NewPerson) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (name, surname, patronymic, age, gender, nationality)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            person.name,
            person.surname,
            person.patronymic,
            person.age,
            person.gender,
            person.nationality,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(id, "inserted person");
    Ok(id)
  }

  async fn get(&self, id: i64) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| Ok(select_one(conn, id)?))
      .await?;

    if person.is_none() {
      tracing::debug!(id, "person not found");
    }
    Ok(person)
  }

  async fn update(&self, id: i64, patch: PersonPatch) -> Result<Option<Person>> {
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(mut person) = select_one(&tx, id)? else {
          return Ok(None);
        };
        if patch.is_empty() {
          return Ok(Some(person));
        }

        patch.apply(&mut person);
        tx.execute(
          "UPDATE people
           SET name = ?1, surname = ?2, patronymic = ?3,
               age = ?4, gender = ?5, nationality = ?6
           WHERE id = ?7",
          rusqlite::params![
            person.name,
            person.surname,
            person.patronymic,
            person.age,
            person.gender,
            person.nationality,
            id,
          ],
        )?;
        tx.commit()?;

        Ok(Some(person))
      })
      .await?;

    match &updated {
      Some(_) => tracing::info!(id, "updated person"),
      None => tracing::debug!(id, "update target not found"),
    }
    Ok(updated)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if affected == 0 {
      tracing::debug!(id, "delete target not found");
      return Ok(false);
    }
    tracing::info!(id, "deleted person");
    Ok(true)
  }

  async fn filter(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let query  = PeopleQuery::from_filter(filter);
    let sql    = query.sql();
    let params = query.into_params();

    tracing::debug!(%sql, params = params.len(), "filtering people");

    let people = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(count = people.len(), "filter complete");
    Ok(people)
  }
}
