//! SQL schema for the Namesake SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL DEFAULT '',
    surname     TEXT    NOT NULL DEFAULT '',
    patronymic  TEXT    NOT NULL DEFAULT '',
    age         INTEGER NOT NULL DEFAULT 0,   -- 0 means unset
    gender      TEXT    NOT NULL DEFAULT '',
    nationality TEXT    NOT NULL DEFAULT ''   -- ISO 3166-1 alpha-2
);

CREATE INDEX IF NOT EXISTS people_gender_idx ON people(gender);
CREATE INDEX IF NOT EXISTS people_age_idx    ON people(age);

PRAGMA user_version = 1;
";
