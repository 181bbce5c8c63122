//! Core types and trait definitions for the Namesake person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! enrichment, storage and server crates all depend on it.

pub mod filter;
pub mod person;
pub mod store;

pub use filter::PersonFilter;
pub use person::{Enrichment, NewPerson, Person, PersonPatch};
pub use store::PersonStore;
