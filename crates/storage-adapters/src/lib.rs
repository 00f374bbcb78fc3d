//! # storage-adapters
//!
//! Concrete implementations of the `domains` port traits: Postgres
//! repositories behind `db-postgres`, and the REST transactional mailer
//! behind `mail-rest`.

#[cfg(feature = "mail-rest")]
pub mod mail;
#[cfg(feature = "db-postgres")]
pub mod postgres;
