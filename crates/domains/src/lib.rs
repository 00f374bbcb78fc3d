//! # domains
//!
//! The central domain layer for Hromada: entities, the bilingual value type,
//! pagination math, the error taxonomy, and the port traits every adapter
//! implements.

pub mod error;
pub mod lang;
pub mod models;
pub mod page;
pub mod ports;

pub use error::{DomainError, DomainResult};
pub use lang::{Bilingual, Lang};
pub use page::{Page, PAGE_SIZE};
