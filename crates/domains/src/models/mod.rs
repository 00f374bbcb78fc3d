//! # Domain Models
//!
//! These structs represent the core entities of Hromada. Identity is a
//! server-assigned UUID v4; timestamps are UTC.

pub mod chat;
pub mod content;
pub mod forum;
pub mod identity;
pub mod moderation;

pub use chat::*;
pub use content::*;
pub use forum::*;
pub use identity::*;
pub use moderation::*;
