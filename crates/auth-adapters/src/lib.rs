//! # auth-adapters
//!
//! Account credentials and sessions: argon2 password hashing, and (behind
//! `auth-jwt`) stateless JWT session tokens carrying the role claim that
//! moderation rights flow from.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;
#[cfg(feature = "auth-jwt")]
pub mod service;

#[cfg(feature = "auth-jwt")]
pub use service::{AuthService, Session};
