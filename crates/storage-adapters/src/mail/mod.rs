pub mod rest;

pub use rest::RestMailer;
