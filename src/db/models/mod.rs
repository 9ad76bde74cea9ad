//! Database models split into domain-specific modules.

pub mod article;
pub mod user;

pub use article::*;
pub use user::*;
