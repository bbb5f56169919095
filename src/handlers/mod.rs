//! HTTP handlers for entity CRUD and catalog introspection.

pub mod catalog;
pub mod entity;
pub use catalog::*;
pub use entity::*;
