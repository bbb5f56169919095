//! CatalogService: generic CRUD over the document store, driven by catalog schemas.

mod crud;
pub mod validation;
pub use crud::CatalogService;
pub use validation::RequestValidator;
