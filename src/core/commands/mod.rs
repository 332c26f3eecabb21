pub mod catalog;
pub mod router;

pub use catalog::{CatalogError, CategoryView, CommandCatalog, CommandEntry};
