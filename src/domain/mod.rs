pub mod apartment;
pub mod summary;
