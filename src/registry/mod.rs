mod client;
pub mod models;
mod registry_error;

pub use client::{RegistryApi, RegistryClient};
pub use models::{ListPage, Record};
pub use registry_error::FetchError;
