//! Catalog module: the public list of services and its admin mutations.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CatalogService;
