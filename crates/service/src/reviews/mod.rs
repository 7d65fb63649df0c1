//! Reviews module: ratings attached to services and their authors.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ReviewService;
