//! sea-orm entities for the `services` and `ratings` tables plus the
//! connection helpers used at startup.

pub mod errors;
pub mod db;
pub mod service;
pub mod rating;
