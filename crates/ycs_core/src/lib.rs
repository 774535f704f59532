pub mod config;
pub mod domain;
pub mod error;
pub mod net;
pub mod store;
pub mod summary;
