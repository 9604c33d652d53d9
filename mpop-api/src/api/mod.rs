//! HTTP API handlers for mpop-api

pub mod buildinfo;
pub mod codes;
pub mod combined;
pub mod health;

pub use buildinfo::get_build_info;
pub use codes::get_code_mappings;
pub use combined::get_combined_data;
pub use health::health_routes;
