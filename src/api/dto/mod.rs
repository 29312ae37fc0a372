//! Data Transfer Objects for REST request/response serialization.

pub mod scan_dto;

pub use scan_dto::*;
