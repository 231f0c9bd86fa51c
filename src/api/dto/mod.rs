//! Data Transfer Objects for REST request/response serialization.
//!
//! Record amounts stay JSON strings end to end; they are never parsed into
//! floats on the way through.

pub mod common_dto;
pub mod history_dto;

pub use common_dto::*;
pub use history_dto::*;
