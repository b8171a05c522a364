//! # Quill Shared
//!
//! Types shared between the server and its clients: the request schemas
//! both ends validate against, response bodies, and the error body.

pub mod dto;
pub mod response;
pub mod schema;

pub use response::ErrorResponse;
pub use schema::{SchemaError, SchemaIssue};
