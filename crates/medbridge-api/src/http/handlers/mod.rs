//! HTTP request handlers for the REST API.

pub mod audio;
pub mod message;
pub mod search;
pub mod summary;
