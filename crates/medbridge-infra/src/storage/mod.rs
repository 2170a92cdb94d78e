//! Blob storage implementations.

pub mod filesystem;
