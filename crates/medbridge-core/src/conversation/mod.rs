//! Conversation persistence port.

pub mod repository;
