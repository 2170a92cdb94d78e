//! Shared domain types for Medbridge.
//!
//! This crate contains the types used across the Medbridge backend:
//! Conversation, Message, Sender, the AI provider taxonomy, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod ai;
pub mod config;
pub mod conversation;
pub mod error;
