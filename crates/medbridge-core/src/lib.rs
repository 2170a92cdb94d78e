//! Business logic and repository trait definitions for Medbridge.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the translation service that
//! orchestrates them. It depends only on `medbridge-types` -- never on
//! `medbridge-infra` or any database/network crate.

pub mod ai;
pub mod conversation;
pub mod storage;
pub mod testing;
