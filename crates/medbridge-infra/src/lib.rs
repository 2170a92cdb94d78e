//! Infrastructure layer for Medbridge.
//!
//! Contains implementations of the ports defined in `medbridge-core`:
//! SQLite persistence, the Gemini and OpenAI providers, the env-keyed
//! provider factory, filesystem audio storage, and config loading.

pub mod ai;
pub mod config;
pub mod sqlite;
pub mod storage;
