//! AI provider abstractions for Medbridge.
//!
//! This module defines the capability interface over the two translation
//! backends:
//! - `AiProvider`: RPITIT trait for concrete provider implementations
//! - `BoxAiProvider`: object-safe wrapper for runtime provider selection
//! - `ProviderFactory`: per-call provider construction keyed on configuration
//! - `TranslationService`: short-circuits and delegation
//! - `prompt`: the shared prompt builders both providers feed the model

pub mod box_provider;
pub mod factory;
pub mod prompt;
pub mod provider;
pub mod service;
