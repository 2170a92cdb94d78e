//! Audio blob storage port.

pub mod audio_store;
