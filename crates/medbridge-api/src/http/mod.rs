//! HTTP layer: router, handlers, error mapping and response bodies.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests;
